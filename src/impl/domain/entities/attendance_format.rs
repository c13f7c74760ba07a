/// Kind of attendance file, decided from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceFormat {
    /// Binary spreadsheet (`.xls`, `.xlsx`, `.xlsm`, `.xlsb`, `.ods`).
    Workbook,
    /// Report saved as delimited text.
    Csv,
}

impl AttendanceFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "xls" | "xlsx" | "xlsm" | "xlsb" | "ods" => Some(AttendanceFormat::Workbook),
            "csv" | "txt" => Some(AttendanceFormat::Csv),
            _ => None,
        }
    }
}
