use std::{fs, io::Cursor};

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use fractic_server_error::ServerError;
use tracing::debug;

use crate::{
    entities::{CellValue, RawGrid},
    errors::{ReadError, SheetNotFound, WorkbookOpenError},
};

/// Reads one worksheet of an `.xls`/`.xlsx` attendance export into a raw
/// grid. Cell positions match the sheet (row 0 is the sheet's first row).
pub(crate) trait AttendanceWorkbookDatasource {
    fn from_bytes(&self, bytes: &[u8], sheet_name: Option<&str>) -> Result<RawGrid, ServerError>;

    fn from_file<P>(&self, path: P, sheet_name: Option<&str>) -> Result<RawGrid, ServerError>
    where
        P: AsRef<std::path::Path>;
}

pub(crate) struct AttendanceWorkbookDatasourceImpl;

impl AttendanceWorkbookDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl AttendanceWorkbookDatasource for AttendanceWorkbookDatasourceImpl {
    fn from_bytes(&self, bytes: &[u8], sheet_name: Option<&str>) -> Result<RawGrid, ServerError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|e| WorkbookOpenError::with_debug(&e))?;

        let sheet_names = workbook.sheet_names();
        let sheet = match sheet_name {
            // Match loosely; exports differ in case and padding.
            Some(wanted) => sheet_names
                .iter()
                .find(|s| s.trim().eq_ignore_ascii_case(wanted.trim()))
                .cloned()
                .ok_or_else(|| SheetNotFound::new(wanted))?,
            None => sheet_names
                .first()
                .cloned()
                .ok_or_else(|| SheetNotFound::new("(first sheet)"))?,
        };
        debug!(sheet = %sheet, available = ?sheet_names, "reading attendance worksheet");

        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| WorkbookOpenError::with_debug(&e))?;
        Ok(grid_from_range(&range))
    }

    fn from_file<P>(&self, path: P, sheet_name: Option<&str>) -> Result<RawGrid, ServerError>
    where
        P: AsRef<std::path::Path>,
    {
        self.from_bytes(
            &fs::read(path).map_err(|e| ReadError::with_debug(&e))?,
            sheet_name,
        )
    }
}

fn grid_from_range(range: &Range<Data>) -> RawGrid {
    // Ranges start at the first used cell; pad so indices match the sheet.
    let (first_row, first_col) = range.start().unwrap_or((0, 0));
    let padding = std::iter::repeat(Vec::new()).take(first_row as usize);
    let rows = range.rows().map(|row| {
        std::iter::repeat(CellValue::Empty)
            .take(first_col as usize)
            .chain(row.iter().map(cell_value))
            .collect()
    });
    RawGrid::new(padding.chain(rows).collect())
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
    }
}
