use std::fs;

use fractic_server_error::ServerError;

use crate::{
    entities::{CellValue, RawGrid},
    errors::{InvalidCsv, ReadError},
};

/// Reads an attendance report saved as CSV. No header row and no typing is
/// assumed: every non-empty field becomes a text cell.
pub(crate) trait ReportCsvDatasource {
    fn from_bytes(&self, bytes: &[u8]) -> Result<RawGrid, ServerError>;

    fn from_file<P>(&self, path: P) -> Result<RawGrid, ServerError>
    where
        P: AsRef<std::path::Path>;
}

pub(crate) struct ReportCsvDatasourceImpl;

impl ReportCsvDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl ReportCsvDatasource for ReportCsvDatasourceImpl {
    fn from_bytes(&self, bytes: &[u8]) -> Result<RawGrid, ServerError> {
        let rows = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes)
            .byte_records()
            .map(|r| {
                r.map_err(|e| InvalidCsv::with_debug(&e)).map(|r| {
                    // Terminal exports are not always UTF-8.
                    r.iter()
                        .map(|field| CellValue::text(String::from_utf8_lossy(field)))
                        .collect()
                })
            })
            .collect::<Result<Vec<Vec<CellValue>>, ServerError>>()?;
        Ok(RawGrid::new(rows))
    }

    fn from_file<P>(&self, path: P) -> Result<RawGrid, ServerError>
    where
        P: AsRef<std::path::Path>,
    {
        self.from_bytes(&fs::read(path).map_err(|e| ReadError::with_debug(&e))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_rows_and_quoted_newlines() {
        let csv = "Reporte,,\n,14,15\nID:,7\n,\"08:03\n13:58\",\n";
        let grid = ReportCsvDatasourceImpl::new().from_bytes(csv.as_bytes()).unwrap();
        assert_eq!(grid.row_count(), 4);
        assert_eq!(grid.get(2, 0), &CellValue::text("ID:"));
        assert_eq!(grid.get(3, 1), &CellValue::text("08:03\n13:58"));
        assert_eq!(grid.get(3, 2), &CellValue::Empty);
    }
}
