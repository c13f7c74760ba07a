use std::path::Path;

use fractic_server_error::ServerError;

use crate::entities::{AttendanceFormat, HoursLedgerEntry, RawGrid};

pub trait AttendanceSourceRepository {
    /// Raw report grid; the format is chosen from the file extension.
    fn grid_from_file(&self, path: &Path) -> Result<RawGrid, ServerError>;

    fn grid_from_bytes(&self, bytes: &[u8], format: AttendanceFormat)
        -> Result<RawGrid, ServerError>;

    /// Like `grid_from_file`, reading the named worksheet (`None` is the
    /// first sheet) instead of the configured one.
    fn sheet_from_file(&self, path: &Path, sheet_name: Option<&str>)
        -> Result<RawGrid, ServerError>;

    fn sheet_from_bytes(
        &self,
        bytes: &[u8],
        format: AttendanceFormat,
        sheet_name: Option<&str>,
    ) -> Result<RawGrid, ServerError>;

    /// Pre-normalized `id, date, hours` rows.
    fn normalized_from_file(&self, path: &Path) -> Result<Vec<HoursLedgerEntry>, ServerError>;

    fn normalized_from_string(&self, s: &str) -> Result<Vec<HoursLedgerEntry>, ServerError>;
}
