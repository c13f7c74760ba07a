use fractic_server_error::ServerError;

use crate::entities::HoursLedgerEntry;

/// Append-only store of normalized hours rows.
pub trait HoursLedgerRepository {
    fn read_all(&self) -> Result<Vec<HoursLedgerEntry>, ServerError>;

    /// Adds all rows or none of them.
    fn append(&self, entries: &[HoursLedgerEntry]) -> Result<(), ServerError>;
}
