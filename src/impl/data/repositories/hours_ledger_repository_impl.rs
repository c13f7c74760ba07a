use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use fractic_server_error::ServerError;
use tracing::info;

use crate::{
    data::datasources::hours_ledger_csv_datasource::{
        HoursLedgerCsvDatasource, HoursLedgerCsvDatasourceImpl,
    },
    domain::repositories::hours_ledger_repository::HoursLedgerRepository,
    entities::HoursLedgerEntry,
};

/// Ledger kept in a CSV file on disk.
pub struct HoursLedgerCsvRepository {
    path: PathBuf,
    datasource: HoursLedgerCsvDatasourceImpl,
}

impl HoursLedgerCsvRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            datasource: HoursLedgerCsvDatasourceImpl::new(),
        }
    }
}

impl HoursLedgerRepository for HoursLedgerCsvRepository {
    fn read_all(&self) -> Result<Vec<HoursLedgerEntry>, ServerError> {
        self.datasource.read_file(&self.path)
    }

    fn append(&self, entries: &[HoursLedgerEntry]) -> Result<(), ServerError> {
        self.datasource.append_file(&self.path, entries)?;
        info!(path = %self.path.display(), rows = entries.len(), "hours ledger appended");
        Ok(())
    }
}

/// Ledger held in memory, for embedding and tests.
#[derive(Default)]
pub struct InMemoryHoursLedger {
    entries: Mutex<Vec<HoursLedgerEntry>>,
}

impl InMemoryHoursLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<HoursLedgerEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }
}

impl HoursLedgerRepository for InMemoryHoursLedger {
    fn read_all(&self) -> Result<Vec<HoursLedgerEntry>, ServerError> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn append(&self, entries: &[HoursLedgerEntry]) -> Result<(), ServerError> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .extend_from_slice(entries);
        Ok(())
    }
}
