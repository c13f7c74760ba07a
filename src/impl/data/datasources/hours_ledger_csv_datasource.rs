use std::{path::Path, str::FromStr as _};

use fractic_server_error::ServerError;

use crate::{
    data::{
        datasources::utils::{read_optional, write_atomically},
        models::{
            day_label_model::DayLabelModel, employee_id_model::EmployeeIdModel,
            hours_amount_model::HoursAmountModel,
        },
    },
    entities::HoursLedgerEntry,
    errors::{InvalidCsv, ReadError, WriteError},
};

const HEADER: [&str; 3] = ["employee_id", "date", "hours_worked"];

/// Flat CSV hours ledger: `employee_id,date,hours_worked`.
pub(crate) trait HoursLedgerCsvDatasource {
    fn from_string(&self, s: &str) -> Result<Vec<HoursLedgerEntry>, ServerError>;

    fn to_string(&self, entries: &[HoursLedgerEntry]) -> Result<String, ServerError>;

    /// A missing file is an empty ledger.
    fn read_file(&self, path: &Path) -> Result<Vec<HoursLedgerEntry>, ServerError>;

    /// Appends rows, rewriting the file atomically.
    fn append_file(&self, path: &Path, entries: &[HoursLedgerEntry]) -> Result<(), ServerError>;
}

pub(crate) struct HoursLedgerCsvDatasourceImpl;

impl HoursLedgerCsvDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl HoursLedgerCsvDatasource for HoursLedgerCsvDatasourceImpl {
    fn from_string(&self, s: &str) -> Result<Vec<HoursLedgerEntry>, ServerError> {
        csv::Reader::from_reader(s.as_bytes())
            .records()
            .map(|r| {
                r.map_err(|e| InvalidCsv::with_debug(&e)).and_then(|r| {
                    // Extract from CSV record.
                    let raw_id = r.get(0).unwrap_or("");
                    let raw_date = r.get(1).unwrap_or("");
                    let raw_hours = r.get(2).unwrap_or("");

                    // Parse.
                    let employee_id = EmployeeIdModel::from_str(raw_id)?;
                    let date = DayLabelModel::from_str(raw_date)?;
                    let hours = HoursAmountModel::from_str(raw_hours)?;

                    // Build.
                    Ok(HoursLedgerEntry {
                        employee_id: employee_id.into(),
                        date: date.into(),
                        hours_worked: hours.into(),
                    })
                })
            })
            .collect()
    }

    fn to_string(&self, entries: &[HoursLedgerEntry]) -> Result<String, ServerError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(HEADER)
            .map_err(|e| InvalidCsv::with_debug(&e))?;
        for entry in entries {
            writer
                .write_record([
                    entry.employee_id.clone(),
                    entry.date.to_string(),
                    entry.hours_worked.to_string(),
                ])
                .map_err(|e| InvalidCsv::with_debug(&e))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| WriteError::with_debug("ledger", &e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| InvalidCsv::with_debug(&e))
    }

    fn read_file(&self, path: &Path) -> Result<Vec<HoursLedgerEntry>, ServerError> {
        match read_optional(path).map_err(|e| ReadError::with_debug(&e))? {
            Some(s) => self.from_string(&s),
            None => Ok(Vec::new()),
        }
    }

    fn append_file(&self, path: &Path, entries: &[HoursLedgerEntry]) -> Result<(), ServerError> {
        let mut all = self.read_file(path)?;
        all.extend_from_slice(entries);
        write_atomically(path, self.to_string(&all)?.as_bytes())
    }
}
