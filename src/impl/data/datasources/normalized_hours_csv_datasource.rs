use std::{fs, str::FromStr as _};

use fractic_server_error::ServerError;

use crate::{
    data::models::{
        employee_id_model::EmployeeIdModel, hours_amount_model::HoursAmountModel,
        iso_date_model::ISODateModel,
    },
    entities::{DayLabel, HoursLedgerEntry},
    errors::{InvalidCsv, InvalidCsvContent, ReadError},
};

/// Pre-normalized hours in the fixed column order `id, date, hours`. A
/// header row is optional and recognized by its non-date, non-numeric
/// date and hours fields.
pub(crate) trait NormalizedHoursCsvDatasource {
    fn from_string(&self, s: &str) -> Result<Vec<HoursLedgerEntry>, ServerError>;

    fn from_file<P>(&self, path: P) -> Result<Vec<HoursLedgerEntry>, ServerError>
    where
        P: AsRef<std::path::Path>;
}

pub(crate) struct NormalizedHoursCsvDatasourceImpl;

impl NormalizedHoursCsvDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl NormalizedHoursCsvDatasource for NormalizedHoursCsvDatasourceImpl {
    fn from_string(&self, s: &str) -> Result<Vec<HoursLedgerEntry>, ServerError> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(s.as_bytes())
            .records()
            .enumerate()
            .filter(|(i, r)| match r {
                Ok(r) if *i == 0 => !is_header(r),
                _ => true,
            })
            .map(|(i, r)| {
                r.map_err(|e| InvalidCsv::with_debug(&e)).and_then(|r| {
                    if r.len() < 3 {
                        return Err(InvalidCsvContent::new(&format!(
                            "row {} has {} columns, expected id, date, hours",
                            i + 1,
                            r.len()
                        )));
                    }

                    // Extract from CSV record.
                    let raw_id = r.get(0).unwrap_or("");
                    let raw_date = r.get(1).unwrap_or("");
                    let raw_hours = r.get(2).unwrap_or("");

                    // Parse.
                    let employee_id = EmployeeIdModel::from_str(raw_id)?;
                    let date = ISODateModel::from_str(raw_date)?;
                    let hours = HoursAmountModel::from_str(raw_hours)?;

                    // Build.
                    Ok(HoursLedgerEntry {
                        employee_id: employee_id.into(),
                        date: DayLabel::Date(date.into()),
                        hours_worked: hours.into(),
                    })
                })
            })
            .collect()
    }

    fn from_file<P>(&self, path: P) -> Result<Vec<HoursLedgerEntry>, ServerError>
    where
        P: AsRef<std::path::Path>,
    {
        self.from_string(&fs::read_to_string(path).map_err(|e| ReadError::with_debug(&e))?)
    }
}

fn is_header(r: &csv::StringRecord) -> bool {
    r.len() >= 3
        && ISODateModel::from_str(r.get(1).unwrap_or("")).is_err()
        && HoursAmountModel::from_str(r.get(2).unwrap_or("")).is_err()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_with_and_without_header() {
        let datasource = NormalizedHoursCsvDatasourceImpl::new();
        let with_header = datasource
            .from_string("id,fecha,horas\n7,2025-11-14,8.5\n9,2025-11-14,7\n")
            .unwrap();
        let without_header = datasource
            .from_string("7,2025-11-14,8.5\n9,2025-11-14,7\n")
            .unwrap();
        assert_eq!(with_header, without_header);
        assert_eq!(with_header.len(), 2);
        assert_eq!(
            with_header[0],
            HoursLedgerEntry {
                employee_id: "7".to_string(),
                date: DayLabel::Date(NaiveDate::from_ymd_opt(2025, 11, 14).unwrap()),
                hours_worked: 8.5,
            }
        );
    }

    #[test]
    fn test_bad_rows_reject_the_file() {
        let datasource = NormalizedHoursCsvDatasourceImpl::new();
        assert!(datasource.from_string("7,14/11/2025,8\n").is_err());
        assert!(datasource.from_string("7,2025-11-14,8\n9,2025-11-15,x\n").is_err());
        assert!(datasource.from_string("7,2025-11-14\n").is_err());
    }
}
