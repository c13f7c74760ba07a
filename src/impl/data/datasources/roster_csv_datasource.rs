use std::{path::Path, str::FromStr as _};

use fractic_server_error::ServerError;

use crate::{
    data::{
        datasources::utils::{read_optional, write_atomically},
        models::{employee_id_model::EmployeeIdModel, hourly_wage_model::HourlyWageModel},
    },
    entities::Employee,
    errors::{InvalidCsv, ReadError, WriteError},
};

const HEADER: [&str; 3] = ["employee_id", "name", "hourly_wage"];

/// Employee roster CSV: `employee_id,name,hourly_wage`.
pub(crate) trait RosterCsvDatasource {
    fn from_string(&self, s: &str) -> Result<Vec<Employee>, ServerError>;

    fn to_string(&self, employees: &[Employee]) -> Result<String, ServerError>;

    /// A missing file is an empty roster.
    fn read_file(&self, path: &Path) -> Result<Vec<Employee>, ServerError>;

    fn write_file(&self, path: &Path, employees: &[Employee]) -> Result<(), ServerError>;
}

pub(crate) struct RosterCsvDatasourceImpl;

impl RosterCsvDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl RosterCsvDatasource for RosterCsvDatasourceImpl {
    fn from_string(&self, s: &str) -> Result<Vec<Employee>, ServerError> {
        csv::Reader::from_reader(s.as_bytes())
            .records()
            .map(|r| {
                r.map_err(|e| InvalidCsv::with_debug(&e)).and_then(|r| {
                    // Extract from CSV record.
                    let raw_id = r.get(0).unwrap_or("");
                    let raw_name = r.get(1).unwrap_or("");
                    let raw_wage = r.get(2).unwrap_or("0");

                    // Parse.
                    let employee_id = EmployeeIdModel::from_str(raw_id)?;
                    let hourly_wage = HourlyWageModel::from_str(raw_wage)?;

                    // Build.
                    Ok(Employee {
                        employee_id: employee_id.into(),
                        name: raw_name.trim().to_string(),
                        hourly_wage: hourly_wage.into(),
                    })
                })
            })
            .collect()
    }

    fn to_string(&self, employees: &[Employee]) -> Result<String, ServerError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(HEADER)
            .map_err(|e| InvalidCsv::with_debug(&e))?;
        for employee in employees {
            writer
                .write_record([
                    employee.employee_id.clone(),
                    employee.name.clone(),
                    employee.hourly_wage.to_string(),
                ])
                .map_err(|e| InvalidCsv::with_debug(&e))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| WriteError::with_debug("roster", &e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| InvalidCsv::with_debug(&e))
    }

    fn read_file(&self, path: &Path) -> Result<Vec<Employee>, ServerError> {
        match read_optional(path).map_err(|e| ReadError::with_debug(&e))? {
            Some(s) => self.from_string(&s),
            None => Ok(Vec::new()),
        }
    }

    fn write_file(&self, path: &Path, employees: &[Employee]) -> Result<(), ServerError> {
        write_atomically(path, self.to_string(employees)?.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empleados.csv");
        let datasource = RosterCsvDatasourceImpl::new();
        let employees = vec![Employee {
            employee_id: "7".to_string(),
            name: "Ana López, costura".to_string(),
            hourly_wage: 52.5,
        }];
        datasource.write_file(&path, &employees).unwrap();
        assert_eq!(datasource.read_file(&path).unwrap(), employees);
    }

    #[test]
    fn test_invalid_wage_is_rejected() {
        let result = RosterCsvDatasourceImpl::new().from_string("employee_id,name,hourly_wage\n7,Ana,-3\n");
        assert!(result.is_err());
    }
}
