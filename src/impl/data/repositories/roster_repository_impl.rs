use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use fractic_server_error::ServerError;

use crate::{
    data::datasources::roster_csv_datasource::{RosterCsvDatasource, RosterCsvDatasourceImpl},
    domain::repositories::roster_repository::RosterRepository,
    entities::{Employee, Roster},
};

/// Roster kept in a CSV file on disk.
pub struct RosterCsvRepository {
    path: PathBuf,
    datasource: RosterCsvDatasourceImpl,
}

impl RosterCsvRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            datasource: RosterCsvDatasourceImpl::new(),
        }
    }
}

impl RosterRepository for RosterCsvRepository {
    fn load(&self) -> Result<Roster, ServerError> {
        Ok(Roster {
            employees: self.datasource.read_file(&self.path)?,
        })
    }

    fn add(&self, employee: Employee) -> Result<(), ServerError> {
        let mut employees = self.datasource.read_file(&self.path)?;
        employees.push(employee);
        self.datasource.write_file(&self.path, &employees)
    }
}

#[derive(Default)]
pub struct InMemoryRoster {
    employees: Mutex<Vec<Employee>>,
}

impl InMemoryRoster {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self {
            employees: Mutex::new(employees),
        }
    }
}

impl RosterRepository for InMemoryRoster {
    fn load(&self) -> Result<Roster, ServerError> {
        Ok(Roster {
            employees: self
                .employees
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clone(),
        })
    }

    fn add(&self, employee: Employee) -> Result<(), ServerError> {
        self.employees
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(employee);
        Ok(())
    }
}
