use std::str::FromStr;

use chrono::NaiveDate;
use fractic_server_error::ServerError;
use tracing::info;

use crate::{
    data::models::{
        employee_id_model::EmployeeIdModel, hours_amount_model::HoursAmountModel,
        iso_date_model::ISODateModel,
    },
    domain::{
        logic::{pay_processor::PayProcessor, utils::compare_employee_ids},
        repositories::{
            hours_ledger_repository::HoursLedgerRepository, roster_repository::RosterRepository,
        },
    },
    entities::{DayLabel, Employee, HoursLedgerEntry, PayrollReport},
    errors::{
        DuplicateEmployee, EmptyEmployeeName, InvalidDateRange, InvalidEmployeeId,
        InvalidHourlyWage, InvalidHoursAmount, UnknownEmployee,
    },
};

/// Most hours a single manual entry may record.
const MAX_MANUAL_HOURS: f64 = 24.0;

/// Payroll over the accumulated ledger, plus roster maintenance.
pub trait PayrollUsecase {
    fn report(&self, from: NaiveDate, to: NaiveDate) -> Result<PayrollReport, ServerError>;

    /// Roster sorted by employee id.
    fn employees(&self) -> Result<Vec<Employee>, ServerError>;

    fn add_employee(
        &self,
        employee_id: &str,
        name: &str,
        hourly_wage: f64,
    ) -> Result<Employee, ServerError>;

    /// Appends one manually entered ledger row for a rostered employee.
    fn record_hours(
        &self,
        employee_id: &str,
        date: &str,
        hours: &str,
    ) -> Result<HoursLedgerEntry, ServerError>;
}

pub(crate) struct PayrollUsecaseImpl<'a, L, R>
where
    L: HoursLedgerRepository,
    R: RosterRepository,
{
    ledger: &'a L,
    roster: &'a R,
}

impl<'a, L, R> PayrollUsecaseImpl<'a, L, R>
where
    L: HoursLedgerRepository,
    R: RosterRepository,
{
    pub(crate) fn new(ledger: &'a L, roster: &'a R) -> Self {
        Self { ledger, roster }
    }
}

impl<'a, L, R> PayrollUsecase for PayrollUsecaseImpl<'a, L, R>
where
    L: HoursLedgerRepository,
    R: RosterRepository,
{
    fn report(&self, from: NaiveDate, to: NaiveDate) -> Result<PayrollReport, ServerError> {
        if from > to {
            return Err(InvalidDateRange::new(&from.to_string(), &to.to_string()));
        }
        let entries = self.ledger.read_all()?;
        let roster = self.roster.load()?;
        let report = PayProcessor::new(&roster).payroll(&entries, from, to);
        info!(
            %from,
            %to,
            employees = report.rows.len(),
            undated = report.undated_entries,
            "payroll computed"
        );
        Ok(report)
    }

    fn employees(&self) -> Result<Vec<Employee>, ServerError> {
        let mut employees = self.roster.load()?.employees;
        employees.sort_by(|a, b| compare_employee_ids(&a.employee_id, &b.employee_id));
        Ok(employees)
    }

    fn add_employee(
        &self,
        employee_id: &str,
        name: &str,
        hourly_wage: f64,
    ) -> Result<Employee, ServerError> {
        let employee_id: String = EmployeeIdModel::from_str(employee_id)?.into();
        let name = name.trim();
        if employee_id.contains(char::is_whitespace) {
            return Err(InvalidEmployeeId::new(&employee_id));
        }
        if name.is_empty() {
            return Err(EmptyEmployeeName::new());
        }
        if !hourly_wage.is_finite() || hourly_wage < 0.0 {
            return Err(InvalidHourlyWage::new(&hourly_wage.to_string()));
        }
        if self.roster.load()?.lookup(&employee_id).is_some() {
            return Err(DuplicateEmployee::new(&employee_id));
        }

        let employee = Employee {
            employee_id,
            name: name.to_string(),
            hourly_wage,
        };
        self.roster.add(employee.clone())?;
        info!(employee_id = %employee.employee_id, "employee added to roster");
        Ok(employee)
    }

    fn record_hours(
        &self,
        employee_id: &str,
        date: &str,
        hours: &str,
    ) -> Result<HoursLedgerEntry, ServerError> {
        let employee_id: String = EmployeeIdModel::from_str(employee_id)?.into();
        let date: NaiveDate = ISODateModel::from_str(date)?.into();
        let hours_worked: f64 = HoursAmountModel::from_str(hours)?.into();
        if hours_worked > MAX_MANUAL_HOURS {
            return Err(InvalidHoursAmount::new(hours));
        }
        if self.roster.load()?.lookup(&employee_id).is_none() {
            return Err(UnknownEmployee::new(&employee_id));
        }

        let entry = HoursLedgerEntry {
            employee_id,
            date: DayLabel::Date(date),
            hours_worked,
        };
        self.ledger.append(std::slice::from_ref(&entry))?;
        info!(
            employee_id = %entry.employee_id,
            %date,
            hours = hours_worked,
            "hours recorded"
        );
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::repositories::{
            hours_ledger_repository_impl::InMemoryHoursLedger,
            roster_repository_impl::InMemoryRoster,
        },
        domain::repositories::{
            hours_ledger_repository::HoursLedgerRepository, roster_repository::RosterRepository,
        },
    };

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(id: &str, date: DayLabel, hours: f64) -> HoursLedgerEntry {
        HoursLedgerEntry {
            employee_id: id.to_string(),
            date,
            hours_worked: hours,
        }
    }

    fn employee(id: &str, name: &str, wage: f64) -> Employee {
        Employee {
            employee_id: id.to_string(),
            name: name.to_string(),
            hourly_wage: wage,
        }
    }

    #[test]
    fn test_report_over_range() {
        let ledger = InMemoryHoursLedger::with_entries(vec![
            entry("10", DayLabel::Date(d("2025-11-17")), 8.0),
            entry("2", DayLabel::Date(d("2025-11-17")), 9.5),
            entry("10", DayLabel::Date(d("2025-11-17")), 1.0),
            entry("10", DayLabel::Date(d("2025-11-24")), 8.0),
            entry("2", DayLabel::DayOfMonth(18), 8.0),
        ]);
        let roster = InMemoryRoster::new(vec![employee("10", "Rosa", 40.0)]);
        let report = PayrollUsecaseImpl::new(&ledger, &roster)
            .report(d("2025-11-17"), d("2025-11-23"))
            .unwrap();

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].employee_id, "2");
        assert!(!report.rows[0].matched);
        assert_eq!(report.rows[0].total_pay, 0.0);
        assert_eq!(report.rows[1].total_hours, 9.0);
        assert_eq!(report.rows[1].total_pay, 360.0);
        assert_eq!(report.undated_entries, 1);
        assert_eq!(report.total_pay(), 360.0);
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let ledger = InMemoryHoursLedger::new();
        let roster = InMemoryRoster::default();
        assert!(PayrollUsecaseImpl::new(&ledger, &roster)
            .report(d("2025-11-23"), d("2025-11-17"))
            .is_err());
    }

    #[test]
    fn test_add_employee_validates_and_rejects_duplicates() {
        let ledger = InMemoryHoursLedger::new();
        let roster = InMemoryRoster::new(vec![employee("10", "Rosa", 40.0)]);
        let usecase = PayrollUsecaseImpl::new(&ledger, &roster);

        let added = usecase.add_employee(" 3 ", " Juan López ", 45.5).unwrap();
        assert_eq!(added, employee("3", "Juan López", 45.5));

        assert!(usecase.add_employee("10", "Otra", 40.0).is_err());
        assert!(usecase.add_employee("", "Nadie", 40.0).is_err());
        assert!(usecase.add_employee("11", "   ", 40.0).is_err());
        assert!(usecase.add_employee("11", "Luis", -1.0).is_err());
        assert!(usecase.add_employee("11", "Luis", f64::NAN).is_err());

        let ids: Vec<String> = usecase
            .employees()
            .unwrap()
            .into_iter()
            .map(|e| e.employee_id)
            .collect();
        assert_eq!(ids, vec!["3", "10"]);
    }

    #[test]
    fn test_add_employee_normalizes_id_before_duplicate_check() {
        let ledger = InMemoryHoursLedger::new();
        let roster = InMemoryRoster::default();
        let usecase = PayrollUsecaseImpl::new(&ledger, &roster);

        assert_eq!(usecase.add_employee("12.0", "Rosa", 40.0).unwrap().employee_id, "12");
        assert!(usecase.add_employee("12", "Rosa", 40.0).is_err());
        assert!(usecase.add_employee(" 12.0 ", "Rosa", 40.0).is_err());
        assert_eq!(roster.load().unwrap().employees, vec![employee("12", "Rosa", 40.0)]);
    }

    #[test]
    fn test_record_hours_appends_to_ledger() {
        let ledger = InMemoryHoursLedger::new();
        let roster = InMemoryRoster::new(vec![employee("7", "Ana", 50.0)]);
        let usecase = PayrollUsecaseImpl::new(&ledger, &roster);

        let recorded = usecase.record_hours("7.0", "2025-11-17", "7,5").unwrap();
        assert_eq!(recorded, entry("7", DayLabel::Date(d("2025-11-17")), 7.5));
        assert_eq!(ledger.read_all().unwrap(), vec![recorded]);

        let report = usecase.report(d("2025-11-17"), d("2025-11-23")).unwrap();
        assert_eq!(report.rows[0].total_pay, 375.0);
    }

    #[test]
    fn test_record_hours_rejects_invalid_input() {
        let ledger = InMemoryHoursLedger::new();
        let roster = InMemoryRoster::new(vec![employee("7", "Ana", 50.0)]);
        let usecase = PayrollUsecaseImpl::new(&ledger, &roster);

        assert!(usecase.record_hours("", "2025-11-17", "8").is_err());
        assert!(usecase.record_hours("8", "2025-11-17", "8").is_err());
        assert!(usecase.record_hours("7", "17/11/2025", "8").is_err());
        assert!(usecase.record_hours("7", "2025-11-17", "-1").is_err());
        assert!(usecase.record_hours("7", "2025-11-17", "25").is_err());
        assert!(usecase.record_hours("7", "2025-11-17", "ocho").is_err());
        assert!(ledger.read_all().unwrap().is_empty());
    }
}
