use chrono::NaiveDate;

use super::employee_pay::EmployeePay;

#[derive(Debug, Clone, PartialEq, serde_derive::Serialize)]
pub struct PayrollDetail {
    pub employee_id: String,
    pub name: Option<String>,
    pub date: NaiveDate,
    /// Rounded to two decimals.
    pub hours: f64,
}

/// Payroll over an inclusive date range.
#[derive(Debug, Clone, PartialEq, serde_derive::Serialize)]
pub struct PayrollReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub rows: Vec<EmployeePay>,
    pub details: Vec<PayrollDetail>,
    /// Ledger rows whose date never resolved to a calendar date and could
    /// therefore not be placed in the range.
    pub undated_entries: usize,
}

impl PayrollReport {
    pub fn total_pay(&self) -> f64 {
        self.rows.iter().map(|r| r.total_pay).sum()
    }

    pub fn total_hours(&self) -> f64 {
        self.rows.iter().map(|r| r.total_hours).sum()
    }
}
