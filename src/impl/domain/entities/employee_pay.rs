/// Hours and pay for one employee over some set of ledger rows or records.
#[derive(Debug, Clone, PartialEq, serde_derive::Serialize)]
pub struct EmployeePay {
    pub employee_id: String,
    pub name: Option<String>,
    pub total_hours: f64,
    pub hourly_wage: Option<f64>,
    /// Zero when the employee is missing from the roster.
    pub total_pay: f64,
    /// Whether the employee id was found in the roster.
    pub matched: bool,
}
