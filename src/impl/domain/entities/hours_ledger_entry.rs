use super::{anchor_index::DayLabel, attendance_record::AttendanceRecord};

/// Normalized hours row consumed by payroll reporting. The ledger is
/// append-only; repeated (employee, date) rows are summed downstream.
#[derive(Debug, Clone, PartialEq, serde_derive::Serialize)]
pub struct HoursLedgerEntry {
    pub employee_id: String,
    pub date: DayLabel,
    pub hours_worked: f64,
}

impl From<&AttendanceRecord> for HoursLedgerEntry {
    fn from(record: &AttendanceRecord) -> Self {
        Self {
            employee_id: record.employee_id.clone(),
            date: record.date,
            hours_worked: record.worked_hours(),
        }
    }
}
