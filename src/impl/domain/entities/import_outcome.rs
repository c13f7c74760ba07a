use super::{
    anchor_index::{DayLabel, LayoutVariant, ReportPeriod},
    attendance_record::{AttendanceFlag, AttendanceRecord, EmployeeTotal},
    column_mapping::ColumnMapping,
    employee_pay::EmployeePay,
    hours_ledger_entry::HoursLedgerEntry,
};

/// Anomaly accumulated while processing a file. None of these stop an
/// import; they are reported together once the whole file is processed.
#[derive(Debug, Clone, PartialEq, serde_derive::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImportNote {
    PeriodUnresolved,
    BlankEmployeeId {
        row: usize,
    },
    /// Row of a column-mapped sheet without an employee id or a date.
    RowSkipped {
        row: usize,
    },
    RecordAnomaly {
        employee_id: String,
        date: DayLabel,
        flag: AttendanceFlag,
    },
    RosterMiss {
        employee_id: String,
    },
}

impl std::fmt::Display for ImportNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportNote::PeriodUnresolved => write!(
                f,
                "Report period not found; days are labeled by day-of-month only."
            ),
            ImportNote::BlankEmployeeId { row } => {
                write!(f, "Row {}: employee block without id skipped.", row + 1)
            }
            ImportNote::RowSkipped { row } => {
                write!(f, "Row {}: no employee id or date; row skipped.", row + 1)
            }
            ImportNote::RecordAnomaly {
                employee_id,
                date,
                flag,
            } => write!(f, "Employee {} on {}: {}.", employee_id, date, flag),
            ImportNote::RosterMiss { employee_id } => write!(
                f,
                "Employee {} is not in the roster; pay computed as $0.00.",
                employee_id
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde_derive::Serialize)]
pub struct ImportOutcome {
    /// `None` for pre-normalized and column-mapped imports, which skip
    /// layout detection.
    pub layout: Option<LayoutVariant>,
    /// Columns read by a column-mapped import.
    pub column_mapping: Option<ColumnMapping>,
    pub period: Option<ReportPeriod>,
    pub records: Vec<AttendanceRecord>,
    pub totals: Vec<EmployeeTotal>,
    pub pay: Vec<EmployeePay>,
    pub ledger_entries: Vec<HoursLedgerEntry>,
    pub notes: Vec<ImportNote>,
    /// Set once the ledger entries have been written.
    pub committed: bool,
}
