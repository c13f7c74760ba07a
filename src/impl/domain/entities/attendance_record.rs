use std::collections::BTreeSet;

use super::{anchor_index::DayLabel, punch::ClockTime};

/// Non-fatal observations attached to a record for manual review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde_derive::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceFlag {
    NoPunches,
    IncompleteShift,
    SecondShiftIncomplete,
    ExcessPunches,
    MalformedTimeToken,
    DateOutsidePeriod,
    UnresolvedDate,
}

impl std::fmt::Display for AttendanceFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceFlag::NoPunches => write!(f, "no punches"),
            AttendanceFlag::IncompleteShift => write!(f, "incomplete shift"),
            AttendanceFlag::SecondShiftIncomplete => write!(f, "second shift incomplete"),
            AttendanceFlag::ExcessPunches => write!(f, "more than 4 punches, extra ignored"),
            AttendanceFlag::MalformedTimeToken => write!(f, "malformed time ignored"),
            AttendanceFlag::DateOutsidePeriod => write!(f, "date outside report period"),
            AttendanceFlag::UnresolvedDate => write!(f, "calendar date unresolved"),
        }
    }
}

/// One employee on one day column of an attendance report.
#[derive(Debug, Clone, PartialEq, serde_derive::Serialize)]
pub struct AttendanceRecord {
    pub employee_id: String,
    pub employee_name: Option<String>,
    pub date: DayLabel,
    /// Every punch kept from the cell, including a lone punch that did not
    /// count towards worked time.
    pub punches: Vec<ClockTime>,
    pub worked_minutes: u32,
    pub expected_minutes: Option<u32>,
    pub shortfall_minutes: Option<u32>,
    pub flags: BTreeSet<AttendanceFlag>,
}

impl AttendanceRecord {
    pub fn worked_hours(&self) -> f64 {
        self.worked_minutes as f64 / 60.0
    }
}

/// Per-employee sum of worked minutes across a record list.
#[derive(Debug, Clone, PartialEq, serde_derive::Serialize)]
pub struct EmployeeTotal {
    pub employee_id: String,
    pub employee_name: Option<String>,
    pub worked_minutes: u32,
    pub days: usize,
}
