use chrono::NaiveDate;
use serde::Serialize;

/// Known arrangements of the attendance report. Variants are tried in the
/// order of [`LayoutVariant::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde_derive::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutVariant {
    /// "ID:" / "Nombre:" label-value pairs on one row, punches on the row
    /// below.
    InlineLabels,
    /// One header row naming an "ID" column (and optionally a name column)
    /// followed by day-of-month columns; one employee per following row.
    HeaderTable,
}

impl LayoutVariant {
    pub const ALL: [LayoutVariant; 2] = [LayoutVariant::InlineLabels, LayoutVariant::HeaderTable];

    /// Rows between an employee anchor and the row holding its punch cells.
    pub fn data_row_offset(self) -> usize {
        match self {
            LayoutVariant::InlineLabels => 1,
            LayoutVariant::HeaderTable => 0,
        }
    }
}

impl std::fmt::Display for LayoutVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutVariant::InlineLabels => write!(f, "inline labels"),
            LayoutVariant::HeaderTable => write!(f, "header table"),
        }
    }
}

/// Reporting period stated in the report (inclusive on both ends).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde_derive::Serialize)]
pub struct ReportPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportPeriod {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl std::fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ~ {}", self.start, self.end)
    }
}

/// Calendar label of a day column. Falls back to the bare day-of-month
/// when no calendar date could be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DayLabel {
    Date(NaiveDate),
    DayOfMonth(u32),
}

impl DayLabel {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            DayLabel::Date(d) => Some(*d),
            DayLabel::DayOfMonth(_) => None,
        }
    }
}

impl std::fmt::Display for DayLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayLabel::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            DayLabel::DayOfMonth(n) => write!(f, "{}", n),
        }
    }
}

impl Serialize for DayLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How a day column's label relates to the report period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde_derive::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayResolution {
    InPeriod,
    OutsidePeriod,
    Unresolved,
}

#[derive(Debug, Clone, PartialEq, serde_derive::Serialize)]
pub struct DayColumn {
    pub column: usize,
    pub day_of_month: u32,
    pub label: DayLabel,
    pub resolution: DayResolution,
}

/// Day columns shared by every employee block of one report.
#[derive(Debug, Clone, PartialEq, serde_derive::Serialize)]
pub struct DayColumnMap {
    pub header_row: usize,
    pub columns: Vec<DayColumn>,
}

#[derive(Debug, Clone, PartialEq, serde_derive::Serialize)]
pub struct EmployeeBlock {
    pub anchor_row: usize,
    pub data_row: usize,
    /// `None` when the id cell is blank; such blocks produce no records.
    pub employee_id: Option<String>,
    pub employee_name: Option<String>,
}

/// Where the data lives in a report. Built once per file by the layout
/// locator and consumed read-only by the extraction engine.
#[derive(Debug, Clone, PartialEq, serde_derive::Serialize)]
pub struct AnchorIndex {
    pub variant: LayoutVariant,
    pub period: Option<ReportPeriod>,
    pub days: DayColumnMap,
    pub blocks: Vec<EmployeeBlock>,
}

/// Why a report's structure could not be recognized. Ordered by how far
/// the search got, so the most informative failure can be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LocateFailure {
    EmptyGrid,
    NoDayHeaderRow,
    NoEmployeeAnchors,
}

impl std::fmt::Display for LocateFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocateFailure::EmptyGrid => write!(f, "the sheet is empty"),
            LocateFailure::NoDayHeaderRow => write!(
                f,
                "no row with day-of-month column headers (at least 3 numbers between 1 and 31) was found"
            ),
            LocateFailure::NoEmployeeAnchors => {
                write!(f, "no employee 'ID:' markers or 'ID' column header were found")
            }
        }
    }
}
