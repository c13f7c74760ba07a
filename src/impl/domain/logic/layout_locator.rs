use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use tracing::{debug, info};

use crate::entities::{
    AnchorIndex, CellValue, DayColumn, DayColumnMap, DayLabel, DayResolution, EmployeeBlock,
    LayoutVariant, LocateFailure, RawGrid, ReportPeriod,
};

/// A row needs at least this many day-of-month numbers to count as the
/// day header row.
const MIN_DAY_HEADERS: usize = 3;

const INLINE_ID_MARKER: &str = "ID:";
const TABLE_ID_HEADER: &str = "ID";
const NAME_MARKERS: [&str; 2] = ["NOMBRE", "NAME"];

static PERIOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"([0-9]{4})[-/]([0-9]{1,2})[-/]([0-9]{1,2})\s*(?:~|–|—|-|a|al|to|hasta)\s*([0-9]{4})[-/]([0-9]{1,2})[-/]([0-9]{1,2})",
    )
    .expect("hardcoded regex should be valid")
});

/// Finds the structural anchors of an attendance report: the stated
/// period, the day header row and every employee block. Layout variants
/// are tried in order and the first complete match wins.
pub struct LayoutLocator<'a> {
    grid: &'a RawGrid,
}

impl<'a> LayoutLocator<'a> {
    pub fn new(grid: &'a RawGrid) -> Self {
        Self { grid }
    }

    pub fn locate(&self) -> Result<AnchorIndex, LocateFailure> {
        if self.grid.is_empty() {
            return Err(LocateFailure::EmptyGrid);
        }

        let period = self.find_period();
        let mut failure = LocateFailure::EmptyGrid;
        for variant in LayoutVariant::ALL {
            let attempt = match variant {
                LayoutVariant::InlineLabels => self.locate_inline(period),
                LayoutVariant::HeaderTable => self.locate_table(period),
            };
            match attempt {
                Ok(index) => {
                    info!(
                        layout = %variant,
                        period = ?index.period,
                        day_columns = index.days.columns.len(),
                        employee_blocks = index.blocks.len(),
                        "attendance report layout recognized"
                    );
                    return Ok(index);
                }
                Err(f) => {
                    debug!(layout = %variant, reason = %f, "layout variant did not match");
                    failure = failure.max(f);
                }
            }
        }
        Err(failure)
    }

    /// First text cell holding a date range, scanning row by row.
    fn find_period(&self) -> Option<ReportPeriod> {
        self.grid
            .rows()
            .flat_map(|(_, row)| row.iter())
            .filter_map(CellValue::as_text)
            .flat_map(|text| PERIOD.captures_iter(text))
            .find_map(|caps| {
                let date = |i: usize| {
                    NaiveDate::from_ymd_opt(
                        caps[i].parse().ok()?,
                        caps[i + 1].parse().ok()?,
                        caps[i + 2].parse().ok()?,
                    )
                };
                let (start, end) = (date(1)?, date(4)?);
                (start <= end).then_some(ReportPeriod { start, end })
            })
    }

    fn locate_inline(&self, period: Option<ReportPeriod>) -> Result<AnchorIndex, LocateFailure> {
        let header_row = self
            .grid
            .rows()
            .find(|(_, row)| day_numbers(row, &[]).len() >= MIN_DAY_HEADERS)
            .map(|(r, _)| r)
            .ok_or(LocateFailure::NoDayHeaderRow)?;

        let offset = LayoutVariant::InlineLabels.data_row_offset();
        let mut blocks = Vec::new();
        for (r, row) in self.grid.rows() {
            let id_columns: Vec<usize> = row
                .iter()
                .enumerate()
                .filter(|(_, cell)| is_inline_id_marker(cell))
                .map(|(c, _)| c)
                .collect();
            for (i, &c) in id_columns.iter().enumerate() {
                let next_id = id_columns.get(i + 1).copied().unwrap_or(row.len());
                let id_cell = self.grid.get(r, c + 1);
                blocks.push(EmployeeBlock {
                    anchor_row: r,
                    data_row: r + offset,
                    employee_id: (!is_marker(id_cell)).then(|| id_cell.display_value()).flatten(),
                    employee_name: self.inline_name(r, c, next_id),
                });
            }
        }
        if blocks.is_empty() {
            return Err(LocateFailure::NoEmployeeAnchors);
        }

        Ok(AnchorIndex {
            variant: LayoutVariant::InlineLabels,
            period,
            days: DayColumnMap {
                header_row,
                columns: resolve_days(period, &day_numbers(self.grid.row(header_row), &[])),
            },
            blocks,
        })
    }

    /// Name for the "ID:" marker at `id_column`: a name marker between this
    /// marker and the next one wins, otherwise the first one on the row.
    fn inline_name(&self, row: usize, id_column: usize, next_id_column: usize) -> Option<String> {
        let cells = self.grid.row(row);
        let name_columns: Vec<usize> = cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| is_name_marker(cell))
            .map(|(c, _)| c)
            .collect();
        let marker = name_columns
            .iter()
            .find(|&&c| c > id_column && c < next_id_column)
            .or_else(|| name_columns.first())?;

        // Name value usually sits two cells after its marker (merged label
        // cell); accept the adjacent cell as well.
        [marker + 2, marker + 1]
            .into_iter()
            .map(|c| self.grid.get(row, c))
            .filter(|cell| !is_marker(cell))
            .find_map(CellValue::display_value)
    }

    fn locate_table(&self, period: Option<ReportPeriod>) -> Result<AnchorIndex, LocateFailure> {
        let Some((header_row, id_column)) = self.grid.rows().find_map(|(r, row)| {
            row.iter()
                .position(|cell| cell.marker().as_deref() == Some(TABLE_ID_HEADER))
                .map(|c| (r, c))
        }) else {
            // No header at all; report whether a day header exists anywhere.
            let has_days = self
                .grid
                .rows()
                .any(|(_, row)| day_numbers(row, &[]).len() >= MIN_DAY_HEADERS);
            return Err(if has_days {
                LocateFailure::NoEmployeeAnchors
            } else {
                LocateFailure::NoDayHeaderRow
            });
        };

        let header = self.grid.row(header_row);
        let name_column = header.iter().position(is_name_marker);
        let skip: Vec<usize> = std::iter::once(id_column).chain(name_column).collect();
        let days = day_numbers(header, &skip);
        if days.len() < MIN_DAY_HEADERS {
            return Err(LocateFailure::NoDayHeaderRow);
        }

        let offset = LayoutVariant::HeaderTable.data_row_offset();
        let mut blocks = Vec::new();
        for (r, row) in self.grid.rows().skip(header_row + 1) {
            if row.iter().all(CellValue::is_blank) {
                continue;
            }
            let employee_id = self.grid.get(r, id_column).display_value();
            match &employee_id {
                // Footer rows ("Total", "Firma") close the table.
                Some(label) if !is_id_like(label) => {
                    debug!(row = r, label = %label, "employee table ends");
                    break;
                }
                None if days.iter().all(|&(c, _)| self.grid.get(r, c).is_blank()) => continue,
                _ => {}
            }
            blocks.push(EmployeeBlock {
                anchor_row: r,
                data_row: r + offset,
                employee_id,
                employee_name: name_column.and_then(|c| self.grid.get(r, c).display_value()),
            });
        }
        if blocks.is_empty() {
            return Err(LocateFailure::NoEmployeeAnchors);
        }

        Ok(AnchorIndex {
            variant: LayoutVariant::HeaderTable,
            period,
            days: DayColumnMap {
                header_row,
                columns: resolve_days(period, &days),
            },
            blocks,
        })
    }
}

/// Terminal ids are short codes carrying at least one digit.
fn is_id_like(value: &str) -> bool {
    value.bytes().any(|b| b.is_ascii_digit()) && !value.contains(char::is_whitespace)
}

fn is_inline_id_marker(cell: &CellValue) -> bool {
    cell.as_text()
        .map(|s| s.split_whitespace().collect::<String>().to_uppercase())
        .is_some_and(|s| s == INLINE_ID_MARKER)
}

fn is_name_marker(cell: &CellValue) -> bool {
    cell.marker()
        .is_some_and(|m| NAME_MARKERS.contains(&m.trim_end_matches(':').trim_end()))
}

fn is_marker(cell: &CellValue) -> bool {
    is_inline_id_marker(cell) || is_name_marker(cell)
}

/// Day-of-month value of a header cell: a whole number in 1..=31, stored
/// either as a number or as text.
fn day_of_month(cell: &CellValue) -> Option<u32> {
    let day = match cell {
        CellValue::Number(n) if n.fract() == 0.0 => *n as i64,
        CellValue::Text(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    (1..=31).contains(&day).then_some(day as u32)
}

/// `(column, day_of_month)` for every day-like cell of a row, excluding
/// the given columns.
fn day_numbers(row: &[CellValue], skip: &[usize]) -> Vec<(usize, u32)> {
    row.iter()
        .enumerate()
        .filter(|(c, _)| !skip.contains(c))
        .filter_map(|(c, cell)| day_of_month(cell).map(|d| (c, d)))
        .collect()
}

/// Maps day-of-month headers to calendar dates. Columns are matched left
/// to right against the period so that a period spanning a month boundary
/// (28, 29, 30, 1, 2, ...) resolves in order. Days that do not fall in the
/// period keep a date in the start or end month when one exists, and
/// otherwise stay bare day numbers.
fn resolve_days(period: Option<ReportPeriod>, days: &[(usize, u32)]) -> Vec<DayColumn> {
    let mut cursor = period.map(|p| p.start);
    days.iter()
        .map(|&(column, day_of_month)| {
            let (label, resolution) = match (period, cursor) {
                (Some(p), Some(from)) => {
                    let in_period = find_in_period(p, from, day_of_month)
                        .or_else(|| find_in_period(p, p.start, day_of_month));
                    match in_period {
                        Some(date) => {
                            cursor = date.succ_opt();
                            (DayLabel::Date(date), DayResolution::InPeriod)
                        }
                        None => match same_month(p.start, day_of_month)
                            .or_else(|| same_month(p.end, day_of_month))
                        {
                            Some(date) => (DayLabel::Date(date), DayResolution::OutsidePeriod),
                            None => (DayLabel::DayOfMonth(day_of_month), DayResolution::Unresolved),
                        },
                    }
                }
                _ => (DayLabel::DayOfMonth(day_of_month), DayResolution::Unresolved),
            };
            DayColumn {
                column,
                day_of_month,
                label,
                resolution,
            }
        })
        .collect()
}

fn find_in_period(period: ReportPeriod, from: NaiveDate, day_of_month: u32) -> Option<NaiveDate> {
    from.max(period.start)
        .iter_days()
        .take_while(|d| *d <= period.end)
        .find(|d| d.day() == day_of_month)
}

fn same_month(anchor: NaiveDate, day_of_month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(anchor.year(), anchor.month(), day_of_month)
}
