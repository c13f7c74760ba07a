use std::sync::LazyLock;

use chrono::{Days, NaiveDate};
use regex::Regex;
use tracing::debug;

use crate::{
    domain::logic::{
        punch_parser::parse_punches,
        shift_calculator::{shift_minutes, ShiftSlot},
    },
    entities::{
        CellValue, ClockTime, ColumnMapping, ColumnOverrides, ColumnSheetFailure, DayLabel,
        HoursLedgerEntry, ImportNote, RawGrid, MINUTES_PER_DAY,
    },
};

static ID_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)id|empleado|trabajador").expect("hardcoded regex should be valid")
});
static DATE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)fecha|dia|día").expect("hardcoded regex should be valid")
});
static ENTRY_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)entrada|in").expect("hardcoded regex should be valid")
});
static EXIT_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)salida|out").expect("hardcoded regex should be valid")
});

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Last serial number spreadsheet tools accept (9999-12-31).
const MAX_DATE_SERIAL: f64 = 2_958_465.0;

/// Hours read from a one-row-per-shift sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSheet {
    pub mapping: ColumnMapping,
    pub header_row: usize,
    pub entries: Vec<HoursLedgerEntry>,
    pub notes: Vec<ImportNote>,
}

/// First column whose header matches each field's pattern; column `A`
/// when nothing matches.
pub fn suggest_mapping(header: &[CellValue]) -> ColumnMapping {
    ColumnMapping {
        employee_id: first_match(header, &ID_HEADER),
        date: first_match(header, &DATE_HEADER),
        entry: first_match(header, &ENTRY_HEADER),
        exit: first_match(header, &EXIT_HEADER),
    }
}

fn first_match(header: &[CellValue], pattern: &Regex) -> usize {
    header
        .iter()
        .position(|cell| cell.display_value().is_some_and(|h| pattern.is_match(&h)))
        .unwrap_or(0)
}

/// Reads a plain table of `id, date, entry, exit` rows under a header row,
/// as kept by hand in a spreadsheet. Each row becomes one ledger entry with
/// the minutes between entry and exit (a lone time counts zero).
pub struct ColumnSheetReader<'a> {
    grid: &'a RawGrid,
    overrides: ColumnOverrides,
}

impl<'a> ColumnSheetReader<'a> {
    pub fn new(grid: &'a RawGrid, overrides: ColumnOverrides) -> Self {
        Self { grid, overrides }
    }

    pub fn process(&self) -> Result<ColumnSheet, ColumnSheetFailure> {
        let (header_row, header) = self
            .grid
            .rows()
            .find(|(_, row)| !row.iter().all(CellValue::is_blank))
            .ok_or(ColumnSheetFailure::NoHeaderRow)?;
        let mapping = suggest_mapping(header).apply(self.overrides);
        let width = header.len();
        if let Some(&column) = mapping.columns().iter().find(|&&c| c >= width) {
            return Err(ColumnSheetFailure::ColumnOutOfRange { column, width });
        }
        debug!(header_row, %mapping, "column mapping chosen");

        let mut entries = Vec::new();
        let mut notes = Vec::new();
        for (r, row) in self.grid.rows().skip(header_row + 1) {
            if row.iter().all(CellValue::is_blank) {
                continue;
            }
            let employee_id = self.grid.get(r, mapping.employee_id).display_value();
            let date = cell_date(self.grid.get(r, mapping.date));
            let (Some(employee_id), Some(date)) = (employee_id, date) else {
                notes.push(ImportNote::RowSkipped { row: r });
                continue;
            };

            let outcome = shift_minutes(
                cell_time(self.grid.get(r, mapping.entry)),
                cell_time(self.grid.get(r, mapping.exit)),
                ShiftSlot::First,
            );
            if let Some(flag) = outcome.flag {
                notes.push(ImportNote::RecordAnomaly {
                    employee_id: employee_id.clone(),
                    date: DayLabel::Date(date),
                    flag,
                });
            }
            entries.push(HoursLedgerEntry {
                employee_id,
                date: DayLabel::Date(date),
                hours_worked: outcome.minutes as f64 / 60.0,
            });
        }

        Ok(ColumnSheet {
            mapping,
            header_row,
            entries,
            notes,
        })
    }
}

fn cell_number(cell: &CellValue) -> Option<f64> {
    let n = match cell {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => s.trim().parse().ok()?,
        CellValue::Empty => return None,
    };
    n.is_finite().then_some(n)
}

/// Date text (ISO or day-first) or a spreadsheet date serial. A time of
/// day after the date is ignored.
fn cell_date(cell: &CellValue) -> Option<NaiveDate> {
    let from_text = cell.as_text().and_then(|text| {
        let token = text.trim().split([' ', 'T']).next()?;
        DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(token, format).ok())
    });
    from_text.or_else(|| {
        let serial = cell_number(cell).filter(|n| (1.0..=MAX_DATE_SERIAL).contains(n))?;
        NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_days(Days::new(serial.trunc() as u64))
    })
}

/// Clock text (`08:00`, `2025-11-17 08:00:00`) or a spreadsheet time,
/// i.e. the fractional part of a day. Whole numbers past zero are dates
/// without a time and read as missing.
fn cell_time(cell: &CellValue) -> Option<ClockTime> {
    if let Some(&time) = parse_punches(cell).times.first() {
        return Some(time);
    }
    let n = cell_number(cell).filter(|n| *n >= 0.0)?;
    if n >= 1.0 && n.fract() == 0.0 {
        return None;
    }
    let minutes = (n.fract() * MINUTES_PER_DAY as f64).round() as u32 % MINUTES_PER_DAY;
    ClockTime::from_hm(minutes / 60, minutes % 60)
}
