use crate::{
    domain::logic::{
        expected_hours_policy::{shortfall_minutes, ExpectedHoursPolicy},
        punch_parser::parse_punches,
        shift_calculator::day_minutes,
    },
    entities::{
        AnchorIndex, AttendanceFlag, AttendanceRecord, CellValue, DayColumn, DayLabel,
        DayResolution, EmployeeTotal, RawGrid,
    },
};

/// Turns a located report into attendance records: one record per
/// employee block and day column. Pure with respect to its inputs; running
/// it twice over the same grid and index yields identical records.
pub struct ExtractionEngine<'a> {
    grid: &'a RawGrid,
    index: &'a AnchorIndex,
    policy: &'a dyn ExpectedHoursPolicy,
}

impl<'a> ExtractionEngine<'a> {
    pub fn new(
        grid: &'a RawGrid,
        index: &'a AnchorIndex,
        policy: &'a dyn ExpectedHoursPolicy,
    ) -> Self {
        Self {
            grid,
            index,
            policy,
        }
    }

    pub fn process(&self) -> Vec<AttendanceRecord> {
        self.index
            .blocks
            .iter()
            .filter_map(|block| Some((block, block.employee_id.as_deref()?)))
            .flat_map(|(block, employee_id)| {
                self.index.days.columns.iter().map(move |day| {
                    self.record(
                        employee_id,
                        block.employee_name.as_deref(),
                        day,
                        self.grid.get(block.data_row, day.column),
                    )
                })
            })
            .collect()
    }

    fn record(
        &self,
        employee_id: &str,
        employee_name: Option<&str>,
        day: &DayColumn,
        cell: &CellValue,
    ) -> AttendanceRecord {
        let punches = parse_punches(cell);
        let (worked_minutes, mut flags) = day_minutes(&punches);

        if punches.is_empty() {
            flags.insert(AttendanceFlag::NoPunches);
        }
        if punches.excess > 0 {
            flags.insert(AttendanceFlag::ExcessPunches);
        }
        if punches.malformed > 0 {
            flags.insert(AttendanceFlag::MalformedTimeToken);
        }
        match day.resolution {
            DayResolution::InPeriod => {}
            DayResolution::OutsidePeriod => {
                flags.insert(AttendanceFlag::DateOutsidePeriod);
            }
            DayResolution::Unresolved => {
                flags.insert(AttendanceFlag::UnresolvedDate);
            }
        }

        let expected_minutes = match day.label {
            DayLabel::Date(date) => Some(self.policy.expected_minutes(date)),
            DayLabel::DayOfMonth(_) => None,
        };

        AttendanceRecord {
            employee_id: employee_id.to_string(),
            employee_name: employee_name.map(str::to_string),
            date: day.label,
            punches: punches.times,
            worked_minutes,
            expected_minutes,
            shortfall_minutes: shortfall_minutes(expected_minutes, worked_minutes),
            flags,
        }
    }
}

/// Sums worked minutes per employee, in order of first appearance. Derived
/// from the records alone.
pub fn employee_totals(records: &[AttendanceRecord]) -> Vec<EmployeeTotal> {
    records
        .iter()
        .fold(Vec::<EmployeeTotal>::new(), |mut totals, record| {
            match totals
                .iter_mut()
                .find(|t| t.employee_id == record.employee_id)
            {
                Some(total) => {
                    total.worked_minutes += record.worked_minutes;
                    total.days += 1;
                    if total.employee_name.is_none() {
                        total.employee_name = record.employee_name.clone();
                    }
                }
                None => totals.push(EmployeeTotal {
                    employee_id: record.employee_id.clone(),
                    employee_name: record.employee_name.clone(),
                    worked_minutes: record.worked_minutes,
                    days: 1,
                }),
            }
            totals
        })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{
        domain::logic::{expected_hours_policy::WeekdayTablePolicy, layout_locator::LayoutLocator},
        entities::ClockTime,
    };

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn extract(grid: &RawGrid) -> Vec<AttendanceRecord> {
        let index = LayoutLocator::new(grid).locate().unwrap();
        ExtractionEngine::new(grid, &index, &WeekdayTablePolicy::default()).process()
    }

    fn report() -> RawGrid {
        // 2025-11-16 is a Sunday, 2025-11-17 a Monday.
        RawGrid::from_text_rows(vec![
            vec!["Tiempo de Registro: 2025-11-15 ~ 2025-11-17", "", "", ""],
            vec!["", "15", "16", "17"],
            vec!["ID:", "7", "Nombre:", "", "ANA"],
            vec!["08:03  13:58", "22:00 06:15", "", "08:00 12:00 13:00 17:00"],
            vec!["ID:", "", "Nombre:", "", "SIN ID"],
            vec!["", "08:00 17:00", "08:00 17:00", "08:00 17:00"],
            vec!["ID:", "9", "Nombre:", "", "LUIS"],
            vec!["", "07:00", "07:00 12:00 13:00", "08:00 16:00 x 25:99 17:00 17:30 18:00 19:00"],
        ])
    }

    fn find<'r>(records: &'r [AttendanceRecord], id: &str, date: &str) -> &'r AttendanceRecord {
        records
            .iter()
            .find(|r| r.employee_id == id && r.date == DayLabel::Date(d(date)))
            .unwrap()
    }

    #[test]
    fn test_one_record_per_block_and_day() {
        let records = extract(&report());
        // Blank-id block skipped; two employees times three day columns.
        assert_eq!(records.len(), 6);
        assert!(records.iter().all(|r| r.employee_id == "7" || r.employee_id == "9"));
    }

    #[test]
    fn test_punch_cells_are_read_from_the_data_row() {
        let records = extract(&report());
        // Column 0 of the data row is not a day column.
        let r = find(&records, "7", "2025-11-15");
        assert_eq!(r.worked_minutes, 495);
        assert_eq!(
            r.punches,
            vec![
                ClockTime::from_hm(22, 0).unwrap(),
                ClockTime::from_hm(6, 15).unwrap()
            ]
        );
        assert_eq!(r.employee_name.as_deref(), Some("ANA"));
    }

    #[test]
    fn test_empty_cell_yields_zero_with_flag() {
        let records = extract(&report());
        let r = find(&records, "7", "2025-11-16");
        assert_eq!(r.worked_minutes, 0);
        assert!(r.flags.contains(&AttendanceFlag::NoPunches));
        // Sunday: no expectation, no shortfall.
        assert_eq!(r.expected_minutes, Some(0));
        assert_eq!(r.shortfall_minutes, None);
    }

    #[test]
    fn test_monday_expectation_and_shortfall() {
        let records = extract(&report());
        let r = find(&records, "7", "2025-11-17");
        assert_eq!(r.worked_minutes, 480);
        assert_eq!(r.expected_minutes, Some(600));
        assert_eq!(r.shortfall_minutes, Some(120));
        assert!(r.flags.is_empty());
    }

    #[test]
    fn test_incomplete_and_excess_punches() {
        let records = extract(&report());

        let lone = find(&records, "9", "2025-11-15");
        assert_eq!(lone.worked_minutes, 0);
        assert!(lone.flags.contains(&AttendanceFlag::IncompleteShift));
        assert_eq!(lone.punches.len(), 1);

        let three = find(&records, "9", "2025-11-16");
        assert_eq!(three.worked_minutes, 300);
        assert!(three.flags.contains(&AttendanceFlag::SecondShiftIncomplete));

        let many = find(&records, "9", "2025-11-17");
        assert_eq!(many.punches.len(), 4);
        assert_eq!(many.worked_minutes, 480 + 30);
        assert!(many.flags.contains(&AttendanceFlag::ExcessPunches));
        assert!(many.flags.contains(&AttendanceFlag::MalformedTimeToken));
    }

    #[test]
    fn test_worked_minutes_never_negative_and_extraction_is_repeatable() {
        let grid = report();
        let first = extract(&grid);
        let second = extract(&grid);
        assert_eq!(first, second);
        assert_eq!(grid, report());
    }

    #[test]
    fn test_unresolved_days_have_no_expectation() {
        let grid = RawGrid::from_text_rows(vec![
            vec!["", "1", "2", "3"],
            vec!["ID:", "5", "", ""],
            vec!["", "08:00 16:00", "", ""],
        ]);
        let records = extract(&grid);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].date, DayLabel::DayOfMonth(1));
        assert_eq!(records[0].worked_minutes, 480);
        assert_eq!(records[0].expected_minutes, None);
        assert_eq!(records[0].shortfall_minutes, None);
        assert!(records[0].flags.contains(&AttendanceFlag::UnresolvedDate));
    }

    #[test]
    fn test_employee_totals_are_derived_from_records() {
        let records = extract(&report());
        let totals = employee_totals(&records);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].employee_id, "7");
        assert_eq!(totals[0].worked_minutes, 495 + 480);
        assert_eq!(totals[0].days, 3);
        assert_eq!(totals[1].worked_minutes, 300 + 510);
    }
}
