use crate::entities::{AttendanceRecord, EmployeePay, ImportOutcome};

use super::utils::{
    format_hours, format_minutes, format_money, render_table, section_header,
};

pub(crate) struct ImportPrinter;

impl ImportPrinter {
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn print_outcome(&self, outcome: &ImportOutcome) -> String {
        let mut output = String::new();

        output.push_str(&section_header("Import"));
        self.print_summary(&mut output, outcome);

        if !outcome.records.is_empty() {
            output.push('\n');
            output.push_str(&section_header("Records"));
            self.print_records(&mut output, &outcome.records);
        }

        output.push('\n');
        output.push_str(&section_header("Pay"));
        print_pay(&mut output, &outcome.pay);

        if !outcome.notes.is_empty() {
            output.push('\n');
            output.push_str(&section_header("Notes"));
            for note in &outcome.notes {
                let s = note.to_string();
                let options = textwrap::Options::new(76)
                    .initial_indent("  - ")
                    .subsequent_indent("    ");
                for line in textwrap::wrap(&s, options) {
                    output.push_str(&format!("{}\n", line));
                }
            }
        }

        output
    }

    fn print_summary(&self, output: &mut String, outcome: &ImportOutcome) {
        let layout = match (outcome.layout, outcome.column_mapping) {
            (Some(layout), _) => layout.to_string(),
            (None, Some(mapping)) => format!("column-mapped sheet ({})", mapping),
            (None, None) => "normalized CSV".to_string(),
        };
        let period = outcome
            .period
            .map_or("not found".to_string(), |p| p.to_string());
        output.push_str(&format!("Layout:    {}\n", layout));
        output.push_str(&format!("Period:    {}\n", period));
        output.push_str(&format!("Records:   {}\n", outcome.records.len()));
        output.push_str(&format!("Employees: {}\n", outcome.pay.len()));
        output.push_str(&format!(
            "Ledger:    {} rows {}\n",
            outcome.ledger_entries.len(),
            if outcome.committed {
                "written"
            } else {
                "previewed, not written"
            }
        ));
    }

    fn print_records(&self, output: &mut String, records: &[AttendanceRecord]) {
        let rows: Vec<Vec<String>> = records
            .iter()
            .map(|r| {
                vec![
                    r.employee_id.clone(),
                    r.employee_name.clone().unwrap_or_default(),
                    r.date.to_string(),
                    r.punches
                        .iter()
                        .map(|p| p.to_string())
                        .collect::<Vec<_>>()
                        .join(" "),
                    format_minutes(r.worked_minutes),
                    r.expected_minutes.map(format_minutes).unwrap_or_default(),
                    r.shortfall_minutes.map(format_minutes).unwrap_or_default(),
                    r.flags
                        .iter()
                        .map(|f| f.to_string())
                        .collect::<Vec<_>>()
                        .join("; "),
                ]
            })
            .collect();
        output.push_str(&render_table(
            &[
                "ID", "Name", "Date", "Punches", "Worked", "Expected", "Short", "Flags",
            ],
            &rows,
            &[4, 5, 6],
        ));
    }
}

/// Pay table shared by import previews and payroll reports.
pub(crate) fn print_pay(output: &mut String, pay: &[EmployeePay]) {
    let rows: Vec<Vec<String>> = pay
        .iter()
        .map(|p| {
            vec![
                p.employee_id.clone(),
                p.name.clone().unwrap_or_default(),
                format_hours(p.total_hours),
                p.hourly_wage.map(format_money).unwrap_or("-".to_string()),
                if p.matched {
                    format_money(p.total_pay)
                } else {
                    format!("{} (unmatched)", format_money(p.total_pay))
                },
            ]
        })
        .collect();
    output.push_str(&render_table(
        &["ID", "Name", "Hours", "Wage", "Pay"],
        &rows,
        &[2, 3],
    ));
    output.push_str(&format!(
        "\nTotal: {} hours, {}\n",
        format_hours(pay.iter().map(|p| p.total_hours).sum()),
        format_money(pay.iter().map(|p| p.total_pay).sum()),
    ));
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::NaiveDate;

    use super::*;
    use crate::entities::{
        AttendanceFlag, ClockTime, ColumnMapping, DayLabel, HoursLedgerEntry, ImportNote,
        LayoutVariant, ReportPeriod,
    };

    fn outcome() -> ImportOutcome {
        let date = NaiveDate::from_ymd_opt(2025, 11, 18).unwrap();
        let record = AttendanceRecord {
            employee_id: "7".to_string(),
            employee_name: Some("ANA".to_string()),
            date: DayLabel::Date(date),
            punches: vec![ClockTime::from_hm(8, 0).unwrap()],
            worked_minutes: 0,
            expected_minutes: Some(540),
            shortfall_minutes: Some(540),
            flags: BTreeSet::from([AttendanceFlag::IncompleteShift]),
        };
        ImportOutcome {
            layout: Some(LayoutVariant::InlineLabels),
            column_mapping: None,
            period: Some(ReportPeriod {
                start: date,
                end: date,
            }),
            ledger_entries: vec![HoursLedgerEntry::from(&record)],
            records: vec![record],
            totals: Vec::new(),
            pay: vec![EmployeePay {
                employee_id: "7".to_string(),
                name: Some("ANA".to_string()),
                total_hours: 0.0,
                hourly_wage: None,
                total_pay: 0.0,
                matched: false,
            }],
            notes: vec![ImportNote::RosterMiss {
                employee_id: "7".to_string(),
            }],
            committed: false,
        }
    }

    #[test]
    fn test_print_outcome_sections() {
        let printed = ImportPrinter::new().print_outcome(&outcome());
        assert!(printed.contains("Period:    2025-11-18 ~ 2025-11-18"));
        assert!(printed.contains("previewed, not written"));
        assert!(printed.contains("incomplete shift"));
        assert!(printed.contains("$0.00 (unmatched)"));
        assert!(printed.contains("  - Employee 7 is not in the roster"));
    }

    #[test]
    fn test_normalized_outcome_has_no_records_section() {
        let mut outcome = outcome();
        outcome.layout = None;
        outcome.records.clear();
        let printed = ImportPrinter::new().print_outcome(&outcome);
        assert!(printed.contains("Layout:    normalized CSV"));
        assert!(!printed.contains("--- Records"));
    }

    #[test]
    fn test_column_mapped_outcome_names_columns() {
        let mut outcome = outcome();
        outcome.layout = None;
        outcome.period = None;
        outcome.records.clear();
        outcome.column_mapping = Some(ColumnMapping {
            employee_id: 0,
            date: 1,
            entry: 2,
            exit: 3,
        });
        outcome.notes.push(ImportNote::RowSkipped { row: 4 });
        let printed = ImportPrinter::new().print_outcome(&outcome);
        assert!(printed.contains("Layout:    column-mapped sheet (id A, date B, entry C, exit D)"));
        assert!(printed.contains("  - Row 5: no employee id or date; row skipped."));
    }
}
