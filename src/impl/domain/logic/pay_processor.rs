use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{
    domain::logic::utils::{compare_employee_ids, round_to_cents},
    entities::{
        EmployeePay, EmployeeTotal, HoursLedgerEntry, PayrollDetail, PayrollReport, Roster,
    },
};

/// Joins worked hours with roster wages. Employees missing from the roster
/// are paid zero and reported as unmatched.
pub(crate) struct PayProcessor<'a> {
    roster: &'a Roster,
}

impl<'a> PayProcessor<'a> {
    pub(crate) fn new(roster: &'a Roster) -> Self {
        Self { roster }
    }

    fn price(&self, employee_id: &str, fallback_name: Option<&str>, hours: f64) -> EmployeePay {
        match self.roster.lookup(employee_id) {
            Some(employee) => EmployeePay {
                employee_id: employee_id.to_string(),
                name: Some(employee.name.clone()),
                total_hours: hours,
                hourly_wage: Some(employee.hourly_wage),
                total_pay: hours * employee.hourly_wage,
                matched: true,
            },
            None => EmployeePay {
                employee_id: employee_id.to_string(),
                name: fallback_name.map(str::to_string),
                total_hours: hours,
                hourly_wage: None,
                total_pay: 0.0,
                matched: false,
            },
        }
    }

    pub(crate) fn price_totals(&self, totals: &[EmployeeTotal]) -> Vec<EmployeePay> {
        totals
            .iter()
            .map(|t| {
                self.price(
                    &t.employee_id,
                    t.employee_name.as_deref(),
                    t.worked_minutes as f64 / 60.0,
                )
            })
            .collect()
    }

    /// Hours summed per employee in order of first appearance. Duplicate
    /// (employee, date) rows are all counted.
    pub(crate) fn price_entries<'e>(
        &self,
        entries: impl IntoIterator<Item = &'e HoursLedgerEntry>,
    ) -> Vec<EmployeePay> {
        let mut hours: Vec<(&str, f64)> = Vec::new();
        for entry in entries {
            match hours.iter_mut().find(|(id, _)| *id == entry.employee_id) {
                Some((_, h)) => *h += entry.hours_worked,
                None => hours.push((entry.employee_id.as_str(), entry.hours_worked)),
            }
        }
        hours
            .into_iter()
            .map(|(id, h)| self.price(id, None, h))
            .collect()
    }

    /// Payroll over ledger rows dated within `from..=to`. Rows that only
    /// carry a day-of-month are counted as undated and left out.
    pub(crate) fn payroll(
        &self,
        entries: &[HoursLedgerEntry],
        from: NaiveDate,
        to: NaiveDate,
    ) -> PayrollReport {
        let undated_entries = entries.iter().filter(|e| e.date.date().is_none()).count();
        let in_range: Vec<(&HoursLedgerEntry, NaiveDate)> = entries
            .iter()
            .filter_map(|e| e.date.date().map(|d| (e, d)))
            .filter(|(_, d)| from <= *d && *d <= to)
            .collect();

        let mut rows = self.price_entries(in_range.iter().map(|(e, _)| *e));
        rows.sort_by(|a, b| compare_employee_ids(&a.employee_id, &b.employee_id));

        let mut per_day: BTreeMap<(NaiveDate, &str), f64> = BTreeMap::new();
        for (entry, date) in &in_range {
            *per_day.entry((*date, entry.employee_id.as_str())).or_default() += entry.hours_worked;
        }
        let mut details: Vec<PayrollDetail> = per_day
            .into_iter()
            .map(|((date, employee_id), hours)| PayrollDetail {
                employee_id: employee_id.to_string(),
                name: self.roster.lookup(employee_id).map(|e| e.name.clone()),
                date,
                hours: round_to_cents(hours),
            })
            .collect();
        details.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| compare_employee_ids(&a.employee_id, &b.employee_id))
        });

        PayrollReport {
            from,
            to,
            rows,
            details,
            undated_entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{DayLabel, Employee};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn roster() -> Roster {
        Roster {
            employees: vec![
                Employee {
                    employee_id: "7".to_string(),
                    name: "Ana Lopez".to_string(),
                    hourly_wage: 50.0,
                },
                Employee {
                    employee_id: "10".to_string(),
                    name: "Rosa Diaz".to_string(),
                    hourly_wage: 40.0,
                },
            ],
        }
    }

    fn entry(id: &str, date: DayLabel, hours: f64) -> HoursLedgerEntry {
        HoursLedgerEntry {
            employee_id: id.to_string(),
            date,
            hours_worked: hours,
        }
    }

    #[test]
    fn test_unmatched_employee_is_paid_zero() {
        let roster = roster();
        let totals = vec![
            EmployeeTotal {
                employee_id: "7".to_string(),
                employee_name: Some("ANA".to_string()),
                worked_minutes: 600,
                days: 2,
            },
            EmployeeTotal {
                employee_id: "99".to_string(),
                employee_name: Some("NUEVO".to_string()),
                worked_minutes: 480,
                days: 1,
            },
        ];
        let pay = PayProcessor::new(&roster).price_totals(&totals);
        assert_eq!(pay[0].total_pay, 500.0);
        assert_eq!(pay[0].name.as_deref(), Some("Ana Lopez"));
        assert!(pay[0].matched);
        assert_eq!(pay[1].total_hours, 8.0);
        assert_eq!(pay[1].total_pay, 0.0);
        assert_eq!(pay[1].name.as_deref(), Some("NUEVO"));
        assert!(!pay[1].matched);
    }

    #[test]
    fn test_payroll_sums_duplicates_within_range() {
        let roster = roster();
        let entries = vec![
            entry("10", DayLabel::Date(d("2025-11-14")), 8.0),
            entry("7", DayLabel::Date(d("2025-11-14")), 4.5),
            entry("7", DayLabel::Date(d("2025-11-14")), 1.5),
            entry("7", DayLabel::Date(d("2025-11-20")), 9.0),
            entry("7", DayLabel::Date(d("2025-12-01")), 9.0),
            entry("7", DayLabel::DayOfMonth(15), 9.0),
        ];
        let report = PayProcessor::new(&roster).payroll(&entries, d("2025-11-14"), d("2025-11-21"));

        assert_eq!(report.undated_entries, 1);
        let ids: Vec<&str> = report.rows.iter().map(|r| r.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["7", "10"]);
        assert_eq!(report.rows[0].total_hours, 15.0);
        assert_eq!(report.rows[0].total_pay, 750.0);
        assert_eq!(report.rows[1].total_pay, 320.0);
        assert_eq!(report.total_pay(), 1070.0);

        assert_eq!(report.details.len(), 3);
        assert_eq!(report.details[0].employee_id, "7");
        assert_eq!(report.details[0].hours, 6.0);
        assert_eq!(report.details[1].employee_id, "10");
        assert_eq!(report.details[2].date, d("2025-11-20"));
    }
}
