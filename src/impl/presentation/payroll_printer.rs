use crate::entities::{Employee, PayrollReport};

use super::{
    import_printer::print_pay,
    utils::{format_hours, format_money, render_table, section_header},
};

pub(crate) struct PayrollPrinter;

impl PayrollPrinter {
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn print_report(&self, report: &PayrollReport) -> String {
        let mut output = String::new();

        output.push_str(&section_header(&format!(
            "Payroll {} to {}",
            report.from, report.to
        )));
        print_pay(&mut output, &report.rows);

        if !report.details.is_empty() {
            output.push('\n');
            output.push_str(&section_header("Daily detail"));
            let rows: Vec<Vec<String>> = report
                .details
                .iter()
                .map(|d| {
                    vec![
                        d.date.to_string(),
                        d.employee_id.clone(),
                        d.name.clone().unwrap_or_default(),
                        format_hours(d.hours),
                    ]
                })
                .collect();
            output.push_str(&render_table(&["Date", "ID", "Name", "Hours"], &rows, &[3]));
        }

        if report.undated_entries > 0 {
            output.push_str(&format!(
                "\n{} ledger rows carry only a day-of-month and were left out.\n",
                report.undated_entries
            ));
        }

        output
    }

    pub(crate) fn print_employees(&self, employees: &[Employee]) -> String {
        let rows: Vec<Vec<String>> = employees
            .iter()
            .map(|e| {
                vec![
                    e.employee_id.clone(),
                    e.name.clone(),
                    format_money(e.hourly_wage),
                ]
            })
            .collect();
        render_table(&["ID", "Name", "Wage"], &rows, &[2])
    }
}
