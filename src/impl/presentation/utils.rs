use fractic_server_error::ServerError;
use num_format::{Locale, ToFormattedString as _};
use serde::Serialize;

use crate::errors::SerializationError;

/// Format a peso amount with thousands separators and two decimals
/// (ex. 1234.5 -> "$1,234.50"). Rounded to whole cents.
pub(crate) fn format_money(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    format!(
        "{}${}.{:02}",
        sign,
        (cents / 100).to_formatted_string(&Locale::en),
        cents % 100
    )
}

pub(crate) fn format_hours(hours: f64) -> String {
    format!("{:.2}", hours)
}

/// Minutes as `H:MM` (ex. 495 -> "8:15").
pub(crate) fn format_minutes(minutes: u32) -> String {
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

pub(crate) fn section_header(title: &str) -> String {
    format!("--- {} {}\n\n", title, "-".repeat(76usize.saturating_sub(title.len())))
}

/// Left-aligned text table; columns listed in `numeric` are right-aligned.
pub(crate) fn render_table(headers: &[&str], rows: &[Vec<String>], numeric: &[usize]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let render_row = |cells: Vec<&str>| -> String {
        let line = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let width = widths.get(i).copied().unwrap_or(0);
                if numeric.contains(&i) {
                    format!("{:>width$}", cell)
                } else {
                    format!("{:<width$}", cell)
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        format!("{}\n", line.trim_end())
    };

    let mut output = render_row(headers.to_vec());
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    output.push_str(&render_row(separator.iter().map(String::as_str).collect()));
    for row in rows {
        output.push_str(&render_row(row.iter().map(String::as_str).collect()));
    }
    output
}

pub(crate) fn print_json<T: Serialize>(value: &T, what: &str) -> Result<String, ServerError> {
    serde_json::to_string_pretty(value).map_err(|e| SerializationError::with_debug(what, &e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(1234.5), "$1,234.50");
        assert_eq!(format_money(19.999), "$20.00");
        assert_eq!(format_money(1_000_000.0), "$1,000,000.00");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(495), "8:15");
        assert_eq!(format_minutes(0), "0:00");
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let table = render_table(
            &["ID", "Horas"],
            &[
                vec!["7".to_string(), "8.00".to_string()],
                vec!["12".to_string(), "10.50".to_string()],
            ],
            &[1],
        );
        assert_eq!(table, "ID  Horas\n--  -----\n7    8.00\n12  10.50\n");
    }
}
