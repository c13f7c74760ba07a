use fractic_server_error::ServerError;

use crate::{entities::AttendanceRecord, errors::SerializationError};

use super::utils::format_hours;

const HEADER: [&str; 8] = [
    "employee_id",
    "employee_name",
    "date",
    "punches",
    "worked_hours",
    "expected_hours",
    "shortfall_hours",
    "flags",
];

/// Per-record export for review in a spreadsheet.
pub(crate) struct RecordsCsvPrinter;

impl RecordsCsvPrinter {
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn print_records(&self, records: &[AttendanceRecord]) -> Result<String, ServerError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(HEADER)
            .map_err(|e| SerializationError::with_debug("records CSV", &e))?;
        for r in records {
            let hours = |minutes: Option<u32>| {
                minutes
                    .map(|m| format_hours(m as f64 / 60.0))
                    .unwrap_or_default()
            };
            writer
                .write_record([
                    r.employee_id.clone(),
                    r.employee_name.clone().unwrap_or_default(),
                    r.date.to_string(),
                    r.punches
                        .iter()
                        .map(|p| p.to_string())
                        .collect::<Vec<_>>()
                        .join(" "),
                    format_hours(r.worked_hours()),
                    hours(r.expected_minutes),
                    hours(r.shortfall_minutes),
                    r.flags
                        .iter()
                        .map(|f| f.to_string())
                        .collect::<Vec<_>>()
                        .join("; "),
                ])
                .map_err(|e| SerializationError::with_debug("records CSV", &e))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| SerializationError::with_debug("records CSV", &e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| SerializationError::with_debug("records CSV", &e))
    }
}
