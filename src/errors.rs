use fractic_server_error::{define_client_error, define_internal_error};

// IO-related.
define_client_error!(ReadError, "Error reading file.");
define_internal_error!(WriteError, "Error writing file '{path}'.", { path: &str });

// Parsing-related.
define_client_error!(InvalidCsv, "Invalid CSV format.");
define_client_error!(InvalidCsvContent, "Invalid CSV content: {details}.", { details: &str });
define_client_error!(InvalidRon, "Invalid {ron_type} (invalid RON format).", { ron_type: &str });
define_client_error!(InvalidIsoDate, "Invalid ISO date: {date}.", { date: &str });
define_client_error!(InvalidHoursAmount, "Invalid hours amount: '{value}'.", { value: &str });
define_client_error!(InvalidEmployeeId, "Invalid employee id: '{value}'.", { value: &str });
define_client_error!(InvalidHourlyWage, "Invalid hourly wage: '{value}'.", { value: &str });

// Attendance report ingestion.
define_client_error!(
    UnsupportedAttendanceFormat,
    "Unsupported attendance file format: '{extension}'. Expected .xls, .xlsx, .xlsm, .ods or .csv.",
    { extension: &str }
);
define_client_error!(WorkbookOpenError, "Could not open the attendance workbook.");
define_client_error!(
    SheetNotFound,
    "The attendance workbook has no sheet named '{sheet}'.",
    { sheet: &str }
);
define_client_error!(
    StructuralParseFailure,
    "Could not recognize the attendance report layout: {reason}.",
    { reason: &str }
);

define_client_error!(
    InvalidColumnMapping,
    "Invalid column mapping: {details}.",
    { details: &str }
);

// Roster-related.
define_client_error!(
    DuplicateEmployee,
    "An employee with id '{employee_id}' already exists.",
    { employee_id: &str }
);
define_client_error!(EmptyEmployeeName, "Employee name cannot be empty.");
define_client_error!(
    UnknownEmployee,
    "No employee with id '{employee_id}' in the roster.",
    { employee_id: &str }
);

// Reporting-related.
define_client_error!(
    InvalidDateRange,
    "Invalid date range: {from} is after {to}.",
    { from: &str, to: &str }
);
define_internal_error!(SerializationError, "Failed to serialize {what}.", { what: &str });
