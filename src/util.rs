use std::path::Path;

use chrono::NaiveDate;
use fractic_server_error::ServerError;

use crate::{
    config::PayrollConfig,
    data::repositories::{
        attendance_source_repository_impl::AttendanceSourceRepositoryImpl,
        hours_ledger_repository_impl::HoursLedgerCsvRepository,
        roster_repository_impl::RosterCsvRepository,
    },
    domain::{
        logic::expected_hours_policy::ExpectedHoursPolicy,
        repositories::{
            hours_ledger_repository::HoursLedgerRepository, roster_repository::RosterRepository,
        },
        usecases::{
            import_usecase::{ImportUsecase as _, ImportUsecaseImpl},
            payroll_usecase::{PayrollUsecase as _, PayrollUsecaseImpl},
        },
    },
    entities::{
        AttendanceFormat, AttendanceRecord, ColumnOverrides, Employee, HoursLedgerEntry,
        ImportOutcome, PayrollReport,
    },
    presentation::{
        import_printer::ImportPrinter, payroll_printer::PayrollPrinter,
        records_csv_printer::RecordsCsvPrinter, utils::print_json,
    },
};

/// Entry point of the library: attendance imports, payroll reports and
/// roster maintenance over one ledger and one roster.
///
/// `preview_*` methods never write; `import_*` methods preview and then
/// append to the ledger once the file has parsed.
pub struct PayrollUtil<L = HoursLedgerCsvRepository, R = RosterCsvRepository>
where
    L: HoursLedgerRepository,
    R: RosterRepository,
{
    source: AttendanceSourceRepositoryImpl,
    ledger: L,
    roster: R,
    policy: Box<dyn ExpectedHoursPolicy>,
    import_printer: ImportPrinter,
    payroll_printer: PayrollPrinter,
    records_printer: RecordsCsvPrinter,
}

impl PayrollUtil {
    /// Ledger and roster CSV files at the configured paths.
    pub fn new(config: &PayrollConfig) -> Self {
        Self::with_repositories(
            config,
            HoursLedgerCsvRepository::new(&config.ledger_path),
            RosterCsvRepository::new(&config.roster_path),
        )
    }
}

impl<L, R> PayrollUtil<L, R>
where
    L: HoursLedgerRepository,
    R: RosterRepository,
{
    pub fn with_repositories(config: &PayrollConfig, ledger: L, roster: R) -> Self {
        Self {
            source: AttendanceSourceRepositoryImpl::new(config.sheet_name.clone()),
            ledger,
            roster,
            policy: Box::new(config.expected_minutes),
            import_printer: ImportPrinter::new(),
            payroll_printer: PayrollPrinter::new(),
            records_printer: RecordsCsvPrinter::new(),
        }
    }

    pub fn with_policy<P: ExpectedHoursPolicy + 'static>(mut self, policy: P) -> Self {
        self.policy = Box::new(policy);
        self
    }

    fn import_usecase(&self) -> ImportUsecaseImpl<'_, L, R> {
        ImportUsecaseImpl::new(&self.source, &self.ledger, &self.roster, self.policy.as_ref())
    }

    fn payroll_usecase(&self) -> PayrollUsecaseImpl<'_, L, R> {
        PayrollUsecaseImpl::new(&self.ledger, &self.roster)
    }

    // Attendance imports.
    // ---

    pub fn preview_file<P: AsRef<Path>>(&self, path: P) -> Result<ImportOutcome, ServerError> {
        self.import_usecase().preview_file(path.as_ref())
    }

    pub fn import_file<P: AsRef<Path>>(&self, path: P) -> Result<ImportOutcome, ServerError> {
        let usecase = self.import_usecase();
        let mut outcome = usecase.preview_file(path.as_ref())?;
        usecase.commit(&mut outcome)?;
        Ok(outcome)
    }

    pub fn preview_bytes(
        &self,
        bytes: &[u8],
        format: AttendanceFormat,
    ) -> Result<ImportOutcome, ServerError> {
        self.import_usecase().preview_bytes(bytes, format)
    }

    pub fn import_bytes(
        &self,
        bytes: &[u8],
        format: AttendanceFormat,
    ) -> Result<ImportOutcome, ServerError> {
        let usecase = self.import_usecase();
        let mut outcome = usecase.preview_bytes(bytes, format)?;
        usecase.commit(&mut outcome)?;
        Ok(outcome)
    }

    pub fn preview_normalized_file<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<ImportOutcome, ServerError> {
        self.import_usecase().preview_normalized_file(path.as_ref())
    }

    pub fn import_normalized_file<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<ImportOutcome, ServerError> {
        let usecase = self.import_usecase();
        let mut outcome = usecase.preview_normalized_file(path.as_ref())?;
        usecase.commit(&mut outcome)?;
        Ok(outcome)
    }

    pub fn import_normalized_string(&self, s: &str) -> Result<ImportOutcome, ServerError> {
        let usecase = self.import_usecase();
        let mut outcome = usecase.preview_normalized_string(s)?;
        usecase.commit(&mut outcome)?;
        Ok(outcome)
    }

    pub fn preview_columns_file<P: AsRef<Path>>(
        &self,
        path: P,
        sheet_name: Option<&str>,
        overrides: ColumnOverrides,
    ) -> Result<ImportOutcome, ServerError> {
        self.import_usecase()
            .preview_columns_file(path.as_ref(), sheet_name, overrides)
    }

    pub fn import_columns_file<P: AsRef<Path>>(
        &self,
        path: P,
        sheet_name: Option<&str>,
        overrides: ColumnOverrides,
    ) -> Result<ImportOutcome, ServerError> {
        let usecase = self.import_usecase();
        let mut outcome = usecase.preview_columns_file(path.as_ref(), sheet_name, overrides)?;
        usecase.commit(&mut outcome)?;
        Ok(outcome)
    }

    pub fn import_columns_bytes(
        &self,
        bytes: &[u8],
        format: AttendanceFormat,
        sheet_name: Option<&str>,
        overrides: ColumnOverrides,
    ) -> Result<ImportOutcome, ServerError> {
        let usecase = self.import_usecase();
        let mut outcome = usecase.preview_columns_bytes(bytes, format, sheet_name, overrides)?;
        usecase.commit(&mut outcome)?;
        Ok(outcome)
    }

    /// Writes a previewed outcome to the ledger. No-op if already written.
    pub fn commit(&self, outcome: &mut ImportOutcome) -> Result<(), ServerError> {
        self.import_usecase().commit(outcome)
    }

    // Payroll and roster.
    // ---

    pub fn payroll(&self, from: NaiveDate, to: NaiveDate) -> Result<PayrollReport, ServerError> {
        self.payroll_usecase().report(from, to)
    }

    pub fn employees(&self) -> Result<Vec<Employee>, ServerError> {
        self.payroll_usecase().employees()
    }

    pub fn add_employee(
        &self,
        employee_id: &str,
        name: &str,
        hourly_wage: f64,
    ) -> Result<Employee, ServerError> {
        self.payroll_usecase()
            .add_employee(employee_id, name, hourly_wage)
    }

    /// Appends one manually entered row (`YYYY-MM-DD` date, decimal hours)
    /// for an employee already on the roster.
    pub fn record_hours(
        &self,
        employee_id: &str,
        date: &str,
        hours: &str,
    ) -> Result<HoursLedgerEntry, ServerError> {
        self.payroll_usecase().record_hours(employee_id, date, hours)
    }

    // Output.
    // ---

    pub fn print_outcome(&self, outcome: &ImportOutcome) -> String {
        self.import_printer.print_outcome(outcome)
    }

    pub fn print_outcome_json(&self, outcome: &ImportOutcome) -> Result<String, ServerError> {
        print_json(outcome, "import outcome")
    }

    pub fn print_records_csv(&self, records: &[AttendanceRecord]) -> Result<String, ServerError> {
        self.records_printer.print_records(records)
    }

    pub fn print_payroll(&self, report: &PayrollReport) -> String {
        self.payroll_printer.print_report(report)
    }

    pub fn print_payroll_json(&self, report: &PayrollReport) -> Result<String, ServerError> {
        print_json(report, "payroll report")
    }

    pub fn print_employees(&self, employees: &[Employee]) -> String {
        self.payroll_printer.print_employees(employees)
    }
}
