use std::path::Path;

use fractic_server_error::ServerError;
use tracing::debug;

use crate::{
    data::datasources::{
        attendance_workbook_datasource::{
            AttendanceWorkbookDatasource, AttendanceWorkbookDatasourceImpl,
        },
        normalized_hours_csv_datasource::{
            NormalizedHoursCsvDatasource, NormalizedHoursCsvDatasourceImpl,
        },
        report_csv_datasource::{ReportCsvDatasource, ReportCsvDatasourceImpl},
    },
    domain::repositories::attendance_source_repository::AttendanceSourceRepository,
    entities::{AttendanceFormat, HoursLedgerEntry, RawGrid},
    errors::UnsupportedAttendanceFormat,
};

pub(crate) struct AttendanceSourceRepositoryImpl<
    DS1 = AttendanceWorkbookDatasourceImpl, // Default.
    DS2 = ReportCsvDatasourceImpl,          // Default.
    DS3 = NormalizedHoursCsvDatasourceImpl, // Default.
> where
    DS1: AttendanceWorkbookDatasource,
    DS2: ReportCsvDatasource,
    DS3: NormalizedHoursCsvDatasource,
{
    sheet_name: Option<String>,
    workbook_datasource: DS1,
    report_csv_datasource: DS2,
    normalized_datasource: DS3,
}

impl<DS1, DS2, DS3> AttendanceSourceRepository for AttendanceSourceRepositoryImpl<DS1, DS2, DS3>
where
    DS1: AttendanceWorkbookDatasource,
    DS2: ReportCsvDatasource,
    DS3: NormalizedHoursCsvDatasource,
{
    fn grid_from_file(&self, path: &Path) -> Result<RawGrid, ServerError> {
        self.sheet_from_file(path, self.sheet_name.as_deref())
    }

    fn grid_from_bytes(
        &self,
        bytes: &[u8],
        format: AttendanceFormat,
    ) -> Result<RawGrid, ServerError> {
        self.sheet_from_bytes(bytes, format, self.sheet_name.as_deref())
    }

    fn sheet_from_file(
        &self,
        path: &Path,
        sheet_name: Option<&str>,
    ) -> Result<RawGrid, ServerError> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();
        let format = AttendanceFormat::from_extension(&extension)
            .ok_or_else(|| UnsupportedAttendanceFormat::new(&extension))?;
        debug!(path = %path.display(), ?format, ?sheet_name, "loading attendance sheet");
        match format {
            AttendanceFormat::Workbook => self.workbook_datasource.from_file(path, sheet_name),
            AttendanceFormat::Csv => self.report_csv_datasource.from_file(path),
        }
    }

    fn sheet_from_bytes(
        &self,
        bytes: &[u8],
        format: AttendanceFormat,
        sheet_name: Option<&str>,
    ) -> Result<RawGrid, ServerError> {
        match format {
            AttendanceFormat::Workbook => self.workbook_datasource.from_bytes(bytes, sheet_name),
            AttendanceFormat::Csv => self.report_csv_datasource.from_bytes(bytes),
        }
    }

    fn normalized_from_file(&self, path: &Path) -> Result<Vec<HoursLedgerEntry>, ServerError> {
        self.normalized_datasource.from_file(path)
    }

    fn normalized_from_string(&self, s: &str) -> Result<Vec<HoursLedgerEntry>, ServerError> {
        self.normalized_datasource.from_string(s)
    }
}

impl AttendanceSourceRepositoryImpl {
    pub(crate) fn new(sheet_name: Option<String>) -> Self {
        AttendanceSourceRepositoryImpl {
            sheet_name,
            workbook_datasource: AttendanceWorkbookDatasourceImpl::new(),
            report_csv_datasource: ReportCsvDatasourceImpl::new(),
            normalized_datasource: NormalizedHoursCsvDatasourceImpl::new(),
        }
    }
}
