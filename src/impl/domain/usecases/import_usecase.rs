use std::{path::Path, str::FromStr};

use fractic_server_error::ServerError;
use tracing::{info, warn};

use crate::{
    data::{
        models::employee_id_model::EmployeeIdModel,
        repositories::attendance_source_repository_impl::AttendanceSourceRepositoryImpl,
    },
    domain::{
        logic::{
            column_sheet_reader::ColumnSheetReader,
            expected_hours_policy::ExpectedHoursPolicy,
            extraction_engine::{employee_totals, ExtractionEngine},
            layout_locator::LayoutLocator,
            pay_processor::PayProcessor,
        },
        repositories::{
            attendance_source_repository::AttendanceSourceRepository,
            hours_ledger_repository::HoursLedgerRepository, roster_repository::RosterRepository,
        },
    },
    entities::{
        AttendanceFlag, AttendanceFormat, ColumnOverrides, ColumnSheetFailure, EmployeePay,
        HoursLedgerEntry, ImportNote, ImportOutcome, RawGrid,
    },
    errors::{InvalidColumnMapping, StructuralParseFailure},
};

/// Attendance ingestion. Previews never touch the ledger; `commit` writes
/// the previewed rows in a single append.
pub trait ImportUsecase {
    fn preview_file(&self, path: &Path) -> Result<ImportOutcome, ServerError>;

    fn preview_bytes(
        &self,
        bytes: &[u8],
        format: AttendanceFormat,
    ) -> Result<ImportOutcome, ServerError>;

    fn preview_normalized_file(&self, path: &Path) -> Result<ImportOutcome, ServerError>;

    fn preview_normalized_string(&self, s: &str) -> Result<ImportOutcome, ServerError>;

    /// Sheet with one row per shift (`id, date, entry, exit`) under a
    /// header row. Columns are suggested from the header text; `overrides`
    /// pins any of them. `sheet_name` of `None` reads the first sheet.
    fn preview_columns_file(
        &self,
        path: &Path,
        sheet_name: Option<&str>,
        overrides: ColumnOverrides,
    ) -> Result<ImportOutcome, ServerError>;

    fn preview_columns_bytes(
        &self,
        bytes: &[u8],
        format: AttendanceFormat,
        sheet_name: Option<&str>,
        overrides: ColumnOverrides,
    ) -> Result<ImportOutcome, ServerError>;

    fn commit(&self, outcome: &mut ImportOutcome) -> Result<(), ServerError>;
}

pub(crate) struct ImportUsecaseImpl<
    'a,
    L,
    R,
    S = AttendanceSourceRepositoryImpl, // Default.
> where
    L: HoursLedgerRepository,
    R: RosterRepository,
    S: AttendanceSourceRepository,
{
    source: &'a S,
    ledger: &'a L,
    roster: &'a R,
    policy: &'a dyn ExpectedHoursPolicy,
}

impl<'a, L, R, S> ImportUsecaseImpl<'a, L, R, S>
where
    L: HoursLedgerRepository,
    R: RosterRepository,
    S: AttendanceSourceRepository,
{
    pub(crate) fn new(
        source: &'a S,
        ledger: &'a L,
        roster: &'a R,
        policy: &'a dyn ExpectedHoursPolicy,
    ) -> Self {
        Self {
            source,
            ledger,
            roster,
            policy,
        }
    }

    fn from_grid(&self, grid: &RawGrid) -> Result<ImportOutcome, ServerError> {
        let index = LayoutLocator::new(grid).locate().map_err(|failure| {
            warn!(%failure, "attendance report layout not recognized");
            StructuralParseFailure::new(&failure.to_string())
        })?;
        let records = ExtractionEngine::new(grid, &index, self.policy).process();
        let totals = employee_totals(&records);
        let roster = self.roster.load()?;
        let pay = PayProcessor::new(&roster).price_totals(&totals);

        let mut notes = Vec::new();
        if index.period.is_none() {
            notes.push(ImportNote::PeriodUnresolved);
        }
        notes.extend(
            index
                .blocks
                .iter()
                .filter(|b| b.employee_id.is_none())
                .map(|b| ImportNote::BlankEmployeeId { row: b.anchor_row }),
        );
        for record in &records {
            for &flag in &record.flags {
                // Already covered by the single period note.
                if flag == AttendanceFlag::UnresolvedDate && index.period.is_none() {
                    continue;
                }
                notes.push(ImportNote::RecordAnomaly {
                    employee_id: record.employee_id.clone(),
                    date: record.date,
                    flag,
                });
            }
        }
        notes.extend(roster_misses(&pay));

        info!(
            layout = %index.variant,
            employees = totals.len(),
            records = records.len(),
            notes = notes.len(),
            "attendance report processed"
        );
        Ok(ImportOutcome {
            layout: Some(index.variant),
            column_mapping: None,
            period: index.period,
            ledger_entries: records.iter().map(HoursLedgerEntry::from).collect(),
            records,
            totals,
            pay,
            notes,
            committed: false,
        })
    }

    fn from_entries(&self, entries: Vec<HoursLedgerEntry>) -> Result<ImportOutcome, ServerError> {
        let roster = self.roster.load()?;
        let pay = PayProcessor::new(&roster).price_entries(&entries);
        let notes: Vec<ImportNote> = roster_misses(&pay).collect();
        info!(rows = entries.len(), notes = notes.len(), "normalized hours processed");
        Ok(ImportOutcome {
            layout: None,
            column_mapping: None,
            period: None,
            records: Vec::new(),
            totals: Vec::new(),
            pay,
            ledger_entries: entries,
            notes,
            committed: false,
        })
    }

    fn from_column_sheet(
        &self,
        grid: &RawGrid,
        overrides: ColumnOverrides,
    ) -> Result<ImportOutcome, ServerError> {
        let mut sheet = ColumnSheetReader::new(grid, overrides)
            .process()
            .map_err(|failure| {
                warn!(%failure, "column-mapped sheet not readable");
                match failure {
                    ColumnSheetFailure::NoHeaderRow => {
                        StructuralParseFailure::new(&failure.to_string())
                    }
                    ColumnSheetFailure::ColumnOutOfRange { .. } => {
                        InvalidColumnMapping::new(&failure.to_string())
                    }
                }
            })?;
        for entry in &mut sheet.entries {
            entry.employee_id = normalize_id(&entry.employee_id);
        }
        for note in &mut sheet.notes {
            if let ImportNote::RecordAnomaly { employee_id, .. } = note {
                *employee_id = normalize_id(employee_id);
            }
        }

        let roster = self.roster.load()?;
        let pay = PayProcessor::new(&roster).price_entries(&sheet.entries);
        let mut notes = sheet.notes;
        notes.extend(roster_misses(&pay));
        info!(
            mapping = %sheet.mapping,
            rows = sheet.entries.len(),
            notes = notes.len(),
            "column-mapped sheet processed"
        );
        Ok(ImportOutcome {
            layout: None,
            column_mapping: Some(sheet.mapping),
            period: None,
            records: Vec::new(),
            totals: Vec::new(),
            pay,
            ledger_entries: sheet.entries,
            notes,
            committed: false,
        })
    }
}

impl<'a, L, R, S> ImportUsecase for ImportUsecaseImpl<'a, L, R, S>
where
    L: HoursLedgerRepository,
    R: RosterRepository,
    S: AttendanceSourceRepository,
{
    fn preview_file(&self, path: &Path) -> Result<ImportOutcome, ServerError> {
        let grid = self.source.grid_from_file(path)?;
        self.from_grid(&grid)
    }

    fn preview_bytes(
        &self,
        bytes: &[u8],
        format: AttendanceFormat,
    ) -> Result<ImportOutcome, ServerError> {
        let grid = self.source.grid_from_bytes(bytes, format)?;
        self.from_grid(&grid)
    }

    fn preview_normalized_file(&self, path: &Path) -> Result<ImportOutcome, ServerError> {
        self.from_entries(self.source.normalized_from_file(path)?)
    }

    fn preview_normalized_string(&self, s: &str) -> Result<ImportOutcome, ServerError> {
        self.from_entries(self.source.normalized_from_string(s)?)
    }

    fn preview_columns_file(
        &self,
        path: &Path,
        sheet_name: Option<&str>,
        overrides: ColumnOverrides,
    ) -> Result<ImportOutcome, ServerError> {
        let grid = self.source.sheet_from_file(path, sheet_name)?;
        self.from_column_sheet(&grid, overrides)
    }

    fn preview_columns_bytes(
        &self,
        bytes: &[u8],
        format: AttendanceFormat,
        sheet_name: Option<&str>,
        overrides: ColumnOverrides,
    ) -> Result<ImportOutcome, ServerError> {
        let grid = self.source.sheet_from_bytes(bytes, format, sheet_name)?;
        self.from_column_sheet(&grid, overrides)
    }

    fn commit(&self, outcome: &mut ImportOutcome) -> Result<(), ServerError> {
        if outcome.committed {
            return Ok(());
        }
        self.ledger.append(&outcome.ledger_entries)?;
        outcome.committed = true;
        info!(rows = outcome.ledger_entries.len(), "import committed");
        Ok(())
    }
}

/// Ids typed into spreadsheets often come back as floats ("12.0").
fn normalize_id(raw: &str) -> String {
    EmployeeIdModel::from_str(raw).map_or_else(|_| raw.to_string(), String::from)
}

fn roster_misses(pay: &[EmployeePay]) -> impl Iterator<Item = ImportNote> + '_ {
    pay.iter()
        .filter(|p| !p.matched)
        .map(|p| ImportNote::RosterMiss {
            employee_id: p.employee_id.clone(),
        })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{
        data::repositories::{
            hours_ledger_repository_impl::InMemoryHoursLedger,
            roster_repository_impl::InMemoryRoster,
        },
        domain::logic::expected_hours_policy::WeekdayTablePolicy,
        entities::{DayLabel, Employee, LayoutVariant},
    };

    const REPORT: &str = "\
Tiempo de Registro: 2025-11-17 ~ 2025-11-19,,,
,17,18,19
ID:,7,Nombre:,,ANA
,08:00 12:00 13:00 17:00,08:00 16:00,07:00 15:00
";

    struct Fixture {
        source: AttendanceSourceRepositoryImpl,
        ledger: InMemoryHoursLedger,
        roster: InMemoryRoster,
        policy: WeekdayTablePolicy,
    }

    impl Fixture {
        fn new(employees: Vec<Employee>) -> Self {
            Self {
                source: AttendanceSourceRepositoryImpl::new(None),
                ledger: InMemoryHoursLedger::new(),
                roster: InMemoryRoster::new(employees),
                policy: WeekdayTablePolicy::default(),
            }
        }

        fn usecase(&self) -> ImportUsecaseImpl<'_, InMemoryHoursLedger, InMemoryRoster> {
            ImportUsecaseImpl::new(&self.source, &self.ledger, &self.roster, &self.policy)
        }
    }

    fn ana() -> Employee {
        Employee {
            employee_id: "7".to_string(),
            name: "Ana Pérez".to_string(),
            hourly_wage: 50.0,
        }
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_preview_does_not_write_and_commit_appends_once() {
        let fixture = Fixture::new(vec![ana()]);
        let usecase = fixture.usecase();

        let mut outcome = usecase
            .preview_bytes(REPORT.as_bytes(), AttendanceFormat::Csv)
            .unwrap();
        assert_eq!(outcome.layout, Some(LayoutVariant::InlineLabels));
        assert_eq!(outcome.records.len(), 3);
        assert_eq!(outcome.ledger_entries.len(), 3);
        assert_eq!(outcome.ledger_entries[0].date, DayLabel::Date(d("2025-11-17")));
        assert_eq!(outcome.ledger_entries[0].hours_worked, 8.0);
        assert!(!outcome.committed);
        assert!(fixture.ledger.read_all().unwrap().is_empty());

        usecase.commit(&mut outcome).unwrap();
        usecase.commit(&mut outcome).unwrap();
        assert!(outcome.committed);
        assert_eq!(fixture.ledger.read_all().unwrap().len(), 3);
    }

    #[test]
    fn test_pay_uses_roster_wage() {
        let fixture = Fixture::new(vec![ana()]);
        let outcome = fixture
            .usecase()
            .preview_bytes(REPORT.as_bytes(), AttendanceFormat::Csv)
            .unwrap();
        assert_eq!(outcome.pay.len(), 1);
        assert_eq!(outcome.pay[0].total_hours, 24.0);
        assert_eq!(outcome.pay[0].total_pay, 1200.0);
        assert_eq!(outcome.pay[0].name.as_deref(), Some("Ana Pérez"));
        // Every day fully punched and the employee is on the roster.
        assert!(outcome.notes.is_empty());
    }

    #[test]
    fn test_unmatched_employee_is_noted_and_paid_zero() {
        let fixture = Fixture::new(vec![]);
        let outcome = fixture
            .usecase()
            .preview_bytes(REPORT.as_bytes(), AttendanceFormat::Csv)
            .unwrap();
        assert!(!outcome.pay[0].matched);
        assert_eq!(outcome.pay[0].total_pay, 0.0);
        assert_eq!(outcome.pay[0].name.as_deref(), Some("ANA"));
        assert_eq!(
            outcome.notes,
            vec![ImportNote::RosterMiss {
                employee_id: "7".to_string()
            }]
        );
    }

    #[test]
    fn test_structural_failure_leaves_ledger_untouched() {
        let fixture = Fixture::new(vec![ana()]);
        let usecase = fixture.usecase();
        assert!(usecase
            .preview_bytes(b"hola,mundo\n", AttendanceFormat::Csv)
            .is_err());
        assert!(usecase.preview_bytes(b"", AttendanceFormat::Csv).is_err());
        assert!(fixture.ledger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_missing_period_is_a_single_note() {
        let fixture = Fixture::new(vec![ana()]);
        let report = REPORT.lines().skip(1).collect::<Vec<_>>().join("\n");
        let outcome = fixture
            .usecase()
            .preview_bytes(report.as_bytes(), AttendanceFormat::Csv)
            .unwrap();
        assert_eq!(outcome.period, None);
        assert_eq!(outcome.notes, vec![ImportNote::PeriodUnresolved]);
        assert_eq!(outcome.ledger_entries[1].date, DayLabel::DayOfMonth(18));
    }

    #[test]
    fn test_anomalies_are_collected_per_record() {
        let fixture = Fixture::new(vec![ana()]);
        let report = REPORT.replace("08:00 16:00", "08:00");
        let outcome = fixture
            .usecase()
            .preview_bytes(report.as_bytes(), AttendanceFormat::Csv)
            .unwrap();
        assert_eq!(
            outcome.notes,
            vec![ImportNote::RecordAnomaly {
                employee_id: "7".to_string(),
                date: DayLabel::Date(d("2025-11-18")),
                flag: AttendanceFlag::IncompleteShift,
            }]
        );
        assert_eq!(outcome.pay[0].total_hours, 16.0);
    }

    #[test]
    fn test_normalized_import() {
        let fixture = Fixture::new(vec![ana()]);
        let usecase = fixture.usecase();
        let mut outcome = usecase
            .preview_normalized_string("id,fecha,horas\n7,2025-11-17,8\n7,2025-11-18,7.5\n9,2025-11-18,4\n")
            .unwrap();
        assert_eq!(outcome.layout, None);
        assert_eq!(outcome.ledger_entries.len(), 3);
        assert_eq!(outcome.pay[0].total_pay, 775.0);
        assert_eq!(
            outcome.notes,
            vec![ImportNote::RosterMiss {
                employee_id: "9".to_string()
            }]
        );
        usecase.commit(&mut outcome).unwrap();
        assert_eq!(fixture.ledger.read_all().unwrap().len(), 3);
    }

    const SHIFTS: &str = "\
ID,Fecha,Entrada,Salida
7.0,2025-11-17,08:00,17:00
7,2025-11-18,22:00,06:00
9,2025-11-18,08:00,
,2025-11-19,08:00,17:00
";

    #[test]
    fn test_column_mapped_import() {
        let fixture = Fixture::new(vec![ana()]);
        let usecase = fixture.usecase();
        let mut outcome = usecase
            .preview_columns_bytes(
                SHIFTS.as_bytes(),
                AttendanceFormat::Csv,
                None,
                ColumnOverrides::default(),
            )
            .unwrap();

        assert_eq!(outcome.layout, None);
        assert_eq!(outcome.column_mapping.map(|m| m.columns()), Some([0, 1, 2, 3]));
        let rows: Vec<(&str, f64)> = outcome
            .ledger_entries
            .iter()
            .map(|e| (e.employee_id.as_str(), e.hours_worked))
            .collect();
        assert_eq!(rows, vec![("7", 9.0), ("7", 8.0), ("9", 0.0)]);
        assert_eq!(outcome.pay[0].total_pay, 850.0);
        assert_eq!(
            outcome.notes,
            vec![
                ImportNote::RecordAnomaly {
                    employee_id: "9".to_string(),
                    date: DayLabel::Date(d("2025-11-18")),
                    flag: AttendanceFlag::IncompleteShift,
                },
                ImportNote::RowSkipped { row: 4 },
                ImportNote::RosterMiss {
                    employee_id: "9".to_string()
                },
            ]
        );
        assert!(fixture.ledger.read_all().unwrap().is_empty());

        usecase.commit(&mut outcome).unwrap();
        assert_eq!(fixture.ledger.read_all().unwrap().len(), 3);
    }

    #[test]
    fn test_column_override_outside_header_is_rejected() {
        let fixture = Fixture::new(vec![ana()]);
        let overrides = ColumnOverrides {
            exit: Some(7),
            ..ColumnOverrides::default()
        };
        assert!(fixture
            .usecase()
            .preview_columns_bytes(SHIFTS.as_bytes(), AttendanceFormat::Csv, None, overrides)
            .is_err());
        assert!(fixture
            .usecase()
            .preview_columns_bytes(b"", AttendanceFormat::Csv, None, ColumnOverrides::default())
            .is_err());
    }
}
