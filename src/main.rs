use std::{path::PathBuf, process::ExitCode};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use fractic_server_error::ServerError;
use maquila_payroll::{
    config::PayrollConfig,
    entities::{column_index, ColumnOverrides},
    util::PayrollUtil,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "maquila-payroll")]
#[command(version, about = "Attendance imports and payroll for the shop floor", long_about = None)]
struct Cli {
    /// RON configuration file (defaults apply when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import an attendance report (.xls, .xlsx, .ods, .csv) into the hours ledger
    Import(ImportArgs),

    /// Payroll over an inclusive date range
    Payroll {
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Roster maintenance
    #[command(subcommand)]
    Employee(EmployeeCommand),

    /// Manual entries in the hours ledger
    #[command(subcommand)]
    Hours(HoursCommand),
}

#[derive(Args)]
struct ImportArgs {
    file: PathBuf,

    /// The file already holds `employee_id,date,hours` rows
    #[arg(long, conflicts_with = "columns")]
    normalized: bool,

    /// The file is a plain table with one `id, date, entry, exit` row per
    /// shift under a header row
    #[arg(long)]
    columns: bool,

    /// Worksheet to read (defaults to the configured sheet, or the first
    /// sheet for --columns)
    #[arg(long)]
    sheet: Option<String>,

    /// Column letter holding the employee id (with --columns)
    #[arg(long, value_name = "COLUMN", value_parser = parse_column, requires = "columns")]
    id_col: Option<usize>,

    /// Column letter holding the date (with --columns)
    #[arg(long, value_name = "COLUMN", value_parser = parse_column, requires = "columns")]
    date_col: Option<usize>,

    /// Column letter holding the entry time (with --columns)
    #[arg(long, value_name = "COLUMN", value_parser = parse_column, requires = "columns")]
    entry_col: Option<usize>,

    /// Column letter holding the exit time (with --columns)
    #[arg(long, value_name = "COLUMN", value_parser = parse_column, requires = "columns")]
    exit_col: Option<usize>,

    /// Show the result without writing the ledger
    #[arg(long)]
    dry_run: bool,

    /// Print JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Also write every attendance record to this CSV file
    #[arg(long, value_name = "FILE", conflicts_with = "columns")]
    export_records: Option<PathBuf>,
}

#[derive(Subcommand)]
enum EmployeeCommand {
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        /// Hourly wage in pesos
        #[arg(long)]
        wage: f64,
    },
    List,
}

#[derive(Subcommand)]
enum HoursCommand {
    /// Append worked hours for one employee and day
    Add {
        #[arg(long)]
        id: String,
        /// Date as YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Decimal hours, e.g. 7.5
        #[arg(long)]
        hours: String,
    },
}

fn parse_column(s: &str) -> Result<usize, String> {
    column_index(s).ok_or_else(|| format!("'{}' is not a column letter (A, B, ... AA)", s))
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = ?e, "command failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ServerError> {
    let mut config = match &cli.config {
        Some(path) => PayrollConfig::from_file(path)?,
        None => PayrollConfig::default(),
    };
    if let Command::Import(ImportArgs {
        sheet: Some(sheet),
        ..
    }) = &cli.command
    {
        config.sheet_name = Some(sheet.clone());
    }
    let util = PayrollUtil::new(&config);

    match cli.command {
        Command::Import(args) if args.columns => {
            let overrides = ColumnOverrides {
                employee_id: args.id_col,
                date: args.date_col,
                entry: args.entry_col,
                exit: args.exit_col,
            };
            let sheet = args.sheet.as_deref();
            let outcome = if args.dry_run {
                util.preview_columns_file(&args.file, sheet, overrides)?
            } else {
                util.import_columns_file(&args.file, sheet, overrides)?
            };
            if args.json {
                println!("{}", util.print_outcome_json(&outcome)?);
            } else {
                print!("{}", util.print_outcome(&outcome));
            }
        }
        Command::Import(args) => {
            let outcome = match (args.normalized, args.dry_run) {
                (false, false) => util.import_file(&args.file)?,
                (false, true) => util.preview_file(&args.file)?,
                (true, false) => util.import_normalized_file(&args.file)?,
                (true, true) => util.preview_normalized_file(&args.file)?,
            };
            if let Some(path) = &args.export_records {
                let csv = util.print_records_csv(&outcome.records)?;
                std::fs::write(path, csv).map_err(|e| {
                    maquila_payroll::errors::WriteError::with_debug(&path.to_string_lossy(), &e)
                })?;
                info!(path = %path.display(), "attendance records exported");
            }
            if args.json {
                println!("{}", util.print_outcome_json(&outcome)?);
            } else {
                print!("{}", util.print_outcome(&outcome));
            }
        }
        Command::Payroll { from, to, json } => {
            let report = util.payroll(from, to)?;
            if json {
                println!("{}", util.print_payroll_json(&report)?);
            } else {
                print!("{}", util.print_payroll(&report));
            }
        }
        Command::Employee(EmployeeCommand::Add { id, name, wage }) => {
            let employee = util.add_employee(&id, &name, wage)?;
            print!("{}", util.print_employees(&[employee]));
        }
        Command::Employee(EmployeeCommand::List) => {
            print!("{}", util.print_employees(&util.employees()?));
        }
        Command::Hours(HoursCommand::Add { id, date, hours }) => {
            let entry = util.record_hours(&id, &date, &hours)?;
            println!(
                "Recorded {} hours for employee {} on {}.",
                entry.hours_worked, entry.employee_id, entry.date
            );
        }
    }
    Ok(())
}
