//! Progress CLI - Command-line interface for Progress Flux
//!
//! Commands:
//! - report: Analyze a progress snapshot into a report
//! - validate: Validate a snapshot against progress.snapshot.v1
//! - calendar: Print the date axis for a period

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use progress_flux::calendar::{dates_in_period_ending, parse_date_key, DEFAULT_PERIOD_DAYS};
use progress_flux::schema::{ProgressSnapshot, SnapshotAdapter, SCHEMA_VERSION};
use progress_flux::{ProgressAnalyzer, FLUX_VERSION};

/// Progress - Deterministic progress analytics for habit tracking
#[derive(Parser)]
#[command(name = "progress")]
#[command(author = "Synheart AI Inc")]
#[command(version = FLUX_VERSION)]
#[command(about = "Turn check-ins and action logs into progress insights", long_about = None)]
struct Cli {
    /// Log pipeline stages to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a snapshot and write the progress report
    Report {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Override the snapshot's period length in days
        #[arg(long)]
        period_days: Option<usize>,

        /// Anchor the period at this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,

        /// Output format
        #[arg(long, default_value = "json")]
        format: OutputFormat,

        /// Fail when the snapshot has schema issues
        #[arg(long)]
        strict: bool,
    },

    /// Validate a snapshot against the schema
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the date axis for a period
    Calendar {
        /// Period length in days
        #[arg(long, default_value_t = DEFAULT_PERIOD_DAYS)]
        days: usize,

        /// Last day of the period (YYYY-MM-DD); local date when absent
        #[arg(long)]
        today: Option<String>,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

/// Install a stderr subscriber. `--verbose` forces debug output; otherwise
/// `RUST_LOG` decides and the default is warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("progress_flux=debug,progress=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), ProgressCliError> {
    match cli.command {
        Commands::Report {
            input,
            output,
            period_days,
            today,
            format,
            strict,
        } => cmd_report(&input, &output, period_days, today.as_deref(), format, strict),

        Commands::Validate { input, json } => cmd_validate(&input, json),

        Commands::Calendar { days, today } => cmd_calendar(days, today.as_deref()),
    }
}

fn cmd_report(
    input: &Path,
    output: &Path,
    period_days: Option<usize>,
    today: Option<&str>,
    format: OutputFormat,
    strict: bool,
) -> Result<(), ProgressCliError> {
    let input_data = read_input(input)?;

    let mut analyzer = ProgressAnalyzer::new()
        .pretty(matches!(format, OutputFormat::JsonPretty))
        .strict(strict);
    if let Some(days) = period_days {
        analyzer = analyzer.with_period_days(days);
    }
    if let Some(today) = today {
        analyzer = analyzer.with_today(parse_date_key(today)?);
    }

    let report = analyzer.process(&input_data)?;
    tracing::debug!(bytes = report.len(), "encoded report");

    if output.to_string_lossy() == "-" {
        println!("{}", report);
    } else {
        fs::write(output, report + "\n")?;
    }

    Ok(())
}

fn cmd_validate(input: &Path, json: bool) -> Result<(), ProgressCliError> {
    let input_data = read_input(input)?;
    let snapshot: ProgressSnapshot = serde_json::from_str(&input_data)?;

    let issues = snapshot.validate();
    let report = ValidationReport {
        schema_version: SCHEMA_VERSION.to_string(),
        action_logs: snapshot.action_logs.len(),
        check_ins: snapshot.check_ins.len(),
        signals: snapshot.signals.len(),
        issues: issues.iter().map(|i| i.to_string()).collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Schema:       {}", report.schema_version);
        println!("Signals:      {}", report.signals);
        println!("Action logs:  {}", report.action_logs);
        println!("Check-ins:    {}", report.check_ins);
        println!("Issues:       {}", report.issues.len());

        if !report.issues.is_empty() {
            println!("\nIssues:");
            for issue in &report.issues {
                println!("  - {}", issue);
            }
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ProgressCliError::ValidationFailed(issues.len()))
    }
}

fn cmd_calendar(days: usize, today: Option<&str>) -> Result<(), ProgressCliError> {
    if days == 0 {
        return Err(ProgressCliError::EmptyPeriod);
    }

    let snapshot = ProgressSnapshot {
        today: today.map(str::to_string),
        ..ProgressSnapshot::new(days)
    };
    let today = SnapshotAdapter::resolve_today(&snapshot)?;

    for key in dates_in_period_ending(today, days) {
        println!("{}", key);
    }

    Ok(())
}

// Helper functions

fn read_input(input: &Path) -> Result<String, ProgressCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

// Error types

#[derive(Debug)]
enum ProgressCliError {
    Io(io::Error),
    Compute(progress_flux::ComputeError),
    Json(serde_json::Error),
    ValidationFailed(usize),
    EmptyPeriod,
}

impl From<io::Error> for ProgressCliError {
    fn from(e: io::Error) -> Self {
        ProgressCliError::Io(e)
    }
}

impl From<progress_flux::ComputeError> for ProgressCliError {
    fn from(e: progress_flux::ComputeError) -> Self {
        ProgressCliError::Compute(e)
    }
}

impl From<serde_json::Error> for ProgressCliError {
    fn from(e: serde_json::Error) -> Self {
        ProgressCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<ProgressCliError> for CliError {
    fn from(e: ProgressCliError) -> Self {
        match e {
            ProgressCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            ProgressCliError::Compute(e) => CliError {
                code: "COMPUTE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some(format!("Ensure input matches {} schema", SCHEMA_VERSION)),
            },
            ProgressCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            ProgressCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} schema issue(s) found", count),
                hint: Some("Fix the reported issues and retry".to_string()),
            },
            ProgressCliError::EmptyPeriod => CliError {
                code: "EMPTY_PERIOD".to_string(),
                message: "Period length must be at least one day".to_string(),
                hint: Some("Pass --days with a positive value".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    schema_version: String,
    action_logs: usize,
    check_ins: usize,
    signals: usize,
    issues: Vec<String>,
}
