//! tgpa CLI
//!
//! Estimate a term grade point average from subject credits and marks.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tgpa::aggregate::calculate;
use tgpa::parse::SubjectSpec;
use tgpa::report::{build_report, format_grade_table, format_report};
use tgpa::subjects::SubjectList;
use tgpa::types::{EstimatorConfig, OutputFormat, ZeroMarksPolicy, DEFAULT_ROWS};

#[derive(Parser)]
#[command(name = "tgpa")]
#[command(about = "Estimate a term GPA from subject credits and marks")]
#[command(version)]
struct Cli {
    /// Blank rows to start the interactive table with
    #[arg(long, global = true, default_value_t = DEFAULT_ROWS, env = "TGPA_ROWS")]
    rows: usize,

    /// Count subjects with zero marks (an F) instead of skipping them
    #[arg(long, global = true, env = "TGPA_COUNT_ZERO_MARKS")]
    count_zero_marks: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive subject table (default)
    Tui,

    /// Compute the TGPA for subjects given on the command line
    Calc {
        /// Subject as CREDITS:MARKS[:NAME], repeatable
        #[arg(short, long = "subject", value_name = "CREDITS:MARKS[:NAME]", required = true)]
        subjects: Vec<SubjectSpec>,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Print the grading reference table
    Grades,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let zero_marks = if cli.count_zero_marks {
        ZeroMarksPolicy::Include
    } else {
        ZeroMarksPolicy::Exclude
    };

    let result = match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => cmd_tui(EstimatorConfig {
            initial_rows: cli.rows,
            zero_marks,
        }),
        Commands::Calc { subjects, format } => cmd_calc(&subjects, format.into(), zero_marks),
        Commands::Grades => cmd_grades(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr, filtered by RUST_LOG (warnings and above by default).
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_tui(config: EstimatorConfig) -> Result<(), String> {
    info!(rows = config.initial_rows, policy = ?config.zero_marks, "starting tui");
    tgpa::tui::run::run(config).map_err(|e| format!("terminal error: {}", e))
}

fn cmd_calc(
    specs: &[SubjectSpec],
    format: OutputFormat,
    zero_marks: ZeroMarksPolicy,
) -> Result<(), String> {
    let subjects = SubjectList::from_specs(specs);

    let summary = calculate(&subjects, zero_marks).map_err(|e| {
        debug!(subjects = specs.len(), "no subject counted towards the average");
        e.to_string()
    })?;

    let report = build_report(&subjects, summary, zero_marks);
    print!("{}", format_report(&report, format));

    Ok(())
}

fn cmd_grades() -> Result<(), String> {
    print!("{}", format_grade_table());
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
