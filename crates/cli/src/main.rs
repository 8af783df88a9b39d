// rostersync CLI - reconcile an RKnet personnel export against a DiNa-Wiki
// account export

mod exit_codes;
mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use exit_codes::{EXIT_ERROR, EXIT_SUCCESS};
use rostersync_io::Table;
use rostersync_recon::{DirectoryRecord, HrRecord, UnmatchedRecord};

/// Output file header, in the shape the wiki importer expects.
const OUTPUT_HEADERS: [&str; 4] = ["Benutzername", "Voller Name", "E-Mail", "Gruppen"];
/// Placeholder when no account name could be derived.
const NO_USERNAME: &str = "No Username";
/// Placeholder when the HR record carries no email.
const NO_EMAIL: &str = "No Email";
/// Group assigned to every provisioned account.
const OUTPUT_GROUP: &str = "user";

#[derive(Parser)]
#[command(name = "rostersync")]
#[command(about = "Reconcile an RKnet personnel export against a DiNa-Wiki account export")]
#[command(version)]
#[command(after_help = "\
Exit code 1 indicates a fatal error: an unreadable input file, or a missing
--output path outside --check-only mode. Discrepancies and missing accounts
are report content and leave the exit code at 0.

Examples:
  rostersync -i personal.xlsx -d accounts.csv -o neue-benutzer.csv
  rostersync -i personal.xlsx -d accounts.csv --check-only
  rostersync -i personal.xlsx -d accounts.csv --check-only --json | jq .summary")]
struct Cli {
    /// Path to the RKnet personnel export (XLSX, or delimited text)
    #[arg(long = "input-rknet", short = 'i', value_name = "FILE")]
    input_rknet: PathBuf,

    /// Path to the DiNa-Wiki account export (delimited text)
    #[arg(long = "input-dina", short = 'd', value_name = "FILE")]
    input_dina: PathBuf,

    /// Output CSV for users without an account (required unless --check-only)
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Only report discrepancies and missing accounts; write no output file
    #[arg(long)]
    check_only: bool,

    /// Emit the full result as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Suppress per-record report lines on stderr
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {message}");
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {hint}");
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    fn fatal(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_ERROR,
            message: msg.into(),
            hint: None,
        }
    }

    fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let hr_table = load_table(&cli.input_rknet)?;
    let directory_table = load_table(&cli.input_dina)?;

    // Load boundary: bind columns to meaning once, keep the rest as raw
    // pass-through fields.
    let hr: Vec<HrRecord> = hr_table.field_maps().map(HrRecord::from_fields).collect();
    let directory: Vec<DirectoryRecord> = directory_table
        .field_maps()
        .map(DirectoryRecord::from_fields)
        .collect();

    let result = rostersync_recon::run(&hr, &directory);

    let labels = report::SourceLabels {
        rknet: cli.input_rknet.display().to_string(),
        dina: cli.input_dina.display().to_string(),
    };
    report::print(&result, &labels, cli.quiet);

    if cli.json {
        let json = serde_json::to_string_pretty(&report::JsonReport::new(&result))
            .map_err(|e| CliError::fatal(format!("JSON serialization error: {e}")))?;
        println!("{json}");
    }

    if cli.check_only {
        return Ok(());
    }

    let output = cli.output.ok_or_else(|| {
        CliError::fatal("output file path is required when not running in check-only mode")
            .with_hint("pass --output <FILE>, or --check-only to skip the file")
    })?;

    write_output(&output, &result.unmatched)?;
    eprintln!("wrote {}", output.display());

    Ok(())
}

/// Pick the loader by file extension: Excel workbooks by their usual
/// extensions, everything else as delimited text.
fn load_table(path: &Path) -> Result<Table, CliError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let table = match extension.as_str() {
        "xlsx" | "xls" | "xlsb" | "ods" => rostersync_io::xlsx::import(path),
        _ => rostersync_io::csv::import(path),
    }
    .map_err(|e| CliError::fatal(e.to_string()))?;

    Ok(table)
}

/// Write the unmatched users as the wiki-import CSV: one row per user with
/// the suggested account name (or its placeholder), full name, email (or its
/// placeholder), and the constant group.
fn write_output(path: &Path, unmatched: &[UnmatchedRecord]) -> Result<(), CliError> {
    let rows: Vec<Vec<String>> = unmatched
        .iter()
        .map(|entry| {
            vec![
                entry
                    .suggested_username
                    .clone()
                    .unwrap_or_else(|| NO_USERNAME.to_string()),
                entry.record.display_name(),
                entry
                    .record
                    .email
                    .clone()
                    .unwrap_or_else(|| NO_EMAIL.to_string()),
                OUTPUT_GROUP.to_string(),
            ]
        })
        .collect();

    rostersync_io::csv::export(path, &OUTPUT_HEADERS, &rows)
        .map_err(|e| CliError::fatal(e.to_string()))
}
