//! Stderr report and JSON document for a reconciliation result.
//!
//! The engine returns structured results only; everything an operator sees is
//! rendered here.

use colored::Colorize;
use serde::Serialize;

use rostersync_recon::{Discrepancy, DuplicateEmail, ReconResult, ReconSummary, UnmatchedRecord};

use crate::{NO_EMAIL, NO_USERNAME};

pub struct SourceLabels {
    pub rknet: String,
    pub dina: String,
}

/// Human report on stderr. `quiet` drops the per-record lines; row and
/// summary counts always print.
pub fn print(result: &ReconResult, labels: &SourceLabels, quiet: bool) {
    let s = &result.summary;
    eprintln!("rknet: {} rows ({})", s.hr_rows, labels.rknet);
    eprintln!("dina:  {} rows ({})", s.directory_rows, labels.dina);

    if !quiet {
        for duplicate in &result.duplicates {
            eprintln!(
                "{} duplicate directory email {} ({} occurrences, matching the last)",
                "warning:".yellow().bold(),
                duplicate.email,
                duplicate.count
            );
        }

        for discrepancy in &result.discrepancies {
            eprintln!(
                "{} {} ({})",
                "discrepancy:".red().bold(),
                discrepancy.hr.reconciliation_name(),
                discrepancy.hr.match_key()
            );
            for mismatch in &discrepancy.mismatches {
                eprintln!("  {}", mismatch.to_string().yellow());
            }
        }

        for entry in &result.unmatched {
            eprintln!(
                "missing account: {} ({}) - suggested username: {}",
                entry.record.display_name(),
                entry.record.email.as_deref().unwrap_or(NO_EMAIL),
                entry.suggested_username.as_deref().unwrap_or(NO_USERNAME)
            );
        }
    }

    eprintln!("matched: {}", s.matched);
    eprintln!("discrepancies: {}", s.discrepancies);
    eprintln!("missing accounts: {}", s.unmatched);
    if s.duplicate_directory_emails > 0 {
        eprintln!("duplicate directory emails: {}", s.duplicate_directory_emails);
    }
}

#[derive(Serialize)]
pub struct ReportMeta {
    pub engine_version: String,
    pub run_at: String,
}

/// The machine-readable result: engine output plus run metadata.
#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub meta: ReportMeta,
    pub summary: &'a ReconSummary,
    pub unmatched: &'a [UnmatchedRecord],
    pub discrepancies: &'a [Discrepancy],
    pub duplicates: &'a [DuplicateEmail],
}

impl<'a> JsonReport<'a> {
    pub fn new(result: &'a ReconResult) -> Self {
        Self {
            meta: ReportMeta {
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                run_at: chrono::Utc::now().to_rfc3339(),
            },
            summary: &result.summary,
            unmatched: &result.unmatched,
            discrepancies: &result.discrepancies,
            duplicates: &result.duplicates,
        }
    }
}
