use std::collections::HashMap;

use crate::model::{
    DirectoryRecord, Discrepancy, DuplicateEmail, FieldMismatch, HrRecord, MismatchField,
    ReconResult, ReconSummary, UnmatchedRecord,
};
use crate::username::suggest_username;

/// Reconcile the HR roster against the directory roster.
///
/// Single deterministic pass: every HR record either matches a directory
/// record by lower-cased email or lands in `unmatched`, in input order.
/// Matched pairs with disagreeing fields produce one `Discrepancy` each.
/// Malformed records never fail the run — missing fields degrade to empty
/// values and the result stays a best-effort report.
pub fn run(hr: &[HrRecord], directory: &[DirectoryRecord]) -> ReconResult {
    let (index, duplicates) = build_directory_index(directory);

    let mut unmatched = Vec::new();
    let mut discrepancies = Vec::new();
    let mut matched = 0usize;

    for record in hr {
        match index.get(&record.match_key()) {
            None => {
                let suggested_username = record.email.as_deref().and_then(suggest_username);
                unmatched.push(UnmatchedRecord {
                    record: record.clone(),
                    suggested_username,
                });
            }
            Some(&entry) => {
                matched += 1;
                let mismatches = compare_pair(record, entry);
                if !mismatches.is_empty() {
                    discrepancies.push(Discrepancy {
                        hr: record.clone(),
                        directory: entry.clone(),
                        mismatches,
                    });
                }
            }
        }
    }

    let summary = ReconSummary {
        hr_rows: hr.len(),
        directory_rows: directory.len(),
        matched,
        unmatched: unmatched.len(),
        discrepancies: discrepancies.len(),
        duplicate_directory_emails: duplicates.len(),
    };

    ReconResult {
        unmatched,
        discrepancies,
        duplicates,
        summary,
    }
}

/// Build the lower-cased-email index over the directory roster.
///
/// Records without an email are skipped. On duplicate emails the last
/// occurrence wins; duplicated emails are reported with their occurrence
/// counts, sorted by email.
fn build_directory_index(
    directory: &[DirectoryRecord],
) -> (HashMap<String, &DirectoryRecord>, Vec<DuplicateEmail>) {
    let mut index: HashMap<String, &DirectoryRecord> = HashMap::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for record in directory {
        if let Some(email) = &record.email {
            let key = email.to_lowercase();
            *counts.entry(key.clone()).or_insert(0) += 1;
            index.insert(key, record);
        }
    }

    let mut duplicates: Vec<DuplicateEmail> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(email, count)| DuplicateEmail { email, count })
        .collect();
    duplicates.sort_by(|a, b| a.email.cmp(&b.email));

    (index, duplicates)
}

/// Compare a matched pair: email case-insensitively, full name verbatim.
/// Mismatches are ordered email first, name second.
fn compare_pair(hr: &HrRecord, directory: &DirectoryRecord) -> Vec<FieldMismatch> {
    let mut mismatches = Vec::new();

    let hr_email = hr.email.as_deref().unwrap_or("");
    let directory_email = directory.email.as_deref().unwrap_or("");
    if directory_email.to_lowercase() != hr_email.to_lowercase() {
        mismatches.push(FieldMismatch {
            field: MismatchField::Email,
            directory_value: directory_email.to_string(),
            hr_value: hr_email.to_string(),
        });
    }

    let hr_name = hr.reconciliation_name();
    let directory_name = directory.full_name.clone().unwrap_or_default();
    if directory_name != hr_name {
        mismatches.push(FieldMismatch {
            field: MismatchField::FullName,
            directory_value: directory_name,
            hr_value: hr_name,
        });
    }

    mismatches
}
