use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Source columns
// ---------------------------------------------------------------------------

/// HR (RKnet) export: email address column.
pub const HR_EMAIL: &str = "E-Mail-Adresse";
/// HR export: given name(s) column.
pub const HR_GIVEN_NAME: &str = "Vorname";
/// HR export: family name column.
pub const HR_FAMILY_NAME: &str = "Nachname";
/// Directory (DiNa-Wiki) export: email address column.
pub const DIRECTORY_EMAIL: &str = "E-Mail";
/// Directory export: display name column.
pub const DIRECTORY_FULL_NAME: &str = "Voller Name";

// ---------------------------------------------------------------------------
// Input records
// ---------------------------------------------------------------------------

/// One row of the HR (RKnet) export.
///
/// Recognized columns are lifted into typed fields once at the load boundary;
/// all columns additionally ride along in `raw`, unexamined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HrRecord {
    pub vorname: Option<String>,
    pub nachname: Option<String>,
    pub email: Option<String>,
    pub raw: HashMap<String, String>,
}

impl HrRecord {
    /// Build from a column-name → value map. Absent or empty cells become `None`.
    pub fn from_fields(fields: HashMap<String, String>) -> Self {
        Self {
            vorname: non_empty(fields.get(HR_GIVEN_NAME)),
            nachname: non_empty(fields.get(HR_FAMILY_NAME)),
            email: non_empty(fields.get(HR_EMAIL)),
            raw: fields,
        }
    }

    /// Lower-cased email, or the empty string when absent. The empty string
    /// never appears in the directory index, so it matches nothing.
    pub fn match_key(&self) -> String {
        self.email.as_deref().unwrap_or("").to_lowercase()
    }

    /// Name used for directory comparison: first whitespace token of
    /// `Vorname` plus `Nachname`. Directory accounts carry only the first
    /// given name.
    pub fn reconciliation_name(&self) -> String {
        let first = self
            .vorname
            .as_deref()
            .and_then(|v| v.split_whitespace().next())
            .unwrap_or("");
        format!("{} {}", first, self.nachname.as_deref().unwrap_or(""))
    }

    /// Name used in the output file: the full `Vorname` plus `Nachname`.
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.vorname.as_deref().unwrap_or(""),
            self.nachname.as_deref().unwrap_or("")
        )
    }
}

/// One row of the directory (DiNa-Wiki) export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryRecord {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub raw: HashMap<String, String>,
}

impl DirectoryRecord {
    /// Build from a column-name → value map. Absent or empty cells become `None`.
    pub fn from_fields(fields: HashMap<String, String>) -> Self {
        Self {
            email: non_empty(fields.get(DIRECTORY_EMAIL)),
            full_name: non_empty(fields.get(DIRECTORY_FULL_NAME)),
            raw: fields,
        }
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// HR record with no directory account, plus a derived account-name
/// suggestion when the email local part has the `first.last` shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnmatchedRecord {
    pub record: HrRecord,
    pub suggested_username: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchField {
    Email,
    FullName,
}

impl MismatchField {
    /// Source column name, as reported to the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            MismatchField::Email => DIRECTORY_EMAIL,
            MismatchField::FullName => DIRECTORY_FULL_NAME,
        }
    }
}

/// A single field disagreement between a matched pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMismatch {
    pub field: MismatchField,
    pub directory_value: String,
    pub hr_value: String,
}

impl fmt::Display for FieldMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: DiNa-Wiki({}) vs RKnet({})",
            self.field.as_str(),
            self.directory_value,
            self.hr_value
        )
    }
}

/// A matched pair whose fields disagree. One entry per HR record, aggregating
/// all of its field mismatches in comparison order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Discrepancy {
    pub hr: HrRecord,
    pub directory: DirectoryRecord,
    pub mismatches: Vec<FieldMismatch>,
}

/// A directory email that appeared more than once. Only the last occurrence
/// participates in matching.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateEmail {
    pub email: String,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconSummary {
    pub hr_rows: usize,
    pub directory_rows: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub discrepancies: usize,
    pub duplicate_directory_emails: usize,
}

/// Full reconciliation result. `unmatched` and `discrepancies` preserve HR
/// input order; `duplicates` is sorted by email.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconResult {
    pub unmatched: Vec<UnmatchedRecord>,
    pub discrepancies: Vec<Discrepancy>,
    pub duplicates: Vec<DuplicateEmail>,
    pub summary: ReconSummary,
}
