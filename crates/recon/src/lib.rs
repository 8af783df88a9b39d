//! `rostersync-recon` — Personnel roster reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded records, returns classified results.
//! No CLI or IO dependencies.

pub mod engine;
pub mod model;
pub mod username;

pub use engine::run;
pub use model::{
    DirectoryRecord, Discrepancy, DuplicateEmail, FieldMismatch, HrRecord, ReconResult,
    ReconSummary, UnmatchedRecord,
};
