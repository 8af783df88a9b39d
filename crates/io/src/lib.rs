//! `rostersync-io` — Roster file loading and export.
//!
//! Reads XLSX and delimited-text exports into a uniform [`Table`] shape and
//! writes the unmatched-user CSV. Agnostic to column semantics — binding
//! columns to meaning happens downstream, at the load boundary.

pub mod csv;
pub mod error;
pub mod table;
pub mod xlsx;

pub use error::IoError;
pub use table::Table;
