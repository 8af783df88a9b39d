//! CLI exit code registry.
//!
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! | Code | Meaning                                                |
//! |------|--------------------------------------------------------|
//! | 0    | Success                                                |
//! | 1    | Fatal error (unreadable input, missing output path)    |
//! | 2    | Usage error (bad arguments; raised by clap)            |

/// Success - reconciliation ran to completion. Discrepancies and missing
/// accounts are report content, not failures.
pub const EXIT_SUCCESS: u8 = 0;

/// Fatal error - an input file could not be read, or no output path was
/// given outside check-only mode.
pub const EXIT_ERROR: u8 = 1;
