use std::fmt;

#[derive(Debug)]
pub enum IoError {
    /// File could not be opened or read.
    Open { path: String, message: String },
    /// Excel workbook could not be opened or parsed.
    Workbook { path: String, message: String },
    /// Excel workbook contains no worksheets.
    NoWorksheet { path: String },
    /// Delimited text could not be parsed.
    Csv { path: String, message: String },
    /// Output file could not be written.
    Write { path: String, message: String },
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, message } => write!(f, "cannot read {path}: {message}"),
            Self::Workbook { path, message } => {
                write!(f, "{path}: failed to open workbook: {message}")
            }
            Self::NoWorksheet { path } => write!(f, "{path}: workbook has no sheets"),
            Self::Csv { path, message } => write!(f, "{path}: {message}"),
            Self::Write { path, message } => write!(f, "cannot write {path}: {message}"),
        }
    }
}

impl std::error::Error for IoError {}
