use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the failures that abort a seed run.
///
/// Row-level defects and value coercion never surface here: malformed rows are
/// filtered and unparseable values fall back to defaults.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when a workbook has no worksheet to read from.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when no file in the input directory matches a discovery pattern.
    #[error("no input file matching '{pattern}' in {}", directory.display())]
    MissingInput { directory: PathBuf, pattern: String },

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
