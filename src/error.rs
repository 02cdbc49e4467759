//! Error types for the converter.

use thiserror::Error;

/// Result type alias for converter operations
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Fatal conditions that abort a conversion run.
///
/// The export layout is fixed, so a malformed file means the wrong file was
/// passed, not a recoverable row. Non-fatal conditions (unknown direction
/// flag, unresolvable payee, missing header line) never reach this type.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Failed to open, read or write a stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed tabular data, including a missing required column
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// A built-in pattern failed to compile
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),
}
