//! Error types for rowlog-storage
//!
//! Every failure is local and synchronous from the caller's point of view.
//! Nothing here is retried.

use rowlog_core::CodecError;
use thiserror::Error;

/// Errors that can occur in logger operations
#[derive(Debug, Error)]
pub enum LogError {
    /// An absent or unusable row was submitted for writing
    #[error("Invalid row: {0}")]
    InvalidRow(String),

    /// The operation needs a header and none has been set
    #[error("Log is missing a header row")]
    MissingHeader,

    /// The named column is not part of the header
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// A query bound was not a number
    #[error("Query bounds must be numeric")]
    NonNumericBound,

    /// The upper query bound is below the lower one
    #[error("Invalid range: to ({to}) must be >= from ({from})")]
    InvalidRange { from: f64, to: f64 },

    /// Deserialization would overwrite rows already in the log
    #[error("Refusing to load text into a log that already holds {rows} rows")]
    NonEmptyLog { rows: u64 },

    /// The operation is not available on this backend
    #[error("Unsupported on this backend: {0}")]
    UnsupportedMode(&'static str),

    /// A searched column held a value that cannot be compared numerically
    #[error("Row {row} has no numeric value in column {column}")]
    NonNumericCell { row: usize, column: String },

    /// Underlying file I/O failed
    #[error("Backend I/O error: {0}")]
    BackendIo(String),

    /// A line of log text could not be decoded
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}

impl From<std::io::Error> for LogError {
    fn from(err: std::io::Error) -> Self {
        LogError::BackendIo(err.to_string())
    }
}

impl LogError {
    /// Create a new InvalidRow error
    pub fn invalid_row(message: impl Into<String>) -> Self {
        Self::InvalidRow(message.into())
    }

    /// Create a new UnknownColumn error
    pub fn unknown_column(column: impl Into<String>) -> Self {
        Self::UnknownColumn(column.into())
    }

    /// Create a new BackendIo error
    pub fn io(message: impl Into<String>) -> Self {
        Self::BackendIo(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LogError = io_err.into();
        assert!(matches!(err, LogError::BackendIo(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_codec_error_conversion() {
        let err: LogError = CodecError::Json("eof".into()).into();
        assert!(matches!(err, LogError::Codec(_)));
    }

    #[test]
    fn test_invalid_range_message() {
        let err = LogError::InvalidRange { from: 5.0, to: 1.0 };
        assert_eq!(err.to_string(), "Invalid range: to (1) must be >= from (5)");
    }

    #[test]
    fn test_unknown_column() {
        let err = LogError::unknown_column("unicorn");
        assert!(matches!(err, LogError::UnknownColumn(ref c) if c == "unicorn"));
    }
}
