//! Engine error types

use thiserror::Error;
use verbatim_core::CoreError;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Domain algorithm error
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Input line that does not split into the expected columns
    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord {
        /// 1-based input line number
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// A record failed inside a processor
    #[error("line {line}: {source}")]
    Record {
        /// 1-based input line number
        line: usize,
        /// Underlying domain error
        source: CoreError,
    },

    /// Parallel execution error
    #[cfg(feature = "parallel")]
    #[error("parallel execution failed: {0}")]
    Parallel(String),

    /// Configuration error
    #[error("invalid configuration: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// Encoding error (UTF-8, etc.)
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Output could not be serialized
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl EngineError {
    /// Attach a line number to a domain error
    pub fn at_line(line: usize, source: CoreError) -> Self {
        EngineError::Record { line, source }
    }

    /// True for errors the malformed-record policy may skip
    pub fn is_malformed(&self) -> bool {
        matches!(self, EngineError::MalformedRecord { .. })
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::Io(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for EngineError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        EngineError::Encoding(err.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::MalformedRecord {
            line: 3,
            reason: "expected 2 columns, found 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed record at line 3: expected 2 columns, found 1"
        );
        assert!(err.is_malformed());

        let err = EngineError::at_line(7, CoreError::LengthMismatch { tokens: 2, tags: 3 });
        assert_eq!(err.to_string(), "line 7: length mismatch: 2 tokens but 3 tags");
        assert!(!err.is_malformed());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(EngineError::from(io), EngineError::Io(_)));
    }
}
