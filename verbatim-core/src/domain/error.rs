use thiserror::Error;

/// Domain-specific errors
#[derive(Debug, Error)]
pub enum CoreError {
    /// Tag sequence and token sequence disagree in length
    #[error("length mismatch: {tokens} tokens but {tags} tags")]
    LengthMismatch {
        /// Number of tokens in the record
        tokens: usize,
        /// Number of tags in the record
        tags: usize,
    },

    /// Placeholder index past the end of its phrase list
    #[error("cannot restore {placeholder}: index out of range, available phrases: {available}")]
    PlaceholderOutOfRange {
        /// The placeholder token as it appeared in the text
        placeholder: String,
        /// Rendering of the side channel that was searched
        available: String,
    },

    /// Placeholder scope not present in the side channel
    #[error("cannot restore {placeholder}: unknown type {kind:?}, available phrases: {available}")]
    UnknownType {
        /// The placeholder token as it appeared in the text
        placeholder: String,
        /// Type carried by the placeholder (None for untyped placeholders)
        kind: Option<String>,
        /// Rendering of the side channel that was searched
        available: String,
    },

    /// Source-side DNT run without a counterpart in the phrase table
    #[error("no phrase matches source DNT token {run:?} at position {position}")]
    UnmatchedDntRun {
        /// Token position where matching failed
        position: usize,
        /// The flagged run starting at `position`
        run: Vec<String>,
    },

    /// Target-side flagged token that no source n-gram covers
    #[error("internal alignment error: flagged target token {token:?} at position {position} has no source n-gram")]
    AlignmentInvariant {
        /// Token position where matching failed
        position: usize,
        /// The flagged token
        token: String,
    },

    /// Side channel could not be decoded
    #[error("invalid side channel: {0}")]
    InvalidSideChannel(String),

    /// Tagger pattern failed to compile
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    /// Training parameter outside its valid range
    #[error("invalid training parameter: {0}")]
    InvalidParameter(String),

    /// Model snapshot could not be read or written
    #[error("model snapshot error: {0}")]
    Snapshot(String),

    /// I/O error while persisting or loading a model
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for domain operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_display() {
        let err = CoreError::LengthMismatch { tokens: 3, tags: 2 };
        assert_eq!(err.to_string(), "length mismatch: 3 tokens but 2 tags");
    }

    #[test]
    fn test_out_of_range_mentions_placeholder_and_data() {
        let err = CoreError::PlaceholderOutOfRange {
            placeholder: "DNT_5".to_string(),
            available: "World".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("DNT_5"));
        assert!(msg.contains("World"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
