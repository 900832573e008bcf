use thiserror::Error;

/// Result type for mammoprep operations
pub type Result<T> = std::result::Result<T, MammoprepError>;

/// Error types for mammoprep operations
#[derive(Error, Debug)]
pub enum MammoprepError {
    /// A chain-code direction token outside 0-7
    #[error("Invalid direction digit {token:?} at position {position}")]
    InvalidDirectionDigit { token: String, position: usize },

    /// An anchor that falls outside the grid it is applied to
    #[error("Anchor ({column}, {row}) out of range: {reason}")]
    AnchorOutOfRange {
        column: i64,
        row: i64,
        reason: String,
    },

    /// Unsupported flag, bad target size, or an enhancement step that could not run
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Chain-code source lacks the expected tokens
    #[error("Malformed chain code source: {0}")]
    MalformedChainCodeSource(String),

    /// Image decoding/encoding error
    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl MammoprepError {
    pub(crate) fn anchor(column: i64, row: i64, reason: impl Into<String>) -> Self {
        MammoprepError::AnchorOutOfRange {
            column,
            row,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MammoprepError::InvalidDirectionDigit {
            token: "9".to_string(),
            position: 4,
        };
        assert_eq!(
            err.to_string(),
            "Invalid direction digit \"9\" at position 4"
        );

        let err = MammoprepError::anchor(-3, 12, "negative after crop");
        assert_eq!(
            err.to_string(),
            "Anchor (-3, 12) out of range: negative after crop"
        );
    }
}
