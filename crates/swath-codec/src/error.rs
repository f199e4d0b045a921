//! Error types for the compressed string format.

use std::fmt;

/// Errors that can occur while decoding a compressed region string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodecError {
    /// The input ended in the middle of a code.
    Truncated,
    /// The 16-digit width/height header is missing or not hexadecimal.
    InvalidHeader {
        /// Human-readable description of what went wrong.
        reason: String,
    },
    /// The payload decoded but does not describe a region of the stated
    /// dimensions.
    Corrupt {
        /// Human-readable description of what went wrong.
        reason: String,
    },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "compressed data ends mid-code"),
            Self::InvalidHeader { reason } => write!(f, "invalid header: {reason}"),
            Self::Corrupt { reason } => write!(f, "corrupt payload: {reason}"),
        }
    }
}

impl std::error::Error for CodecError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_problem() {
        assert_eq!(CodecError::Truncated.to_string(), "compressed data ends mid-code");
        let e = CodecError::Corrupt {
            reason: "run overflows tile".into(),
        };
        assert_eq!(e.to_string(), "corrupt payload: run overflows tile");
    }
}
