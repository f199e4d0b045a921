//! Error types for region construction and parsing.
//!
//! Nearly every region operation is total: out-of-bounds coordinates are
//! ignored and size mismatches operate on the overlap. Only the few
//! fallible entry points listed here report errors.

use std::error::Error;
use std::fmt;

/// Errors from region construction and the plain text format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegionError {
    /// The plain `width,height,word,...` format could not be parsed.
    MalformedSerialization {
        /// What went wrong.
        reason: String,
    },
    /// A flat input did not hold `width * height` entries (or the
    /// matching word count).
    DimensionMismatch {
        /// Number of entries the dimensions call for.
        expected: usize,
        /// Number of entries supplied.
        found: usize,
    },
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedSerialization { reason } => {
                write!(f, "malformed region string: {reason}")
            }
            Self::DimensionMismatch { expected, found } => {
                write!(f, "expected {expected} entries, found {found}")
            }
        }
    }
}

impl Error for RegionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_details() {
        let e = RegionError::DimensionMismatch {
            expected: 12,
            found: 10,
        };
        assert_eq!(e.to_string(), "expected 12 entries, found 10");

        let e = RegionError::MalformedSerialization {
            reason: "missing height".into(),
        };
        assert!(e.to_string().contains("missing height"));
    }
}
