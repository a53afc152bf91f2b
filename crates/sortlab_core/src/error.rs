//! Core error types for SortLab.

use serde::{Deserialize, Serialize};

/// Core result type
pub type CoreResult<T> = Result<T, CoreError>;

/// Core error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Input sequence outside its length or value domain
    #[error("{0}")]
    Bounds(#[from] BoundsViolation),

    /// Speed multiplier outside the presets
    #[error("Invalid speed multiplier: {multiplier}")]
    InvalidSpeed {
        /// Rejected multiplier
        multiplier: u32,
    },

    /// Algorithm name did not match the catalogue
    #[error("Unknown algorithm: {name}")]
    UnknownAlgorithm {
        /// Name as given
        name: String,
    },

    /// Validation error
    #[error("Validation failed for {field}: {reason}")]
    Validation {
        /// Field that failed
        field: String,
        /// Why it failed
        reason: String,
    },
}

/// Reason an input sequence edit was rejected.
///
/// The `Display` text is what the input layer shows the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum BoundsViolation {
    /// Fewer values than the minimum length
    #[error("Minimum {min} values required")]
    TooShort {
        /// Rejected length
        len: usize,
        /// Minimum length
        min: usize,
    },

    /// More values than the maximum length
    #[error("Maximum {max} values allowed")]
    TooLong {
        /// Rejected length
        len: usize,
        /// Maximum length
        max: usize,
    },

    /// A value above the maximum
    #[error("Value {value} at index {index} exceeds {max}")]
    ValueOutOfRange {
        /// Position of the value
        index: usize,
        /// Rejected value
        value: u32,
        /// Largest accepted value
        max: u32,
    },

    /// Edit addressed an index past the end
    #[error("No value at index {index}")]
    NoSuchIndex {
        /// Rejected index
        index: usize,
    },
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Validation {
            field: "json".to_string(),
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_display_matches_user_text() {
        let err = BoundsViolation::TooShort { len: 1, min: 2 };
        assert_eq!(err.to_string(), "Minimum 2 values required");

        let err = BoundsViolation::TooLong { len: 16, max: 15 };
        assert_eq!(err.to_string(), "Maximum 15 values allowed");
    }

    #[test]
    fn test_core_error_wraps_bounds_transparently() {
        let err: CoreError = BoundsViolation::TooLong { len: 16, max: 15 }.into();
        assert_eq!(format!("{}", err), "Maximum 15 values allowed");
    }

    #[test]
    fn test_error_equality() {
        let err1 = CoreError::InvalidSpeed { multiplier: 0 };
        let err2 = CoreError::InvalidSpeed { multiplier: 0 };
        assert_eq!(err1, err2);

        let err3 = CoreError::UnknownAlgorithm {
            name: "bogo".to_string(),
        };
        assert_ne!(err1, err3);
        assert!(err3.to_string().contains("bogo"));
    }
}
