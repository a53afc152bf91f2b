//! Discrete signals and progress reported to the host.

use serde::{Deserialize, Serialize};
use sortlab_core::{Algorithm, BoundsViolation};

/// Event raised for the host to present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Signal {
    /// A single-trace playback reached its final step
    StepCompleted {
        /// Algorithm that finished
        algorithm: Algorithm,
    },
    /// Every lane of a comparison reached its final step
    AllCompleted,
    /// A manual step was requested past the final step
    AlreadyComplete,
    /// An input edit was rejected
    BoundsRejected {
        /// Why it was rejected
        reason: BoundsViolation,
    },
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StepCompleted { algorithm } => write!(f, "{algorithm} completed!"),
            Self::AllCompleted => write!(f, "All algorithms completed!"),
            Self::AlreadyComplete => write!(f, "Sorting completed!"),
            Self::BoundsRejected { reason } => write!(f, "{reason}"),
        }
    }
}

/// Position and bound pair for a progress display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    /// Current position
    pub position: usize,
    /// Largest reachable position
    pub bound: usize,
}

impl Progress {
    /// Create a progress pair
    #[must_use]
    pub const fn new(position: usize, bound: usize) -> Self {
        Self { position, bound }
    }

    /// Percent complete, 0 to 100. A zero bound reads as 0.
    #[must_use]
    pub fn percent(&self) -> usize {
        (self.position * 100 / self.bound.max(1)).min(100)
    }

    /// Check if the position reached the bound
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.position >= self.bound
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Step {} of {}", self.position, self.bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_text() {
        let done = Signal::StepCompleted {
            algorithm: Algorithm::Quick,
        };
        assert_eq!(done.to_string(), "Quick sort completed!");
        assert_eq!(Signal::AllCompleted.to_string(), "All algorithms completed!");

        let rejected = Signal::BoundsRejected {
            reason: BoundsViolation::TooShort { len: 1, min: 2 },
        };
        assert_eq!(rejected.to_string(), "Minimum 2 values required");
    }

    #[test]
    fn test_signal_serde() {
        let json = serde_json::to_string(&Signal::AllCompleted).unwrap();
        assert_eq!(json, r#"{"kind":"all_completed"}"#);
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(Progress::new(0, 0).percent(), 0);
        assert_eq!(Progress::new(3, 12).percent(), 25);
        assert_eq!(Progress::new(12, 12).percent(), 100);
        assert!(Progress::new(12, 12).is_done());
        assert_eq!(Progress::new(4, 9).to_string(), "Step 4 of 9");
    }
}
