//! Playback speed.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Playback rate as a multiplier of one step per second
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Speed(u32);

impl Speed {
    /// One step per second
    pub const X1: Speed = Speed(1);
    /// Two steps per second
    pub const X2: Speed = Speed(2);
    /// Five steps per second
    pub const X5: Speed = Speed(5);
    /// Ten steps per second
    pub const X10: Speed = Speed(10);

    /// Multipliers offered by the speed selector
    pub const PRESETS: [Speed; 4] = [Self::X1, Self::X2, Self::X5, Self::X10];

    /// Create a speed from a multiplier
    ///
    /// # Errors
    ///
    /// Returns error unless the multiplier is one of the presets
    pub fn new(multiplier: u32) -> CoreResult<Self> {
        if !Self::PRESETS.iter().any(|preset| preset.0 == multiplier) {
            return Err(CoreError::InvalidSpeed { multiplier });
        }
        Ok(Self(multiplier))
    }

    /// Get the multiplier
    #[must_use]
    pub const fn multiplier(self) -> u32 {
        self.0
    }

    /// Tick period, `1000 / multiplier` milliseconds
    #[must_use]
    pub fn period(self) -> Duration {
        Duration::from_millis(1000) / self.0
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::X1
    }
}

impl TryFrom<u32> for Speed {
    type Error = CoreError;

    fn try_from(multiplier: u32) -> CoreResult<Self> {
        Self::new(multiplier)
    }
}

impl From<Speed> for u32 {
    fn from(speed: Speed) -> Self {
        speed.0
    }
}

impl std::fmt::Display for Speed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.0)
    }
}
