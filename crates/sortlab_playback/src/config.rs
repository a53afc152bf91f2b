//! Session configuration.

use crate::error::{PlaybackError, PlaybackResult};
use serde::{Deserialize, Serialize};
use sortlab_core::{Algorithm, CoreError, CoreResult, Sequence, Speed, Value};
use std::path::Path;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Sequence shown before the user edits anything
    pub initial_sequence: Vec<Value>,
    /// Initially selected algorithm
    pub algorithm: Algorithm,
    /// Initial tick rate
    pub speed: Speed,
    /// Length of randomized sequences
    pub random_len: usize,
    /// Smallest randomized value
    pub random_min: Value,
    /// Largest randomized value
    pub random_max: Value,
    /// Seed for randomized sequences; entropy when unset
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_sequence: vec![3, 7, 4, 5, 13, 10, 6, 8, 1],
            algorithm: Algorithm::Bubble,
            speed: Speed::X1,
            random_len: 10,
            random_min: 1,
            random_max: 20,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Set the initial sequence
    #[must_use]
    pub fn with_initial_sequence(mut self, values: Vec<Value>) -> Self {
        self.initial_sequence = values;
        self
    }

    /// Set the initial algorithm
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the initial speed
    #[must_use]
    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }

    /// Set the RNG seed
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if the initial sequence or the random range is out of bounds
    pub fn validate(&self) -> CoreResult<()> {
        Sequence::check(&self.initial_sequence)?;

        if !(Sequence::MIN_LEN..=Sequence::MAX_LEN).contains(&self.random_len) {
            return Err(CoreError::Validation {
                field: "random_len".to_string(),
                reason: format!(
                    "must be between {} and {}",
                    Sequence::MIN_LEN,
                    Sequence::MAX_LEN
                ),
            });
        }
        if self.random_max > Sequence::MAX_VALUE {
            return Err(CoreError::Validation {
                field: "random_max".to_string(),
                reason: format!("must not exceed {}", Sequence::MAX_VALUE),
            });
        }
        if self.random_min > self.random_max {
            return Err(CoreError::Validation {
                field: "random_min".to_string(),
                reason: "must not exceed random_max".to_string(),
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration
    ///
    /// # Errors
    ///
    /// Returns error if the JSON is malformed or fails validation
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or fails validation
    pub fn load(path: impl AsRef<Path>) -> PlaybackResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| PlaybackError::ConfigIo {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), "loaded session config");
        Ok(config)
    }

    /// Serialize to pretty JSON
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
