//! Steps and traces.

use crate::algorithm::Algorithm;
use crate::error::{CoreError, CoreResult};
use crate::sequence::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One recorded frame: a full copy of the working array plus the indices
/// under examination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Array contents at this point
    pub snapshot: Vec<Value>,
    /// Indices being compared, swapped or placed
    pub highlights: BTreeSet<usize>,
}

impl Step {
    /// Create a step with no highlights
    #[must_use]
    pub fn plain(snapshot: Vec<Value>) -> Self {
        Self {
            snapshot,
            highlights: BTreeSet::new(),
        }
    }

    /// Create a step highlighting the given indices
    #[must_use]
    pub fn highlighted<I>(snapshot: Vec<Value>, highlights: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        Self {
            snapshot,
            highlights: highlights.into_iter().collect(),
        }
    }

    /// Check whether `index` is highlighted
    #[must_use]
    pub fn is_highlighted(&self, index: usize) -> bool {
        self.highlights.contains(&index)
    }
}

/// Immutable, ordered record of one algorithm applied to one input.
///
/// A trace always holds at least one step. Recorded traces start with the
/// raw input and end with the sorted array, both without highlights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTrace")]
pub struct Trace {
    algorithm: Algorithm,
    steps: Vec<Step>,
}

#[derive(Deserialize)]
struct RawTrace {
    algorithm: Algorithm,
    steps: Vec<Step>,
}

impl TryFrom<RawTrace> for Trace {
    type Error = CoreError;

    fn try_from(raw: RawTrace) -> CoreResult<Self> {
        Self::from_steps(raw.algorithm, raw.steps).ok_or_else(|| CoreError::Validation {
            field: "steps".to_string(),
            reason: "trace has no steps".to_string(),
        })
    }
}

impl Trace {
    /// Build a trace from its first step and the steps that follow
    #[must_use]
    pub fn new(algorithm: Algorithm, first: Step, rest: Vec<Step>) -> Self {
        let mut steps = Vec::with_capacity(rest.len() + 1);
        steps.push(first);
        steps.extend(rest);
        Self { algorithm, steps }
    }

    /// Build a trace from recorded steps.
    ///
    /// Returns `None` when `steps` is empty.
    #[must_use]
    pub fn from_steps(algorithm: Algorithm, steps: Vec<Step>) -> Option<Self> {
        if steps.is_empty() {
            None
        } else {
            Some(Self { algorithm, steps })
        }
    }

    /// One-step trace showing `input` unsorted, used before any run
    #[must_use]
    pub fn preview(algorithm: Algorithm, input: &[Value]) -> Self {
        Self {
            algorithm,
            steps: vec![Step::plain(input.to_vec())],
        }
    }

    /// Algorithm that produced this trace
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Number of steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if empty; a built trace never is
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the final step
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    /// Clamp an index into `[0, last_index]`
    #[must_use]
    pub fn clamp(&self, index: usize) -> usize {
        index.min(self.last_index())
    }

    /// Get the step at `index`
    #[must_use]
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Get the step at `index`, clamped into range
    #[must_use]
    pub fn step_clamped(&self, index: usize) -> &Step {
        &self.steps[self.clamp(index)]
    }

    /// First step
    #[must_use]
    pub fn first(&self) -> &Step {
        &self.steps[0]
    }

    /// Final step
    #[must_use]
    pub fn last(&self) -> &Step {
        &self.steps[self.last_index()]
    }

    /// All steps in order
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Whether this is a one-step preview rather than a recorded run
    #[must_use]
    pub fn is_preview(&self) -> bool {
        self.steps.len() == 1
    }
}
