//! SortLab Core Types
//!
//! This crate contains pure types and logic with no I/O.
//! Sequences, steps and traces are immutable values that the recorder
//! produces and the playback layer reads.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithm;
pub mod error;
pub mod sequence;
pub mod speed;
pub mod trace;

// Re-exports
pub use algorithm::Algorithm;
pub use error::{BoundsViolation, CoreError, CoreResult};
pub use sequence::{Sequence, Value};
pub use speed::Speed;
pub use trace::{Step, Trace};
