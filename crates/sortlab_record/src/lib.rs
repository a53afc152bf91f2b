//! SortLab Trace Recorder
//!
//! Runs a sorting algorithm over a private copy of its input and records
//! every comparison, swap and placement as a [`Step`](sortlab_core::Step).
//! Recording is synchronous and deterministic: the same algorithm and input
//! always produce the same trace.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod bubble;
mod insertion;
mod quick;
mod radix;
mod recorder;
mod selection;
mod shell;
pub mod store;

pub use store::TraceStore;

use recorder::StepRecorder;
use sortlab_core::{Algorithm, Trace, Value};

/// Record the trace of `algorithm` sorting `input`.
///
/// The trace starts with `input` and ends with the sorted array, both without
/// highlights. Inputs of length 0 or 1 produce exactly those two steps.
#[must_use]
pub fn record(algorithm: Algorithm, input: &[Value]) -> Trace {
    let mut rec = StepRecorder::new(input);

    if input.len() > 1 {
        match algorithm {
            Algorithm::Bubble => bubble::sort(&mut rec),
            Algorithm::Selection => selection::sort(&mut rec),
            Algorithm::Insertion => insertion::sort(&mut rec),
            Algorithm::Quick => quick::sort(&mut rec),
            Algorithm::Shell => shell::sort(&mut rec),
            Algorithm::Radix => radix::sort(&mut rec),
        }
    }

    let trace = rec.finish(algorithm);
    tracing::trace!(
        algorithm = algorithm.slug(),
        input_len = input.len(),
        steps = trace.len(),
        "recorded trace"
    );
    trace
}
