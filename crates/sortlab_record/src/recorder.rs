//! Working array plus the steps recorded against it.

use sortlab_core::{Algorithm, Step, Trace, Value};

/// Scratch state shared by every algorithm while recording.
///
/// Algorithms mutate `arr` directly and call [`StepRecorder::mark`] after
/// each comparison, swap or placement they want to show.
pub(crate) struct StepRecorder {
    /// Working copy being sorted
    pub(crate) arr: Vec<Value>,
    first: Step,
    steps: Vec<Step>,
}

impl StepRecorder {
    pub(crate) fn new(input: &[Value]) -> Self {
        Self {
            arr: input.to_vec(),
            first: Step::plain(input.to_vec()),
            steps: Vec::new(),
        }
    }

    /// Record the current array with `highlights` marked
    pub(crate) fn mark<I>(&mut self, highlights: I)
    where
        I: IntoIterator<Item = usize>,
    {
        self.steps
            .push(Step::highlighted(self.arr.clone(), highlights));
    }

    /// Append the unhighlighted final step and seal the trace
    pub(crate) fn finish(mut self, algorithm: Algorithm) -> Trace {
        self.steps.push(Step::plain(self.arr.clone()));
        Trace::new(algorithm, self.first, self.steps)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.steps.len() + 1
    }
}
