//! Single-trace playback state machine.
//!
//! The controller owns its trace, its [`PlaybackState`] and the one
//! [`TickTimer`] that drives it. State is replaced whole on every transition,
//! so a reader never sees a position from one transition paired with a
//! status from another.

use crate::error::{PlaybackError, PlaybackResult};
use crate::schedule::{ScheduleId, TickScheduler, TickTimer};
use crate::signal::{Progress, Signal};
use serde::{Deserialize, Serialize};
use sortlab_core::{Algorithm, Sequence, Speed, Step, Trace};
use sortlab_record::TraceStore;
use std::sync::Arc;

/// Run status of a playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackStatus {
    /// Position fixed, no timer
    #[default]
    Idle,
    /// Timer live, position advancing
    Playing,
    /// Position at the last step, no timer
    Completed,
}

/// Position, status and speed of one playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Index into the trace
    pub position: usize,
    /// Run status
    pub status: PlaybackStatus,
    /// Tick rate
    pub speed: Speed,
}

impl PlaybackState {
    /// Copy at `position`
    #[must_use]
    pub const fn at(self, position: usize) -> Self {
        Self { position, ..self }
    }

    /// Copy with `status`
    #[must_use]
    pub const fn with_status(self, status: PlaybackStatus) -> Self {
        Self { status, ..self }
    }

    /// Check if playing
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }
}

/// Plays one algorithm's trace
#[derive(Debug)]
pub struct PlaybackController<S: TickScheduler> {
    algorithm: Algorithm,
    input: Arc<Sequence>,
    trace: Arc<Trace>,
    recorded: bool,
    state: PlaybackState,
    timer: TickTimer<S>,
    signals: Vec<Signal>,
}

impl<S: TickScheduler> PlaybackController<S> {
    /// Create an idle controller showing `input` as a one-step preview
    #[must_use]
    pub fn new(algorithm: Algorithm, input: Arc<Sequence>, speed: Speed, scheduler: S) -> Self {
        let trace = Arc::new(Trace::preview(algorithm, &input));
        Self {
            algorithm,
            input,
            trace,
            recorded: false,
            state: PlaybackState {
                position: 0,
                status: PlaybackStatus::Idle,
                speed,
            },
            timer: TickTimer::new(scheduler),
            signals: Vec::new(),
        }
    }

    /// Start or resume playback.
    ///
    /// Records the trace if missing. A playback sitting on its last step
    /// starts over from 0. No-op while already playing.
    pub fn start(&mut self, store: &mut TraceStore) {
        if self.state.is_playing() {
            return;
        }

        self.ensure_trace(store);
        let position = if self.state.position >= self.trace.last_index() {
            0
        } else {
            self.state.position
        };

        self.timer.arm(self.state.speed.period());
        self.state = self.state.at(position).with_status(PlaybackStatus::Playing);
        tracing::debug!(
            algorithm = self.algorithm.slug(),
            position,
            speed = %self.state.speed,
            "playback started"
        );
    }

    /// Handle a delivered tick. Returns whether the position moved.
    pub fn on_tick(&mut self, id: ScheduleId) -> bool {
        if !self.timer.accepts(id) || !self.state.is_playing() {
            tracing::trace!(%id, "stale tick ignored");
            return false;
        }

        let position = self.trace.clamp(self.state.position + 1);
        if position >= self.trace.last_index() {
            self.timer.disarm();
            self.state = self.state.at(position).with_status(PlaybackStatus::Completed);
            self.signals.push(Signal::StepCompleted {
                algorithm: self.algorithm,
            });
            tracing::info!(
                algorithm = self.algorithm.slug(),
                steps = self.trace.len(),
                "playback completed"
            );
        } else {
            self.state = self.state.at(position);
        }
        true
    }

    /// Pause playback, keeping the position. A completed playback stays completed.
    pub fn stop(&mut self) {
        self.timer.disarm();
        if self.state.is_playing() {
            self.state = self.state.with_status(PlaybackStatus::Idle);
            tracing::debug!(
                algorithm = self.algorithm.slug(),
                position = self.state.position,
                "playback stopped"
            );
        }
    }

    /// Stop and rewind to the first step
    pub fn restart(&mut self) {
        self.stop();
        self.state = self.state.at(0).with_status(PlaybackStatus::Idle);
        tracing::debug!(algorithm = self.algorithm.slug(), "playback restarted");
    }

    /// Advance by one step while paused.
    ///
    /// At the last step the position stays put and [`Signal::AlreadyComplete`]
    /// is raised. Returns the new position.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::Playing`] while playing
    pub fn next_step(&mut self, store: &mut TraceStore) -> PlaybackResult<usize> {
        if self.state.is_playing() {
            return Err(PlaybackError::Playing {
                operation: "next step",
            });
        }

        self.ensure_trace(store);
        if self.state.position < self.trace.last_index() {
            self.state = self.state.at(self.state.position + 1);
        } else {
            self.signals.push(Signal::AlreadyComplete);
        }
        self.settle();
        Ok(self.state.position)
    }

    /// Jump to `index`, clamped to the trace, while paused. Returns the new position.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::Playing`] while playing
    pub fn seek(&mut self, store: &mut TraceStore, index: usize) -> PlaybackResult<usize> {
        if self.state.is_playing() {
            return Err(PlaybackError::Playing { operation: "seek" });
        }

        self.ensure_trace(store);
        self.state = self.state.at(self.trace.clamp(index));
        self.settle();
        tracing::debug!(
            algorithm = self.algorithm.slug(),
            requested = index,
            position = self.state.position,
            "seek"
        );
        Ok(self.state.position)
    }

    /// Change the tick rate, re-arming the timer if playing
    pub fn set_speed(&mut self, speed: Speed) {
        if speed == self.state.speed {
            return;
        }

        self.state = PlaybackState { speed, ..self.state };
        if self.state.is_playing() {
            self.timer.arm(speed.period());
        }
        tracing::debug!(algorithm = self.algorithm.slug(), %speed, "speed changed");
    }

    /// Switch algorithm or input.
    ///
    /// Stops playback and drops the trace; the controller shows a one-step
    /// preview of `input` at position 0 until the next start.
    pub fn reset(&mut self, algorithm: Algorithm, input: Arc<Sequence>) {
        self.stop();
        self.algorithm = algorithm;
        self.trace = Arc::new(Trace::preview(algorithm, &input));
        self.input = input;
        self.recorded = false;
        self.state = self.state.at(0).with_status(PlaybackStatus::Idle);
        tracing::debug!(algorithm = algorithm.slug(), "playback reset");
    }

    fn ensure_trace(&mut self, store: &mut TraceStore) {
        if !self.recorded {
            self.trace = store.get_or_record(self.algorithm, &self.input);
            self.recorded = true;
        }
    }

    fn settle(&mut self) {
        let status = if self.recorded && self.state.position >= self.trace.last_index() {
            PlaybackStatus::Completed
        } else {
            PlaybackStatus::Idle
        };
        self.state = self.state.with_status(status);
    }

    /// Get the algorithm
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Get the input
    #[must_use]
    pub fn input(&self) -> &Sequence {
        &self.input
    }

    /// Get the current trace
    #[must_use]
    pub fn trace(&self) -> &Arc<Trace> {
        &self.trace
    }

    /// Check if the trace was recorded for the current input
    #[must_use]
    pub fn is_recorded(&self) -> bool {
        self.recorded
    }

    /// Get the state
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Get the current position
    #[must_use]
    pub fn position(&self) -> usize {
        self.state.position
    }

    /// Get the run status
    #[must_use]
    pub fn status(&self) -> PlaybackStatus {
        self.state.status
    }

    /// Get the speed
    #[must_use]
    pub fn speed(&self) -> Speed {
        self.state.speed
    }

    /// Check if playing
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    /// Step at the current position
    #[must_use]
    pub fn current_step(&self) -> &Step {
        self.trace.step_clamped(self.state.position)
    }

    /// Position over the last index
    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress::new(self.state.position, self.trace.last_index())
    }

    /// Get the timer
    #[must_use]
    pub fn timer(&self) -> &TickTimer<S> {
        &self.timer
    }

    /// Take the signals raised since the last drain
    pub fn drain_signals(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.signals)
    }
}
