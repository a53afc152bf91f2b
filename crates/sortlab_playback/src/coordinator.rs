//! Lockstep comparison of several traces under one shared tick.
//!
//! Each participating algorithm gets a [`Lane`] with its own trace and
//! position. A shared tick advances every lane that is not yet at its own
//! final step; lanes with shorter traces park at their end while the others
//! continue. The aggregate completes once, when the last lane arrives.

use crate::controller::PlaybackStatus;
use crate::error::{PlaybackError, PlaybackResult};
use crate::schedule::{ScheduleId, TickScheduler, TickTimer};
use crate::signal::{Progress, Signal};
use sortlab_core::{Algorithm, Sequence, Speed, Step, Trace};
use sortlab_record::TraceStore;
use std::sync::Arc;

/// Which algorithms take part in a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Participants {
    /// Two distinct algorithms side by side
    Pairwise {
        /// Left lane
        first: Algorithm,
        /// Right lane
        second: Algorithm,
    },
    /// Every algorithm in catalogue order
    Multi,
}

impl Participants {
    /// Pair two algorithms
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::InvalidParticipants`] if both are the same
    pub fn pairwise(first: Algorithm, second: Algorithm) -> PlaybackResult<Self> {
        if first == second {
            return Err(PlaybackError::InvalidParticipants {
                reason: format!("{first} cannot be compared with itself"),
            });
        }
        Ok(Self::Pairwise { first, second })
    }

    /// Participating algorithms in lane order
    #[must_use]
    pub fn algorithms(&self) -> Vec<Algorithm> {
        match *self {
            Self::Pairwise { first, second } => vec![first, second],
            Self::Multi => Algorithm::ALL.to_vec(),
        }
    }
}

/// One algorithm's trace and position within a comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lane {
    /// Algorithm of this lane
    pub algorithm: Algorithm,
    /// Trace being played
    pub trace: Arc<Trace>,
    /// Index into the trace
    pub position: usize,
}

impl Lane {
    fn new(algorithm: Algorithm, trace: Arc<Trace>) -> Self {
        Self {
            algorithm,
            trace,
            position: 0,
        }
    }

    /// Check if the lane sits on its final step
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.position >= self.trace.last_index()
    }

    /// Step at the current position
    #[must_use]
    pub fn step(&self) -> &Step {
        self.trace.step_clamped(self.position)
    }

    /// Copy advanced by one step, parked at the end
    #[must_use]
    pub fn advanced(&self) -> Self {
        self.at(self.position + 1)
    }

    fn at(&self, index: usize) -> Self {
        Self {
            algorithm: self.algorithm,
            trace: Arc::clone(&self.trace),
            position: self.trace.clamp(index),
        }
    }

    /// Position over this lane's last index
    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress::new(self.position, self.trace.last_index())
    }
}

/// Drives every lane of a comparison from one timer
#[derive(Debug)]
pub struct ComparisonCoordinator<S: TickScheduler> {
    participants: Participants,
    input: Arc<Sequence>,
    lanes: Vec<Lane>,
    recorded: bool,
    status: PlaybackStatus,
    speed: Speed,
    timer: TickTimer<S>,
    signals: Vec<Signal>,
}

impl<S: TickScheduler> ComparisonCoordinator<S> {
    /// Create an idle coordinator with a one-step preview lane per participant
    #[must_use]
    pub fn new(participants: Participants, input: Arc<Sequence>, speed: Speed, scheduler: S) -> Self {
        let lanes = preview_lanes(participants, &input);
        Self {
            participants,
            input,
            lanes,
            recorded: false,
            status: PlaybackStatus::Idle,
            speed,
            timer: TickTimer::new(scheduler),
            signals: Vec::new(),
        }
    }

    /// Switch participants, regenerating every trace at position 0
    pub fn set_participants(&mut self, participants: Participants, store: &mut TraceStore) {
        self.stop();
        self.participants = participants;
        self.lanes = record_lanes(participants, &self.input, store);
        self.recorded = true;
        self.status = PlaybackStatus::Idle;
        tracing::debug!(?participants, lanes = self.lanes.len(), "participants changed");
    }

    /// Switch input. Lanes show a one-step preview of `input` until the next start.
    pub fn set_input(&mut self, input: Arc<Sequence>) {
        self.stop();
        self.lanes = preview_lanes(self.participants, &input);
        self.input = input;
        self.recorded = false;
        self.status = PlaybackStatus::Idle;
    }

    /// Record or reuse every trace, rewind all lanes to 0 and start the shared tick.
    ///
    /// No-op while already playing.
    pub fn start(&mut self, store: &mut TraceStore) {
        if self.status == PlaybackStatus::Playing {
            return;
        }

        self.lanes = record_lanes(self.participants, &self.input, store);
        self.recorded = true;
        self.timer.arm(self.speed.period());
        self.status = PlaybackStatus::Playing;
        tracing::debug!(
            lanes = self.lanes.len(),
            speed = %self.speed,
            "comparison started"
        );
    }

    /// Handle a delivered tick. Returns whether any lane moved.
    pub fn on_tick(&mut self, id: ScheduleId) -> bool {
        if !self.timer.accepts(id) || self.status != PlaybackStatus::Playing {
            tracing::trace!(%id, "stale tick ignored");
            return false;
        }

        let next: Vec<Lane> = self.lanes.iter().map(Lane::advanced).collect();
        let moved = next
            .iter()
            .zip(&self.lanes)
            .any(|(new, old)| new.position != old.position);
        self.lanes = next;

        if self.all_at_end() {
            self.timer.disarm();
            self.status = PlaybackStatus::Completed;
            self.signals.push(Signal::AllCompleted);
            tracing::info!(lanes = self.lanes.len(), "comparison completed");
        }
        moved
    }

    /// Pause every lane, keeping positions
    pub fn stop(&mut self) {
        self.timer.disarm();
        if self.status == PlaybackStatus::Playing {
            self.status = PlaybackStatus::Idle;
            tracing::debug!(position = self.progress().position, "comparison stopped");
        }
    }

    /// Stop and rewind every lane to 0
    pub fn restart(&mut self) {
        self.stop();
        self.lanes = self.lanes.iter().map(|lane| lane.at(0)).collect();
        self.status = PlaybackStatus::Idle;
        tracing::debug!("comparison restarted");
    }

    /// Advance every unfinished lane by one step while paused.
    ///
    /// When every lane is already at its end, nothing moves and
    /// [`Signal::AlreadyComplete`] is raised.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::Playing`] while playing
    pub fn next_step(&mut self, store: &mut TraceStore) -> PlaybackResult<Progress> {
        if self.status == PlaybackStatus::Playing {
            return Err(PlaybackError::Playing {
                operation: "next step",
            });
        }

        self.ensure_traces(store);
        if self.all_at_end() {
            self.signals.push(Signal::AlreadyComplete);
        } else {
            self.lanes = self.lanes.iter().map(Lane::advanced).collect();
        }
        self.settle();
        Ok(self.progress())
    }

    /// Move every lane to `index`, each clamped to its own trace, while paused.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::Playing`] while playing
    pub fn seek(&mut self, store: &mut TraceStore, index: usize) -> PlaybackResult<Progress> {
        if self.status == PlaybackStatus::Playing {
            return Err(PlaybackError::Playing { operation: "seek" });
        }

        self.ensure_traces(store);
        self.lanes = self.lanes.iter().map(|lane| lane.at(index)).collect();
        self.settle();
        tracing::debug!(requested = index, "comparison seek");
        Ok(self.progress())
    }

    /// Change the shared tick rate, re-arming the timer if playing
    pub fn set_speed(&mut self, speed: Speed) {
        if speed == self.speed {
            return;
        }

        self.speed = speed;
        if self.status == PlaybackStatus::Playing {
            self.timer.arm(speed.period());
        }
        tracing::debug!(%speed, "comparison speed changed");
    }

    /// Aggregate progress.
    ///
    /// The position is the minimum lane position and the bound is the
    /// maximum lane bound, so a shared scrubber spans the longest trace while
    /// reporting the slowest lane.
    #[must_use]
    pub fn progress(&self) -> Progress {
        let position = self.lanes.iter().map(|l| l.position).min().unwrap_or(0);
        let bound = self
            .lanes
            .iter()
            .map(|l| l.trace.last_index())
            .max()
            .unwrap_or(0);
        Progress::new(position, bound)
    }

    fn ensure_traces(&mut self, store: &mut TraceStore) {
        if !self.recorded {
            self.lanes = record_lanes(self.participants, &self.input, store);
            self.recorded = true;
        }
    }

    fn all_at_end(&self) -> bool {
        self.lanes.iter().all(Lane::at_end)
    }

    fn settle(&mut self) {
        self.status = if self.recorded && self.all_at_end() {
            PlaybackStatus::Completed
        } else {
            PlaybackStatus::Idle
        };
    }

    /// Get the participants
    #[must_use]
    pub fn participants(&self) -> Participants {
        self.participants
    }

    /// Get the lanes in participant order
    #[must_use]
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    /// Get the aggregate status
    #[must_use]
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    /// Check if playing
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    /// Get the speed
    #[must_use]
    pub fn speed(&self) -> Speed {
        self.speed
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

fn preview_lanes(participants: Participants, input: &Sequence) -> Vec<Lane> {
    participants
        .algorithms()
        .into_iter()
        .map(|algorithm| Lane::new(algorithm, Arc::new(Trace::preview(algorithm, input))))
        .collect()
}

fn record_lanes(participants: Participants, input: &Sequence, store: &mut TraceStore) -> Vec<Lane> {
    participants
        .algorithms()
        .into_iter()
        .map(|algorithm| Lane::new(algorithm, store.get_or_record(algorithm, input)))
        .collect()
}
