//! User session: input sequence, mode selection and the active playback.
//!
//! The session is the entry point for a host. It owns the trace store, one
//! [`PlaybackController`] for single mode and one [`ComparisonCoordinator`]
//! for the compare modes, and routes every user action to whichever is
//! active. The current [`Selection`] is an immutable snapshot swapped whole
//! on every transition.

use crate::config::SessionConfig;
use crate::controller::PlaybackController;
use crate::coordinator::{ComparisonCoordinator, Participants};
use crate::error::{PlaybackError, PlaybackResult};
use crate::schedule::{ScheduleId, TickScheduler};
use crate::signal::{Progress, Signal};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sortlab_core::{Algorithm, BoundsViolation, CoreResult, Sequence, Speed, Step, Value};
use sortlab_record::TraceStore;
use std::sync::Arc;

/// Display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// One algorithm
    #[default]
    Single,
    /// Selected algorithm against a second one
    Pairwise {
        /// Right-hand algorithm
        second: Algorithm,
    },
    /// Every algorithm at once
    Multi,
}

impl Mode {
    /// Check if a compare mode is active
    #[must_use]
    pub fn is_compare(&self) -> bool {
        !matches!(self, Self::Single)
    }
}

/// What the user currently has selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Input sequence
    pub sequence: Arc<Sequence>,
    /// Selected algorithm
    pub algorithm: Algorithm,
    /// Display mode
    pub mode: Mode,
    /// Tick rate
    pub speed: Speed,
}

/// One renderable view: an algorithm's current step and its progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Algorithm shown
    pub algorithm: Algorithm,
    /// Current step
    pub step: &'a Step,
    /// Position over bound
    pub progress: Progress,
}

/// A user session
#[derive(Debug)]
pub struct Session<S: TickScheduler + Clone> {
    selection: Arc<Selection>,
    store: TraceStore,
    single: PlaybackController<S>,
    compare: ComparisonCoordinator<S>,
    rng: ChaCha8Rng,
    config: SessionConfig,
    signals: Vec<Signal>,
}

impl<S: TickScheduler + Clone> Session<S> {
    /// Create a session in single mode showing the configured initial sequence
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid
    pub fn new(config: SessionConfig, scheduler: S) -> CoreResult<Self> {
        config.validate()?;

        let sequence = Arc::new(Sequence::new(config.initial_sequence.clone())?);
        let algorithm = config.algorithm;
        let participants = Participants::Pairwise {
            first: algorithm,
            second: algorithm.next(),
        };
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let single = PlaybackController::new(
            algorithm,
            Arc::clone(&sequence),
            config.speed,
            scheduler.clone(),
        );
        let compare =
            ComparisonCoordinator::new(participants, Arc::clone(&sequence), config.speed, scheduler);

        tracing::debug!(%sequence, algorithm = algorithm.slug(), "session created");
        Ok(Self {
            selection: Arc::new(Selection {
                sequence,
                algorithm,
                mode: Mode::Single,
                speed: config.speed,
            }),
            store: TraceStore::new(),
            single,
            compare,
            rng,
            config,
            signals: Vec::new(),
        })
    }

    // input

    /// Replace the whole input sequence
    ///
    /// # Errors
    ///
    /// Returns the violation if the values are out of bounds; the previous
    /// sequence is kept and [`Signal::BoundsRejected`] is raised
    pub fn set_sequence(&mut self, values: Vec<Value>) -> Result<(), BoundsViolation> {
        let next = Sequence::new(values);
        self.apply_edit(next)
    }

    /// Replace one value from entry text, coercing non-numeric text to 0
    ///
    /// # Errors
    ///
    /// Returns [`BoundsViolation::NoSuchIndex`] if `index` is past the end
    pub fn set_entry(&mut self, index: usize, text: &str) -> Result<(), BoundsViolation> {
        let next = self
            .selection
            .sequence
            .with_value(index, Sequence::coerce_entry(text));
        self.apply_edit(next)
    }

    /// Replace the whole sequence from entry texts
    ///
    /// # Errors
    ///
    /// Returns the violation if the entry count is out of bounds
    pub fn set_entries<T: AsRef<str>>(&mut self, entries: &[T]) -> Result<(), BoundsViolation> {
        let next = Sequence::from_entries(entries);
        self.apply_edit(next)
    }

    /// Append a 0
    ///
    /// # Errors
    ///
    /// Returns [`BoundsViolation::TooLong`] at the maximum length
    pub fn add_value(&mut self) -> Result<(), BoundsViolation> {
        let next = self.selection.sequence.pushed(0);
        self.apply_edit(next)
    }

    /// Remove the value at `index`
    ///
    /// # Errors
    ///
    /// Returns [`BoundsViolation::TooShort`] at the minimum length
    pub fn remove_value(&mut self, index: usize) -> Result<(), BoundsViolation> {
        let next = self.selection.sequence.removed(index);
        self.apply_edit(next)
    }

    /// Replace the sequence with random values from the configured range
    ///
    /// # Errors
    ///
    /// Never fails for a validated configuration
    pub fn randomize(&mut self) -> Result<(), BoundsViolation> {
        let (min, max) = (self.config.random_min, self.config.random_max);
        let values: Vec<Value> = (0..self.config.random_len)
            .map(|_| self.rng.gen_range(min..=max))
            .collect();
        self.set_sequence(values)
    }

    fn apply_edit(&mut self, next: Result<Sequence, BoundsViolation>) -> Result<(), BoundsViolation> {
        match next {
            Ok(sequence) => {
                self.apply_input(sequence);
                Ok(())
            }
            Err(reason) => {
                tracing::warn!(%reason, "input rejected");
                self.signals.push(Signal::BoundsRejected { reason });
                Err(reason)
            }
        }
    }

    fn apply_input(&mut self, sequence: Sequence) {
        let sequence = Arc::new(sequence);

        self.store.invalidate();
        self.single
            .reset(self.selection.algorithm, Arc::clone(&sequence));
        self.compare.set_input(Arc::clone(&sequence));

        tracing::debug!(%sequence, "input changed");
        self.selection = Arc::new(Selection {
            sequence,
            ..(*self.selection).clone()
        });
    }

    // mode and algorithm

    /// Select the algorithm.
    ///
    /// In pairwise mode the pair is regenerated; a second algorithm equal to
    /// the new first one moves on to the next in catalogue order.
    pub fn select_algorithm(&mut self, algorithm: Algorithm) {
        let mut mode = self.selection.mode;
        self.single
            .reset(algorithm, Arc::clone(&self.selection.sequence));

        if let Mode::Pairwise { second } = mode {
            let second = if second == algorithm {
                algorithm.next()
            } else {
                second
            };
            mode = Mode::Pairwise { second };
            self.compare.set_participants(
                Participants::Pairwise {
                    first: algorithm,
                    second,
                },
                &mut self.store,
            );
        }

        tracing::debug!(algorithm = algorithm.slug(), "algorithm selected");
        self.replace_selection(algorithm, mode);
    }

    /// Select the second algorithm of a pairwise comparison
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::InvalidParticipants`] outside pairwise mode or
    /// if `second` equals the selected algorithm
    pub fn select_second_algorithm(&mut self, second: Algorithm) -> PlaybackResult<()> {
        if !matches!(self.selection.mode, Mode::Pairwise { .. }) {
            return Err(PlaybackError::InvalidParticipants {
                reason: "pairwise compare is not enabled".to_string(),
            });
        }

        let participants = Participants::pairwise(self.selection.algorithm, second)?;
        self.compare.set_participants(participants, &mut self.store);
        self.replace_selection(self.selection.algorithm, Mode::Pairwise { second });
        Ok(())
    }

    /// Compare the selected algorithm against the next one in the catalogue
    pub fn enable_pairwise_compare(&mut self) {
        let first = self.selection.algorithm;
        let second = first.next();

        self.single.stop();
        self.compare
            .set_participants(Participants::Pairwise { first, second }, &mut self.store);
        self.replace_selection(first, Mode::Pairwise { second });
        tracing::debug!(first = first.slug(), second = second.slug(), "pairwise compare enabled");
    }

    /// Compare every algorithm
    pub fn enable_multi_compare(&mut self) {
        self.single.stop();
        self.compare
            .set_participants(Participants::Multi, &mut self.store);
        self.replace_selection(self.selection.algorithm, Mode::Multi);
        tracing::debug!("multi compare enabled");
    }

    /// Return to single mode
    pub fn disable_compare(&mut self) {
        self.compare.stop();
        self.replace_selection(self.selection.algorithm, Mode::Single);
        tracing::debug!("compare disabled");
    }

    fn replace_selection(&mut self, algorithm: Algorithm, mode: Mode) {
        self.selection = Arc::new(Selection {
            algorithm,
            mode,
            ..(*self.selection).clone()
        });
    }

    // playback

    /// Start playback in the active mode
    pub fn start(&mut self) {
        if self.selection.mode.is_compare() {
            self.compare.start(&mut self.store);
        } else {
            self.single.start(&mut self.store);
        }
    }

    /// Pause playback in the active mode
    pub fn stop(&mut self) {
        if self.selection.mode.is_compare() {
            self.compare.stop();
        } else {
            self.single.stop();
        }
    }

    /// Stop and rewind the active mode
    pub fn restart(&mut self) {
        if self.selection.mode.is_compare() {
            self.compare.restart();
        } else {
            self.single.restart();
        }
    }

    /// Advance one step while paused
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::Playing`] while playing
    pub fn next_step(&mut self) -> PlaybackResult<Progress> {
        if self.selection.mode.is_compare() {
            self.compare.next_step(&mut self.store)
        } else {
            self.single.next_step(&mut self.store)?;
            Ok(self.single.progress())
        }
    }

    /// Jump to `index` while paused
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::Playing`] while playing
    pub fn seek(&mut self, index: usize) -> PlaybackResult<Progress> {
        if self.selection.mode.is_compare() {
            self.compare.seek(&mut self.store, index)
        } else {
            self.single.seek(&mut self.store, index)?;
            Ok(self.single.progress())
        }
    }

    /// Change the tick rate of both playbacks
    pub fn set_speed(&mut self, speed: Speed) {
        self.single.set_speed(speed);
        self.compare.set_speed(speed);
        self.selection = Arc::new(Selection {
            speed,
            ..(*self.selection).clone()
        });
    }

    /// Route a delivered tick. Returns whether anything moved.
    pub fn on_tick(&mut self, id: ScheduleId) -> bool {
        let single = self.single.on_tick(id);
        let compare = self.compare.on_tick(id);
        single || compare
    }

    // host views

    /// Check if the active mode is playing
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.single.is_playing() || self.compare.is_playing()
    }

    /// Frames to render for the active mode, in lane order
    #[must_use]
    pub fn frames(&self) -> Vec<Frame<'_>> {
        if self.selection.mode.is_compare() {
            self.compare
                .lanes()
                .iter()
                .map(|lane| Frame {
                    algorithm: lane.algorithm,
                    step: lane.step(),
                    progress: lane.progress(),
                })
                .collect()
        } else {
            vec![Frame {
                algorithm: self.single.algorithm(),
                step: self.single.current_step(),
                progress: self.single.progress(),
            }]
        }
    }

    /// Progress of the active mode
    #[must_use]
    pub fn progress(&self) -> Progress {
        if self.selection.mode.is_compare() {
            self.compare.progress()
        } else {
            self.single.progress()
        }
    }

    /// Take every signal raised since the last drain
    pub fn drain_signals(&mut self) -> Vec<Signal> {
        let mut signals = std::mem::take(&mut self.signals);
        signals.extend(self.single.drain_signals());
        signals.extend(self.compare.drain_signals());
        signals
    }

    /// Get the current selection
    #[must_use]
    pub fn selection(&self) -> &Arc<Selection> {
        &self.selection
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Get the trace store
    #[must_use]
    pub fn store(&self) -> &TraceStore {
        &self.store
    }

    /// Get the single-mode controller
    #[must_use]
    pub fn single(&self) -> &PlaybackController<S> {
        &self.single
    }

    /// Get the comparison coordinator
    #[must_use]
    pub fn compare(&self) -> &ComparisonCoordinator<S> {
        &self.compare
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::PlaybackStatus;
    use crate::schedule::ManualScheduler;

    fn session() -> Session<ManualScheduler> {
        Session::new(SessionConfig::default().with_seed(42), ManualScheduler::new()).unwrap()
    }

    fn single_id(s: &Session<ManualScheduler>) -> ScheduleId {
        s.single().timer().active().unwrap().id
    }

    fn compare_id(s: &Session<ManualScheduler>) -> ScheduleId {
        s.compare().timer().active().unwrap().id
    }

    #[test]
    fn test_initial_frame() {
        let s = session();
        let frames = s.frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].algorithm, Algorithm::Bubble);
        assert_eq!(frames[0].step.snapshot, vec![3, 7, 4, 5, 13, 10, 6, 8, 1]);
        assert!(frames[0].step.highlights.is_empty());
        assert!(s.store().is_empty());
    }

    #[test]
    fn test_rejected_input_keeps_sequence() {
        let mut s = session();
        let before = Arc::clone(&s.selection().sequence);

        assert_eq!(
            s.set_sequence(vec![1]),
            Err(BoundsViolation::TooShort { len: 1, min: 2 })
        );
        assert_eq!(s.selection().sequence, before);
        assert_eq!(
            s.drain_signals(),
            vec![Signal::BoundsRejected {
                reason: BoundsViolation::TooShort { len: 1, min: 2 }
            }]
        );
    }

    #[test]
    fn test_add_and_remove_values() {
        let mut s = session();
        s.set_sequence(vec![4, 2]).unwrap();

        assert!(matches!(
            s.remove_value(0),
            Err(BoundsViolation::TooShort { .. })
        ));
        for _ in 0..13 {
            s.add_value().unwrap();
        }
        assert_eq!(s.selection().sequence.len(), 15);
        assert_eq!(s.selection().sequence[14], 0);
        assert!(matches!(s.add_value(), Err(BoundsViolation::TooLong { .. })));

        s.remove_value(0).unwrap();
        assert_eq!(s.selection().sequence.len(), 14);
        assert_eq!(s.selection().sequence[0], 2);
    }

    #[test]
    fn test_set_entry_coerces() {
        let mut s = session();
        s.set_entry(0, "abc").unwrap();
        s.set_entry(1, "-4").unwrap();
        s.set_entry(2, "300").unwrap();
        assert_eq!(&s.selection().sequence[..3], &[0, 0, 99]);
        assert!(s.drain_signals().is_empty());

        s.set_entries(&["5", "6", "x"]).unwrap();
        assert_eq!(s.selection().sequence.as_slice(), &[5, 6, 0]);
    }

    #[test]
    fn test_randomize_is_seeded() {
        let mut a = session();
        let mut b = session();
        a.randomize().unwrap();
        b.randomize().unwrap();

        let seq = &a.selection().sequence;
        assert_eq!(seq, &b.selection().sequence);
        assert_eq!(seq.len(), 10);
        assert!(seq.iter().all(|v| (1..=20).contains(v)));
    }

    #[test]
    fn test_single_play_to_completion() {
        let mut s = session();
        s.set_sequence(vec![3, 1, 2]).unwrap();
        s.start();
        assert!(s.is_playing());

        let id = single_id(&s);
        while s.on_tick(id) {}

        assert!(!s.is_playing());
        assert_eq!(s.frames()[0].step.snapshot, vec![1, 2, 3]);
        assert_eq!(
            s.drain_signals(),
            vec![Signal::StepCompleted {
                algorithm: Algorithm::Bubble
            }]
        );
    }

    #[test]
    fn test_input_change_while_playing_stops() {
        let mut s = session();
        s.start();
        let id = single_id(&s);
        s.on_tick(id);

        s.set_sequence(vec![9, 8, 7]).unwrap();
        assert!(!s.is_playing());
        assert_eq!(s.single().status(), PlaybackStatus::Idle);
        assert_eq!(s.progress(), Progress::new(0, 0));
        assert!(s.store().is_empty());
        assert!(!s.on_tick(id));
    }

    #[test]
    fn test_select_algorithm_resets() {
        let mut s = session();
        s.seek(5).unwrap();
        s.select_algorithm(Algorithm::Radix);

        assert_eq!(s.selection().algorithm, Algorithm::Radix);
        assert_eq!(s.single().algorithm(), Algorithm::Radix);
        assert_eq!(s.progress().position, 0);
        assert!(!s.single().is_recorded());
    }

    #[test]
    fn test_pairwise_compare() {
        let mut s = session();
        s.enable_pairwise_compare();
        assert_eq!(
            s.selection().mode,
            Mode::Pairwise {
                second: Algorithm::Selection
            }
        );

        let algorithms: Vec<Algorithm> = s.frames().iter().map(|f| f.algorithm).collect();
        assert_eq!(algorithms, vec![Algorithm::Bubble, Algorithm::Selection]);

        assert!(s.select_second_algorithm(Algorithm::Bubble).is_err());
        s.select_second_algorithm(Algorithm::Quick).unwrap();
        assert_eq!(s.compare().lanes()[1].algorithm, Algorithm::Quick);

        s.select_algorithm(Algorithm::Quick);
        assert_eq!(
            s.selection().mode,
            Mode::Pairwise {
                second: Algorithm::Shell
            }
        );
    }

    #[test]
    fn test_second_algorithm_needs_pairwise() {
        let mut s = session();
        assert!(matches!(
            s.select_second_algorithm(Algorithm::Quick),
            Err(PlaybackError::InvalidParticipants { .. })
        ));
    }

    #[test]
    fn test_multi_compare_completes_once() {
        let mut s = session();
        s.set_sequence(vec![5, 5, 5]).unwrap();
        s.enable_multi_compare();
        s.start();

        let id = compare_id(&s);
        while s.on_tick(id) {}

        let signals = s.drain_signals();
        assert_eq!(signals, vec![Signal::AllCompleted]);
        for frame in s.frames() {
            assert_eq!(frame.step.snapshot, vec![5, 5, 5]);
            assert!(frame.progress.is_done());
        }
    }

    #[test]
    fn test_mode_switch_stops_single() {
        let mut s = session();
        s.start();
        s.enable_multi_compare();
        assert!(!s.is_playing());
        assert!(s.single().timer().scheduler().live().is_empty());

        s.disable_compare();
        assert_eq!(s.selection().mode, Mode::Single);
        assert_eq!(s.frames().len(), 1);
    }

    #[test]
    fn test_set_speed_updates_selection() {
        let mut s = session();
        s.start();
        let old = single_id(&s);
        s.set_speed(Speed::X10);

        assert_eq!(s.selection().speed, Speed::X10);
        assert_ne!(single_id(&s), old);
        assert!(!s.on_tick(old));
    }
}
