//! SortLab Playback
//!
//! Timer-driven state machines over recorded traces.
//! A [`PlaybackController`] plays one trace; a [`ComparisonCoordinator`]
//! advances several traces in lockstep under one shared tick. [`Session`]
//! ties both to the user's input sequence and mode selection.
//!
//! Ticks come from a [`TickScheduler`]. Each controller owns exactly one
//! [`TickTimer`], and every tick carries the id of the schedule that produced
//! it, so a cancelled schedule can never advance a controller.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod controller;
pub mod coordinator;
pub mod error;
pub mod schedule;
pub mod session;
pub mod signal;

pub use config::SessionConfig;
pub use controller::{PlaybackController, PlaybackState, PlaybackStatus};
pub use coordinator::{ComparisonCoordinator, Lane, Participants};
pub use error::{PlaybackError, PlaybackResult};
pub use schedule::{ManualScheduler, ScheduleId, TickScheduler, TickTimer, TokioScheduler};
pub use session::{Frame, Mode, Selection, Session};
pub use signal::{Progress, Signal};
