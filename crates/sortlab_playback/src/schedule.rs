//! Recurring tick schedules.
//!
//! A [`TickScheduler`] delivers schedule ids at a fixed period until the
//! schedule is cancelled. [`TickTimer`] wraps one scheduler and owns at most
//! one live schedule: arming always cancels the previous schedule first.
//! Controllers check [`TickTimer::accepts`] on every delivered id, which
//! filters out ticks that were already in flight when a schedule was
//! cancelled.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

static NEXT_SCHEDULE_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of one recurring schedule, unique within the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScheduleId(u64);

impl ScheduleId {
    fn next() -> Self {
        Self(NEXT_SCHEDULE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get raw value
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sched_{}", self.0)
    }
}

/// Source of recurring ticks
pub trait TickScheduler {
    /// Start delivering `id` every `period`
    fn schedule(&mut self, id: ScheduleId, period: Duration);

    /// Stop delivering `id`
    fn cancel(&mut self, id: ScheduleId);
}

/// The live schedule of a [`TickTimer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSchedule {
    /// Schedule id
    pub id: ScheduleId,
    /// Tick period
    pub period: Duration,
}

/// Owner of at most one live schedule
#[derive(Debug)]
pub struct TickTimer<S: TickScheduler> {
    scheduler: S,
    active: Option<ActiveSchedule>,
}

impl<S: TickScheduler> TickTimer<S> {
    /// Create a disarmed timer
    #[must_use]
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            active: None,
        }
    }

    /// Cancel any live schedule, then start a new one at `period`
    pub fn arm(&mut self, period: Duration) -> ScheduleId {
        self.disarm();

        let id = ScheduleId::next();
        self.scheduler.schedule(id, period);
        self.active = Some(ActiveSchedule { id, period });
        tracing::trace!(%id, ?period, "schedule armed");
        id
    }

    /// Cancel the live schedule, if any. Returns whether one was live.
    pub fn disarm(&mut self) -> bool {
        match self.active.take() {
            Some(active) => {
                self.scheduler.cancel(active.id);
                tracing::trace!(id = %active.id, "schedule cancelled");
                true
            }
            None => false,
        }
    }

    /// Whether `id` belongs to the live schedule
    #[must_use]
    pub fn accepts(&self, id: ScheduleId) -> bool {
        self.active.is_some_and(|active| active.id == id)
    }

    /// Check if a schedule is live
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.active.is_some()
    }

    /// Get the live schedule
    #[must_use]
    pub fn active(&self) -> Option<ActiveSchedule> {
        self.active
    }

    /// Get the underlying scheduler
    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<S: TickScheduler> Drop for TickTimer<S> {
    fn drop(&mut self) {
        self.disarm();
    }
}

/// Scheduler that only keeps books; the host delivers ticks itself.
///
/// Suited to hosts with their own frame loop, and to tests that step a
/// controller tick by tick.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    live: Vec<(ScheduleId, Duration)>,
    scheduled: usize,
    cancelled: usize,
}

impl ManualScheduler {
    /// Create a scheduler with nothing live
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Live schedules and their periods
    #[must_use]
    pub fn live(&self) -> &[(ScheduleId, Duration)] {
        &self.live
    }

    /// Total schedules started
    #[must_use]
    pub fn scheduled_count(&self) -> usize {
        self.scheduled
    }

    /// Total schedules cancelled
    #[must_use]
    pub fn cancelled_count(&self) -> usize {
        self.cancelled
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, id: ScheduleId, period: Duration) {
        self.live.push((id, period));
        self.scheduled += 1;
    }

    fn cancel(&mut self, id: ScheduleId) {
        let before = self.live.len();
        self.live.retain(|(live, _)| *live != id);
        if self.live.len() < before {
            self.cancelled += 1;
        }
    }
}

/// Scheduler backed by tokio intervals.
///
/// Each schedule is a spawned task that sends its id on the tick channel
/// every period. Cancelling aborts the task. Must be used from within a
/// tokio runtime.
#[derive(Debug)]
pub struct TokioScheduler {
    ticks: mpsc::UnboundedSender<ScheduleId>,
    tasks: HashMap<ScheduleId, JoinHandle<()>>,
}

impl TokioScheduler {
    /// Create a scheduler sending on `ticks`
    #[must_use]
    pub fn new(ticks: mpsc::UnboundedSender<ScheduleId>) -> Self {
        Self {
            ticks,
            tasks: HashMap::new(),
        }
    }

    /// Create a scheduler together with the receiving end of its ticks
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ScheduleId>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Number of running schedule tasks
    #[must_use]
    pub fn running(&self) -> usize {
        self.tasks.len()
    }
}

impl Clone for TokioScheduler {
    /// Shares the tick channel; running tasks stay with the original.
    fn clone(&self) -> Self {
        Self::new(self.ticks.clone())
    }
}

impl TickScheduler for TokioScheduler {
    fn schedule(&mut self, id: ScheduleId, period: Duration) {
        let ticks = self.ticks.clone();
        // interval_at panics on a zero period
        let period = period.max(Duration::from_millis(1));
        let handle = tokio::spawn(async move {
            // first tick one full period after scheduling
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if ticks.send(id).is_err() {
                    break;
                }
            }
        });
        self.tasks.insert(id, handle);
    }

    fn cancel(&mut self, id: ScheduleId) {
        if let Some(handle) = self.tasks.remove(&id) {
            handle.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_ids_are_unique() {
        let a = ScheduleId::next();
        let b = ScheduleId::next();
        assert_ne!(a, b);
        assert!(b.as_u64() > a.as_u64());
    }

    #[test]
    fn test_arm_cancels_previous() {
        let mut timer = TickTimer::new(ManualScheduler::new());
        let first = timer.arm(Duration::from_millis(1000));
        let second = timer.arm(Duration::from_millis(500));

        assert_ne!(first, second);
        assert!(!timer.accepts(first));
        assert!(timer.accepts(second));
        assert_eq!(timer.scheduler().live(), &[(second, Duration::from_millis(500))]);
        assert_eq!(timer.scheduler().cancelled_count(), 1);
    }

    #[test]
    fn test_disarm_is_idempotent() {
        let mut timer = TickTimer::new(ManualScheduler::new());
        let id = timer.arm(Duration::from_millis(100));

        assert!(timer.disarm());
        assert!(!timer.disarm());
        assert!(!timer.accepts(id));
        assert!(timer.scheduler().live().is_empty());
        assert_eq!(timer.scheduler().cancelled_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_delivers_ticks() {
        let (scheduler, mut rx) = TokioScheduler::channel();
        let mut timer = TickTimer::new(scheduler);
        let id = timer.arm(Duration::from_millis(100));

        assert_eq!(rx.recv().await, Some(id));
        assert_eq!(rx.recv().await, Some(id));
        assert_eq!(timer.scheduler().running(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_zero_period_still_ticks() {
        let (scheduler, mut rx) = TokioScheduler::channel();
        let mut timer = TickTimer::new(scheduler);
        let id = timer.arm(Duration::ZERO);

        assert_eq!(rx.recv().await, Some(id));
        assert_eq!(timer.scheduler().running(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_cancel_is_exact() {
        let (scheduler, mut rx) = TokioScheduler::channel();
        let mut timer = TickTimer::new(scheduler);
        let old = timer.arm(Duration::from_millis(100));
        assert_eq!(rx.recv().await, Some(old));

        let new = timer.arm(Duration::from_millis(50));
        assert_eq!(timer.scheduler().running(), 1);

        tokio::time::sleep(Duration::from_millis(1000)).await;
        while let Ok(id) = rx.try_recv() {
            assert_eq!(id, new, "cancelled schedule fired");
        }

        timer.disarm();
        assert_eq!(timer.scheduler().running(), 0);
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(rx.try_recv().is_err());
    }
}
