//! Stagger scheduler: throttles how many digit animations start together.
//!
//! When many displays update at once, every digit would otherwise start
//! flipping in the same tick. A [`BatchScheduler`] hands out start delays in
//! batches: the first `batch_size` callers start immediately, the next
//! `batch_size` wait `batch_delay`, and so on. After `reset_after` without a
//! call the counter goes back to zero.
//!
//! Boards without a configured scheduler use [`NoopScheduler`], which
//! always answers zero.
//!
//! ```text
//!  calls:   0 1 │ 2 3 │ 4 5 │ ...      batch_size = 2
//!  delay:   0 0 │ d d │ 2d 2d│ ...     d = batch_delay
//! ```

use crate::board::Timers;
use crate::board::TimerTarget;
use crate::timer::TimerId;
use std::num::NonZeroUsize;
use std::time::Duration;

/// Hands out start delays to digits beginning a new animation.
pub trait StaggerScheduler: std::fmt::Debug {
    /// Delay before the calling digit's first frame.
    ///
    /// Called once per new animation, never per frame.
    fn digit_start_delay(&mut self, timers: &mut Timers) -> Duration;

    /// Digits per batch. `None` means unbounded.
    fn batch_size(&self) -> Option<NonZeroUsize>;

    /// Delay added per batch index.
    fn batch_delay(&self) -> Duration;

    /// A timer armed by this scheduler fired.
    fn on_timer(&mut self, _id: TimerId) {}

    /// Release every timer held by this scheduler.
    fn dispose(&mut self, _timers: &mut Timers) {}
}

/// Configuration for [`BatchScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Digits per concurrent-start batch.
    pub batch_size: usize,
    /// Delay added per batch index.
    pub batch_delay: Duration,
    /// Inactivity window after which the counter resets.
    pub reset_after: Duration,
}

impl SchedulerConfig {
    /// Default digits per batch.
    pub const DEFAULT_BATCH_SIZE: usize = 50;
    /// Default delay per batch.
    pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(16);
    /// Default inactivity window.
    pub const DEFAULT_RESET_AFTER: Duration = Duration::from_millis(1000);
    /// Longest accepted delay per batch.
    pub const MAX_BATCH_DELAY: Duration = Duration::from_secs(60);
    /// Longest accepted inactivity window.
    pub const MAX_RESET_AFTER: Duration = Duration::from_secs(3600);

    /// Clamp out-of-range values instead of rejecting them.
    ///
    /// A zero batch size becomes 1; a zero reset window falls back to the
    /// default. Delays above [`MAX_BATCH_DELAY`](Self::MAX_BATCH_DELAY) and
    /// windows above [`MAX_RESET_AFTER`](Self::MAX_RESET_AFTER) are capped.
    #[must_use]
    pub fn normalized(self) -> Self {
        let mut config = self;
        if config.batch_size == 0 {
            tracing::warn!("scheduler batch_size 0 clamped to 1");
            config.batch_size = 1;
        }
        if config.reset_after.is_zero() {
            tracing::warn!(
                default = ?Self::DEFAULT_RESET_AFTER,
                "scheduler reset_after 0 replaced by default"
            );
            config.reset_after = Self::DEFAULT_RESET_AFTER;
        }
        if config.batch_delay > Self::MAX_BATCH_DELAY {
            tracing::warn!(
                batch_delay = ?config.batch_delay,
                max = ?Self::MAX_BATCH_DELAY,
                "scheduler batch_delay clamped"
            );
            config.batch_delay = Self::MAX_BATCH_DELAY;
        }
        if config.reset_after > Self::MAX_RESET_AFTER {
            tracing::warn!(
                reset_after = ?config.reset_after,
                max = ?Self::MAX_RESET_AFTER,
                "scheduler reset_after clamped"
            );
            config.reset_after = Self::MAX_RESET_AFTER;
        }
        config
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            batch_size: Self::DEFAULT_BATCH_SIZE,
            batch_delay: Self::DEFAULT_BATCH_DELAY,
            reset_after: Self::DEFAULT_RESET_AFTER,
        }
    }
}

/// Scheduler used when no stagger is configured: everything starts now.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopScheduler;

impl StaggerScheduler for NoopScheduler {
    fn digit_start_delay(&mut self, _timers: &mut Timers) -> Duration {
        Duration::ZERO
    }

    fn batch_size(&self) -> Option<NonZeroUsize> {
        None
    }

    fn batch_delay(&self) -> Duration {
        Duration::ZERO
    }
}

/// Batching scheduler shared by every digit of one board.
#[derive(Debug)]
pub struct BatchScheduler {
    /// Digits per batch.
    batch_size: NonZeroUsize,
    /// Delay per batch index.
    batch_delay: Duration,
    /// Inactivity window.
    reset_after: Duration,
    /// Starts issued since the last reset.
    counter: u64,
    /// Clock time of the last call.
    last_call: Option<Duration>,
    /// Pending reset timer.
    reset_timer: Option<TimerId>,
}

impl BatchScheduler {
    /// Create a scheduler; the configuration is normalized first.
    pub fn new(config: SchedulerConfig) -> Self {
        let config = config.normalized();
        Self {
            batch_size: NonZeroUsize::new(config.batch_size).unwrap_or(NonZeroUsize::MIN),
            batch_delay: config.batch_delay,
            reset_after: config.reset_after,
            counter: 0,
            last_call: None,
            reset_timer: None,
        }
    }

    /// Starts issued since the last reset.
    #[inline]
    pub const fn counter(&self) -> u64 {
        self.counter
    }

    /// Inactivity window.
    #[inline]
    pub const fn reset_after(&self) -> Duration {
        self.reset_after
    }

    /// Pending reset timer, if any.
    #[inline]
    pub const fn reset_timer(&self) -> Option<TimerId> {
        self.reset_timer
    }

    fn reset(&mut self) {
        if self.counter > 0 {
            tracing::debug!(counter = self.counter, "stagger counter reset");
        }
        self.counter = 0;
        self.last_call = None;
    }
}

impl Default for BatchScheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

impl StaggerScheduler for BatchScheduler {
    fn digit_start_delay(&mut self, timers: &mut Timers) -> Duration {
        let now = timers.now();
        if self
            .last_call
            .is_some_and(|last| now.saturating_sub(last) >= self.reset_after)
        {
            self.reset();
        }

        let batch = self.counter / u64::try_from(self.batch_size.get()).unwrap_or(u64::MAX);
        let delay = self
            .batch_delay
            .saturating_mul(u32::try_from(batch).unwrap_or(u32::MAX));

        self.counter += 1;
        self.last_call = Some(now);

        if let Some(previous) = self.reset_timer.take() {
            timers.cancel(previous);
        }
        self.reset_timer = Some(timers.schedule(self.reset_after, TimerTarget::SchedulerReset));

        tracing::trace!(slot = self.counter - 1, batch, ?delay, "start slot");
        delay
    }

    fn batch_size(&self) -> Option<NonZeroUsize> {
        Some(self.batch_size)
    }

    fn batch_delay(&self) -> Duration {
        self.batch_delay
    }

    fn on_timer(&mut self, id: TimerId) {
        if self.reset_timer == Some(id) {
            self.reset_timer = None;
            self.reset();
        }
    }

    fn dispose(&mut self, timers: &mut Timers) {
        if let Some(timer) = self.reset_timer.take() {
            timers.cancel(timer);
        }
    }
}
