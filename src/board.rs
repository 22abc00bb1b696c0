//! Board: a group of displays sharing one clock and one stagger scheduler.
//!
//! The board owns every timer. Digits and the scheduler arm timers on its
//! queue and the board routes each fired timer back to its owner when the
//! host advances the clock:
//!
//! ```text
//!   host tick ──▶ Board::advance_to(t)
//!                    │ pop_due(t)
//!                    ├── Digit(id)       ──▶ DigitAnimation::on_timer
//!                    └── SchedulerReset  ──▶ StaggerScheduler::on_timer
//! ```
//!
//! Everything runs on the caller's thread.

use crate::config::BoardConfig;
use crate::digit::{AnimationContext, DigitAnimation, DigitId};
use crate::display::{DigitMap, DisplayConfig, DisplayView, FlapDisplay};
use crate::scheduler::{BatchScheduler, NoopScheduler, SchedulerConfig, StaggerScheduler};
use crate::timer::TimerQueue;
use slotmap::SlotMap;
use std::time::Duration;

slotmap::new_key_type! {
    /// Handle to a display mounted on a board.
    pub struct DisplayId;
}

/// What a timer wakes up when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerTarget {
    /// A digit's active frame completed.
    Digit(DigitId),
    /// The scheduler's inactivity window elapsed.
    SchedulerReset,
}

/// The board's timer queue.
pub type Timers = TimerQueue<TimerTarget>;

/// A display group.
#[derive(Debug)]
pub struct Board {
    /// Clock and pending timers.
    timers: Timers,
    /// Start-delay provider shared by every digit.
    scheduler: Box<dyn StaggerScheduler>,
    /// Every mounted digit.
    digits: DigitMap,
    /// Every mounted display.
    displays: SlotMap<DisplayId, FlapDisplay>,
    /// Displays in mount order.
    order: Vec<DisplayId>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a board without staggering.
    pub fn new() -> Self {
        Self::with_scheduler(Box::new(NoopScheduler))
    }

    /// Create a board with a custom scheduler.
    pub fn with_scheduler(scheduler: Box<dyn StaggerScheduler>) -> Self {
        Self {
            timers: Timers::new(),
            scheduler,
            digits: SlotMap::with_key(),
            displays: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Create a board with a [`BatchScheduler`].
    pub fn with_stagger(config: SchedulerConfig) -> Self {
        Self::with_scheduler(Box::new(BatchScheduler::new(config)))
    }

    /// Create a board and mount every display of `config`.
    pub fn from_config(config: &BoardConfig) -> Self {
        let mut board = config
            .scheduler
            .map_or_else(Self::new, |scheduler| Self::with_stagger(scheduler.into()));
        for display in &config.displays {
            board.mount(display.clone());
        }
        board
    }

    /// Current clock time.
    #[inline]
    pub const fn now(&self) -> Duration {
        self.timers.now()
    }

    /// The timer queue.
    #[inline]
    pub const fn timers(&self) -> &Timers {
        &self.timers
    }

    /// The stagger scheduler.
    #[inline]
    pub fn scheduler(&self) -> &dyn StaggerScheduler {
        self.scheduler.as_ref()
    }

    /// Mount a display. Its digits show the initial value without animating.
    pub fn mount(&mut self, config: DisplayConfig) -> DisplayId {
        let mounted = FlapDisplay::mount(config, &mut self.digits);
        tracing::debug!(
            value = mounted.value(),
            digits = mounted.digits().len(),
            mode = mounted.mode().as_str(),
            "display mounted"
        );
        let id = self.displays.insert(mounted);
        self.order.push(id);
        id
    }

    /// Feed a new value to a display.
    ///
    /// Returns the number of digit animations started, or `None` for an
    /// unknown display.
    pub fn set_value(&mut self, id: DisplayId, value: &str) -> Option<usize> {
        let display = self.displays.get_mut(id)?;
        let mut ctx = AnimationContext {
            timers: &mut self.timers,
            scheduler: self.scheduler.as_mut(),
        };
        Some(display.set_value(value, &mut self.digits, &mut ctx))
    }

    /// Replace a display's configuration and show its value.
    pub fn reconfigure(&mut self, id: DisplayId, config: DisplayConfig) -> Option<usize> {
        let display = self.displays.get_mut(id)?;
        let mut ctx = AnimationContext {
            timers: &mut self.timers,
            scheduler: self.scheduler.as_mut(),
        };
        Some(display.reconfigure(config, &mut self.digits, &mut ctx))
    }

    /// Unmount a display, cancelling every pending timer of its digits.
    pub fn unmount(&mut self, id: DisplayId) -> bool {
        let Some(mut display) = self.displays.remove(id) else {
            return false;
        };
        display.unmount(&mut self.digits, &mut self.timers);
        self.order.retain(|other| *other != id);
        tracing::debug!(?id, "display unmounted");
        true
    }

    /// A mounted display.
    #[inline]
    pub fn display(&self, id: DisplayId) -> Option<&FlapDisplay> {
        self.displays.get(id)
    }

    /// Mounted displays in mount order.
    pub fn displays(&self) -> impl Iterator<Item = (DisplayId, &FlapDisplay)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.displays.get(*id).map(|display| (*id, display)))
    }

    /// A mounted digit.
    #[inline]
    pub fn digit(&self, id: DigitId) -> Option<&DigitAnimation> {
        self.digits.get(id)
    }

    /// Digits of a display in display order.
    pub fn digits_of(&self, id: DisplayId) -> impl Iterator<Item = &DigitAnimation> + '_ {
        self.displays
            .get(id)
            .map(FlapDisplay::digits)
            .unwrap_or_default()
            .iter()
            .filter_map(|digit| self.digits.get(*digit))
    }

    /// What a display shows right now.
    pub fn view(&self, id: DisplayId) -> Option<DisplayView> {
        self.displays
            .get(id)
            .map(|display| display.view(&self.digits, self.now()))
    }

    /// Whether any digit is mid-animation.
    pub fn is_animating(&self) -> bool {
        self.digits.values().any(DigitAnimation::is_animating)
    }

    /// Deadline of the next pending timer.
    #[inline]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Move the clock to `time`, dispatching every timer due on the way.
    ///
    /// Timers fire in deadline order; timers armed while dispatching fire in
    /// the same call if they fall due by `time`. Returns the number fired.
    pub fn advance_to(&mut self, time: Duration) -> usize {
        let mut fired = 0;
        while let Some((timer, target)) = self.timers.pop_due(time) {
            fired += 1;
            tracing::trace!(?timer, ?target, "timer fired");
            match target {
                TimerTarget::Digit(id) => {
                    if let Some(digit) = self.digits.get_mut(id) {
                        digit.on_timer(timer, &mut self.timers);
                    }
                }
                TimerTarget::SchedulerReset => self.scheduler.on_timer(timer),
            }
        }
        self.timers.set_now(time);
        fired
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&mut self, delta: Duration) -> usize {
        self.advance_to(self.now().saturating_add(delta))
    }

    /// Unmount every display and release the scheduler's timers.
    pub fn dispose(&mut self) {
        for id in std::mem::take(&mut self.order) {
            if let Some(mut display) = self.displays.remove(id) {
                display.unmount(&mut self.digits, &mut self.timers);
            }
        }
        self.scheduler.dispose(&mut self.timers);
    }
}

impl Drop for Board {
    fn drop(&mut self) {
        self.dispose();
    }
}
