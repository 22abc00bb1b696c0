//! Digit animation: the lifecycle of one character position.
//!
//! ```text
//!                 target(t), t != settled
//!   ┌──────────┐ ─────────────────────────▶ ┌─────────────┐
//!   │   Idle   │                            │  Animating  │ ◀─┐ timer fires,
//!   │ (static) │ ◀───────────────────────── │ frames[k]   │ ──┘ k + 1 < len
//!   └──────────┘   last frame completes     └─────────────┘
//!        │                                     │   ▲
//!        │ unmount                     unmount │   │ target(t'), t' != target:
//!        ▼                                     ▼   │ restart from settled
//!   ┌─────────────────────────────────────────────┐
//!   │                  Unmounted                  │
//!   └─────────────────────────────────────────────┘
//! ```
//!
//! The settled symbol only changes when a frame completes. A superseding
//! target discards the queued frames and walks from the settled symbol, so
//! the displayed glyph never jumps.

use crate::board::{TimerTarget, Timers};
use crate::frame::{materialize_frames, FlapFace, Frame};
use crate::scheduler::StaggerScheduler;
use crate::stack::{build_sequence, CharacterStack};
use crate::timer::TimerId;
use std::sync::Arc;
use std::time::Duration;

slotmap::new_key_type! {
    /// Handle to a digit mounted on a board.
    pub struct DigitId;
}

/// Collaborators a digit needs to start an animation.
pub struct AnimationContext<'a> {
    /// The board's timer queue.
    pub timers: &'a mut Timers,
    /// The board's stagger scheduler.
    pub scheduler: &'a mut dyn StaggerScheduler,
}

#[derive(Debug)]
enum DigitState {
    /// Showing the settled symbol.
    Idle,
    /// Playing `frames`, `frames[active]` in flight.
    Animating {
        frames: Vec<Frame>,
        active: usize,
        target: String,
        started_at: Duration,
        timer: TimerId,
    },
    /// Torn down; no further transitions.
    Unmounted,
}

/// Animation state machine for one digit.
#[derive(Debug)]
pub struct DigitAnimation {
    /// Key used for this digit's timers.
    id: DigitId,
    /// Symbols the digit flips through.
    stack: Arc<CharacterStack>,
    /// Nominal per-symbol timing.
    timing: Duration,
    /// Last fully displayed symbol.
    settled: String,
    /// Static frame for the settled symbol.
    resting: Frame,
    /// Lifecycle state.
    state: DigitState,
}

impl DigitAnimation {
    /// Create an idle digit showing `initial` without animation.
    pub fn new(id: DigitId, stack: Arc<CharacterStack>, initial: &str, timing: Duration) -> Self {
        Self {
            id,
            stack,
            timing,
            settled: initial.to_string(),
            resting: Frame::settled(initial, timing),
            state: DigitState::Idle,
        }
    }

    /// Key used for this digit's timers.
    #[inline]
    pub const fn id(&self) -> DigitId {
        self.id
    }

    /// Last fully displayed symbol.
    #[inline]
    pub fn settled(&self) -> &str {
        &self.settled
    }

    /// Symbol the digit is heading to (the settled one when idle).
    pub fn target(&self) -> &str {
        match &self.state {
            DigitState::Animating { target, .. } => target,
            DigitState::Idle | DigitState::Unmounted => &self.settled,
        }
    }

    /// Whether an animation is in flight.
    #[inline]
    pub const fn is_animating(&self) -> bool {
        matches!(self.state, DigitState::Animating { .. })
    }

    /// Whether the digit is still mounted.
    #[inline]
    pub const fn is_mounted(&self) -> bool {
        !matches!(self.state, DigitState::Unmounted)
    }

    /// The pending timer, if any. Never more than one.
    pub const fn pending_timer(&self) -> Option<TimerId> {
        match &self.state {
            DigitState::Animating { timer, .. } => Some(*timer),
            DigitState::Idle | DigitState::Unmounted => None,
        }
    }

    /// Nominal per-symbol timing.
    #[inline]
    pub const fn timing(&self) -> Duration {
        self.timing
    }

    /// Symbols the digit flips through.
    #[inline]
    pub fn stack(&self) -> &CharacterStack {
        &self.stack
    }

    /// The frame shown now: the active animating frame, or the static one.
    pub fn current_frame(&self) -> &Frame {
        match &self.state {
            DigitState::Animating { frames, active, .. } => &frames[*active],
            DigitState::Idle | DigitState::Unmounted => &self.resting,
        }
    }

    /// The active frame and every frame still queued after it.
    ///
    /// A single static frame when idle.
    pub fn frames(&self) -> &[Frame] {
        match &self.state {
            DigitState::Animating { frames, active, .. } => &frames[*active..],
            DigitState::Idle | DigitState::Unmounted => std::slice::from_ref(&self.resting),
        }
    }

    /// Clock time the running animation started at.
    pub const fn started_at(&self) -> Option<Duration> {
        match &self.state {
            DigitState::Animating { started_at, .. } => Some(*started_at),
            DigitState::Idle | DigitState::Unmounted => None,
        }
    }

    /// What the digit shows at clock time `now`.
    pub fn face_at(&self, now: Duration) -> FlapFace<'_> {
        match &self.state {
            DigitState::Animating {
                frames,
                active,
                started_at,
                ..
            } => frames[*active].face_at(now.saturating_sub(*started_at)),
            DigitState::Idle | DigitState::Unmounted => self.resting.face_at(Duration::ZERO),
        }
    }

    /// Replace the stack. Applies from the next animation on.
    pub fn set_stack(&mut self, stack: Arc<CharacterStack>) {
        self.stack = stack;
    }

    /// Replace the nominal timing. Applies from the next animation on.
    pub fn set_timing(&mut self, timing: Duration) {
        self.timing = timing;
        self.resting = Frame::settled(self.settled.clone(), timing);
    }

    /// Request a new target symbol.
    ///
    /// Returns `true` if a new animation started. Requesting the symbol the
    /// digit is already settled on or heading to changes nothing.
    pub fn request_target(&mut self, target: &str, ctx: &mut AnimationContext<'_>) -> bool {
        match &self.state {
            DigitState::Unmounted => return false,
            DigitState::Idle if target == self.settled => return false,
            DigitState::Animating { target: current, .. } if current == target => return false,
            DigitState::Idle | DigitState::Animating { .. } => {}
        }

        if let DigitState::Animating { timer, target: previous, .. } = &self.state {
            ctx.timers.cancel(*timer);
            tracing::debug!(
                digit = ?self.id,
                from = %self.settled,
                previous = %previous,
                to = target,
                "superseding animation"
            );
        }

        if target == self.settled {
            self.settle_on(target);
            return false;
        }

        let delay = ctx.scheduler.digit_start_delay(ctx.timers);
        let sequence = build_sequence(&self.stack, &self.settled, target);
        let mut path = Vec::with_capacity(sequence.len() + 1);
        path.push(self.settled.clone());
        path.extend(sequence);

        let frames = materialize_frames(&path, self.timing, delay);
        let Some(first) = frames.first() else {
            self.settle_on(target);
            return false;
        };

        let started_at = ctx.timers.now();
        let timer = ctx
            .timers
            .schedule_at(started_at.saturating_add(first.end()), TimerTarget::Digit(self.id));

        tracing::debug!(
            digit = ?self.id,
            from = %self.settled,
            to = target,
            steps = frames.len(),
            ?delay,
            "animation started"
        );

        self.state = DigitState::Animating {
            frames,
            active: 0,
            target: target.to_string(),
            started_at,
            timer,
        };
        true
    }

    /// Advance after the digit's timer fired.
    ///
    /// Stale or foreign timer ids are ignored.
    pub fn on_timer(&mut self, id: TimerId, timers: &mut Timers) {
        let DigitState::Animating {
            frames,
            active,
            started_at,
            timer,
            ..
        } = &mut self.state
        else {
            return;
        };
        if *timer != id {
            return;
        }

        self.settled = frames[*active].incoming().to_string();
        *active += 1;

        if let Some(next) = frames.get(*active) {
            *timer = timers.schedule_at(started_at.saturating_add(next.end()), TimerTarget::Digit(self.id));
            tracing::trace!(digit = ?self.id, shown = %self.settled, "frame completed");
            return;
        }

        let settled = self.settled.clone();
        self.settle_on(&settled);
        tracing::debug!(digit = ?self.id, settled = %self.settled, "animation settled");
    }

    /// Tear the digit down, cancelling its pending timer.
    pub fn unmount(&mut self, timers: &mut Timers) {
        if let Some(timer) = self.pending_timer() {
            timers.cancel(timer);
        }
        self.state = DigitState::Unmounted;
    }

    fn settle_on(&mut self, symbol: &str) {
        self.settled = symbol.to_string();
        self.resting = Frame::settled(symbol, self.timing);
        self.state = DigitState::Idle;
    }
}
