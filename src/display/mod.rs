//! Displays: rows of digits fed from a single value.
//!
//! A [`FlapDisplay`] owns the ids of its digits; the digits themselves live
//! in the [`Board`](crate::board::Board) so that timers can address them
//! directly. Setting a value splits it into per-digit targets, mounts or
//! unmounts digits when the count changes, and forwards each target to its
//! digit.

pub mod value;

pub use value::{is_numeric_like, pad_value, split_value, PadMode};

use crate::board::Timers;
use crate::digit::{AnimationContext, DigitAnimation, DigitId};
use crate::frame::FlapHalf;
use crate::stack::{CharacterStack, MissingSymbolPolicy, Presets, StackMode, BLANK};
use serde::Deserialize;
use slotmap::SlotMap;
use std::sync::Arc;
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

/// Storage for every digit of a board.
pub(crate) type DigitMap = SlotMap<DigitId, DigitAnimation>;

/// Options for one display.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Value shown when the display is mounted.
    pub value: String,
    /// Alphabet for character mode.
    pub chars: String,
    /// Word list; non-empty switches the display to word mode.
    pub words: Vec<String>,
    /// Fixed digit count. `None` or zero follows the value's length.
    pub length: Option<usize>,
    /// Padding symbol.
    pub pad_char: String,
    /// Padding side.
    pub pad_mode: PadMode,
    /// Nominal per-symbol timing in milliseconds.
    pub timing_ms: u64,
    /// Draw a hinge line between the two halves of each tile.
    pub hinge: bool,
    /// Handling of targets outside the alphabet.
    pub missing: MissingSymbolPolicy,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            value: String::new(),
            chars: Presets::NUM.to_string(),
            words: Vec::new(),
            length: None,
            pad_char: BLANK.to_string(),
            pad_mode: PadMode::Auto,
            timing_ms: Self::DEFAULT_TIMING_MS,
            hinge: true,
            missing: MissingSymbolPolicy::default(),
        }
    }
}

impl DisplayConfig {
    /// Default nominal timing.
    pub const DEFAULT_TIMING_MS: u64 = 300;
    /// Longest nominal timing honored; larger values are capped.
    pub const MAX_TIMING_MS: u64 = 60_000;

    /// Create a numeric display showing `value`.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Set the alphabet.
    #[must_use]
    pub fn with_chars(mut self, chars: impl Into<String>) -> Self {
        self.chars = chars.into();
        self
    }

    /// Switch to word mode.
    #[must_use]
    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words = words.into_iter().map(Into::into).collect();
        self
    }

    /// Fix the digit count.
    #[must_use]
    pub const fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Set the padding symbol.
    #[must_use]
    pub fn with_pad_char(mut self, pad: impl Into<String>) -> Self {
        self.pad_char = pad.into();
        self
    }

    /// Set the padding side.
    #[must_use]
    pub const fn with_pad_mode(mut self, mode: PadMode) -> Self {
        self.pad_mode = mode;
        self
    }

    /// Set the nominal per-symbol timing.
    #[must_use]
    pub fn with_timing(mut self, timing: Duration) -> Self {
        self.timing_ms = u64::try_from(timing.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Toggle the hinge line.
    #[must_use]
    pub const fn with_hinge(mut self, hinge: bool) -> Self {
        self.hinge = hinge;
        self
    }

    /// Set the missing-symbol policy.
    #[must_use]
    pub const fn with_missing_policy(mut self, missing: MissingSymbolPolicy) -> Self {
        self.missing = missing;
        self
    }

    /// Nominal per-symbol timing, capped at [`MAX_TIMING_MS`](Self::MAX_TIMING_MS).
    #[inline]
    pub const fn timing(&self) -> Duration {
        let millis = if self.timing_ms > Self::MAX_TIMING_MS {
            Self::MAX_TIMING_MS
        } else {
            self.timing_ms
        };
        Duration::from_millis(millis)
    }

    /// Whether the display runs in word mode.
    #[inline]
    pub fn is_words(&self) -> bool {
        !self.words.is_empty()
    }

    /// Build the stack this configuration describes.
    pub fn stack(&self) -> CharacterStack {
        let stack = if self.is_words() {
            CharacterStack::from_words(self.words.iter().cloned())
        } else {
            CharacterStack::from_chars(&self.chars)
        };
        stack.with_missing_policy(self.missing)
    }

    /// Per-digit targets for `value`.
    pub fn targets(&self, value: &str) -> Vec<String> {
        if self.is_words() {
            vec![value.to_string()]
        } else {
            split_value(value, self.length, &self.pad_char, self.pad_mode)
        }
    }
}

/// A mounted display.
#[derive(Debug)]
pub struct FlapDisplay {
    /// Current configuration; `config.value` is the latest value.
    config: DisplayConfig,
    /// Stack shared by every digit.
    stack: Arc<CharacterStack>,
    /// Digits in display order.
    digits: Vec<DigitId>,
}

impl FlapDisplay {
    /// Mount a display; every digit starts static on its target.
    pub(crate) fn mount(config: DisplayConfig, digits: &mut DigitMap) -> Self {
        let stack = Arc::new(config.stack());
        let timing = config.timing();
        let ids = config
            .targets(&config.value)
            .iter()
            .map(|target| {
                digits.insert_with_key(|id| {
                    DigitAnimation::new(id, Arc::clone(&stack), target, timing)
                })
            })
            .collect();

        Self {
            config,
            stack,
            digits: ids,
        }
    }

    /// Latest value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.config.value
    }

    /// Current configuration.
    #[inline]
    pub const fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Stack shared by every digit.
    #[inline]
    pub fn stack(&self) -> &CharacterStack {
        &self.stack
    }

    /// Stack mode of the display.
    #[inline]
    pub fn mode(&self) -> StackMode {
        self.stack.mode()
    }

    /// Whether tiles draw a hinge line.
    #[inline]
    pub const fn hinge(&self) -> bool {
        self.config.hinge
    }

    /// Digit ids in display order.
    #[inline]
    pub fn digits(&self) -> &[DigitId] {
        &self.digits
    }

    /// Feed a new value. Returns the number of animations started.
    pub(crate) fn set_value(
        &mut self,
        value: &str,
        digits: &mut DigitMap,
        ctx: &mut AnimationContext<'_>,
    ) -> usize {
        value.clone_into(&mut self.config.value);
        let targets = self.config.targets(value);

        if targets.len() < self.digits.len() {
            for id in self.digits.drain(targets.len()..) {
                if let Some(mut digit) = digits.remove(id) {
                    digit.unmount(ctx.timers);
                }
            }
        }

        let mut started = 0;
        for (index, target) in targets.iter().enumerate() {
            match self.digits.get(index).and_then(|id| digits.get_mut(*id)) {
                Some(digit) => started += usize::from(digit.request_target(target, ctx)),
                None => {
                    let stack = Arc::clone(&self.stack);
                    let timing = self.config.timing();
                    let id = digits
                        .insert_with_key(|id| DigitAnimation::new(id, stack, target, timing));
                    self.digits.push(id);
                }
            }
        }
        started
    }

    /// Replace the configuration and show its value.
    ///
    /// Stack and timing changes apply to animations started from now on.
    pub(crate) fn reconfigure(
        &mut self,
        config: DisplayConfig,
        digits: &mut DigitMap,
        ctx: &mut AnimationContext<'_>,
    ) -> usize {
        let value = config.value.clone();
        let stack = config.stack();
        if stack != *self.stack {
            self.stack = Arc::new(stack);
        }
        for id in &self.digits {
            if let Some(digit) = digits.get_mut(*id) {
                digit.set_stack(Arc::clone(&self.stack));
                digit.set_timing(config.timing());
            }
        }
        self.config = config;
        self.set_value(&value, digits, ctx)
    }

    /// Unmount every digit, cancelling their timers.
    pub(crate) fn unmount(&mut self, digits: &mut DigitMap, timers: &mut Timers) {
        for id in self.digits.drain(..) {
            if let Some(mut digit) = digits.remove(id) {
                digit.unmount(timers);
            }
        }
    }

    /// Columns a tile needs: the widest symbol of the stack or on screen.
    pub(crate) fn tile_width(&self, digits: &DigitMap) -> u16 {
        let stacked = self.stack.symbols().iter().map(|symbol| symbol.width());
        let shown = self
            .digits
            .iter()
            .filter_map(|id| digits.get(*id))
            .flat_map(|digit| [digit.settled().width(), digit.target().width()]);
        let widest = stacked.chain(shown).max().unwrap_or(1).max(1);
        u16::try_from(widest).unwrap_or(u16::MAX)
    }

    /// Snapshot of what the display shows at clock time `now`.
    pub(crate) fn view(&self, digits: &DigitMap, now: Duration) -> DisplayView {
        let faces = self
            .digits
            .iter()
            .filter_map(|id| digits.get(*id))
            .map(|digit| {
                let face = digit.face_at(now);
                TileFace {
                    top: face.top.to_string(),
                    bottom: face.bottom.to_string(),
                    moving: face.moving,
                }
            })
            .collect();

        DisplayView {
            faces,
            tile_width: self.tile_width(digits),
            hinge: self.hinge(),
            mode: self.mode(),
        }
    }
}

/// Owned snapshot of one tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileFace {
    /// Symbol in the top half.
    pub top: String,
    /// Symbol in the bottom half.
    pub bottom: String,
    /// Half currently in motion.
    pub moving: Option<FlapHalf>,
}

/// Owned snapshot of a display, handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayView {
    /// One face per digit, in display order.
    pub faces: Vec<TileFace>,
    /// Columns per tile.
    pub tile_width: u16,
    /// Whether tiles draw a hinge line.
    pub hinge: bool,
    /// Stack mode of the display.
    pub mode: StackMode,
}
