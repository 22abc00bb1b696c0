//! Character stacks: the ordered, wrapping alphabets a digit flips through.
//!
//! A stack models the physical flap ring of one split-flap unit. Flaps can
//! only advance, so the order of the symbols decides both the direction and
//! the length of every transition.
//!
//! Stacks built from an alphabet or a word list ([`CharacterStack::from_chars`],
//! [`CharacterStack::from_words`]) always contain the blank sentinel
//! ([`BLANK`]); it is appended at the end when the caller omits it.
//! [`CharacterStack::new`] keeps the given symbols as they are.
//!
//! # Example
//!
//! ```
//! use flapboard::stack::{CharacterStack, StackMode};
//!
//! let stack = CharacterStack::from_chars("0123456789");
//! assert_eq!(stack.len(), 11);
//! assert_eq!(stack.mode(), StackMode::Numeric);
//! assert_eq!(stack.position(" "), Some(10));
//! ```

mod sequence;

pub use sequence::build_sequence;

use serde::Deserialize;
use unicode_segmentation::UnicodeSegmentation;

/// The blank sentinel: the rest/idle glyph of alphabet and word stacks.
pub const BLANK: &str = " ";

/// Built-in alphabets.
pub struct Presets;

impl Presets {
    /// Decimal digits.
    pub const NUM: &'static str = "0123456789";
    /// Upper-case latin letters followed by decimal digits.
    pub const ALPHANUM: &'static str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
}

/// What kind of symbols a stack holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StackMode {
    /// Single characters, no letters.
    #[default]
    Numeric,
    /// Single characters including letters.
    Alphanumeric,
    /// Whole words; transitions never step through intermediates.
    Words,
}

impl StackMode {
    /// Short tag for the mode (`num`, `alpha`, `words`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Numeric => "num",
            Self::Alphanumeric => "alpha",
            Self::Words => "words",
        }
    }
}

/// How a target that is not part of the stack gets onto the display.
///
/// Arbitrary runtime input must still render something, so a missing
/// target always ends up as the last step of the sequence. The policy only
/// decides what comes before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingSymbolPolicy {
    /// Advance to the blank sentinel, then show the target.
    #[default]
    ViaBlank,
    /// Show the target immediately as a single step.
    Jump,
}

/// An ordered, cyclic set of unique display symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterStack {
    /// Symbols in flap order.
    symbols: Vec<String>,
    /// Index of the blank sentinel in `symbols`.
    blank: Option<usize>,
    /// Kind of symbols held.
    mode: StackMode,
    /// Handling of targets outside the stack.
    missing: MissingSymbolPolicy,
}

impl CharacterStack {
    /// Build a stack from symbols taken verbatim (duplicates dropped).
    ///
    /// No blank is added. The mode is [`StackMode::Alphanumeric`] when any
    /// symbol contains an ASCII letter.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let symbols = dedup(symbols.into_iter().map(Into::into));
        let mode = if symbols.iter().any(|s| s.chars().any(|c| c.is_ascii_alphabetic())) {
            StackMode::Alphanumeric
        } else {
            StackMode::Numeric
        };
        let blank = symbols.iter().position(|s| s == BLANK);
        Self {
            symbols,
            blank,
            mode,
            missing: MissingSymbolPolicy::default(),
        }
    }

    /// Build a character stack from an alphabet string.
    ///
    /// The alphabet is split into graphemes and upper-cased. The mode is
    /// [`StackMode::Alphanumeric`] when the alphabet contains an ASCII
    /// letter, [`StackMode::Numeric`] otherwise.
    pub fn from_chars(chars: &str) -> Self {
        let mode = if chars.chars().any(|c| c.is_ascii_alphabetic()) {
            StackMode::Alphanumeric
        } else {
            StackMode::Numeric
        };
        let symbols = chars.graphemes(true).map(str::to_uppercase);
        Self::build(symbols, mode)
    }

    /// Build a word stack. Words are kept verbatim.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(words.into_iter().map(Into::into), StackMode::Words)
    }

    fn build(symbols: impl Iterator<Item = String>, mode: StackMode) -> Self {
        let mut symbols = dedup(symbols);
        let blank = if let Some(index) = symbols.iter().position(|s| s == BLANK) {
            index
        } else {
            symbols.push(BLANK.to_string());
            symbols.len() - 1
        };

        Self {
            symbols,
            blank: Some(blank),
            mode,
            missing: MissingSymbolPolicy::default(),
        }
    }

    /// Replace the missing-symbol policy.
    #[must_use]
    pub const fn with_missing_policy(mut self, policy: MissingSymbolPolicy) -> Self {
        self.missing = policy;
        self
    }

    /// Symbols in flap order.
    #[inline]
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Number of symbols.
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the stack has no symbols (only possible via [`Self::new`]).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbol at `index`, wrapping around the stack.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        if self.symbols.is_empty() {
            return None;
        }
        Some(&self.symbols[index % self.symbols.len()])
    }

    /// Position of `symbol`, if present.
    #[inline]
    pub fn position(&self, symbol: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s == symbol)
    }

    /// Whether `symbol` is part of the stack.
    #[inline]
    pub fn contains(&self, symbol: &str) -> bool {
        self.position(symbol).is_some()
    }

    /// Position of the blank sentinel, if the stack has one.
    #[inline]
    pub const fn blank_index(&self) -> Option<usize> {
        self.blank
    }

    /// Kind of symbols held.
    #[inline]
    pub const fn mode(&self) -> StackMode {
        self.mode
    }

    /// Handling of targets outside the stack.
    #[inline]
    pub const fn missing_policy(&self) -> MissingSymbolPolicy {
        self.missing
    }

    /// Number of forward steps from position `from` to position `to`.
    #[inline]
    pub fn forward_distance(&self, from: usize, to: usize) -> usize {
        let len = self.symbols.len().max(1);
        (to % len + len - from % len) % len
    }
}

fn dedup(symbols: impl Iterator<Item = String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for symbol in symbols {
        if unique.contains(&symbol) {
            tracing::debug!(symbol = %symbol, "dropping duplicate stack symbol");
            continue;
        }
        unique.push(symbol);
    }
    unique
}

impl Default for CharacterStack {
    fn default() -> Self {
        Self::from_chars(Presets::NUM)
    }
}
