//! Value producer: turns a display value into per-digit targets.

use crate::stack::BLANK;
use serde::Deserialize;
use unicode_segmentation::UnicodeSegmentation;

/// Where padding goes when a value is shorter than the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PadMode {
    /// Numbers pad at the start, text at the end.
    #[default]
    Auto,
    /// Right-align the value.
    Start,
    /// Left-align the value.
    End,
}

impl PadMode {
    /// Whether `value` gets its padding in front.
    pub fn pads_start(self, value: &str) -> bool {
        match self {
            Self::Auto => is_numeric_like(value),
            Self::Start => true,
            Self::End => false,
        }
    }
}

/// Whether `value` only holds digits and number punctuation (`.,+-`).
pub fn is_numeric_like(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '+' | '-'))
}

/// Truncate `value` to `length` graphemes, then pad it to `length`.
///
/// `pad` is used as one symbol; an empty pad falls back to the blank.
pub fn pad_value(value: &str, length: usize, pad: &str, mode: PadMode) -> String {
    let pad = pad.graphemes(true).next().unwrap_or(BLANK);
    let kept: String = value.graphemes(true).take(length).collect();
    let missing = length.saturating_sub(kept.graphemes(true).count());
    let fill = pad.repeat(missing);

    if mode.pads_start(value) {
        fill + &kept
    } else {
        kept + &fill
    }
}

/// Split a value into upper-cased per-digit targets.
///
/// With a non-zero `length` the value is padded (or truncated) to exactly
/// that many digits. Without one it is split as is.
///
/// # Example
///
/// ```
/// use flapboard::display::{split_value, PadMode};
///
/// assert_eq!(split_value("42", Some(4), " ", PadMode::Auto), [" ", " ", "4", "2"]);
/// assert_eq!(split_value("gate", Some(6), " ", PadMode::Auto), ["G", "A", "T", "E", " ", " "]);
/// ```
pub fn split_value(value: &str, length: Option<usize>, pad: &str, mode: PadMode) -> Vec<String> {
    let padded = match length {
        Some(length) if length > 0 => pad_value(value, length, pad, mode),
        _ => value.to_string(),
    };
    padded.graphemes(true).map(str::to_uppercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_like() {
        assert!(is_numeric_like("12.50"));
        assert!(is_numeric_like("-1,000"));
        assert!(is_numeric_like("+3"));
        assert!(is_numeric_like(""));
        assert!(!is_numeric_like("12:30"));
        assert!(!is_numeric_like("A1"));
    }

    #[test]
    fn test_auto_padding() {
        assert_eq!(pad_value("42", 5, " ", PadMode::Auto), "   42");
        assert_eq!(pad_value("ab", 5, " ", PadMode::Auto), "ab   ");
    }

    #[test]
    fn test_explicit_padding() {
        assert_eq!(pad_value("ab", 4, "*", PadMode::Start), "**ab");
        assert_eq!(pad_value("42", 4, "0", PadMode::End), "4200");
    }

    #[test]
    fn test_truncates_before_padding() {
        assert_eq!(pad_value("123456", 4, " ", PadMode::Auto), "1234");
        assert_eq!(pad_value("HELLO WORLD", 5, " ", PadMode::End), "HELLO");
    }

    #[test]
    fn test_multi_char_pad_uses_first_grapheme() {
        assert_eq!(pad_value("1", 3, "0x", PadMode::Start), "001");
        assert_eq!(pad_value("1", 3, "", PadMode::Start), "  1");
    }

    #[test]
    fn test_split_uppercases() {
        assert_eq!(split_value("gate 4", None, " ", PadMode::Auto), ["G", "A", "T", "E", " ", "4"]);
    }

    #[test]
    fn test_zero_length_means_unpadded() {
        assert_eq!(split_value("12", Some(0), " ", PadMode::Auto), ["1", "2"]);
    }

    #[test]
    fn test_split_keeps_graphemes_whole() {
        let digits = split_value("e\u{301}!", None, " ", PadMode::Auto);
        assert_eq!(digits, ["E\u{301}", "!"]);
    }

    #[test]
    fn test_empty_value_pads_fully() {
        assert_eq!(split_value("", Some(3), "-", PadMode::Auto), ["-", "-", "-"]);
    }
}
