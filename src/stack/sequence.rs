//! Sequence builder: the symbols a digit passes through on its way to a target.
//!
//! Flaps only advance. The path from `from` to `to` walks forward around the
//! stack, wrapping at the end, and stops on the target inclusive. The
//! starting symbol is not part of the result.

use super::{CharacterStack, MissingSymbolPolicy, StackMode};

/// Compute the ordered symbols shown between `from` and `to`.
///
/// - Equal symbols produce an empty sequence.
/// - A `from` outside the stack starts from the blank sentinel (or before
///   the first symbol when the stack has no blank).
/// - A `to` outside the stack is always the last element; what precedes it
///   depends on the stack's [`MissingSymbolPolicy`].
/// - Word stacks never step through intermediates.
///
/// # Example
///
/// ```
/// use flapboard::stack::{build_sequence, CharacterStack};
///
/// let stack = CharacterStack::new(["0", "1", "2"]);
/// assert_eq!(build_sequence(&stack, "2", "1"), ["0", "1"]);
/// ```
pub fn build_sequence(stack: &CharacterStack, from: &str, to: &str) -> Vec<String> {
    if from == to {
        return Vec::new();
    }
    if stack.mode() == StackMode::Words {
        return vec![to.to_string()];
    }

    let origin = stack.position(from).or_else(|| stack.blank_index());

    match stack.position(to) {
        // Unknown glyph sitting on the target's slot: one flip, not a revolution.
        Some(target) if origin == Some(target) => vec![to.to_string()],
        Some(target) => walk(stack, origin, target),
        None => match stack.missing_policy() {
            MissingSymbolPolicy::ViaBlank => {
                let mut sequence = match stack.blank_index() {
                    Some(blank) if origin != Some(blank) => walk(stack, origin, blank),
                    _ => Vec::new(),
                };
                sequence.push(to.to_string());
                sequence
            }
            MissingSymbolPolicy::Jump => vec![to.to_string()],
        },
    }
}

/// Walk forward from `origin` (exclusive) to `target` (inclusive).
///
/// `None` as origin means "before the first symbol".
fn walk(stack: &CharacterStack, origin: Option<usize>, target: usize) -> Vec<String> {
    let symbols = stack.symbols();
    let (start, steps) = match origin {
        Some(index) => (index + 1, stack.forward_distance(index, target)),
        None => (0, target + 1),
    };
    (0..steps)
        .map(|step| symbols[(start + step) % symbols.len()].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::{Presets, BLANK};
    use proptest::prelude::*;

    #[test]
    fn test_same_symbol_is_empty() {
        let stack = CharacterStack::from_chars(Presets::NUM);
        assert!(build_sequence(&stack, "4", "4").is_empty());
    }

    #[test]
    fn test_forward_walk() {
        let stack = CharacterStack::from_chars(" AZ");
        assert_eq!(build_sequence(&stack, " ", "Z"), ["A", "Z"]);
        assert_eq!(build_sequence(&stack, "A", "Z"), ["Z"]);
    }

    #[test]
    fn test_wraparound() {
        let stack = CharacterStack::new(["0", "1", "2"]);
        assert_eq!(build_sequence(&stack, "2", "1"), ["0", "1"]);
    }

    #[test]
    fn test_never_walks_backward() {
        let stack = CharacterStack::from_chars(Presets::NUM);
        // 0..9 then blank: 1 -> 0 needs the full ring minus one.
        let sequence = build_sequence(&stack, "1", "0");
        assert_eq!(sequence.len(), 10);
        assert_eq!(sequence.first().map(String::as_str), Some("2"));
        assert_eq!(sequence[8], BLANK);
    }

    #[test]
    fn test_unknown_from_starts_at_blank() {
        let stack = CharacterStack::from_chars(" AZ");
        assert_eq!(build_sequence(&stack, "?", "Z"), ["A", "Z"]);
    }

    #[test]
    fn test_unknown_from_onto_blank_is_one_step() {
        let stack = CharacterStack::from_chars("AZ");
        assert_eq!(build_sequence(&stack, "?", BLANK), [BLANK]);
    }

    #[test]
    fn test_unknown_from_without_blank_starts_before_first() {
        let stack = CharacterStack::new(["0", "1", "2"]);
        assert_eq!(build_sequence(&stack, "X", "1"), ["0", "1"]);
    }

    #[test]
    fn test_missing_target_via_blank() {
        let stack = CharacterStack::from_chars("ABC");
        // A B C " " -> from A, walk to blank then show X
        assert_eq!(build_sequence(&stack, "A", "X"), ["B", "C", BLANK, "X"]);
        assert_eq!(build_sequence(&stack, BLANK, "X"), ["X"]);
    }

    #[test]
    fn test_missing_target_jump() {
        let stack =
            CharacterStack::from_chars("ABC").with_missing_policy(MissingSymbolPolicy::Jump);
        assert_eq!(build_sequence(&stack, "A", "X"), ["X"]);
    }

    #[test]
    fn test_missing_target_without_blank() {
        let stack = CharacterStack::new(["0", "1"]);
        assert_eq!(build_sequence(&stack, "0", "X"), ["X"]);
    }

    #[test]
    fn test_word_mode_single_step() {
        let stack = CharacterStack::from_words(["BOARDING", "DELAYED", "GATE CLOSED"]);
        assert_eq!(build_sequence(&stack, "GATE CLOSED", "BOARDING"), ["BOARDING"]);
        assert_eq!(build_sequence(&stack, "BOARDING", "CANCELLED"), ["CANCELLED"]);
        assert!(build_sequence(&stack, "DELAYED", "DELAYED").is_empty());
    }

    fn alphabet() -> impl Strategy<Value = Vec<String>> {
        prop::collection::hash_set("[A-Z0-9]", 1..24).prop_map(|set| set.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_identity_is_empty(symbols in alphabet(), pick in any::<prop::sample::Index>()) {
            let stack = CharacterStack::new(symbols.clone());
            let a = pick.get(&symbols);
            prop_assert!(build_sequence(&stack, a, a).is_empty());
        }

        #[test]
        fn prop_length_is_forward_distance(
            symbols in alphabet(),
            a in any::<prop::sample::Index>(),
            b in any::<prop::sample::Index>(),
        ) {
            let stack = CharacterStack::new(symbols.clone());
            let from = a.get(&symbols);
            let to = b.get(&symbols);
            prop_assume!(from != to);

            let sequence = build_sequence(&stack, from, to);
            let i = stack.position(from).unwrap();
            let j = stack.position(to).unwrap();
            prop_assert_eq!(sequence.len(), stack.forward_distance(i, j));
            prop_assert_eq!(sequence.last().map(String::as_str), Some(to.as_str()));
        }

        #[test]
        fn prop_steps_are_consecutive(
            symbols in alphabet(),
            a in any::<prop::sample::Index>(),
            b in any::<prop::sample::Index>(),
        ) {
            let stack = CharacterStack::new(symbols.clone());
            let from = a.get(&symbols);
            let to = b.get(&symbols);

            let mut previous = stack.position(from).unwrap();
            for symbol in build_sequence(&stack, from, to) {
                let next = stack.position(&symbol).unwrap();
                prop_assert_eq!(next, (previous + 1) % stack.len());
                previous = next;
            }
        }

        #[test]
        fn prop_missing_target_is_last(symbols in alphabet(), a in any::<prop::sample::Index>()) {
            let stack = CharacterStack::from_chars(&symbols.concat());
            let from = a.get(&symbols);
            let sequence = build_sequence(&stack, from, "#");
            prop_assert_eq!(sequence.last().map(String::as_str), Some("#"));
        }
    }
}
