//! Pattern based edit filtering.
//!
//! A [`KeyFilter`] decides whether typed or pasted text may enter the field.
//! In [`FilterMode::PerCharacter`] the pattern is an allow-list tested against
//! each character on its own (an unanchored search, so `[0-9]` admits `"5"`).
//! In [`FilterMode::WholeValue`] the value the edit would produce must still
//! be completable to a full match of the pattern: `[0-9]{5}` admits `"12"`
//! while it is typed, and [`KeyFilter::is_complete`] tells whether the value
//! matches from start to end.

use boundfield_types::FilterMode;
use regex::Regex;
use regex_automata::dfa::{Automaton, StartKind, dense};
use regex_automata::util::primitives::StateID;
use regex_automata::{Anchored, Input, MatchKind};

use crate::error::BoundInputError;

/// Outcome of running a single keystroke through the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    Accept,
    /// The default insertion must not happen.
    Suppress,
}

/// Outcome of running an insertion (keystroke or paste) through the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Text to insert; may be shorter than what was offered.
    Accepted(String),
    Suppressed,
}

#[derive(Debug, Clone)]
pub struct KeyFilter {
    pattern: Regex,
    /// Anchored DFA over the raw pattern; only built for whole-value filtering.
    whole_value: Option<dense::DFA<Vec<u32>>>,
}

impl KeyFilter {
    pub fn new(pattern: &str, mode: FilterMode) -> Result<Self, BoundInputError> {
        let compiled = Regex::new(pattern).map_err(|source| BoundInputError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        let whole_value = match mode {
            FilterMode::PerCharacter => None,
            FilterMode::WholeValue => Some(build_whole_value_dfa(pattern)?),
        };
        Ok(Self {
            pattern: compiled,
            whole_value,
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn mode(&self) -> FilterMode {
        if self.whole_value.is_some() {
            FilterMode::WholeValue
        } else {
            FilterMode::PerCharacter
        }
    }

    /// Tests one character against the allow-list.
    pub fn allows_char(&self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.pattern.is_match(c.encode_utf8(&mut buf))
    }

    /// Decides an insertion of `inserted` at byte offset `cursor` of `current`.
    pub fn admit(&self, current: &str, cursor: usize, inserted: &str) -> Admission {
        if inserted.is_empty() {
            return Admission::Suppressed;
        }
        match &self.whole_value {
            None => {
                let kept: String = inserted.chars().filter(|c| self.allows_char(*c)).collect();
                if kept.is_empty() {
                    Admission::Suppressed
                } else {
                    Admission::Accepted(kept)
                }
            }
            Some(dfa) => {
                let candidate = splice(current, cursor, inserted);
                if is_viable_prefix(dfa, &candidate) {
                    Admission::Accepted(inserted.to_string())
                } else {
                    Admission::Suppressed
                }
            }
        }
    }

    /// Whether `value` is acceptable as a finished value.
    ///
    /// Always true in per-character mode; in whole-value mode the pattern must
    /// match all of `value`.
    pub fn is_complete(&self, value: &str) -> bool {
        let Some(dfa) = &self.whole_value else {
            return true;
        };
        walk(dfa, value).is_some_and(|state| dfa.is_match_state(dfa.next_eoi_state(state)))
    }
}

fn build_whole_value_dfa(pattern: &str) -> Result<dense::DFA<Vec<u32>>, BoundInputError> {
    dense::Builder::new()
        .configure(
            dense::Config::new()
                .start_kind(StartKind::Anchored)
                .match_kind(MatchKind::All),
        )
        .build(pattern)
        .map_err(|source| BoundInputError::UnsupportedWholeValuePattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Whether some completion of `text` (possibly `text` itself) matches.
///
/// Matches are reported one transition late, so the state after `text` may
/// only carry a match for a shorter input. It is viable when end of input
/// matches or when at least one more byte keeps the search alive.
fn is_viable_prefix(dfa: &dense::DFA<Vec<u32>>, text: &str) -> bool {
    let Some(state) = walk(dfa, text) else {
        return false;
    };
    dfa.is_match_state(dfa.next_eoi_state(state))
        || (0..=u8::MAX).any(|byte| {
            let next = dfa.next_state(state, byte);
            !dfa.is_dead_state(next) && !dfa.is_quit_state(next)
        })
}

/// Feeds `text` through the anchored DFA; `None` once the search is dead.
fn walk(dfa: &dense::DFA<Vec<u32>>, text: &str) -> Option<StateID> {
    let input = Input::new(text).anchored(Anchored::Yes);
    let mut state = dfa.start_state_forward(&input).ok()?;
    for &byte in text.as_bytes() {
        state = dfa.next_state(state, byte);
        if dfa.is_dead_state(state) || dfa.is_quit_state(state) {
            return None;
        }
    }
    Some(state)
}

fn splice(current: &str, cursor: usize, inserted: &str) -> String {
    let cursor = cursor.min(current.len());
    let mut candidate = String::with_capacity(current.len() + inserted.len());
    candidate.push_str(&current[..cursor]);
    candidate.push_str(inserted);
    candidate.push_str(&current[cursor..]);
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_pattern_rejects_letters() {
        let filter = KeyFilter::new("[0-9]", FilterMode::PerCharacter).expect("valid pattern");
        assert!(!filter.allows_char('a'));
        assert!(filter.allows_char('5'));
    }

    #[test]
    fn malformed_pattern_is_reported() {
        let error = KeyFilter::new("[0-9", FilterMode::PerCharacter).expect_err("pattern should not compile");
        match error {
            BoundInputError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "[0-9"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn verbose_mode_pattern_with_comment_is_accepted() {
        let pattern = "(?x)[0-9] # digits only";
        let per_char = KeyFilter::new(pattern, FilterMode::PerCharacter).expect("per-character filter");
        assert!(per_char.allows_char('7'));
        assert!(!per_char.allows_char('x'));

        let whole = KeyFilter::new(pattern, FilterMode::WholeValue).expect("whole-value filter");
        assert_eq!(whole.admit("", 0, "7"), Admission::Accepted("7".to_string()));
        assert_eq!(whole.admit("7", 1, "8"), Admission::Suppressed);
    }

    #[test]
    fn per_character_paste_keeps_only_allowed_chars() {
        let filter = KeyFilter::new("[0-9]", FilterMode::PerCharacter).expect("valid pattern");
        assert_eq!(filter.admit("", 0, "1a2b3"), Admission::Accepted("123".to_string()));
        assert_eq!(filter.admit("", 0, "abc"), Admission::Suppressed);
        assert!(filter.is_complete("anything"));
    }

    #[test]
    fn whole_value_checks_the_spliced_candidate() {
        let filter = KeyFilter::new("[0-9]{0,3}", FilterMode::WholeValue).expect("valid pattern");
        assert_eq!(filter.admit("12", 2, "3"), Admission::Accepted("3".to_string()));
        assert_eq!(filter.admit("123", 3, "4"), Admission::Suppressed);
        // a paste is kept or dropped in full
        assert_eq!(filter.admit("1", 0, "9x"), Admission::Suppressed);
    }

    #[test]
    fn fixed_length_pattern_admits_prefixes() {
        let filter = KeyFilter::new("[0-9]{5}", FilterMode::WholeValue).expect("valid pattern");
        assert_eq!(filter.admit("", 0, "1"), Admission::Accepted("1".to_string()));
        assert_eq!(filter.admit("1234", 4, "5"), Admission::Accepted("5".to_string()));
        assert_eq!(filter.admit("12345", 5, "6"), Admission::Suppressed);
        assert_eq!(filter.admit("12", 2, "a"), Admission::Suppressed);
        assert!(!filter.is_complete("123"));
        assert!(filter.is_complete("12345"));
    }

    #[test]
    fn structured_pattern_is_typed_in_order() {
        let filter = KeyFilter::new(r"\d{3}-\d{4}", FilterMode::WholeValue).expect("valid pattern");
        assert_eq!(filter.admit("555", 3, "-"), Admission::Accepted("-".to_string()));
        assert_eq!(filter.admit("555", 3, "5"), Admission::Suppressed);
        assert!(filter.is_complete("555-0123"));
        assert!(!filter.is_complete("555-"));
    }

    #[test]
    fn whole_value_anchors_alternations() {
        let filter = KeyFilter::new("a|b", FilterMode::WholeValue).expect("valid pattern");
        assert_eq!(filter.admit("", 0, "a"), Admission::Accepted("a".to_string()));
        assert_eq!(filter.admit("a", 1, "b"), Admission::Suppressed);
    }

    #[test]
    fn overlapping_alternatives_keep_longer_completions() {
        let filter = KeyFilter::new("a|ab", FilterMode::WholeValue).expect("valid pattern");
        assert_eq!(filter.admit("a", 1, "b"), Admission::Accepted("b".to_string()));
        assert!(filter.is_complete("a"));
        assert!(filter.is_complete("ab"));
    }

    #[test]
    fn empty_insertion_is_suppressed() {
        let filter = KeyFilter::new(".", FilterMode::PerCharacter).expect("valid pattern");
        assert_eq!(filter.admit("abc", 1, ""), Admission::Suppressed);
    }
}
