// Copyright 2025 AgentReplay (https://github.com/agentreplay)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Natural Language Filter Translator
//!
//! Turns short English queries into a [`FilterSet`] by fixed lexical pattern
//! matching. There is no grammar and no general numeral parsing: every phrase
//! the translator understands is listed below.
//!
//! ## Example Queries
//!
//! - "all single word palindromic strings"
//! - "strings longer than 10 characters"
//! - "strings containing the letter z"
//! - "palindromic strings that contain the first vowel"
//!
//! Every rule runs against the whole lowercased query, in the order they are
//! declared here. When two rules write the same field the later one wins.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use string_analyzer_core::FilterSet;
use tracing::debug;

static DEFAULT_TRANSLATOR: Lazy<QueryTranslator> = Lazy::new(QueryTranslator::new);

/// Word-count phrase groups. The first group with a matching phrase wins.
const WORD_COUNT_PHRASES: &[(&[&str], usize)] = &[
    (&["single word", "one word"], 1),
    (&["two word", "2 word"], 2),
    (&["three word", "3 word"], 3),
];

/// Fixed vowel phrases, applied after the letter pattern
const VOWEL_PHRASES: &[(&str, char)] = &[("first vowel", 'a'), ("last vowel", 'u')];

/// Translate `text` with the shared default translator.
///
/// Never fails. An empty [`FilterSet`] means nothing in the query was
/// recognized and the caller should reject it.
pub fn translate(text: &str) -> FilterSet {
    DEFAULT_TRANSLATOR.translate(text)
}

/// A query together with the filters it was translated into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpretedQuery {
    /// Query text as received
    pub original: String,
    /// Filters recognized in the query
    pub parsed_filters: FilterSet,
}

impl InterpretedQuery {
    pub fn new(original: &str) -> Self {
        Self {
            original: original.to_string(),
            parsed_filters: translate(original),
        }
    }
}

/// Which length bound a pattern writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LengthBound {
    Min,
    Max,
}

/// `<phrase> <N>` length pattern
struct LengthPattern {
    regex: Regex,
    bound: LengthBound,
    /// Added to N to turn an exclusive bound into an inclusive one
    offset: i64,
}

impl LengthPattern {
    fn new(phrase: &str, bound: LengthBound, offset: i64) -> Self {
        Self {
            regex: Regex::new(&format!(r"{phrase} (\d+)")).unwrap(),
            bound,
            offset,
        }
    }

    /// Bound written by a match. Numbers past `i64::MAX` saturate.
    fn extract(&self, caps: &Captures) -> Option<i64> {
        let digits = caps.get(1)?.as_str();
        let value = parse_decimal_saturating(digits).saturating_add(self.offset);
        if value == i64::MAX {
            debug!(digits, "length bound clamped to i64::MAX");
        }
        Some(value)
    }
}

static DECIMAL_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d$").unwrap());

fn is_decimal_digit(ch: char) -> bool {
    let mut buf = [0u8; 4];
    DECIMAL_DIGIT.is_match(ch.encode_utf8(&mut buf))
}

/// Value of a Unicode decimal digit (`Nd`).
///
/// Every `Nd` script encodes its digits as a contiguous run starting at zero,
/// so the value is the distance from the start of the run, modulo ten for
/// scripts whose runs sit back to back.
fn decimal_digit_value(ch: char) -> u32 {
    if let Some(digit) = ch.to_digit(10) {
        return digit;
    }

    let mut position = 0;
    let mut code = ch as u32;
    while let Some(prev) = code.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        position += 1;
        code -= 1;
    }
    position % 10
}

fn parse_decimal_saturating(digits: &str) -> i64 {
    digits.chars().fold(0i64, |acc, ch| {
        acc.saturating_mul(10)
            .saturating_add(i64::from(decimal_digit_value(ch)))
    })
}

/// Lexical query translator
pub struct QueryTranslator {
    /// Length patterns, in evaluation order
    length_patterns: Vec<LengthPattern>,
    /// "contain[ing] [the] [letter] x"
    letter_pattern: Regex,
}

impl QueryTranslator {
    /// Create a new translator with the fixed rule set
    pub fn new() -> Self {
        Self {
            length_patterns: vec![
                LengthPattern::new("longer than", LengthBound::Min, 1),
                LengthPattern::new("shorter than", LengthBound::Max, -1),
                LengthPattern::new("at least", LengthBound::Min, 0),
                LengthPattern::new("at most", LengthBound::Max, 0),
            ],
            letter_pattern: Regex::new(r"contain(?:ing)?(?: the)?(?: letter)? ([a-z])").unwrap(),
        }
    }

    /// Translate a query into filters
    pub fn translate(&self, text: &str) -> FilterSet {
        let query = text.to_lowercase();
        let mut filters = FilterSet {
            word_count: Self::extract_word_count(&query),
            ..Default::default()
        };

        if query.contains("palindrom") {
            filters.is_palindrome = Some(true);
        }

        self.extract_length_bounds(&query, &mut filters);

        if let Some(ch) = self.extract_letter(&query) {
            filters.contains_character = Some(ch);
        }
        for (phrase, vowel) in VOWEL_PHRASES {
            if query.contains(phrase) {
                filters.contains_character = Some(*vowel);
            }
        }

        debug!(query = %query, filters = ?filters, "translated natural language query");
        filters
    }

    fn extract_word_count(query: &str) -> Option<usize> {
        WORD_COUNT_PHRASES
            .iter()
            .find(|(phrases, _)| phrases.iter().any(|p| query.contains(p)))
            .map(|(_, count)| *count)
    }

    fn extract_length_bounds(&self, query: &str, filters: &mut FilterSet) {
        for pattern in &self.length_patterns {
            let Some(caps) = pattern.regex.captures(query) else {
                continue;
            };
            if let Some(value) = pattern.extract(&caps) {
                match pattern.bound {
                    LengthBound::Min => filters.min_length = Some(value),
                    LengthBound::Max => filters.max_length = Some(value),
                }
            }
        }
    }

    fn extract_letter(&self, query: &str) -> Option<char> {
        self.letter_pattern
            .captures(query)?
            .get(1)?
            .as_str()
            .chars()
            .next()
    }
}

impl Default for QueryTranslator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_word_palindromes() {
        assert_eq!(
            translate("all single word palindromic strings"),
            FilterSet {
                word_count: Some(1),
                is_palindrome: Some(true),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_longer_than() {
        assert_eq!(
            translate("strings longer than 10 characters"),
            FilterSet {
                min_length: Some(11),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_shorter_than_can_go_negative() {
        assert_eq!(translate("shorter than 5").max_length, Some(4));
        assert_eq!(translate("shorter than 0").max_length, Some(-1));
    }

    #[test]
    fn test_inclusive_bounds_override_exclusive_ones() {
        let filters = translate("longer than 3 but at least 10, shorter than 50 and at most 20");
        assert_eq!(filters.min_length, Some(10));
        assert_eq!(filters.max_length, Some(20));
    }

    #[test]
    fn test_containing_letter() {
        assert_eq!(
            translate("strings containing the letter z"),
            FilterSet {
                contains_character: Some('z'),
                ..Default::default()
            }
        );
        assert_eq!(translate("words that contain q").contains_character, Some('q'));
    }

    #[test]
    fn test_first_vowel_overrides_letter_pattern() {
        assert_eq!(
            translate("palindromic strings that contain the first vowel"),
            FilterSet {
                is_palindrome: Some(true),
                contains_character: Some('a'),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_last_vowel_wins_over_first_vowel() {
        let filters = translate("contain the first vowel or the last vowel");
        assert_eq!(filters.contains_character, Some('u'));
    }

    #[test]
    fn test_word_count_phrases() {
        assert_eq!(translate("one word strings").word_count, Some(1));
        assert_eq!(translate("two word strings").word_count, Some(2));
        assert_eq!(translate("2 word strings").word_count, Some(2));
        assert_eq!(translate("three word strings").word_count, Some(3));
        assert_eq!(translate("3 word strings").word_count, Some(3));
        assert_eq!(translate("four word strings").word_count, None);
        // First phrase group wins
        assert_eq!(translate("single word or two word").word_count, Some(1));
    }

    #[test]
    fn test_query_is_case_folded() {
        let filters = translate("PALINDROMES Longer Than 2 Containing The Letter X");
        assert_eq!(filters.is_palindrome, Some(true));
        assert_eq!(filters.min_length, Some(3));
        assert_eq!(filters.contains_character, Some('x'));
    }

    #[test]
    fn test_oversized_number_saturates() {
        let filters = translate("longer than 99999999999999999999999");
        assert_eq!(filters.min_length, Some(i64::MAX));
        assert!(!filters.is_empty());

        assert_eq!(
            translate("shorter than 99999999999999999999").max_length,
            Some(i64::MAX - 1)
        );
    }

    #[test]
    fn test_oversized_later_rule_still_wins() {
        let filters = translate("longer than 5 and at least 99999999999999999999");
        assert_eq!(filters.min_length, Some(i64::MAX));
    }

    #[test]
    fn test_at_least_and_at_most_alone() {
        assert_eq!(
            translate("strings with at least 3 characters"),
            FilterSet {
                min_length: Some(3),
                ..Default::default()
            }
        );
        assert_eq!(
            translate("at most 7 characters"),
            FilterSet {
                max_length: Some(7),
                ..Default::default()
            }
        );
        assert_eq!(translate("at most 0").max_length, Some(0));
    }

    #[test]
    fn test_non_ascii_decimal_digits() {
        // Arabic-Indic five, Devanagari one-two, fullwidth nine
        assert_eq!(translate("longer than \u{665}").min_length, Some(6));
        assert_eq!(translate("at most \u{967}\u{968}").max_length, Some(12));
        assert_eq!(translate("at least \u{ff19}").min_length, Some(9));
    }

    #[test]
    fn test_decimal_digit_values() {
        assert_eq!(decimal_digit_value('0'), 0);
        assert_eq!(decimal_digit_value('7'), 7);
        assert_eq!(decimal_digit_value('\u{660}'), 0);
        assert_eq!(decimal_digit_value('\u{669}'), 9);
        // Mathematical digits are five runs of ten back to back
        assert_eq!(decimal_digit_value('\u{1d7ce}'), 0);
        assert_eq!(decimal_digit_value('\u{1d7d8}'), 0);
        assert_eq!(decimal_digit_value('\u{1d7ff}'), 9);
    }

    #[test]
    fn test_unrecognized_query_is_empty() {
        assert!(translate("gibberish query").is_empty());
        assert!(translate("").is_empty());
    }

    #[test]
    fn test_interpreted_query_serialization() {
        let interpreted = InterpretedQuery::new("strings longer than 10 characters");
        let json = serde_json::to_value(&interpreted).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "original": "strings longer than 10 characters",
                "parsed_filters": {"min_length": 11}
            })
        );
    }
}
