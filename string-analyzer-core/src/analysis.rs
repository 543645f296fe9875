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

//! String Analyzer
//!
//! Computes the fixed set of derived properties for a string. The analysis is
//! a pure function of its input: no I/O, no shared state, safe to call from
//! any number of threads.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};

/// Properties derived from a single input string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Number of characters in the raw value
    pub length: usize,

    /// Palindrome check over the value with ASCII spaces removed and case folded
    pub is_palindrome: bool,

    /// Number of distinct characters in the raw value
    pub unique_character_count: usize,

    /// Number of whitespace-delimited tokens
    pub word_count: usize,

    /// Lowercase hex SHA-256 of the UTF-8 bytes
    pub content_hash: String,

    /// Occurrence count per distinct character
    pub character_frequency: BTreeMap<char, usize>,
}

/// Analyze `value`.
///
/// Total over every string, including the empty one. Rejecting empty input is
/// left to the caller.
///
/// # Example
/// ```
/// use string_analyzer_core::analyze;
///
/// let result = analyze("Race Car");
/// assert!(result.is_palindrome);
/// assert_eq!(result.word_count, 2);
/// assert_eq!(result.length, 8);
/// ```
pub fn analyze(value: &str) -> AnalysisResult {
    let character_frequency = character_frequency(value);

    AnalysisResult {
        length: value.chars().count(),
        is_palindrome: is_palindrome(value),
        unique_character_count: value.chars().collect::<HashSet<_>>().len(),
        word_count: word_count(value),
        content_hash: content_hash(value),
        character_frequency,
    }
}

/// Lowercase hex SHA-256 digest of `value`'s UTF-8 encoding.
///
/// This is the primary key of a stored record, so the algorithm, encoding and
/// hex case must never change.
pub fn content_hash(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hex::encode(hasher.finalize())
}

// Only U+0020 is stripped. Tabs, newlines and punctuation stay significant.
fn is_palindrome(value: &str) -> bool {
    let cleaned: Vec<char> = value.replace(' ', "").to_lowercase().chars().collect();
    cleaned.iter().eq(cleaned.iter().rev())
}

// Unicode whitespace plus the information separators U+001C..U+001F
fn is_word_separator(ch: char) -> bool {
    ch.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&ch)
}

fn word_count(value: &str) -> usize {
    value
        .split(is_word_separator)
        .filter(|word| !word.is_empty())
        .count()
}

fn character_frequency(value: &str) -> BTreeMap<char, usize> {
    let mut frequency = BTreeMap::new();
    for ch in value.chars() {
        *frequency.entry(ch).or_insert(0) += 1;
    }
    frequency
}
