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

//! Structured filters over stored strings.

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisResult;

/// Sparse set of optional constraints over stored records
///
/// Produced either by the natural-language translator or directly from query
/// parameters. Nothing is checked at construction; contradictions such as
/// `min_length > max_length` are reported by the conflict validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    /// Exact number of words
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,

    /// Exact palindrome status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,

    /// Inclusive lower bound on length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i64>,

    /// Inclusive upper bound on length (may be negative after translation)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,

    /// Character that must appear literally (case-sensitive) in the value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_character: Option<char>,
}

impl FilterSet {
    /// True when no constraint is set
    pub fn is_empty(&self) -> bool {
        self.word_count.is_none()
            && self.is_palindrome.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.contains_character.is_none()
    }

    /// Check a stored value and its analysis against every set constraint
    pub fn matches(&self, value: &str, analysis: &AnalysisResult) -> bool {
        let length = i64::try_from(analysis.length).unwrap_or(i64::MAX);

        if let Some(is_palindrome) = self.is_palindrome {
            if analysis.is_palindrome != is_palindrome {
                return false;
            }
        }
        if let Some(min) = self.min_length {
            if length < min {
                return false;
            }
        }
        if let Some(max) = self.max_length {
            if length > max {
                return false;
            }
        }
        if let Some(word_count) = self.word_count {
            if analysis.word_count != word_count {
                return false;
            }
        }
        if let Some(ch) = self.contains_character {
            if !value.contains(ch) {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;

    fn check(filters: &FilterSet, value: &str) -> bool {
        filters.matches(value, &analyze(value))
    }

    #[test]
    fn test_empty_filter_set_matches_everything() {
        let filters = FilterSet::default();
        assert!(filters.is_empty());
        assert!(check(&filters, "anything"));
        assert!(check(&filters, ""));
    }

    #[test]
    fn test_length_bounds_are_inclusive() {
        let filters = FilterSet {
            min_length: Some(3),
            max_length: Some(5),
            ..Default::default()
        };
        assert!(!check(&filters, "ab"));
        assert!(check(&filters, "abc"));
        assert!(check(&filters, "abcde"));
        assert!(!check(&filters, "abcdef"));
    }

    #[test]
    fn test_negative_max_length_matches_nothing() {
        let filters = FilterSet {
            max_length: Some(-1),
            ..Default::default()
        };
        assert!(!check(&filters, ""));
    }

    #[test]
    fn test_contains_character_is_case_sensitive() {
        let filters = FilterSet {
            contains_character: Some('z'),
            ..Default::default()
        };
        assert!(check(&filters, "pizza"));
        assert!(!check(&filters, "PIZZA"));
    }

    #[test]
    fn test_combined_constraints() {
        let filters = FilterSet {
            word_count: Some(1),
            is_palindrome: Some(true),
            ..Default::default()
        };
        assert!(check(&filters, "level"));
        assert!(!check(&filters, "never odd or even"));
        assert!(!check(&filters, "hello"));
    }

    #[test]
    fn test_serialization_skips_unset_fields() {
        let filters = FilterSet {
            min_length: Some(11),
            contains_character: Some('z'),
            ..Default::default()
        };
        let json = serde_json::to_value(&filters).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"min_length": 11, "contains_character": "z"})
        );
    }
}
