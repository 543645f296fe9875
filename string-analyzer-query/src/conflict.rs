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

//! Filter conflict validation
//!
//! Validation is syntactic: only the length range is checked. A set such as
//! `word_count = 1` with `min_length = 1000` is accepted even though real data
//! will rarely satisfy it.

use string_analyzer_core::FilterSet;
use thiserror::Error;

/// A reason why a filter set can never match
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterConflict {
    #[error("Conflicting length constraints: min_length cannot be greater than max_length")]
    LengthRange { min_length: i64, max_length: i64 },
}

/// Check a filter set for mutually unsatisfiable constraints.
///
/// Returns `None` when the set is consistent.
pub fn validate_conflicts(filters: &FilterSet) -> Option<FilterConflict> {
    match (filters.min_length, filters.max_length) {
        (Some(min_length), Some(max_length)) if min_length > max_length => {
            Some(FilterConflict::LengthRange {
                min_length,
                max_length,
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate;

    fn lengths(min_length: Option<i64>, max_length: Option<i64>) -> FilterSet {
        FilterSet {
            min_length,
            max_length,
            ..Default::default()
        }
    }

    #[test]
    fn test_min_above_max_conflicts() {
        let conflict = validate_conflicts(&lengths(Some(20), Some(5)));
        assert_eq!(
            conflict,
            Some(FilterConflict::LengthRange {
                min_length: 20,
                max_length: 5
            })
        );
        assert_eq!(
            conflict.unwrap().to_string(),
            "Conflicting length constraints: min_length cannot be greater than max_length"
        );
    }

    #[test]
    fn test_consistent_ranges_pass() {
        assert_eq!(validate_conflicts(&lengths(Some(5), Some(20))), None);
        assert_eq!(validate_conflicts(&lengths(Some(5), Some(5))), None);
        assert_eq!(validate_conflicts(&lengths(Some(5), None)), None);
        assert_eq!(validate_conflicts(&lengths(None, Some(-1))), None);
        assert_eq!(validate_conflicts(&FilterSet::default()), None);
    }

    #[test]
    fn test_other_combinations_are_not_checked() {
        let filters = FilterSet {
            word_count: Some(1),
            min_length: Some(1000),
            ..Default::default()
        };
        assert_eq!(validate_conflicts(&filters), None);
    }

    #[test]
    fn test_translated_contradiction() {
        let filters = translate("strings longer than 10 and shorter than 5");
        assert_eq!(filters.min_length, Some(11));
        assert_eq!(filters.max_length, Some(4));
        assert!(validate_conflicts(&filters).is_some());
    }
}
