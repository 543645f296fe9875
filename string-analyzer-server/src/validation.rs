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

//! Input validation for API requests
//!
//! Turns raw request input into typed values or an [`ApiError`] before anything
//! reaches the service.

use serde::Deserialize;
use serde_json::Value;
use string_analyzer_core::FilterSet;

use crate::api::ApiError;

/// Query parameters accepted by `GET /strings`
#[derive(Debug, Default, Deserialize)]
pub struct StringQueryParams {
    pub is_palindrome: Option<bool>,
    pub min_length: Option<i64>,
    pub max_length: Option<i64>,
    pub word_count: Option<i64>,
    pub contains_character: Option<String>,
}

/// Query parameters accepted by `GET /strings/filter-by-natural-language`
#[derive(Debug, Default, Deserialize)]
pub struct NaturalLanguageParams {
    pub query: Option<String>,
}

/// Extract the `value` field of a create request.
///
/// A missing field is a bad request; a field of the wrong JSON type is
/// unprocessable.
pub fn validate_string_input(body: &Value) -> Result<String, ApiError> {
    let Some(object) = body.as_object() else {
        return Err(ApiError::BadRequest(
            "Invalid request body: expected a JSON object".to_string(),
        ));
    };

    match object.get("value") {
        None => Err(ApiError::BadRequest(
            "Invalid request body: missing \"value\" field".to_string(),
        )),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(other) => Err(ApiError::Unprocessable(format!(
            "Invalid data type for \"value\" (must be string, got {})",
            json_type_name(other)
        ))),
    }
}

/// Validate structured filter parameters.
///
/// Out-of-range values are unprocessable, like a query string that fails to
/// deserialize.
pub fn validate_query_params(params: StringQueryParams) -> Result<FilterSet, ApiError> {
    let min_length = non_negative(params.min_length, "min_length")?;
    let max_length = non_negative(params.max_length, "max_length")?;
    let word_count = non_negative(params.word_count, "word_count")?
        .map(word_count_filter)
        .transpose()?;

    let contains_character = match params.contains_character {
        None => None,
        Some(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Some(ch),
                _ => {
                    return Err(ApiError::Unprocessable(format!(
                        "Invalid query parameters: contains_character must be exactly one character (got {:?})",
                        s
                    )))
                }
            }
        }
    };

    Ok(FilterSet {
        word_count,
        is_palindrome: params.is_palindrome,
        min_length,
        max_length,
        contains_character,
    })
}

/// Extract a non-blank natural-language query
pub fn validate_natural_language_params(params: NaturalLanguageParams) -> Result<String, ApiError> {
    match params.query {
        Some(query) if !query.trim().is_empty() => Ok(query),
        _ => Err(ApiError::BadRequest(
            "Missing required query parameter: query".to_string(),
        )),
    }
}

fn non_negative(value: Option<i64>, field: &str) -> Result<Option<i64>, ApiError> {
    match value {
        Some(n) if n < 0 => Err(ApiError::Unprocessable(format!(
            "Invalid query parameters: {} must be >= 0 (got {})",
            field, n
        ))),
        other => Ok(other),
    }
}

fn word_count_filter(n: i64) -> Result<usize, ApiError> {
    usize::try_from(n).map_err(|_| {
        ApiError::Unprocessable(format!(
            "Invalid query parameters: word_count {} is out of range",
            n
        ))
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_string_input() {
        assert_eq!(validate_string_input(&json!({"value": "abc"})).unwrap(), "abc");
        assert!(matches!(
            validate_string_input(&json!({})),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            validate_string_input(&json!(["value"])),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            validate_string_input(&json!({"value": 42})),
            Err(ApiError::Unprocessable(_))
        ));
        assert!(matches!(
            validate_string_input(&json!({"value": null})),
            Err(ApiError::Unprocessable(_))
        ));
    }

    #[test]
    fn test_validate_query_params() {
        let filters = validate_query_params(StringQueryParams {
            is_palindrome: Some(true),
            min_length: Some(2),
            max_length: Some(10),
            word_count: Some(1),
            contains_character: Some("a".to_string()),
        })
        .unwrap();
        assert_eq!(
            filters,
            FilterSet {
                word_count: Some(1),
                is_palindrome: Some(true),
                min_length: Some(2),
                max_length: Some(10),
                contains_character: Some('a'),
            }
        );

        assert!(validate_query_params(StringQueryParams::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_rejects_negative_and_multi_char_params() {
        let rejected = [
            StringQueryParams {
                min_length: Some(-1),
                ..Default::default()
            },
            StringQueryParams {
                max_length: Some(-5),
                ..Default::default()
            },
            StringQueryParams {
                word_count: Some(-3),
                ..Default::default()
            },
            StringQueryParams {
                contains_character: Some("ab".to_string()),
                ..Default::default()
            },
            StringQueryParams {
                contains_character: Some(String::new()),
                ..Default::default()
            },
        ];
        for params in rejected {
            assert!(matches!(
                validate_query_params(params),
                Err(ApiError::Unprocessable(_))
            ));
        }
    }

    #[test]
    fn test_word_count_conversion_is_checked() {
        assert_eq!(word_count_filter(3).unwrap(), 3);
        assert_eq!(
            word_count_filter(i64::MAX).is_ok(),
            usize::try_from(i64::MAX).is_ok()
        );

        let filters = validate_query_params(StringQueryParams {
            word_count: Some(i64::MAX),
            ..Default::default()
        });
        match usize::try_from(i64::MAX) {
            Ok(n) => assert_eq!(filters.unwrap().word_count, Some(n)),
            Err(_) => assert!(matches!(filters, Err(ApiError::Unprocessable(_)))),
        }
    }

    #[test]
    fn test_validate_natural_language_params() {
        assert_eq!(
            validate_natural_language_params(NaturalLanguageParams {
                query: Some("palindromes".to_string())
            })
            .unwrap(),
            "palindromes"
        );
        assert!(validate_natural_language_params(NaturalLanguageParams { query: None }).is_err());
        assert!(validate_natural_language_params(NaturalLanguageParams {
            query: Some("  ".to_string())
        })
        .is_err());
    }
}
