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

//! String analysis endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;
use string_analyzer_core::{FilterSet, StoredRecord};
use string_analyzer_query::InterpretedQuery;
use tracing::debug;

use crate::api::{ApiError, AppState};
use crate::validation::{
    validate_natural_language_params, validate_query_params, validate_string_input,
    NaturalLanguageParams, StringQueryParams,
};

/// Analysis properties as exposed over HTTP
#[derive(Debug, Serialize)]
pub struct StringProperties {
    pub length: usize,
    pub is_palindrome: bool,
    pub unique_characters: usize,
    pub word_count: usize,
    pub sha256_hash: String,
    pub character_frequency_map: BTreeMap<char, usize>,
}

/// A stored string as exposed over HTTP
#[derive(Debug, Serialize)]
pub struct StringResponse {
    pub id: String,
    pub value: String,
    pub properties: StringProperties,
    pub created_at: String,
}

impl From<StoredRecord> for StringResponse {
    fn from(record: StoredRecord) -> Self {
        let analysis = record.analysis;
        Self {
            id: record.id,
            value: record.value,
            properties: StringProperties {
                length: analysis.length,
                is_palindrome: analysis.is_palindrome,
                unique_characters: analysis.unique_character_count,
                word_count: analysis.word_count,
                sha256_hash: analysis.content_hash,
                character_frequency_map: analysis.character_frequency,
            },
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StringListResponse {
    pub data: Vec<StringResponse>,
    pub count: usize,
    /// `null` when no filter was supplied
    pub filters_applied: Option<FilterSet>,
}

#[derive(Debug, Serialize)]
pub struct NaturalLanguageResponse {
    pub data: Vec<StringResponse>,
    pub count: usize,
    pub interpreted_query: InterpretedQuery,
}

fn into_views(records: Vec<StoredRecord>) -> Vec<StringResponse> {
    records.into_iter().map(StringResponse::from).collect()
}

/// POST /strings - Analyze and store a new string
pub async fn create_string(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) =
        payload.map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e.body_text())))?;
    let value = validate_string_input(&body)?;

    let record = state.service.create(value)?;
    Ok((StatusCode::CREATED, Json(StringResponse::from(record))))
}

/// GET /strings/:value - Get a specific string's analysis
pub async fn get_string(
    State(state): State<AppState>,
    Path(value): Path<String>,
) -> Result<Json<StringResponse>, ApiError> {
    let record = state.service.get(&value)?;
    Ok(Json(record.into()))
}

/// GET /strings - List strings with optional structured filters
pub async fn list_strings(
    State(state): State<AppState>,
    params: Result<Query<StringQueryParams>, QueryRejection>,
) -> Result<Json<StringListResponse>, ApiError> {
    let Query(params) = params.map_err(|e| {
        ApiError::Unprocessable(format!("Invalid query parameters: {}", e.body_text()))
    })?;
    let filters = validate_query_params(params)?;

    let records = state.service.list(&filters)?;
    let data = into_views(records);

    Ok(Json(StringListResponse {
        count: data.len(),
        data,
        filters_applied: (!filters.is_empty()).then_some(filters),
    }))
}

/// GET /strings/filter-by-natural-language?query=... - Filter with a plain-English query
pub async fn filter_by_natural_language(
    State(state): State<AppState>,
    params: Result<Query<NaturalLanguageParams>, QueryRejection>,
) -> Result<Json<NaturalLanguageResponse>, ApiError> {
    let Query(params) = params
        .map_err(|e| ApiError::BadRequest(format!("Invalid query parameters: {}", e.body_text())))?;
    let query = validate_natural_language_params(params)?;
    debug!(query = %query, "Natural language filter requested");

    let matches = state.service.search_natural_language(&query)?;
    let data = into_views(matches.records);

    Ok(Json(NaturalLanguageResponse {
        count: data.len(),
        data,
        interpreted_query: matches.interpreted,
    }))
}

/// DELETE /strings/:value - Delete a string
pub async fn delete_string(
    State(state): State<AppState>,
    Path(value): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.service.delete(&value)?;
    Ok(StatusCode::NO_CONTENT)
}
