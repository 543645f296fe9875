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

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use tracing::{debug, warn};

use crate::api::AppState;

const SERVICE_NAME: &str = "string-analyzer";

/// Health check response structure
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub storage: StorageHealth,
}

#[derive(Debug, Serialize)]
pub struct StorageHealth {
    pub reachable: bool,
    pub records: usize,
}

/// GET /health - Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    debug!("Health check requested");

    let (reachable, records) = match state.service.record_count() {
        Ok(count) => (true, count),
        Err(e) => {
            warn!("Record store unreachable during health check: {}", e);
            (false, 0)
        }
    };

    let health = HealthResponse {
        status: if reachable { "healthy" } else { "degraded" }.to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: StorageHealth { reachable, records },
    };

    let status_code = if reachable {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(health))
}

/// GET / - Service information
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "String Analyzer Service API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /strings": "Analyze and store a new string",
            "GET /strings/{string_value}": "Get a specific string's analysis",
            "GET /strings": "Get all strings with optional filtering",
            "GET /strings/filter-by-natural-language": "Filter using natural language",
            "DELETE /strings/{string_value}": "Delete a string",
            "GET /health": "Health check"
        }
    }))
}
