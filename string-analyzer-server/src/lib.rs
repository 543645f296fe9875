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

//! String Analyzer Server
//!
//! HTTP service that analyzes strings, stores the results keyed by content
//! hash and answers exact, structured and natural-language queries over them.

pub mod api;
pub mod config;
pub mod service;
pub mod validation;

use anyhow::Result;
use axum::{
    http::HeaderValue,
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use string_analyzer_storage::{FileRecordStore, MemoryRecordStore, RecordStore};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{
    create_string, delete_string, filter_by_natural_language, get_string, health_check,
    list_strings, root, AppState,
};
use config::{HttpServerConfig, LoggingConfig, ServerConfig, StorageBackend, StorageConfig};
use service::StringService;

const DEFAULT_LOG_FILTER: &str =
    "string_analyzer_server=info,string_analyzer_storage=info,string_analyzer_query=info,tower_http=info";

/// Build the application routes over `state`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/strings", get(list_strings).post(create_string))
        .route(
            "/strings/filter-by-natural-language",
            get(filter_by_natural_language),
        )
        .route("/strings/:value", get(get_string).delete(delete_string))
        .with_state(state)
}

/// Open the record store selected in the configuration
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn RecordStore>> {
    let store: Arc<dyn RecordStore> = match config.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory record store (records are lost on restart)");
            Arc::new(MemoryRecordStore::new())
        }
        StorageBackend::File => {
            tracing::info!("Opening file record store at: {:?}", config.data_dir);
            Arc::new(FileRecordStore::open(&config.data_dir)?)
        }
    };
    Ok(store)
}

fn init_tracing(config: &LoggingConfig) {
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
    );

    if config.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn cors_layer(config: &HttpServerConfig) -> Result<CorsLayer> {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors_origins.is_empty() {
        tracing::warn!("CORS: Allowing all origins. Set cors_origins to restrict them.");
        return Ok(cors.allow_origin(Any));
    }

    tracing::info!("CORS: Allowing origins: {:?}", config.cors_origins);
    let origins = config
        .cors_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(cors.allow_origin(AllowOrigin::list(origins)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

pub async fn run_server(config: ServerConfig) -> Result<()> {
    init_tracing(&config.logging);

    tracing::info!("Starting String Analyzer Server");
    tracing::info!("Configuration: {:#?}", config);

    config.validate()?;
    let addr = config.socket_addr()?;

    let store = open_store(&config.storage)?;
    let state = AppState::new(StringService::new(store));

    let mut app = router(state)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http());

    if config.server.enable_cors {
        app = app.layer(cors_layer(&config.server)?);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}
