use std::sync::Arc;

use axum::{extract::State, response::Json};
use tracing::instrument;

use crate::config::HostConfig;
use crate::schemas::HealthResponse;

/// Health check endpoint
#[instrument(skip(config))]
pub async fn health_check(State(config): State<Arc<HostConfig>>) -> Json<HealthResponse> {
    let dashboard = if config.index_file().is_file() {
        "available"
    } else {
        "missing"
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        dashboard: dashboard.to_string(),
    })
}
