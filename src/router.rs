use std::sync::Arc;
use std::time::Duration;

use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::HostConfig;
use crate::handlers::health::health_check;

/// Create the dashboard host router: health check plus the compiled
/// dashboard, with index.html answering every unknown path
pub fn create_router(config: HostConfig) -> Router {
    let assets = ServeDir::new(&config.dist_dir).fallback(ServeFile::new(config.index_file()));

    Router::new()
        .route("/health", get(health_check))
        .fallback_service(assets)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(Arc::new(config))
}
