pub mod errors;
pub mod models;
pub mod routes;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ScannerConfig;

/// Scans share no mutable state; the only thing handlers need is the
/// scanner configuration.
#[derive(Clone)]
pub struct AppState {
    pub config: ScannerConfig,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", axum::routing::get(routes::health::health_check))
        .route("/api/scan", axum::routing::post(routes::scan::run_scan))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
