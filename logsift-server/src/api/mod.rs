//! API Module
//!
//! HTTP API layer for the server.
//! Each submodule handles endpoints for a specific domain.

pub mod error;
pub mod health;
pub mod pipeline;

use axum::{
    Router,
    routing::{get, post},
};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

/// Create the main API router with all endpoints
pub fn create_router(pool: PgPool) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Pipeline endpoints
        .route("/pipeline/save", post(pipeline::save_pipelines))
        .route("/pipeline/list", get(pipeline::list_versions))
        .route("/pipeline/latest", get(pipeline::latest_pipeline))
        .route("/pipeline/history", get(pipeline::get_history))
        .route("/pipeline/{version}", get(pipeline::get_pipeline))
        .route("/pipeline/{version}/deploy", post(pipeline::deploy_pipeline))
        .route(
            "/pipeline/{version}/status",
            post(pipeline::report_deploy_status),
        )
        // Add state and middleware
        .with_state(pool)
        .layer(TraceLayer::new_for_http())
}
