//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the process-wide tracker and settings handlers read
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: the `{ code, message }` error envelope

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use minitrack_infra::Tracker;

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router with a fresh, empty tracker.
pub fn build_app(config: &ApiConfig) -> Router {
    build_app_with(Arc::new(services::AppServices::new(Tracker::new(), config)))
}

/// Build the router around already constructed services.
pub fn build_app_with(services: Arc<services::AppServices>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api/v1", routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::trace_requests))
                .layer(Extension(services)),
        )
}
