use axum::{
    Router,
    routing::{get, post},
};

pub mod system;
pub mod transfer;
pub mod types;

/// Router for the versioned domain endpoints (mounted under `/api/v1`).
pub fn router() -> Router {
    Router::new()
        .route("/status", get(system::status))
        .nest("/types", types::router())
        .route("/export", get(transfer::export))
        .route("/import", post(transfer::import))
}
