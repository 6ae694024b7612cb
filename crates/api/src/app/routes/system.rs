use std::sync::Arc;

use axum::{Json, extract::Extension};

use crate::app::dto;
use crate::app::services::AppServices;

pub async fn health(Extension(services): Extension<Arc<AppServices>>) -> Json<dto::HealthResponse> {
    Json(dto::HealthResponse {
        status: "ok",
        env: services.app_env().to_string(),
    })
}

pub async fn status() -> Json<dto::ApiStatusResponse> {
    Json(dto::ApiStatusResponse {
        status: "ok",
        version: "v1",
    })
}
