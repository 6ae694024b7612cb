use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
    routing::{get, post},
};
use chrono::Utc;

use minitrack_core::TypeId;

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::config::window_from_secs;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_types).post(create_type))
        .route("/:id", get(get_type))
        .route("/:id/move", post(move_units))
        .route("/:id/history", get(get_history))
}

fn parse_id(raw: &str) -> Result<TypeId, ApiError> {
    Ok(raw.parse::<TypeId>()?)
}

pub async fn list_types(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<dto::TypeListResponse>, ApiError> {
    let records = services.tracker().list_types()?;
    Ok(Json(dto::TypeListResponse {
        items: records.iter().map(dto::TypeItem::from).collect(),
    }))
}

pub async fn create_type(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CreateTypeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<dto::TypeItem>), ApiError> {
    let Json(body) = body.map_err(|_| ApiError::validation())?;
    let record = services.tracker().create_type(&body.name)?;
    Ok((StatusCode::CREATED, Json(dto::TypeItem::from(&record))))
}

pub async fn get_type(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<dto::TypeItem>, ApiError> {
    let id = parse_id(&id)?;
    let record = services.tracker().get_type(id)?;
    Ok(Json(dto::TypeItem::from(&record)))
}

pub async fn move_units(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::MoveRequest>, JsonRejection>,
) -> Result<Json<dto::TypeItem>, ApiError> {
    let id = parse_id(&id)?;
    let Ok(Json(body)) = body else {
        // Not a JSON object at all; an unknown id still takes precedence.
        services.tracker().get_type(id)?;
        return Err(ApiError::validation());
    };
    let record = services.tracker().move_units(id, &body, Utc::now())?;
    Ok(Json(dto::TypeItem::from(&record)))
}

pub async fn get_history(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    query: Result<Query<dto::HistoryQuery>, QueryRejection>,
) -> Result<Json<dto::HistoryResponse>, ApiError> {
    let id = parse_id(&id)?;
    let Query(query) = query.map_err(|_| ApiError::validation())?;

    let window = match query.group_window_secs {
        Some(secs) => window_from_secs(secs).map_err(|_| ApiError::validation())?,
        None => services.history_group_window(),
    };

    let groups = services.tracker().history_view(id, window)?;
    Ok(Json(dto::HistoryResponse {
        items: groups.into_iter().map(dto::HistoryEntry::from).collect(),
    }))
}
