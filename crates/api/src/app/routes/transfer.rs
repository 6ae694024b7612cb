//! Export/import endpoints.

use std::sync::Arc;

use axum::{Json, body::Bytes, extract::Extension};

use minitrack_pipeline::Document;

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub async fn export(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Document>, ApiError> {
    Ok(Json(services.tracker().export()?))
}

/// The raw body goes to the document parser, so malformed JSON and failed
/// validation both surface as `ERR_INVALID_IMPORT_FORMAT`.
pub async fn import(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> Result<Json<dto::ImportResponse>, ApiError> {
    let summary = services.tracker().import(&body)?;
    Ok(Json(summary.into()))
}
