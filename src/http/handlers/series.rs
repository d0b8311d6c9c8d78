//! Series handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::content::NewSeries;
use crate::error::Error;
use crate::http::state::AppState;

/// GET /api/admin/series
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Value>, Error> {
    let series = state.content.list_series().await?;
    Ok(Json(json!({ "series": series })))
}

#[derive(Debug, Deserialize)]
pub struct CreateSeriesRequest {
    title: Option<String>,
    description: Option<String>,
    cover_image_url: Option<String>,
}

/// POST /api/admin/series
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateSeriesRequest>,
) -> Result<Json<Value>, Error> {
    let created = state
        .content
        .create_series(NewSeries {
            title: body.title.unwrap_or_default(),
            description: body.description,
            cover_image_url: body.cover_image_url,
        })
        .await?;
    Ok(Json(json!({ "series": created })))
}

/// DELETE /api/admin/series/{id}
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, Error> {
    state.content.delete_series(&id).await?;
    Ok(Json(json!({ "success": true })))
}

/// GET /api/admin/series/{id}/images
pub async fn images(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, Error> {
    let images = state.content.series_images(&id).await?;
    Ok(Json(json!({ "images": images })))
}
