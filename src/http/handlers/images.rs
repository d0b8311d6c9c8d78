//! Image handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::content::NewImage;
use crate::error::Error;
use crate::http::state::AppState;

/// GET /api/admin/photos
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Value>, Error> {
    let photos = state.content.list_images().await?;
    Ok(Json(json!({ "photos": photos })))
}

#[derive(Debug, Deserialize)]
pub struct CreateImageRequest {
    image_url: Option<String>,
    title: Option<String>,
    caption: Option<String>,
    series_id: Option<String>,
}

/// POST /api/admin/photos
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateImageRequest>,
) -> Result<Json<Value>, Error> {
    let created = state
        .content
        .create_image(NewImage {
            series_id: body.series_id,
            image_url: body.image_url.unwrap_or_default(),
            title: body.title,
            caption: body.caption,
        })
        .await?;
    Ok(Json(json!({ "photo": created })))
}

/// DELETE /api/admin/photos/{id}
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, Error> {
    state.content.delete_image(&id).await?;
    Ok(Json(json!({ "success": true })))
}

#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    series_id: Option<String>,
}

/// PATCH /api/admin/photos/{id}/assign
pub async fn assign(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<AssignRequest>,
) -> Result<Json<Value>, Error> {
    let updated = state.content.reassign_image(&id, body.series_id).await?;
    Ok(Json(json!({ "photo": updated })))
}
