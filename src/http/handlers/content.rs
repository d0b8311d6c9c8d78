//! Site content and settings handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::content::KeyValueUpdate;
use crate::error::Error;
use crate::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ContentUpdateRequest {
    content: Vec<KeyValueUpdate>,
}

/// PUT /api/admin/content
pub async fn update_content(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ContentUpdateRequest>,
) -> Result<Json<Value>, Error> {
    state.content.update_content(&body.content).await?;
    Ok(Json(json!({ "success": true })))
}

#[derive(Debug, Deserialize)]
pub struct SettingsUpdateRequest {
    settings: Vec<KeyValueUpdate>,
}

/// PUT /api/admin/settings
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SettingsUpdateRequest>,
) -> Result<Json<Value>, Error> {
    state.content.update_settings(&body.settings).await?;
    Ok(Json(json!({ "success": true })))
}
