//! Media upload handler.
//!
//! Streams the request body to the blob service and hands back the public
//! URL; the client then attaches that URL to a series cover or a new image.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::Error;
use crate::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UploadParams {
    filename: Option<String>,
}

/// POST /api/admin/upload?filename=...
pub async fn upload(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UploadParams>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, Error> {
    let Some(filename) = params.filename.filter(|f| !f.trim().is_empty()) else {
        return Err(Error::Validation("Filename is required".into()));
    };
    if body.is_empty() {
        return Err(Error::Validation("File body is required".into()));
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream");

    let url = state
        .content
        .blob()
        .upload(&filename, content_type, body.to_vec())
        .await
        .map_err(|e| Error::Blob(e.to_string()))?;

    Ok(Json(json!({ "url": url })))
}
