//! Backup export/import handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::backup::{export_snapshot, import_snapshot, Backup};
use crate::error::Error;
use crate::http::state::AppState;

/// GET /api/admin/backup
pub async fn export(State(state): State<Arc<AppState>>) -> Result<Json<Backup>, Error> {
    let backup = export_snapshot(&state.db, &state.clock).await?;
    Ok(Json(backup))
}

/// POST /api/admin/backup
///
/// Import is best-effort per collection: successes stay imported, and any
/// failures come back as a 500 with per-collection detail.
pub async fn import(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Response, Error> {
    let backup = Backup::parse(body)?;
    let outcome = import_snapshot(&state.db, backup).await?;

    if !outcome.errors.is_empty() {
        return Ok((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Some data failed to import",
                "details": outcome.errors,
                "imported": outcome.imported,
            })),
        )
            .into_response());
    }

    Ok(Json(json!({ "success": true, "imported": outcome.imported })).into_response())
}
