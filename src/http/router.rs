//! Router assembly.

use std::sync::Arc;

use axum::middleware;
use axum::routing::{delete, get, patch, post, put};
use axum::Router;

use crate::http::guard;
use crate::http::handlers::{auth, backup, content, images, series, upload};
use crate::http::state::AppState;

/// Build the admin API router.
///
/// Unlock and logout are open (logout is idempotent and never 401s); every
/// other admin route goes through the session guard.
pub fn router(state: Arc<AppState>) -> Router {
    let guarded = Router::new()
        .route("/api/admin/series", get(series::list).post(series::create))
        .route("/api/admin/series/{id}", delete(series::remove))
        .route("/api/admin/series/{id}/images", get(series::images))
        .route("/api/admin/photos", get(images::list).post(images::create))
        .route("/api/admin/photos/{id}", delete(images::remove))
        .route("/api/admin/photos/{id}/assign", patch(images::assign))
        .route("/api/admin/content", put(content::update_content))
        .route("/api/admin/settings", put(content::update_settings))
        .route("/api/admin/backup", get(backup::export).post(backup::import))
        .route("/api/admin/upload", post(upload::upload))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            guard::require_session,
        ));

    Router::new()
        .route("/healthz", get(health))
        .route("/api/admin/unlock", post(auth::unlock))
        .route("/api/admin/logout", post(auth::logout))
        .merge(guarded)
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
