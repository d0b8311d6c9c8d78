//! Session-cookie guard applied to every mutating admin route.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use crate::error::Error;
use crate::http::state::AppState;

/// Cookie name carrying the session token.
pub const SESSION_COOKIE: &str = "admin_session";

/// Re-validate the session against its persisted row before letting the
/// request through. Store errors during the check deny the request (fail
/// closed) with the same generic 401 as a missing or expired session.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Result<Response, Error> {
    let token = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());

    match state.auth.validate_session(token.as_deref()).await {
        Ok(true) => Ok(next.run(req).await),
        Ok(false) => Err(Error::Unauthorized),
        Err(e) => {
            tracing::error!(error = %e, "session check failed, denying request");
            Err(Error::Unauthorized)
        }
    }
}
