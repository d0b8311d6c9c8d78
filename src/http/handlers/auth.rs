//! Unlock and logout handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::auth::{IssuedSession, UnlockOutcome};
use crate::error::Error;
use crate::http::guard::SESSION_COOKIE;
use crate::http::state::AppState;
use crate::http::to_offset_datetime;

#[derive(Debug, Deserialize)]
pub struct UnlockRequest {
    passphrase: Option<String>,
}

/// POST /api/admin/unlock
///
/// Validation happens before any store call; a grant sets the session cookie
/// with an expiry matching the persisted row.
pub async fn unlock(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    jar: CookieJar,
    Json(body): Json<UnlockRequest>,
) -> Result<Response, Error> {
    let Some(passphrase) = body.passphrase.filter(|p| !p.is_empty()) else {
        return Err(Error::Validation("Passphrase is required".into()));
    };

    let address = client_address(&headers);
    let lockout_minutes = state.auth.config().lockout_window.whole_minutes();

    match state.auth.submit_passphrase(&passphrase, &address).await? {
        UnlockOutcome::Granted(issued) => {
            let jar = jar.add(session_cookie(&issued, state.cookie_secure));
            Ok((jar, Json(json!({ "success": true }))).into_response())
        }
        UnlockOutcome::Denied { remaining_attempts } => {
            let message = if remaining_attempts > 0 {
                let plural = if remaining_attempts == 1 { "" } else { "s" };
                format!("Incorrect passphrase. {remaining_attempts} attempt{plural} remaining.")
            } else {
                format!("Incorrect passphrase. Account locked for {lockout_minutes} minutes.")
            };
            Ok((
                StatusCode::UNAUTHORIZED,
                Json(json!({ "success": false, "error": message })),
            )
                .into_response())
        }
        UnlockOutcome::LockedOut => Ok((
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "success": false,
                "error": format!(
                    "Too many failed attempts. Please try again in {lockout_minutes} minutes."
                ),
            })),
        )
            .into_response()),
    }
}

/// POST /api/admin/logout
///
/// Idempotent: clears the session row when a cookie is present and always
/// expires the cookie, even if the row was already gone.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<impl IntoResponse, Error> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Err(e) = state.auth.clear_session(cookie.value()).await {
            warn!(error = %e, "failed to delete session row on logout");
        }
    }

    let removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    Ok((jar.remove(removal), Json(json!({ "success": true }))))
}

fn session_cookie(issued: &IssuedSession, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, issued.token.clone()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .path("/")
        .expires(to_offset_datetime(issued.expires_at))
        .build()
}

/// Best-effort client address from proxy headers.
fn client_address(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forwarded_for_wins_and_takes_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "10.0.0.1, 172.16.0.1".parse().unwrap());
        headers.insert("x-real-ip", "192.168.0.9".parse().unwrap());
        assert_eq!(client_address(&headers), "10.0.0.1");
    }

    #[test]
    fn real_ip_is_the_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", "192.168.0.9".parse().unwrap());
        assert_eq!(client_address(&headers), "192.168.0.9");
    }

    #[test]
    fn unknown_when_no_proxy_headers() {
        assert_eq!(client_address(&HeaderMap::new()), "unknown");
    }
}
