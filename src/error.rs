//! Error types for the admin backend.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Main error type for authenticator and content-store operations.
///
/// Validation and authorization failures are checked before any external
/// call; store and blob failures are caught at each call site and translated
/// here rather than propagated raw.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed user input (400).
    #[error("validation error: {0}")]
    Validation(String),

    /// Missing, unknown, or expired session (401).
    #[error("unauthorized")]
    Unauthorized,

    /// Too many failed passphrase attempts inside the lockout window (429).
    #[error("too many failed attempts")]
    LockedOut,

    /// Unknown id (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// External relational store failure (500).
    #[error("store error: {0}")]
    Store(#[from] sea_orm::DbErr),

    /// External blob store failure surfaced to the caller (500).
    #[error("blob store error: {0}")]
    Blob(String),

    /// Bad or missing server configuration (500).
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::LockedOut => StatusCode::TOO_MANY_REQUESTS,
            Error::Store(_) | Error::Blob(_) | Error::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to return to the client.
    ///
    /// Store, blob, and config details stay in the server log; the caller
    /// gets a generic message.
    pub fn client_message(&self) -> String {
        match self {
            Error::Validation(msg) => msg.clone(),
            Error::Unauthorized => "Unauthorized".to_string(),
            Error::LockedOut => "Too many failed attempts".to_string(),
            Error::NotFound(what) => format!("{what} not found"),
            Error::Store(_) | Error::Blob(_) | Error::Config(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (
            status,
            Json(serde_json::json!({ "error": self.client_message() })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(
            Error::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(Error::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(Error::LockedOut.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            Error::NotFound("image".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::Blob("gone".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::Store(sea_orm::DbErr::Custom("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn server_errors_do_not_leak_detail() {
        let err = Error::Store(sea_orm::DbErr::Custom("password in DSN".into()));
        assert_eq!(err.client_message(), "Internal server error");

        let err = Error::Blob("token rejected by blob host".into());
        assert_eq!(err.client_message(), "Internal server error");
    }

    #[test]
    fn validation_message_is_user_visible() {
        let err = Error::Validation("Title is required".into());
        assert_eq!(err.client_message(), "Title is required");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
