//! Server and authenticator configuration.
//!
//! All tunables live in explicit structs handed to the components that need
//! them; nothing reads the environment except `AppConfig::from_env`, which the
//! binary calls once at startup.

use std::env;
use std::net::SocketAddr;

use time::Duration;

use crate::error::{Error, Result};

/// Authenticator tunables.
///
/// Passed into `SessionAuthenticator` at construction so tests can inject
/// their own thresholds and windows.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// The shared admin passphrase.
    pub passphrase: String,
    /// Failed attempts inside the window before an address is locked out.
    pub max_attempts: u32,
    /// Rolling window over which failures are counted.
    pub lockout_window: Duration,
    /// Lifetime of an issued session.
    pub session_ttl: Duration,
}

impl AuthConfig {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
            max_attempts: 5,
            lockout_window: Duration::minutes(15),
            session_ttl: Duration::hours(24),
        }
    }
}

/// Hosted blob service credentials.
#[derive(Debug, Clone)]
pub struct BlobConfig {
    /// Base URL of the blob API.
    pub base_url: String,
    /// Bearer token for uploads and deletes.
    pub token: String,
}

/// Full server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub auth: AuthConfig,
    /// Absent when no blob service is configured; deletes become no-ops.
    pub blob: Option<BlobConfig>,
    /// Whether session cookies carry the Secure attribute.
    pub cookie_secure: bool,
}

impl AppConfig {
    /// Build the configuration from the process environment.
    ///
    /// `DATABASE_URL` and `ADMIN_PASSPHRASE` are required; everything else
    /// has a default.
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| Error::Config("DATABASE_URL must be set".into()))?;
        let passphrase = env::var("ADMIN_PASSPHRASE")
            .map_err(|_| Error::Config("ADMIN_PASSPHRASE must be set".into()))?;

        let mut auth = AuthConfig::new(passphrase);
        if let Some(n) = parse_env("ADMIN_MAX_ATTEMPTS")? {
            auth.max_attempts = n;
        }
        if let Some(minutes) = parse_env("ADMIN_LOCKOUT_MINUTES")? {
            auth.lockout_window = Duration::minutes(minutes);
        }
        if let Some(hours) = parse_env("ADMIN_SESSION_HOURS")? {
            auth.session_ttl = Duration::hours(hours);
        }

        let bind_addr = match env::var("BIND_ADDR") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| Error::Config(format!("invalid BIND_ADDR: {e}")))?,
            Err(_) => SocketAddr::from(([127, 0, 0, 1], 3000)),
        };

        let blob = match (env::var("BLOB_API_URL"), env::var("BLOB_API_TOKEN")) {
            (Ok(base_url), Ok(token)) => Some(BlobConfig { base_url, token }),
            _ => None,
        };

        let cookie_secure = env::var("COOKIE_SECURE")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        Ok(Self {
            database_url,
            bind_addr,
            auth,
            blob,
            cookie_secure,
        })
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| Error::Config(format!("invalid {name}: {e}"))),
        Err(_) => Ok(None),
    }
}
