//! Passphrase authentication and admin sessions.
//!
//! The authenticator is stateless in-process: attempts and sessions live in
//! the relational store, and the client cookie only carries the opaque
//! session token. Lockout is a rolling window of failed attempts per client
//! address; session expiry is lazy (expired rows are deleted when found at
//! check time, there is no background sweep).

use chrono::Duration;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use tracing::warn;
use uuid::Uuid;

use crate::clock::Clock;
use crate::config::AuthConfig;
use crate::entity::{login_attempt, session};
use crate::error::Result;

/// How long attempt rows are kept before opportunistic pruning.
const ATTEMPT_RETENTION_DAYS: i64 = 30;

/// A freshly issued session, ready to be mirrored into a cookie.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: sea_orm::prelude::DateTimeWithTimeZone,
}

/// Outcome of a passphrase submission.
#[derive(Debug)]
pub enum UnlockOutcome {
    /// Correct passphrase; a session row was persisted.
    Granted(IssuedSession),
    /// Wrong passphrase; `remaining_attempts` more failures trigger lockout.
    Denied { remaining_attempts: u32 },
    /// The address already hit the threshold inside the window.
    LockedOut,
}

/// Validates passphrases, enforces the lockout window, and owns session rows.
#[derive(Clone)]
pub struct SessionAuthenticator {
    db: DatabaseConnection,
    config: AuthConfig,
    clock: Clock,
}

impl SessionAuthenticator {
    pub fn new(db: DatabaseConnection, config: AuthConfig, clock: Clock) -> Self {
        Self { db, config, clock }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Check a candidate passphrase for `client_address`.
    ///
    /// The lockout decision is made over attempts strictly prior to this
    /// call, but the call itself is always logged — including when it is
    /// rejected for being over the threshold. Attempt logging is best-effort:
    /// a store outage while logging never changes the computed decision.
    /// The attempt lookup itself fails closed.
    pub async fn submit_passphrase(
        &self,
        candidate: &str,
        client_address: &str,
    ) -> Result<UnlockOutcome> {
        let now = self.clock.now();
        let window_start = now - window_duration(&self.config);

        let recent = login_attempt::Entity::find()
            .filter(login_attempt::Column::ClientAddress.eq(client_address))
            .filter(login_attempt::Column::AttemptedAt.gte(window_start.fixed_offset()))
            .all(&self.db)
            .await?;
        let failures = recent.iter().filter(|a| !a.success).count() as u32;

        if failures >= self.config.max_attempts {
            self.log_attempt(client_address, false).await;
            return Ok(UnlockOutcome::LockedOut);
        }

        let granted = candidate == self.config.passphrase;
        self.log_attempt(client_address, granted).await;

        if !granted {
            return Ok(UnlockOutcome::Denied {
                remaining_attempts: self.config.max_attempts - failures - 1,
            });
        }

        let issued = self.issue_session().await?;
        self.prune_old_attempts(client_address).await;
        Ok(UnlockOutcome::Granted(issued))
    }

    /// Whether `token` names a live session.
    ///
    /// An expired row is deleted on the way out (lazy expiry). Store errors
    /// propagate so the guard can fail closed.
    pub async fn validate_session(&self, token: Option<&str>) -> Result<bool> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Ok(false);
        };

        let Some(found) = session::Entity::find_by_id(token).one(&self.db).await? else {
            return Ok(false);
        };

        if found.expires_at < self.clock.now() {
            if let Err(e) = session::Entity::delete_by_id(token).exec(&self.db).await {
                warn!(error = %e, "failed to delete expired session");
            }
            return Ok(false);
        }

        Ok(true)
    }

    /// Delete the session row for `token`. Idempotent: clearing an unknown or
    /// already-cleared token is not an error.
    pub async fn clear_session(&self, token: &str) -> Result<()> {
        session::Entity::delete_by_id(token).exec(&self.db).await?;
        Ok(())
    }

    async fn issue_session(&self) -> Result<IssuedSession> {
        let now = self.clock.now();
        let expires_at = (now + session_ttl(&self.config)).fixed_offset();

        // Token collision mitigation: regenerate until unused.
        let mut token = Uuid::new_v4().to_string();
        while session::Entity::find_by_id(&token)
            .one(&self.db)
            .await?
            .is_some()
        {
            token = Uuid::new_v4().to_string();
        }

        session::ActiveModel {
            token: Set(token.clone()),
            expires_at: Set(expires_at),
            created_at: Set(now.fixed_offset()),
        }
        .insert(&self.db)
        .await?;

        Ok(IssuedSession { token, expires_at })
    }

    async fn log_attempt(&self, client_address: &str, success: bool) {
        let attempt = login_attempt::ActiveModel {
            client_address: Set(client_address.to_string()),
            success: Set(success),
            attempted_at: Set(self.clock.now().fixed_offset()),
            ..Default::default()
        };

        if let Err(e) = attempt.insert(&self.db).await {
            warn!(error = %e, client_address, "failed to log login attempt");
        }
    }

    async fn prune_old_attempts(&self, client_address: &str) {
        let cutoff = self.clock.now() - Duration::days(ATTEMPT_RETENTION_DAYS);
        let result = login_attempt::Entity::delete_many()
            .filter(login_attempt::Column::ClientAddress.eq(client_address))
            .filter(login_attempt::Column::AttemptedAt.lt(cutoff.fixed_offset()))
            .exec(&self.db)
            .await;

        if let Err(e) = result {
            warn!(error = %e, client_address, "failed to prune old login attempts");
        }
    }
}

fn window_duration(config: &AuthConfig) -> Duration {
    Duration::seconds(config.lockout_window.whole_seconds())
}

fn session_ttl(config: &AuthConfig) -> Duration {
    Duration::seconds(config.session_ttl.whole_seconds())
}
