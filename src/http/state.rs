//! State shared by the admin routes.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::auth::SessionAuthenticator;
use crate::blob::BlobStore;
use crate::clock::Clock;
use crate::config::AuthConfig;
use crate::content::ContentStore;

/// Everything a handler needs: the authenticator, the content store, and the
/// raw connection for backup export/import.
#[derive(Clone)]
pub struct AppState {
    pub auth: SessionAuthenticator,
    pub content: ContentStore,
    pub db: DatabaseConnection,
    pub clock: Clock,
    /// Whether issued cookies carry the Secure attribute.
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        auth_config: AuthConfig,
        blob: Arc<dyn BlobStore>,
        clock: Clock,
        cookie_secure: bool,
    ) -> Self {
        Self {
            auth: SessionAuthenticator::new(db.clone(), auth_config, clock.clone()),
            content: ContentStore::new(db.clone(), blob, clock.clone()),
            db,
            clock,
            cookie_secure,
        }
    }
}
