//! Admin session entity model.
//!
//! A row here is the durable side of a logged-in admin: the client cookie
//! carries the token as a capability reference, never any secret material.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A single admin session.
///
/// Created on successful passphrase submission, read on every guarded
/// request, deleted on logout or lazily when found expired at check time.
///
/// | Column     | Type               | Description                    |
/// |------------|--------------------|--------------------------------|
/// | token      | TEXT (Primary Key) | Opaque session token           |
/// | expires_at | TIMESTAMPTZ        | Hard expiry of the session     |
/// | created_at | TIMESTAMPTZ        | Issue time                     |
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "admin_sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub token: String,

    pub expires_at: DateTimeWithTimeZone,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
