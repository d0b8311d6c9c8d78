//! Login attempt entity model.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One passphrase submission, successful or not.
///
/// Append-only: the authenticator writes a row per attempt (including
/// attempts rejected purely for being over the lockout threshold) and never
/// mutates existing rows.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "admin_login_attempts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub client_address: String,

    pub success: bool,

    pub attempted_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
