//! Portfolio series entity model.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A portfolio series: an ordered, top-level collection of images.
///
/// `order_index` positions the series in the global series ordering. Gaps are
/// permitted; deletions do not renumber the remaining rows.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "portfolio_series")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,

    pub title: String,

    pub description: Option<String>,

    /// Public URL of the cover blob; empty when no cover was uploaded.
    pub cover_image_url: String,

    pub order_index: i32,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,

    pub published: Option<bool>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::image::Entity")]
    Image,
}

impl Related<super::image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Image.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
