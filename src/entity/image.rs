//! Portfolio image entity model.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A portfolio image.
///
/// `series_id` is nullable: images without a series live in the "unassigned"
/// partition. `order_index` is scoped to that partition, not global, and the
/// database cascade removes image rows when the owning series is deleted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "portfolio_images")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,

    pub series_id: Option<String>,

    pub image_url: String,

    pub title: Option<String>,

    pub caption: Option<String>,

    pub order_index: i32,

    pub created_at: DateTimeWithTimeZone,

    pub published: Option<bool>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::series::Entity",
        from = "Column::SeriesId",
        to = "super::series::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Series,
}

impl Related<super::series::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Series.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
