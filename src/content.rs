//! Ordered content store: series and images.
//!
//! Two ordered collections back the portfolio: series (globally ordered) and
//! images (ordered within their `series_id` partition, null included). Every
//! insert computes its position as max-plus-one over the target partition;
//! deletes and reassignments leave gaps behind.
//!
//! Blob objects are cleaned up best-effort: a failed blob delete is logged
//! and swallowed so it can never block the database-level cascade.

use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use sea_orm::sea_query::Expr;
use tracing::warn;
use uuid::Uuid;

use crate::blob::BlobStore;
use crate::clock::Clock;
use crate::entity::{image, series, site_content, site_setting};
use crate::error::{Error, Result};
use crate::ordering::next_order_index;

/// Input for `create_series`.
#[derive(Debug, Default)]
pub struct NewSeries {
    pub title: String,
    pub description: Option<String>,
    /// Public URL of an already-uploaded cover blob, if any.
    pub cover_image_url: Option<String>,
}

/// Input for `create_image`.
#[derive(Debug, Default)]
pub struct NewImage {
    pub series_id: Option<String>,
    pub image_url: String,
    pub title: Option<String>,
    pub caption: Option<String>,
}

/// A key/value update for site content or settings.
#[derive(Debug, serde::Deserialize)]
pub struct KeyValueUpdate {
    pub key: String,
    pub value: Option<String>,
}

/// CRUD over the portfolio collections, backed by the relational store and
/// the blob service.
#[derive(Clone)]
pub struct ContentStore {
    db: DatabaseConnection,
    blob: Arc<dyn BlobStore>,
    clock: Clock,
}

impl ContentStore {
    pub fn new(db: DatabaseConnection, blob: Arc<dyn BlobStore>, clock: Clock) -> Self {
        Self { db, blob, clock }
    }

    pub fn blob(&self) -> &Arc<dyn BlobStore> {
        &self.blob
    }

    /// All series in display order.
    pub async fn list_series(&self) -> Result<Vec<series::Model>> {
        Ok(series::Entity::find()
            .order_by_asc(series::Column::OrderIndex)
            .all(&self.db)
            .await?)
    }

    /// Create a series at the end of the global ordering.
    pub async fn create_series(&self, new: NewSeries) -> Result<series::Model> {
        if new.title.trim().is_empty() {
            return Err(Error::Validation("Title is required".into()));
        }

        let max = series::Entity::find()
            .order_by_desc(series::Column::OrderIndex)
            .one(&self.db)
            .await?;
        let order_index = next_order_index(max.map(|s| s.order_index));

        let now = self.clock.now().fixed_offset();
        let created = series::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            title: Set(new.title),
            description: Set(new.description),
            cover_image_url: Set(new.cover_image_url.unwrap_or_default()),
            order_index: Set(order_index),
            created_at: Set(now),
            updated_at: Set(now),
            published: Set(None),
        }
        .insert(&self.db)
        .await?;

        Ok(created)
    }

    /// Delete a series, its images, and their blob objects.
    ///
    /// Blob deletions come first and are best-effort; the row delete decides
    /// the overall outcome, and the store's referential cascade removes the
    /// image rows. Deleting an unknown id succeeds.
    pub async fn delete_series(&self, id: &str) -> Result<()> {
        let found = series::Entity::find_by_id(id).one(&self.db).await?;
        if let Some(s) = &found {
            if !s.cover_image_url.is_empty() {
                self.delete_blob(&s.cover_image_url).await;
            }
        }

        let images = image::Entity::find()
            .filter(image::Column::SeriesId.eq(id))
            .all(&self.db)
            .await?;
        for img in &images {
            self.delete_blob(&img.image_url).await;
        }

        series::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    /// All images, newest first (the photo-library view).
    pub async fn list_images(&self) -> Result<Vec<image::Model>> {
        Ok(image::Entity::find()
            .order_by_desc(image::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Images of one series, in display order.
    pub async fn series_images(&self, series_id: &str) -> Result<Vec<image::Model>> {
        Ok(image::Entity::find()
            .filter(image::Column::SeriesId.eq(series_id))
            .order_by_asc(image::Column::OrderIndex)
            .all(&self.db)
            .await?)
    }

    /// Create an image at the end of its partition, assigned or unassigned.
    pub async fn create_image(&self, new: NewImage) -> Result<image::Model> {
        if new.image_url.trim().is_empty() {
            return Err(Error::Validation("Image URL is required".into()));
        }

        let order_index = self.next_image_index(new.series_id.as_deref()).await?;

        let created = image::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            series_id: Set(new.series_id),
            image_url: Set(new.image_url),
            title: Set(new.title),
            caption: Set(new.caption),
            order_index: Set(order_index),
            created_at: Set(self.clock.now().fixed_offset()),
            published: Set(None),
        }
        .insert(&self.db)
        .await?;

        Ok(created)
    }

    /// Delete an image row and, best-effort, its blob object.
    pub async fn delete_image(&self, id: &str) -> Result<()> {
        let Some(found) = image::Entity::find_by_id(id).one(&self.db).await? else {
            return Err(Error::NotFound("image".into()));
        };

        self.delete_blob(&found.image_url).await;

        image::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    /// Move an image to another partition (or to unassigned).
    ///
    /// The order index is recomputed in the target partition exactly as in
    /// `create_image`; the old partition keeps its gap.
    pub async fn reassign_image(
        &self,
        id: &str,
        new_series_id: Option<String>,
    ) -> Result<image::Model> {
        let Some(found) = image::Entity::find_by_id(id).one(&self.db).await? else {
            return Err(Error::NotFound("image".into()));
        };

        let order_index = self.next_image_index(new_series_id.as_deref()).await?;

        let mut active = found.into_active_model();
        active.series_id = Set(new_series_id);
        active.order_index = Set(order_index);
        Ok(active.update(&self.db).await?)
    }

    /// Apply site-content edits, one row per key.
    pub async fn update_content(&self, items: &[KeyValueUpdate]) -> Result<()> {
        let now = self.clock.now().fixed_offset();
        for item in items {
            site_content::Entity::update_many()
                .col_expr(site_content::Column::Value, Expr::value(item.value.clone()))
                .col_expr(site_content::Column::UpdatedAt, Expr::value(now))
                .filter(site_content::Column::Key.eq(&item.key))
                .exec(&self.db)
                .await?;
        }
        Ok(())
    }

    /// Apply site-setting edits, one row per key.
    pub async fn update_settings(&self, items: &[KeyValueUpdate]) -> Result<()> {
        let now = self.clock.now().fixed_offset();
        for item in items {
            site_setting::Entity::update_many()
                .col_expr(site_setting::Column::Value, Expr::value(item.value.clone()))
                .col_expr(site_setting::Column::UpdatedAt, Expr::value(now))
                .filter(site_setting::Column::Key.eq(&item.key))
                .exec(&self.db)
                .await?;
        }
        Ok(())
    }

    async fn next_image_index(&self, partition: Option<&str>) -> Result<i32> {
        let filter = match partition {
            Some(series_id) => image::Column::SeriesId.eq(series_id),
            None => image::Column::SeriesId.is_null(),
        };
        let max = image::Entity::find()
            .filter(filter)
            .order_by_desc(image::Column::OrderIndex)
            .one(&self.db)
            .await?;
        Ok(next_order_index(max.map(|m| m.order_index)))
    }

    async fn delete_blob(&self, url: &str) {
        if let Err(e) = self.blob.delete(url).await {
            warn!(error = %e, url, "failed to delete blob object");
        }
    }
}
