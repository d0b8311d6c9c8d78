//! Versioned export/import of the four content collections.
//!
//! The bundle format is stable: a version tag, an export timestamp, and the
//! raw rows of `portfolio_series`, `portfolio_images`, `site_content`, and
//! `site_settings`. Import restores rows verbatim — original ids and order
//! indices included — so an export/import cycle is an exact restoration.

use sea_orm::{DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::entity::{image, series, site_content, site_setting};
use crate::error::{Error, Result};

/// Format tag written into every export.
pub const BACKUP_VERSION: &str = "1.0";

/// The four collections carried by a bundle.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BackupData {
    #[serde(default)]
    pub portfolio_series: Vec<series::Model>,
    #[serde(default)]
    pub portfolio_images: Vec<image::Model>,
    #[serde(default)]
    pub site_content: Vec<site_content::Model>,
    #[serde(default)]
    pub site_settings: Vec<site_setting::Model>,
}

/// A complete backup bundle.
#[derive(Debug, Serialize, Deserialize)]
pub struct Backup {
    pub version: String,
    /// ISO-8601 export timestamp.
    #[serde(default)]
    pub exported_at: String,
    pub data: BackupData,
}

impl Backup {
    /// Parse a submitted bundle, rejecting anything without the required
    /// version and data fields.
    pub fn parse(value: serde_json::Value) -> Result<Self> {
        let has_version = value.get("version").is_some_and(|v| !v.is_null());
        let has_data = value.get("data").is_some_and(|v| !v.is_null());
        if !has_version || !has_data {
            return Err(Error::Validation("Invalid backup format".into()));
        }

        serde_json::from_value(value)
            .map_err(|e| Error::Validation(format!("Invalid backup format: {e}")))
    }
}

/// Per-collection insert counts from an import.
#[derive(Debug, Default, Serialize)]
pub struct ImportCounts {
    pub series: usize,
    pub images: usize,
    pub content: usize,
    pub settings: usize,
}

/// Result of an import: counts plus any per-collection failures.
///
/// Collections are imported best-effort; a failure in one does not roll back
/// the others.
#[derive(Debug, Default)]
pub struct ImportOutcome {
    pub imported: ImportCounts,
    pub errors: Vec<String>,
}

/// Read all four collections into a bundle. The reads run concurrently.
pub async fn export_snapshot(db: &DatabaseConnection, clock: &Clock) -> Result<Backup> {
    let (portfolio_series, portfolio_images, content, settings) = tokio::try_join!(
        series::Entity::find()
            .order_by_asc(series::Column::OrderIndex)
            .all(db),
        image::Entity::find()
            .order_by_asc(image::Column::OrderIndex)
            .all(db),
        site_content::Entity::find().all(db),
        site_setting::Entity::find().all(db),
    )?;

    Ok(Backup {
        version: BACKUP_VERSION.to_string(),
        exported_at: clock.now().to_rfc3339(),
        data: BackupData {
            portfolio_series,
            portfolio_images,
            site_content: content,
            site_settings: settings,
        },
    })
}

/// Replace the four collections with the bundle's rows.
///
/// Existing rows are deleted first (images before series, to satisfy the
/// foreign key), then each collection is bulk-inserted verbatim. Insert
/// failures are collected per collection and reported together; successful
/// collections stay imported.
pub async fn import_snapshot(db: &DatabaseConnection, backup: Backup) -> Result<ImportOutcome> {
    image::Entity::delete_many().exec(db).await?;
    series::Entity::delete_many().exec(db).await?;
    site_content::Entity::delete_many().exec(db).await?;
    site_setting::Entity::delete_many().exec(db).await?;

    let mut outcome = ImportOutcome::default();
    let data = backup.data;

    if !data.portfolio_series.is_empty() {
        let rows: Vec<series::ActiveModel> = data
            .portfolio_series
            .into_iter()
            .map(IntoActiveModel::into_active_model)
            .collect();
        let count = rows.len();
        match series::Entity::insert_many(rows).exec(db).await {
            Ok(_) => outcome.imported.series = count,
            Err(e) => outcome.errors.push(format!("portfolio_series: {e}")),
        }
    }

    if !data.portfolio_images.is_empty() {
        let rows: Vec<image::ActiveModel> = data
            .portfolio_images
            .into_iter()
            .map(IntoActiveModel::into_active_model)
            .collect();
        let count = rows.len();
        match image::Entity::insert_many(rows).exec(db).await {
            Ok(_) => outcome.imported.images = count,
            Err(e) => outcome.errors.push(format!("portfolio_images: {e}")),
        }
    }

    if !data.site_content.is_empty() {
        let rows: Vec<site_content::ActiveModel> = data
            .site_content
            .into_iter()
            .map(IntoActiveModel::into_active_model)
            .collect();
        let count = rows.len();
        match site_content::Entity::insert_many(rows).exec(db).await {
            Ok(_) => outcome.imported.content = count,
            Err(e) => outcome.errors.push(format!("site_content: {e}")),
        }
    }

    if !data.site_settings.is_empty() {
        let rows: Vec<site_setting::ActiveModel> = data
            .site_settings
            .into_iter()
            .map(IntoActiveModel::into_active_model)
            .collect();
        let count = rows.len();
        match site_setting::Entity::insert_many(rows).exec(db).await {
            Ok(_) => outcome.imported.settings = count,
            Err(e) => outcome.errors.push(format!("site_settings: {e}")),
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_missing_version() {
        let err = Backup::parse(serde_json::json!({ "data": {} })).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn parse_rejects_missing_data() {
        let err = Backup::parse(serde_json::json!({ "version": "1.0" })).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn parse_accepts_empty_collections() {
        let backup = Backup::parse(serde_json::json!({
            "version": "1.0",
            "exported_at": "2025-08-01T00:00:00Z",
            "data": {}
        }))
        .expect("minimal bundle should parse");
        assert_eq!(backup.version, "1.0");
        assert!(backup.data.portfolio_series.is_empty());
    }
}
