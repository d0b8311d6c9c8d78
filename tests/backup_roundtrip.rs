//! Export/import restores rows verbatim, ids and order indices included.

mod common;

use std::sync::Arc;

use chrono::Utc;
use darkroom::backup::{export_snapshot, import_snapshot, Backup, BACKUP_VERSION};
use darkroom::clock::Clock;
use darkroom::content::{ContentStore, NewImage, NewSeries};
use darkroom::entity::{site_content, site_setting};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::common::MemoryBlobStore;

async fn seeded() -> (DatabaseConnection, Clock) {
    let db = common::memory_db().await;
    let clock = Clock::fixed(Utc::now());
    let store = ContentStore::new(
        db.clone(),
        Arc::new(MemoryBlobStore::default()),
        clock.clone(),
    );

    let a = store
        .create_series(NewSeries {
            title: "Iceland".into(),
            description: Some("highlands".into()),
            cover_image_url: Some("https://blobs.test/cover.jpg".into()),
        })
        .await
        .unwrap();
    store
        .create_series(NewSeries {
            title: "Dolomites".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    store
        .create_image(NewImage {
            series_id: Some(a.id.clone()),
            image_url: "https://blobs.test/one.jpg".into(),
            title: Some("One".into()),
            caption: None,
        })
        .await
        .unwrap();
    store
        .create_image(NewImage {
            series_id: None,
            image_url: "https://blobs.test/loose.jpg".into(),
            title: None,
            caption: Some("unassigned".into()),
        })
        .await
        .unwrap();

    let now = clock.now().fixed_offset();
    site_content::ActiveModel {
        id: Set("c1".into()),
        key: Set("about_text".into()),
        value: Set(Some("hello".into())),
        updated_at: Set(now),
    }
    .insert(&db)
    .await
    .unwrap();
    site_setting::ActiveModel {
        key: Set("theme".into()),
        value: Set(Some("dark".into())),
        updated_at: Set(now),
    }
    .insert(&db)
    .await
    .unwrap();

    (db, clock)
}

#[tokio::test]
async fn export_carries_the_version_tag_and_all_collections() {
    let (db, clock) = seeded().await;

    let backup = export_snapshot(&db, &clock).await.unwrap();
    assert_eq!(backup.version, BACKUP_VERSION);
    assert!(!backup.exported_at.is_empty());
    assert_eq!(backup.data.portfolio_series.len(), 2);
    assert_eq!(backup.data.portfolio_images.len(), 2);
    assert_eq!(backup.data.site_content.len(), 1);
    assert_eq!(backup.data.site_settings.len(), 1);
}

#[tokio::test]
async fn import_into_a_fresh_database_is_an_exact_restoration() {
    let (db, clock) = seeded().await;
    let backup = export_snapshot(&db, &clock).await.unwrap();

    // The wire format round-trips through JSON on its way back in.
    let wire = serde_json::to_value(&backup).unwrap();
    let parsed = Backup::parse(wire).unwrap();

    let fresh = common::memory_db().await;
    let outcome = import_snapshot(&fresh, parsed).await.unwrap();
    assert!(outcome.errors.is_empty(), "errors: {:?}", outcome.errors);
    assert_eq!(outcome.imported.series, 2);
    assert_eq!(outcome.imported.images, 2);
    assert_eq!(outcome.imported.content, 1);
    assert_eq!(outcome.imported.settings, 1);

    let original = export_snapshot(&db, &clock).await.unwrap();
    let restored = export_snapshot(&fresh, &clock).await.unwrap();
    assert_eq!(
        serde_json::to_value(&original.data).unwrap(),
        serde_json::to_value(&restored.data).unwrap(),
    );
}

#[tokio::test]
async fn import_replaces_whatever_was_there_before() {
    let (db, clock) = seeded().await;
    let backup = export_snapshot(&db, &clock).await.unwrap();

    let other = common::memory_db().await;
    let store = ContentStore::new(
        other.clone(),
        Arc::new(MemoryBlobStore::default()),
        clock.clone(),
    );
    store
        .create_series(NewSeries {
            title: "Doomed".into(),
            ..Default::default()
        })
        .await
        .unwrap();

    import_snapshot(&other, backup).await.unwrap();

    let titles: Vec<String> = darkroom::entity::series::Entity::find()
        .all(&other)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.title)
        .collect();
    assert!(!titles.contains(&"Doomed".to_string()));
    assert_eq!(titles.len(), 2);
}

#[tokio::test]
async fn empty_bundle_wipes_the_collections() {
    let (db, _) = seeded().await;

    let parsed = Backup::parse(serde_json::json!({
        "version": "1.0",
        "data": {}
    }))
    .unwrap();
    let outcome = import_snapshot(&db, parsed).await.unwrap();
    assert!(outcome.errors.is_empty());

    assert!(darkroom::entity::series::Entity::find()
        .all(&db)
        .await
        .unwrap()
        .is_empty());
    assert!(darkroom::entity::image::Entity::find()
        .all(&db)
        .await
        .unwrap()
        .is_empty());
}
