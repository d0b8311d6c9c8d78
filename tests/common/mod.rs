//! Shared fixtures: an in-memory database with the schema applied, and a
//! recording blob store with injectable delete failures.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use darkroom::blob::{BlobError, BlobStore};
use darkroom::migration::Migrator;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

pub async fn memory_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite should connect");
    Migrator::up(&db, None)
        .await
        .expect("migrations should apply");
    db
}

/// Blob store that records every call instead of talking to a service.
#[derive(Default)]
pub struct MemoryBlobStore {
    pub uploads: Mutex<Vec<String>>,
    pub deletes: Mutex<Vec<String>>,
    fail_deletes: AtomicBool,
}

impl MemoryBlobStore {
    /// Make every subsequent delete fail.
    pub fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }

    pub fn deleted_urls(&self) -> Vec<String> {
        self.deletes.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(
        &self,
        pathname: &str,
        _content_type: &str,
        _bytes: Vec<u8>,
    ) -> Result<String, BlobError> {
        let url = format!("https://blobs.test/{pathname}");
        self.uploads.lock().expect("lock poisoned").push(url.clone());
        Ok(url)
    }

    async fn delete(&self, url: &str) -> Result<(), BlobError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(BlobError::Service {
                status: 500,
                body: "injected failure".into(),
            });
        }
        self.deletes
            .lock()
            .expect("lock poisoned")
            .push(url.to_string());
        Ok(())
    }
}
