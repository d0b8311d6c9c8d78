//! Blob storage interface.
//!
//! The hosted blob service is an external collaborator: the backend only
//! needs upload-by-bytes returning a public URL and delete-by-URL. Callers
//! treat delete failures as non-fatal so orphaned blob objects never block a
//! database-level cleanup.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::BlobConfig;

/// Failures talking to the blob service.
#[derive(Debug, Error)]
pub enum BlobError {
    #[error("blob request failed: {0}")]
    Request(String),

    #[error("blob service returned {status}: {body}")]
    Service { status: u16, body: String },
}

impl From<reqwest::Error> for BlobError {
    fn from(e: reqwest::Error) -> Self {
        BlobError::Request(e.to_string())
    }
}

/// Seam for the hosted blob service.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload `bytes` under `pathname`, returning the public URL.
    async fn upload(
        &self,
        pathname: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, BlobError>;

    /// Delete the object behind a public URL.
    ///
    /// Deleting an already-deleted or never-existing object is not an error.
    async fn delete(&self, url: &str) -> Result<(), BlobError>;
}

#[derive(serde::Deserialize)]
struct UploadResponse {
    url: String,
}

/// Bearer-token client for a hosted blob API.
pub struct HttpBlobStore {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpBlobStore {
    pub fn new(config: BlobConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token,
        }
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn upload(
        &self,
        pathname: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, BlobError> {
        let resp = self
            .client
            .put(format!("{}/{}", self.base_url, pathname.trim_start_matches('/')))
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BlobError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: UploadResponse = resp.json().await?;
        Ok(parsed.url)
    }

    async fn delete(&self, url: &str) -> Result<(), BlobError> {
        let resp = self
            .client
            .post(format!("{}/delete", self.base_url))
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "urls": [url] }))
            .send()
            .await?;

        let status = resp.status();
        // A missing object is already the state we want.
        if status.is_success() || status == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }

        let body = resp.text().await.unwrap_or_default();
        Err(BlobError::Service {
            status: status.as_u16(),
            body,
        })
    }
}

/// Stand-in used when no blob service is configured.
///
/// Uploads are rejected; deletes succeed silently so cascade deletes still
/// run against the relational store.
pub struct NoopBlobStore;

#[async_trait]
impl BlobStore for NoopBlobStore {
    async fn upload(
        &self,
        _pathname: &str,
        _content_type: &str,
        _bytes: Vec<u8>,
    ) -> Result<String, BlobError> {
        Err(BlobError::Request("no blob service configured".into()))
    }

    async fn delete(&self, _url: &str) -> Result<(), BlobError> {
        Ok(())
    }
}
