// Where static assets come from: the web server the map is served by, or a
// local directory when running the terminal front end.

use crate::error::{AssetError, Result};
use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::time::Duration;

#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Fetch the raw bytes of the asset at `path` (e.g. `/sample_prompts.json`)
    async fn fetch(&self, path: &str) -> Result<Vec<u8>>;
}

/// Fetch and decode a JSON asset.
pub async fn load_json<T: DeserializeOwned>(source: &dyn AssetSource, path: &str) -> Result<T> {
    let bytes = source.fetch(path).await?;
    serde_json::from_slice(&bytes).map_err(|source| AssetError::Parse {
        path: path.to_string(),
        source,
    })
}

/// Same-origin HTTP asset source.
pub struct HttpAssetSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAssetSource {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl AssetSource for HttpAssetSource {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssetError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Assets read from a directory on disk (the web app's `public/` folder).
pub struct DirAssetSource {
    root: PathBuf,
}

impl DirAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl AssetSource for DirAssetSource {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.root.join(path.trim_start_matches('/'));
        match tokio::fs::read(&full).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AssetError::NotFound(full.display().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
