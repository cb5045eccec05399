//! Caption payload download.

use crate::error::{Result, SkriftError};
use async_trait::async_trait;
use std::time::Duration;

/// Trait for fetching raw caption payloads by address.
#[async_trait]
pub trait CaptionFetcher: Send + Sync {
    /// Fetch the caption payload at the given address as text.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// HTTP caption fetcher.
pub struct HttpCaptionFetcher {
    client: reqwest::Client,
}

impl HttpCaptionFetcher {
    /// Create a fetcher with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl CaptionFetcher for HttpCaptionFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(SkriftError::VideoSource(format!(
                "Caption download failed with status {}",
                response.status()
            )));
        }

        Ok(response.text().await?)
    }
}
