//! Sources of raw feed text
//!
//! The network fetch is the only asynchronous boundary of the pipeline. A
//! failed fetch is terminal for that load attempt: there is no retry and no
//! timeout beyond what the transport imposes.

use crate::{Error, Result};
use std::future::Future;
use std::path::PathBuf;
use tracing::{debug, info};

/// Something that can produce the full text of the discharge feed
pub trait FeedSource {
    /// Retrieve the complete feed text
    fn fetch_text(&self) -> impl Future<Output = Result<String>> + Send;

    /// Human-readable description for logs and error messages
    fn describe(&self) -> String;
}

/// Feed fetched over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    client: reqwest::Client,
    url: String,
}

impl HttpFeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Use a preconfigured client (proxies, custom TLS roots)
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl FeedSource for HttpFeedSource {
    async fn fetch_text(&self) -> Result<String> {
        info!("Fetching discharge feed from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::feed_fetch(&self.url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::feed_status(&self.url, status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::feed_fetch(&self.url, e))?;

        debug!("Fetched {} bytes from {}", text.len(), self.url);
        Ok(text)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Feed read from a local snapshot file
#[derive(Debug, Clone)]
pub struct FileFeedSource {
    path: PathBuf,
}

impl FileFeedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FeedSource for FileFeedSource {
    async fn fetch_text(&self) -> Result<String> {
        info!("Reading discharge feed from {}", self.path.display());
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::io(format!("Failed to read feed file {}", self.path.display()), e)
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
