//! HTTP playlist source.

use super::PlaylistSource;
use crate::error::{ErrorKind, Result};
use crate::models::{NetworkVideo, parse_playlist};
use async_trait::async_trait;
use exn::ResultExt;
use reqwest::{Client, Url};
use std::time::Duration;

/// Fetches the playlist from a JSON endpoint over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpPlaylistSource {
    client: Client,
    url: Url,
}
impl HttpPlaylistSource {
    /// Create a source for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidUrl`] if `url` is not an absolute http(s)
    /// URL, or [`ErrorKind::Client`] if the HTTP client cannot be built.
    pub fn new(url: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        let raw = url.as_ref();
        let url = Url::parse(raw).or_raise(|| ErrorKind::InvalidUrl(raw.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            exn::bail!(ErrorKind::InvalidUrl(raw.to_string()));
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .or_raise(|| ErrorKind::Client)?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl PlaylistSource for HttpPlaylistSource {
    fn name(&self) -> &str {
        self.url.as_str()
    }

    async fn get_playlist(&self) -> Result<Vec<NetworkVideo>> {
        tracing::debug!(url = %self.url, "fetching playlist");
        let response = self.client.get(self.url.clone()).send().await.or_raise(|| ErrorKind::Network)?;
        let status = response.status();
        if !status.is_success() {
            exn::bail!(ErrorKind::UnexpectedStatus(status.as_u16()));
        }
        let body = response.bytes().await.or_raise(|| ErrorKind::Network)?;
        let videos = parse_playlist(&body)?;
        tracing::debug!(url = %self.url, videos = videos.len(), bytes = body.len(), "fetched playlist");
        Ok(videos)
    }
}
