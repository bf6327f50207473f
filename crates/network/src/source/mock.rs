//! In-memory playlist source for testing.

use super::PlaylistSource;
use crate::error::{ErrorKind, Result};
use crate::models::NetworkVideo;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
enum Response {
    Playlist(Vec<NetworkVideo>),
    Failure(ErrorKind),
}

/// In-memory playlist source for testing.
///
/// Serves whatever playlist it was last given, or fails with a chosen error,
/// and counts how many times it has been asked.
#[derive(Debug)]
pub struct MockSource {
    response: RwLock<Response>,
    calls: AtomicUsize,
}

impl MockSource {
    /// Create a source serving `videos`.
    pub fn new(videos: Vec<NetworkVideo>) -> Self {
        Self { response: RwLock::new(Response::Playlist(videos)), calls: AtomicUsize::new(0) }
    }

    /// Create a source serving one video per `(title, url)` pair.
    pub fn with_videos(videos: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self::new(videos.into_iter().map(|(title, url)| Self::video(title, url)).collect())
    }

    /// Create a source that fails every fetch with `kind`.
    pub fn failing(kind: ErrorKind) -> Self {
        Self { response: RwLock::new(Response::Failure(kind)), calls: AtomicUsize::new(0) }
    }

    /// Build a wire video with a derived id and placeholder description/thumbnail.
    pub fn video(title: impl Into<String>, url: impl Into<String>) -> NetworkVideo {
        let title = title.into();
        let url = url.into();
        NetworkVideo {
            id: None,
            description: format!("{title}, explained."),
            thumbnail_url: format!("{url}/thumbnail.jpg"),
            title,
            url,
        }
    }

    /// Serve `videos` from now on.
    pub async fn set_videos(&self, videos: Vec<NetworkVideo>) {
        *self.response.write().await = Response::Playlist(videos);
    }

    /// Fail with `kind` from now on.
    pub async fn fail_with(&self, kind: ErrorKind) {
        *self.response.write().await = Response::Failure(kind);
    }

    /// Number of times [`get_playlist`](PlaylistSource::get_playlist) was called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlaylistSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn get_playlist(&self) -> Result<Vec<NetworkVideo>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &*self.response.read().await {
            Response::Playlist(videos) => Ok(videos.clone()),
            Response::Failure(kind) => exn::bail!(kind.clone()),
        }
    }
}
