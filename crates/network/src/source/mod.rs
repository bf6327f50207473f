//! Playlist source trait and implementations.

mod http;
#[cfg(any(test, feature = "mock"))]
mod mock;

pub use self::http::HttpPlaylistSource;
#[cfg(any(test, feature = "mock"))]
pub use self::mock::MockSource;
use crate::error::Result;
use crate::models::NetworkVideo;
use async_trait::async_trait;

/// Somewhere the current playlist can be fetched from.
///
/// Implementations return the *whole* playlist on every call; there is no
/// paging or incremental sync. Failures (transport, status, decoding) are
/// returned as errors and never retried here, retry policy belongs to the
/// caller.
///
/// # Examples
///
/// ```no_run
/// use devbyte_network::{PlaylistSource, HttpPlaylistSource, error::Result};
/// use std::time::Duration;
///
/// # async fn example() -> Result<()> {
/// let source = HttpPlaylistSource::new(
///     "https://android-kotlin-fun-mars-server.appspot.com/devbytes",
///     Duration::from_secs(30),
/// )?;
/// for video in source.get_playlist().await? {
///     println!("{}: {}", video.title, video.url);
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    /// Human-readable name of the source (used for logging only).
    fn name(&self) -> &str;

    /// Fetch the current playlist.
    async fn get_playlist(&self) -> Result<Vec<NetworkVideo>>;
}
