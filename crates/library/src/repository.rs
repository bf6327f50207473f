//! Offline-first access to the video playlist.

use crate::error::{ErrorKind, Result};
use crate::models::DomainVideo;
use devbyte_cache::{Database, SyncSummary, VideoRecord, VideoStore};
use devbyte_network::SourceHandle;
use exn::ResultExt;
use futures::{Stream, StreamExt};
use tracing::instrument;

/// What a successful [`VideosRepository::refresh`] did to the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    /// Videos returned by the playlist source.
    pub fetched: usize,
    /// Rows inserted or overwritten.
    pub written: u64,
    /// Stale rows deleted (always zero unless pruning is enabled).
    pub pruned: u64,
}

/// Keeps the local video cache in step with the remote playlist.
///
/// Readers never talk to the network: they observe the cache through
/// [`observe_videos`](Self::observe_videos), which pushes a new list every
/// time the cache changes. [`refresh`](Self::refresh) is the only way data
/// gets into the cache.
///
/// Overlapping refreshes are not serialised here. Each one writes inside its
/// own transaction, SQLite orders the writers, and the last write wins per
/// row.
#[derive(Clone)]
pub struct VideosRepository {
    store: VideoStore,
    source: SourceHandle,
    prune_stale: bool,
}
impl VideosRepository {
    pub fn new(db: &Database, source: SourceHandle) -> Self {
        Self { store: VideoStore::from(db), source, prune_stale: false }
    }

    /// Delete cached videos that the latest playlist no longer contains.
    ///
    /// Off by default: a refresh only inserts and overwrites. An empty
    /// playlist never deletes anything.
    pub fn with_prune_stale(mut self, prune_stale: bool) -> Self {
        self.prune_stale = prune_stale;
        self
    }

    /// Live list of cached videos.
    ///
    /// Yields the current list straight away, then the new list after every
    /// change to the cache, for as long as the stream is held.
    pub fn observe_videos(&self) -> impl Stream<Item = Result<Vec<DomainVideo>>> + Send + 'static {
        self.store.watch_all().map(|snapshot| {
            snapshot
                .map(|records| records.into_iter().map(DomainVideo::from).collect())
                .or_raise(|| ErrorKind::Cache)
        })
    }

    /// Current list of cached videos.
    pub async fn videos(&self) -> Result<Vec<DomainVideo>> {
        let records = self.store.get_all().await.or_raise(|| ErrorKind::Cache)?;
        Ok(records.into_iter().map(DomainVideo::from).collect())
    }

    /// Fetch the playlist once and write it into the cache.
    ///
    /// If the fetch fails nothing is written and the previously cached list
    /// stays observable. If the write fails its transaction is rolled back.
    /// Either way the error is returned; nothing is retried.
    #[instrument(skip(self), fields(source = self.source.name()))]
    pub async fn refresh(&self) -> Result<RefreshSummary> {
        tracing::debug!("refreshing cached videos");
        let playlist = self.source.get_playlist().await.or_raise(|| ErrorKind::Source)?;
        let fetched = playlist.len();
        let records: Vec<VideoRecord> = playlist.into_iter().map(VideoRecord::from).collect();
        // An empty playlist never prunes: that would wipe the offline copy.
        let summary = if self.prune_stale && !records.is_empty() {
            let SyncSummary { upserted, pruned } = self.store.sync_all(&records).await.or_raise(|| ErrorKind::Cache)?;
            RefreshSummary { fetched, written: upserted, pruned }
        } else {
            let written = self.store.replace_all(&records).await.or_raise(|| ErrorKind::Cache)?;
            RefreshSummary { fetched, written, pruned: 0 }
        };
        tracing::info!(fetched, written = summary.written, pruned = summary.pruned, "refreshed cached videos");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devbyte_network::MockSource;
    use devbyte_network::error::ErrorKind as NetworkErrorKind;
    use std::pin::pin;
    use std::sync::Arc;
    use std::time::Duration;

    const WAIT: Duration = Duration::from_secs(5);

    async fn setup(videos: &[(&str, &str)]) -> (VideosRepository, Arc<MockSource>) {
        let db = Database::connect_in_memory().await.unwrap();
        let source = Arc::new(MockSource::with_videos(videos.iter().copied()));
        (VideosRepository::new(&db, source.clone()), source)
    }

    fn titles(videos: &[DomainVideo]) -> Vec<&str> {
        videos.iter().map(|v| v.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_refresh_fills_cache() {
        let (repo, source) =
            setup(&[("Room", "https://example.com/room"), ("WorkManager", "https://example.com/work")]).await;
        let summary = repo.refresh().await.unwrap();
        assert_eq!(summary, RefreshSummary { fetched: 2, written: 2, pruned: 0 });
        assert_eq!(source.calls(), 1);

        let videos = repo.videos().await.unwrap();
        assert_eq!(titles(&videos), vec!["Room", "WorkManager"]);
        // Field-for-field copy of what the source served.
        let served = MockSource::video("Room", "https://example.com/room");
        assert_eq!(videos[0].url, served.url);
        assert_eq!(videos[0].description, served.description);
        assert_eq!(videos[0].thumbnail_url, served.thumbnail_url);
        assert_eq!(videos[0].id, served.record_id());
    }

    #[tokio::test]
    async fn test_observe_after_refresh() {
        let (repo, _source) =
            setup(&[("Room", "https://example.com/room"), ("WorkManager", "https://example.com/work")]).await;
        repo.refresh().await.unwrap();
        let mut view = pin!(repo.observe_videos());
        let videos = view.next().await.unwrap().unwrap();
        assert_eq!(titles(&videos), vec!["Room", "WorkManager"]);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_cache() {
        let (repo, source) = setup(&[("Room", "https://example.com/room")]).await;
        repo.refresh().await.unwrap();
        let before = repo.videos().await.unwrap();

        source.fail_with(NetworkErrorKind::Network).await;
        let err = repo.refresh().await.unwrap_err();
        assert_eq!(*err, ErrorKind::Source);
        assert_eq!(source.calls(), 2);
        assert_eq!(repo.videos().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_failed_first_refresh_leaves_cache_empty() {
        let db = Database::connect_in_memory().await.unwrap();
        let source = Arc::new(MockSource::failing(NetworkErrorKind::Decode));
        let repo = VideosRepository::new(&db, source.clone());
        assert!(repo.refresh().await.is_err());
        assert!(repo.videos().await.unwrap().is_empty());
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_observer_receives_refresh_without_resubscribing() {
        let (repo, source) = setup(&[("Room", "https://example.com/room")]).await;
        let mut view = pin!(repo.observe_videos());
        assert!(view.next().await.unwrap().unwrap().is_empty());

        repo.refresh().await.unwrap();
        let videos = tokio::time::timeout(WAIT, view.next()).await.unwrap().unwrap().unwrap();
        assert_eq!(titles(&videos), vec!["Room"]);

        source.set_videos(vec![MockSource::video("Paging", "https://example.com/paging")]).await;
        repo.refresh().await.unwrap();
        let videos = tokio::time::timeout(WAIT, view.next()).await.unwrap().unwrap().unwrap();
        assert_eq!(titles(&videos), vec!["Room", "Paging"]);
    }

    #[tokio::test]
    async fn test_refresh_keeps_videos_missing_from_playlist() {
        let (repo, source) =
            setup(&[("Room", "https://example.com/room"), ("Slices", "https://example.com/slices")]).await;
        repo.refresh().await.unwrap();
        let mut renamed = MockSource::video("Room, revisited", "https://example.com/room");
        renamed.description = "Now with coroutines.".to_string();
        source.set_videos(vec![renamed, MockSource::video("Paging", "https://example.com/paging")]).await;
        repo.refresh().await.unwrap();

        let videos = repo.videos().await.unwrap();
        assert_eq!(titles(&videos), vec!["Room, revisited", "Slices", "Paging"]);
        assert_eq!(videos[0].description, "Now with coroutines.");
    }

    #[tokio::test]
    async fn test_refresh_with_pruning_drops_stale_videos() {
        let (repo, source) =
            setup(&[("Room", "https://example.com/room"), ("Slices", "https://example.com/slices")]).await;
        let repo = repo.with_prune_stale(true);
        repo.refresh().await.unwrap();

        source.set_videos(vec![MockSource::video("Room", "https://example.com/room")]).await;
        let summary = repo.refresh().await.unwrap();
        assert_eq!(summary, RefreshSummary { fetched: 1, written: 1, pruned: 1 });
        assert_eq!(titles(&repo.videos().await.unwrap()), vec!["Room"]);
    }

    #[tokio::test]
    async fn test_empty_playlist_never_prunes() {
        let (repo, source) = setup(&[("Room", "https://example.com/room")]).await;
        let repo = repo.with_prune_stale(true);
        repo.refresh().await.unwrap();

        source.set_videos(Vec::new()).await;
        let summary = repo.refresh().await.unwrap();
        assert_eq!(summary, RefreshSummary::default());
        assert_eq!(titles(&repo.videos().await.unwrap()), vec!["Room"]);
    }

    #[tokio::test]
    async fn test_overlapping_refreshes_both_apply() {
        let (repo, source) = setup(&[("Room", "https://example.com/room")]).await;
        let other = repo.clone();
        let (first, second) = tokio::join!(repo.refresh(), other.refresh());
        first.unwrap();
        second.unwrap();
        assert_eq!(source.calls(), 2);
        assert_eq!(titles(&repo.videos().await.unwrap()), vec!["Room"]);
    }
}
