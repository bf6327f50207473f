//! Video table access: snapshots, live views and batched upserts.

use crate::Database;
use crate::error::{ErrorKind, Result};
use crate::models::{SyncSummary, VideoRecord};
use async_stream::stream;
use exn::ResultExt;
use futures::Stream;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

/// Store for the cached video playlist.
///
/// Reads come in two flavours: one-off snapshots ([`get_all`](Self::get_all))
/// and live views ([`watch_all`](Self::watch_all)) that push a new snapshot
/// every time a write through *any* store sharing the same [`Database`] is
/// committed.
///
/// Writes are replace-on-conflict: a record whose id is already stored
/// overwrites that row in place, every other row is left untouched. Each
/// batch runs inside a single transaction, so a failed or cancelled write
/// never leaves half a playlist behind.
#[derive(Debug, Clone)]
pub struct VideoStore {
    db: Database,
}
impl From<&Database> for VideoStore {
    fn from(db: &Database) -> Self {
        Self { db: db.clone() }
    }
}
impl VideoStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    // =========================================================================
    // Read
    // =========================================================================

    /// Fetch every cached video, in the order it was first stored.
    pub async fn get_all(&self) -> Result<Vec<VideoRecord>> {
        sqlx::query_as(include_str!("../queries/list_videos.sql"))
            .fetch_all(self.db.pool())
            .await
            .or_raise(|| ErrorKind::Database)
    }

    /// Fetch a single video by id.
    pub async fn get(&self, id: impl AsRef<str>) -> Result<Option<VideoRecord>> {
        sqlx::query_as(include_str!("../queries/get_video.sql"))
            .bind(id.as_ref())
            .fetch_optional(self.db.pool())
            .await
            .or_raise(|| ErrorKind::Database)
    }

    /// Count the cached videos.
    pub async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(include_str!("../queries/count_videos.sql"))
            .fetch_one(self.db.pool())
            .await
            .or_raise(|| ErrorKind::Database)?;
        u64::try_from(count).or_raise(|| ErrorKind::InvalidData("video count"))
    }

    /// Live view over the whole table.
    ///
    /// The current snapshot is yielded as soon as the stream is polled, then
    /// a fresh snapshot after every committed write. The stream never ends
    /// on its own; drop it to unsubscribe. A failed query is yielded as an
    /// `Err` item and the view keeps listening for the next write.
    pub fn watch_all(&self) -> impl Stream<Item = Result<Vec<VideoRecord>>> + Send + 'static {
        let store = self.clone();
        let mut changes = self.db.subscribe();
        stream! {
            loop {
                // Mark the generation as seen *before* querying, so a write
                // committed mid-query still wakes the next iteration.
                let _ = changes.borrow_and_update();
                yield store.get_all().await;
                if changes.changed().await.is_err() {
                    break;
                }
            }
        }
    }

    // =========================================================================
    // Write
    // =========================================================================

    /// Insert every record, overwriting rows whose id already exists.
    ///
    /// Rows whose id is absent from `records` are kept. Returns the number of
    /// rows inserted or overwritten. An empty batch touches nothing and does
    /// not wake live views.
    pub async fn replace_all(&self, records: &[VideoRecord]) -> Result<u64> {
        if records.is_empty() {
            return Ok(0);
        }
        let mut tx = self.db.pool().begin().await.or_raise(|| ErrorKind::Database)?;
        let upserted = Self::upsert_each(&mut *tx, records).await?;
        tx.commit().await.or_raise(|| ErrorKind::Database)?;
        self.db.notify_changed();
        tracing::debug!(upserted, "replaced cached videos");
        Ok(upserted)
    }

    /// Make the table hold exactly `records`.
    ///
    /// Same as [`replace_all`](Self::replace_all), but rows whose id is not
    /// in `records` are deleted inside the same transaction. An empty batch
    /// therefore empties the table.
    pub async fn sync_all(&self, records: &[VideoRecord]) -> Result<SyncSummary> {
        let mut tx = self.db.pool().begin().await.or_raise(|| ErrorKind::Database)?;
        let upserted = Self::upsert_each(&mut *tx, records).await?;
        let mut prune = QueryBuilder::<Sqlite>::new("DELETE FROM videos");
        if !records.is_empty() {
            prune.push(" WHERE id NOT IN (");
            let mut ids = prune.separated(", ");
            for record in records {
                ids.push_bind(record.id.as_str());
            }
            ids.push_unseparated(")");
        }
        let pruned = prune.build().execute(&mut *tx).await.or_raise(|| ErrorKind::Database)?.rows_affected();
        tx.commit().await.or_raise(|| ErrorKind::Database)?;
        let summary = SyncSummary { upserted, pruned };
        if upserted > 0 || pruned > 0 {
            self.db.notify_changed();
        }
        tracing::debug!(upserted, pruned, "synchronised cached videos");
        Ok(summary)
    }

    async fn upsert_each(conn: &mut SqliteConnection, records: &[VideoRecord]) -> Result<u64> {
        let mut affected = 0;
        for record in records {
            affected += sqlx::query(include_str!("../queries/upsert_video.sql"))
                .bind(&record.id)
                .bind(&record.title)
                .bind(&record.description)
                .bind(&record.url)
                .bind(&record.thumbnail_url)
                .execute(&mut *conn)
                .await
                .or_raise(|| ErrorKind::Database)?
                .rows_affected();
        }
        Ok(affected)
    }
}
