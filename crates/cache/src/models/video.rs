/// Storage-layer representation of one video in the cached playlist.
///
/// Rows are unique by `id`. Writing a record whose `id` is already stored
/// overwrites that row in place; rows with other ids are left alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, sqlx::FromRow)]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub thumbnail_url: String,
}

/// Outcome of [`VideoStore::sync_all`](crate::VideoStore::sync_all).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Rows inserted or overwritten.
    pub upserted: u64,
    /// Rows deleted because their id was missing from the new set.
    pub pruned: u64,
}
