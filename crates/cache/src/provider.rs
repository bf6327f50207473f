//! Lazily opened, shared database handle.

use crate::Database;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tokio::sync::OnceCell;

/// Fixed storage name of the cache; the database file is `videos.db`.
pub const STORAGE_NAME: &str = "videos";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Location {
    File(PathBuf),
    InMemory,
}

/// Hands out the one [`Database`] handle for the application.
///
/// The first call to [`get`](Self::get) opens the database (creating it and
/// running migrations if needed). Every later call, including calls racing
/// the first one from other tasks or threads, waits for that construction
/// and receives a clone of the same handle. Construction happens at most
/// once per provider.
///
/// A failed construction is returned to the caller that triggered it and
/// leaves the provider empty; nothing is retried internally.
///
/// Create one provider at startup and pass it (or the handle it yields) to
/// whatever needs the cache.
#[derive(Debug)]
pub struct DatabaseProvider {
    location: Location,
    handle: OnceCell<Database>,
}
impl DatabaseProvider {
    /// Provider for `<data_dir>/videos.db`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let path = data_dir.as_ref().join(format!("{STORAGE_NAME}.db"));
        Self { location: Location::File(path), handle: OnceCell::new() }
    }

    /// Provider for a private in-memory database (useful for testing).
    pub fn in_memory() -> Self {
        Self { location: Location::InMemory, handle: OnceCell::new() }
    }

    /// Path of the database file, or `None` for in-memory providers.
    pub fn path(&self) -> Option<&Path> {
        match &self.location {
            Location::File(path) => Some(path),
            Location::InMemory => None,
        }
    }

    /// Get the shared handle, opening the database on first use.
    pub async fn get(&self) -> Result<Database> {
        self.handle.get_or_try_init(|| self.open()).await.cloned()
    }

    /// Returns `true` once a handle has been successfully constructed.
    pub fn is_open(&self) -> bool {
        self.handle.initialized()
    }

    async fn open(&self) -> Result<Database> {
        match &self.location {
            Location::File(path) => {
                tracing::info!(path = %path.display(), "opening video cache");
                Database::connect(path).await
            },
            Location::InMemory => {
                tracing::info!("opening in-memory video cache");
                Database::connect_in_memory().await
            },
        }
    }
}
