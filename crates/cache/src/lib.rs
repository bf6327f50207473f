//! SQLite cache database for the DevBytes video playlist.
//!
//! This crate provides the local, persistent copy of the playlist. It is not
//! the source of truth - the remote playlist is. Its job is to make the last
//! successfully fetched playlist available offline and to tell interested
//! readers whenever it changes.
//!
//! # Architecture
//! - [`DatabaseProvider`]: lazily opens the one [`Database`] handle for the
//!   process, at most once even under concurrent first access.
//! - [`Database`]: the connection pool plus a change notifier.
//! - [`VideoStore`]: reads (snapshots and live views) and replace-on-conflict
//!   batch writes over the `videos` table.

mod db;
pub mod error;
mod models;
mod provider;
mod store;

pub use crate::db::Database;
pub use crate::models::{SyncSummary, VideoRecord};
pub use crate::provider::{DatabaseProvider, STORAGE_NAME};
pub use crate::store::VideoStore;
