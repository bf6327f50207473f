//! Offline-first repository over the cached DevBytes playlist.
//!
//! Ties the [cache](devbyte_cache) and the [playlist source](devbyte_network)
//! together: [`VideosRepository::refresh`] pulls the playlist into the cache,
//! [`VideosRepository::observe_videos`] pushes the cached list, as
//! [`DomainVideo`]s, to whoever is listening.

pub mod error;
mod models;
mod repository;

pub use crate::models::{DomainVideo, SHORT_DESCRIPTION_LENGTH, smart_truncate};
pub use crate::repository::{RefreshSummary, VideosRepository};
