//! Remote source of the DevBytes playlist.
//!
//! The rest of the application only ever sees the [`PlaylistSource`] trait,
//! usually behind a [`SourceHandle`]. [`HttpPlaylistSource`] talks to the real
//! endpoint; the `mock` feature adds [`MockSource`] for other crates' tests.

pub mod error;
mod models;
mod source;

pub use crate::models::{NetworkVideo, parse_playlist};
#[cfg(any(test, feature = "mock"))]
pub use crate::source::MockSource;
pub use crate::source::{HttpPlaylistSource, PlaylistSource};
use std::sync::Arc;

pub type SourceHandle = Arc<dyn PlaylistSource + Send + Sync>;
