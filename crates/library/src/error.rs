//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies the origin of a repository failure.
///
/// The underlying [`devbyte_network`] or [`devbyte_cache`] error is kept as a
/// child in the error tree.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Fetching or decoding the remote playlist failed; the cache is untouched.
    #[display("failed to fetch playlist")]
    Source,
    /// Reading from or writing to the local cache failed.
    #[display("video cache error")]
    Cache,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // No retry policy lives at this layer; the caller decides by looking
        // at the child error if it cares.
        false
    }
}
