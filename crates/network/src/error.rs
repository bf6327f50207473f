//! Network Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A playlist source error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for playlist source operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The HTTP client could not be built (TLS backend, bad settings).
    #[display("failed to build HTTP client")]
    Client,
    /// The configured playlist URL is not a valid absolute URL.
    #[display("invalid playlist URL: {_0}")]
    InvalidUrl(#[error(not(source))] String),
    /// Connection, timeout or transfer failure.
    #[display("network error")]
    Network,
    /// The server answered, but not with a success status.
    #[display("unexpected HTTP status: {_0}")]
    UnexpectedStatus(#[error(not(source))] u16),
    /// The response body is not a playlist.
    #[display("malformed playlist payload")]
    Decode,
    /// The source is deliberately offline (test doubles).
    #[display("playlist source unavailable")]
    Unavailable,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network | Self::Unavailable => true,
            Self::UnexpectedStatus(status) => *status >= 500 || *status == 429,
            Self::Client | Self::InvalidUrl(_) | Self::Decode => false,
        }
    }
}
