//! Binary Error Types
//!
//! Each variant names the stage of a command that failed; the wrapped error
//! tree from the library crates carries the detail.

use derive_more::{Display, Error};

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("could not load configuration")]
    Config,
    #[display("could not open the video cache")]
    Database,
    #[display("could not set up the playlist source")]
    Network,
    #[display("video repository operation failed")]
    Repository,
    #[display("could not write output")]
    Output,
}
