//! Crate error type.
//!
//! Only startup and I/O concerns surface as errors. Dropped events (unknown devices,
//! below-threshold movement) are ordinary outcomes of the router and never produce
//! an [`Error`].

use thiserror::Error;

/// Errors returned by configuration loading and event sources.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or unreadable configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The event source could not be opened or dispatched.
    #[error("event source error: {0}")]
    Source(String),

    /// A replay script line could not be parsed.
    #[error("replay script line {line}: {message}")]
    Replay { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
