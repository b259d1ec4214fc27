//! Errors reported while counting frequencies and building codes.

use thiserror::Error;

/// Result type used by the fallible operations of this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error that prevents a code table from being built.
#[derive(Debug, Error)]
pub enum Error {
    /// The input stream could not be opened or read.
    /// No (partial) frequencies are returned in this case.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No symbol has a non-zero frequency, so there is no tree to build.
    #[error("empty input: no byte occurs in the stream")]
    EmptyInput,
}
