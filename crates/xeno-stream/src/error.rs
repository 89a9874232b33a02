//! Map-stream error type.

use thiserror::Error;

/// Errors produced by `xeno-stream`.  Only real I/O can fail; malformed map
/// lines are skipped with a warning instead.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("unable to read the map: {0}")]
    Read(#[source] std::io::Error),

    #[error("unable to write the map: {0}")]
    Write(#[source] std::io::Error),
}

pub type StreamResult<T> = Result<T, StreamError>;
