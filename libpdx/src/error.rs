//! Error types for file and directory parsing.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for file and directory parsing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the filesystem boundary.
///
/// Parsing itself never fails: malformed script degrades to strings
/// and truncated trees. Errors arise only while locating and reading
/// files.
#[derive(Error, Debug)]
pub enum Error {
    /// The file could not be read, or was not valid UTF-8.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: io::Error,
    },

    /// The directory glob pattern was malformed.
    #[error("invalid glob pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
}
