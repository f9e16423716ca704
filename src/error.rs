//! Error types for the word tracker.
//!
//! This module provides [TrackerError], shared by the tree, the indexer,
//! report rendering and snapshot persistence.

use std::path::{Path, PathBuf};
use thiserror::Error;

// =#========================================================================#=
// TRACKER ERROR
// =#========================================================================#=
/// Errors that can occur while indexing, persisting or reporting.
///
/// "Not found" is never an error: lookups return `Option`, and removing
/// from an empty tree returns `None`.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Caller passed an unusable value, e.g. an empty word or unknown report kind
    #[error("Invalid argument - {0}")]
    InvalidArgument(String),

    /// Reading or writing a file failed
    #[error("IO error on {} - {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot could not be encoded or decoded, or decoded into an invalid tree
    #[error("Invalid snapshot - {0}")]
    Snapshot(String),
}

impl TrackerError {
    /// Convenience constructor for Io, attaching the path
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        TrackerError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns `true` for [TrackerError::InvalidArgument].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, TrackerError::InvalidArgument(_))
    }
}

impl From<bincode::Error> for TrackerError {
    fn from(err: bincode::Error) -> Self {
        TrackerError::Snapshot(err.to_string())
    }
}

/// Result type alias for word tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;
