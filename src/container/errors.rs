//! Container-level error types.
//!
//! These are the host failures that abort a validation run outright: the
//! container cannot be opened, is not a well-formed snapshot, or an array
//! read fails mid-run. Absence of an individual node is never an error at
//! this level; lookups report it as `Ok(None)` so the validator can turn it
//! into a per-path finding instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::types::NodePath;

/// Errors raised by container implementations.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// The container file does not exist.
    #[error("container '{path}' does not exist")]
    NotFound {
        /// Filesystem path that was opened.
        path: PathBuf,
    },

    /// The container file exists but could not be read.
    #[error("failed to read container '{path}': {source}")]
    Io {
        /// Filesystem path that was opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The container file is not a well-formed snapshot.
    #[error("malformed container '{path}': {reason}")]
    Malformed {
        /// Filesystem path that was opened.
        path: PathBuf,
        /// Parser diagnostic.
        reason: String,
    },

    /// A dataset payload could not be materialized as an array.
    #[error("failed to read dataset values at '{path}': {reason}")]
    DataRead {
        /// Node path of the dataset inside the container.
        path: NodePath,
        /// What went wrong.
        reason: String,
    },
}

/// Result alias for container operations.
pub type ContainerResult<T> = Result<T, ContainerError>;
