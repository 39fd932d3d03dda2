//! Schema registry error types.
//!
//! These all surface at registry construction or schema-file load time,
//! before any container is touched. A registry that constructs successfully
//! upholds the structural invariants the validator relies on: unique paths,
//! parents declared first and as groups, dataset-only checks on datasets,
//! one unit attribute backing each quantity.

use thiserror::Error;

use crate::container::PathError;
use crate::units::UnitError;

/// Errors raised while building or loading a schema registry.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A node path string failed to parse.
    #[error(transparent)]
    InvalidPath(#[from] PathError),

    /// Two nodes declare the same path.
    #[error("duplicate schema path '{path}'")]
    DuplicatePath {
        /// The repeated path.
        path: String,
    },

    /// The root node must be declared before any other node.
    #[error("root node must be declared first")]
    RootNotFirst,

    /// A node's parent is not declared in the registry.
    #[error("node '{path}' has undeclared parent '{parent}'")]
    OrphanNode {
        /// The node with the missing parent.
        path: String,
        /// The undeclared parent path.
        parent: String,
    },

    /// A node's parent is declared but is not a group.
    #[error("node '{path}' has non-group parent '{parent}'")]
    ParentNotGroup {
        /// The node under a non-group parent.
        path: String,
        /// The offending parent path.
        parent: String,
    },

    /// Shape, dtype or quantity declared on a group node.
    #[error("group '{path}' declares dataset-only checks")]
    GroupWithDatasetChecks {
        /// The offending group path.
        path: String,
    },

    /// More than one unit attribute on a single node.
    #[error("node '{path}' declares more than one unit attribute")]
    MultipleUnitAttrs {
        /// The offending node path.
        path: String,
    },

    /// A quantity is declared without a unit attribute to reconcile.
    #[error("quantity '{name}' on '{path}' requires a unit attribute")]
    QuantityWithoutUnit {
        /// The quantity's logical name.
        name: String,
        /// The dataset path declaring it.
        path: String,
    },

    /// Two nodes declare the same logical quantity name.
    #[error("duplicate quantity name '{name}'")]
    DuplicateQuantity {
        /// The repeated logical name.
        name: String,
    },

    /// An expected-unit string in the schema failed to parse.
    #[error(transparent)]
    InvalidUnit(#[from] UnitError),

    /// A schema file could not be read.
    #[error("failed to read schema file '{path}': {reason}")]
    FileRead {
        /// Filesystem path of the schema file.
        path: String,
        /// Underlying diagnostic.
        reason: String,
    },

    /// A schema file is not valid JSON for a registry.
    #[error("malformed schema file '{path}': {reason}")]
    Malformed {
        /// Filesystem path of the schema file.
        path: String,
        /// Parser diagnostic.
        reason: String,
    },
}

/// Result alias for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;
