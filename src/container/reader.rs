//! Read-side capability contract for hierarchical containers.
//!
//! The validation engine never touches container storage directly; it talks
//! to this trait. Implementations resolve paths to node kinds, look up
//! attributes, enumerate group children and read dataset payloads. Absence
//! of a node is signalled distinctly (`Ok(None)`) from I/O failure (`Err`),
//! which keeps "not there" a per-path diagnostic and reserves `Err` for
//! host-level faults.

use ndarray::ArrayD;

use super::errors::ContainerResult;
use super::types::{AttrValue, DatasetMeta, NodeKind, NodePath};

/// Read-only access to a hierarchical container.
pub trait Container {
    /// Resolves a path to the kind of node stored there, if any.
    fn node_kind(&self, path: &NodePath) -> ContainerResult<Option<NodeKind>>;

    /// Looks up an attribute on the node at `path`.
    ///
    /// Returns `Ok(None)` when the node exists but carries no such
    /// attribute, or when the node itself is absent.
    fn attr(&self, path: &NodePath, name: &str) -> ContainerResult<Option<AttrValue>>;

    /// Names of the children of the group at `path`, in lexical order.
    ///
    /// Returns an empty list for datasets and absent nodes.
    fn child_names(&self, path: &NodePath) -> ContainerResult<Vec<String>>;

    /// Shape and dtype of the dataset at `path`.
    ///
    /// Returns `Ok(None)` when the path is absent or resolves to a group.
    fn dataset_meta(&self, path: &NodePath) -> ContainerResult<Option<DatasetMeta>>;

    /// Reads the full numeric payload of the dataset at `path`.
    fn read_values(&self, path: &NodePath) -> ContainerResult<ArrayD<f64>>;
}
