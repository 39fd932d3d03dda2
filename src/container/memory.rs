//! In-memory container tree.
//!
//! `MemoryContainer` is the concrete [`Container`] implementation shipped
//! with the crate. It holds the whole node tree in memory and deserializes
//! from a JSON snapshot file, so the validation engine can be exercised
//! end-to-end (and tested) without linking a binary container library.
//! Children are kept in a `BTreeMap`, which makes enumeration order lexical
//! and therefore reproducible across runs.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use ndarray::{ArrayD, IxDyn};
use serde::{Deserialize, Serialize};

use super::errors::{ContainerError, ContainerResult};
use super::reader::Container;
use super::types::{AttrValue, DatasetMeta, Dtype, NodeKind, NodePath};

/// A group node: attributes plus named children.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryGroup {
    /// Attributes attached to the group.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, AttrValue>,
    /// Child nodes keyed by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<String, MemoryNode>,
}

/// A dataset node: attributes, dtype, shape and a flat payload.
///
/// The payload is stored row-major; `values.len()` must equal the product
/// of `shape` (a scalar dataset has an empty shape and one value).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryDataset {
    /// Attributes attached to the dataset.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, AttrValue>,
    /// Declared element type.
    pub dtype: Dtype,
    /// Dimension lengths; empty for a scalar.
    pub shape: Vec<usize>,
    /// Row-major payload.
    pub values: Vec<f64>,
}

impl MemoryDataset {
    /// Creates a dataset with the given dtype, shape and payload.
    pub fn new(dtype: Dtype, shape: Vec<usize>, values: Vec<f64>) -> Self {
        Self {
            attrs: BTreeMap::new(),
            dtype,
            shape,
            values,
        }
    }

    /// Creates a scalar f64 dataset.
    pub fn scalar(value: f64) -> Self {
        Self::new(Dtype::F64, Vec::new(), vec![value])
    }

    /// Creates a one-dimensional f64 dataset.
    pub fn vector(values: Vec<f64>) -> Self {
        let len = values.len();
        Self::new(Dtype::F64, vec![len], values)
    }

    /// Attaches an attribute, consuming and returning the dataset.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }
}

/// Either node kind, as stored in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MemoryNode {
    /// Interior group node.
    Group(MemoryGroup),
    /// Leaf dataset node.
    Dataset(MemoryDataset),
}

impl MemoryNode {
    fn kind(&self) -> NodeKind {
        match self {
            MemoryNode::Group(_) => NodeKind::Group,
            MemoryNode::Dataset(_) => NodeKind::Dataset,
        }
    }

    fn attrs(&self) -> &BTreeMap<String, AttrValue> {
        match self {
            MemoryNode::Group(g) => &g.attrs,
            MemoryNode::Dataset(d) => &d.attrs,
        }
    }
}

/// A complete container tree held in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryContainer {
    /// The root group.
    pub root: MemoryGroup,
}

impl MemoryContainer {
    /// Creates an empty container (a root group with no children).
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a container from a JSON snapshot file.
    pub fn from_snapshot(path: &Path) -> ContainerResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ContainerError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ContainerError::Io {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        serde_json::from_str(&content).map_err(|e| ContainerError::Malformed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Resolves a path to a node, if present.
    fn node(&self, path: &NodePath) -> Option<NodeRef<'_>> {
        if path.is_root() {
            return Some(NodeRef::Root(&self.root));
        }
        let segments = path.segments();
        let mut group = &self.root;
        for segment in &segments[..segments.len() - 1] {
            match group.children.get(segment) {
                Some(MemoryNode::Group(g)) => group = g,
                _ => return None,
            }
        }
        group
            .children
            .get(segments[segments.len() - 1].as_str())
            .map(NodeRef::Node)
    }

    /// Creates the group at `path`, along with any missing ancestors.
    ///
    /// Fails if a dataset already occupies a segment of the path.
    pub fn ensure_group(&mut self, path: &NodePath) -> Result<&mut MemoryGroup, String> {
        let mut group = &mut self.root;
        for segment in path.segments() {
            let entry = group
                .children
                .entry(segment.clone())
                .or_insert_with(|| MemoryNode::Group(MemoryGroup::default()));
            match entry {
                MemoryNode::Group(g) => group = g,
                MemoryNode::Dataset(_) => {
                    return Err(format!(
                        "cannot create group under dataset segment '{}'",
                        segment
                    ));
                }
            }
        }
        Ok(group)
    }

    /// Inserts a dataset at `path`, creating parent groups as needed.
    pub fn insert_dataset(&mut self, path: &NodePath, dataset: MemoryDataset) -> Result<(), String> {
        let name = path
            .name()
            .ok_or_else(|| "cannot store a dataset at the root".to_string())?
            .to_string();
        let parent = path.parent().unwrap_or_else(NodePath::root);
        let group = self.ensure_group(&parent)?;
        group.children.insert(name, MemoryNode::Dataset(dataset));
        Ok(())
    }

    /// Sets an attribute on the node at `path`.
    pub fn set_attr(
        &mut self,
        path: &NodePath,
        name: impl Into<String>,
        value: impl Into<AttrValue>,
    ) -> Result<(), String> {
        let attrs = match self.node_mut(path) {
            Some(MemoryNodeMut::Root(g)) | Some(MemoryNodeMut::Group(g)) => &mut g.attrs,
            Some(MemoryNodeMut::Dataset(d)) => &mut d.attrs,
            None => return Err(format!("no node at '{}'", path)),
        };
        attrs.insert(name.into(), value.into());
        Ok(())
    }

    fn node_mut(&mut self, path: &NodePath) -> Option<MemoryNodeMut<'_>> {
        if path.is_root() {
            return Some(MemoryNodeMut::Root(&mut self.root));
        }
        let segments = path.segments();
        let mut group = &mut self.root;
        for segment in &segments[..segments.len() - 1] {
            match group.children.get_mut(segment) {
                Some(MemoryNode::Group(g)) => group = g,
                _ => return None,
            }
        }
        match group
            .children
            .get_mut(segments[segments.len() - 1].as_str())?
        {
            MemoryNode::Group(g) => Some(MemoryNodeMut::Group(g)),
            MemoryNode::Dataset(d) => Some(MemoryNodeMut::Dataset(d)),
        }
    }
}

enum NodeRef<'a> {
    Root(&'a MemoryGroup),
    Node(&'a MemoryNode),
}

enum MemoryNodeMut<'a> {
    Root(&'a mut MemoryGroup),
    Group(&'a mut MemoryGroup),
    Dataset(&'a mut MemoryDataset),
}

impl Container for MemoryContainer {
    fn node_kind(&self, path: &NodePath) -> ContainerResult<Option<NodeKind>> {
        Ok(self.node(path).map(|node| match node {
            NodeRef::Root(_) => NodeKind::Group,
            NodeRef::Node(n) => n.kind(),
        }))
    }

    fn attr(&self, path: &NodePath, name: &str) -> ContainerResult<Option<AttrValue>> {
        Ok(self.node(path).and_then(|node| {
            let attrs = match node {
                NodeRef::Root(g) => &g.attrs,
                NodeRef::Node(n) => n.attrs(),
            };
            attrs.get(name).cloned()
        }))
    }

    fn child_names(&self, path: &NodePath) -> ContainerResult<Vec<String>> {
        Ok(match self.node(path) {
            Some(NodeRef::Root(g)) => g.children.keys().cloned().collect(),
            Some(NodeRef::Node(MemoryNode::Group(g))) => g.children.keys().cloned().collect(),
            _ => Vec::new(),
        })
    }

    fn dataset_meta(&self, path: &NodePath) -> ContainerResult<Option<DatasetMeta>> {
        Ok(match self.node(path) {
            Some(NodeRef::Node(MemoryNode::Dataset(d))) => Some(DatasetMeta {
                shape: d.shape.clone(),
                dtype: d.dtype,
            }),
            _ => None,
        })
    }

    fn read_values(&self, path: &NodePath) -> ContainerResult<ArrayD<f64>> {
        let dataset = match self.node(path) {
            Some(NodeRef::Node(MemoryNode::Dataset(d))) => d,
            _ => {
                return Err(ContainerError::DataRead {
                    path: path.clone(),
                    reason: "no dataset at this path".to_string(),
                });
            }
        };
        ArrayD::from_shape_vec(IxDyn(&dataset.shape), dataset.values.clone()).map_err(|e| {
            ContainerError::DataRead {
                path: path.clone(),
                reason: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(text: &str) -> NodePath {
        NodePath::parse(text).unwrap()
    }

    fn sample_container() -> MemoryContainer {
        let mut container = MemoryContainer::new();
        container.ensure_group(&path("/structure")).unwrap();
        container
            .insert_dataset(
                &path("/structure/moments"),
                MemoryDataset::vector(vec![2.2, 2.2, 2.2]).with_attr("units", "mu_B"),
            )
            .unwrap();
        container.set_attr(&path("/"), "dataset_format", "uppasd").unwrap();
        container
    }

    #[test]
    fn test_resolve_kinds() {
        let container = sample_container();
        assert_eq!(
            container.node_kind(&path("/")).unwrap(),
            Some(NodeKind::Group)
        );
        assert_eq!(
            container.node_kind(&path("/structure")).unwrap(),
            Some(NodeKind::Group)
        );
        assert_eq!(
            container.node_kind(&path("/structure/moments")).unwrap(),
            Some(NodeKind::Dataset)
        );
        assert_eq!(container.node_kind(&path("/missing")).unwrap(), None);
    }

    #[test]
    fn test_attr_lookup() {
        let container = sample_container();
        assert_eq!(
            container.attr(&path("/"), "dataset_format").unwrap(),
            Some(AttrValue::from("uppasd"))
        );
        assert_eq!(
            container.attr(&path("/structure/moments"), "units").unwrap(),
            Some(AttrValue::from("mu_B"))
        );
        assert_eq!(container.attr(&path("/structure"), "units").unwrap(), None);
    }

    #[test]
    fn test_child_names_sorted() {
        let mut container = sample_container();
        container.ensure_group(&path("/a")).unwrap();
        let names = container.child_names(&path("/")).unwrap();
        assert_eq!(names, vec!["a".to_string(), "structure".to_string()]);
    }

    #[test]
    fn test_dataset_meta_and_values() {
        let container = sample_container();
        let meta = container
            .dataset_meta(&path("/structure/moments"))
            .unwrap()
            .unwrap();
        assert_eq!(meta.shape, vec![3]);
        assert_eq!(meta.dtype, Dtype::F64);

        let values = container.read_values(&path("/structure/moments")).unwrap();
        assert_eq!(values.shape(), &[3]);
        assert_eq!(values[[0]], 2.2);
    }

    #[test]
    fn test_scalar_dataset_roundtrip() {
        let mut container = MemoryContainer::new();
        container
            .insert_dataset(&path("/value"), MemoryDataset::scalar(4.5))
            .unwrap();
        let values = container.read_values(&path("/value")).unwrap();
        assert_eq!(values.ndim(), 0);
        assert_eq!(values[IxDyn(&[])], 4.5);
    }

    #[test]
    fn test_dataset_blocks_group_creation() {
        let mut container = sample_container();
        let result = container.ensure_group(&path("/structure/moments/sub"));
        assert!(result.is_err());
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let container = sample_container();
        let json = serde_json::to_string(&container).unwrap();
        let restored: MemoryContainer = serde_json::from_str(&json).unwrap();
        assert_eq!(
            restored.node_kind(&path("/structure/moments")).unwrap(),
            Some(NodeKind::Dataset)
        );
    }

    #[test]
    fn test_missing_snapshot_file() {
        let result = MemoryContainer::from_snapshot(Path::new("/nonexistent/snapshot.json"));
        assert!(matches!(result, Err(ContainerError::NotFound { .. })));
    }
}
