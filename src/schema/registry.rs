//! Schema registry: the ordered set of declared nodes for one dataset family.
//!
//! The registry is constructed once, validated structurally, and then only
//! read. Node order is declaration order and doubles as the traversal order
//! of the validator, so reports are reproducible run to run. Registries can
//! be built programmatically or loaded from a JSON file.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::container::{NodeKind, NodePath};

use super::errors::{SchemaError, SchemaResult};
use super::types::SchemaNode;

/// Immutable, pre-validated collection of schema nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RegistrySpec", into = "RegistrySpec")]
pub struct SchemaRegistry {
    name: String,
    nodes: Vec<SchemaNode>,
    index: HashMap<String, usize>,
}

/// Plain serde form of a registry, validated on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RegistrySpec {
    name: String,
    nodes: Vec<SchemaNode>,
}

impl SchemaRegistry {
    /// Builds a registry from nodes in declaration order.
    ///
    /// Fails unless paths are unique, every non-root parent is declared
    /// earlier and as a group, a declared root comes first, dataset-only
    /// checks sit on datasets, and quantity names are unique with a unit
    /// attribute each.
    pub fn new(name: impl Into<String>, nodes: Vec<SchemaNode>) -> SchemaResult<Self> {
        let mut index: HashMap<String, usize> = HashMap::with_capacity(nodes.len());
        let mut quantities: Vec<&str> = Vec::new();

        for (i, node) in nodes.iter().enumerate() {
            let path_text = node.path.to_string();

            if node.path.is_root() && i != 0 {
                return Err(SchemaError::RootNotFirst);
            }

            if index.contains_key(&path_text) {
                return Err(SchemaError::DuplicatePath { path: path_text });
            }

            if let Some(parent) = node.path.parent() {
                match index.get(&parent.to_string()) {
                    Some(&parent_idx) => {
                        if nodes[parent_idx].kind != NodeKind::Group {
                            return Err(SchemaError::ParentNotGroup {
                                path: path_text,
                                parent: parent.to_string(),
                            });
                        }
                    }
                    // An undeclared root is still a legal parent.
                    None if parent.is_root() => {}
                    None => {
                        return Err(SchemaError::OrphanNode {
                            path: path_text,
                            parent: parent.to_string(),
                        });
                    }
                }
            }

            node.validate_declaration()?;

            if let Some(quantity) = node.quantity.as_deref() {
                if quantities.contains(&quantity) {
                    return Err(SchemaError::DuplicateQuantity {
                        name: quantity.to_string(),
                    });
                }
                quantities.push(quantity);
            }

            index.insert(path_text, i);
        }

        Ok(Self {
            name: name.into(),
            nodes,
            index,
        })
    }

    /// Loads a registry from a JSON schema file.
    pub fn from_file(path: &Path) -> SchemaResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| SchemaError::FileRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| SchemaError::Malformed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Human-readable name of the dataset family this registry describes.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared nodes in traversal (declaration) order.
    pub fn nodes(&self) -> &[SchemaNode] {
        &self.nodes
    }

    /// Number of declared nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Looks up a declared node by path.
    pub fn get(&self, path: &NodePath) -> Option<&SchemaNode> {
        self.index.get(&path.to_string()).map(|&i| &self.nodes[i])
    }

    /// True when the path is declared.
    pub fn contains(&self, path: &NodePath) -> bool {
        self.index.contains_key(&path.to_string())
    }

    /// Declared strict descendants of `path`, in traversal order.
    pub fn descendants_of<'a>(
        &'a self,
        path: &'a NodePath,
    ) -> impl Iterator<Item = &'a SchemaNode> {
        self.nodes
            .iter()
            .filter(move |node| node.path.is_descendant_of(path))
    }

    /// Names of declared direct children of the group at `path`.
    pub fn declared_child_names(&self, path: &NodePath) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|node| node.path.parent().as_ref() == Some(path))
            .filter_map(|node| node.path.name())
            .collect()
    }
}

impl TryFrom<RegistrySpec> for SchemaRegistry {
    type Error = SchemaError;

    fn try_from(spec: RegistrySpec) -> Result<Self, Self::Error> {
        SchemaRegistry::new(spec.name, spec.nodes)
    }
}

impl From<SchemaRegistry> for RegistrySpec {
    fn from(registry: SchemaRegistry) -> RegistrySpec {
        RegistrySpec {
            name: registry.name,
            nodes: registry.nodes,
        }
    }
}
