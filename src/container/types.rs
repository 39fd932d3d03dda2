//! Shared node-addressing and metadata types for hierarchical containers.
//!
//! A container is a tree of named groups and datasets. Every node is
//! addressed by a [`NodePath`] (slash-separated segments, `/` is the root
//! group). Datasets carry a shape, an element type and a flat numeric
//! payload; both node kinds carry string-keyed attributes.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The two node kinds a container can hold.
///
/// Modelled as a closed enum: every declared or resolved node is exactly one
/// of these, and dispatch on the kind decides which checks apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Interior node with named children and attributes.
    Group,
    /// Leaf node with a numeric array, shape, dtype and attributes.
    Dataset,
}

impl NodeKind {
    /// Returns the kind name used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Group => "group",
            NodeKind::Dataset => "dataset",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Element types a dataset can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dtype {
    F32,
    F64,
    I32,
    I64,
    U32,
    U64,
}

impl Dtype {
    /// Returns the dtype name used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dtype::F32 => "f32",
            Dtype::F64 => "f64",
            Dtype::I32 => "i32",
            Dtype::I64 => "i64",
            Dtype::U32 => "u32",
            Dtype::U64 => "u64",
        }
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An attribute value attached to a group or dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// UTF-8 string attribute.
    Str(String),
    /// 64-bit integer attribute.
    Int(i64),
    /// 64-bit float attribute.
    Float(f64),
}

impl AttrValue {
    /// Returns the value type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Str(_) => "string",
            AttrValue::Int(_) => "int",
            AttrValue::Float(_) => "float",
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Str(s) => write!(f, "'{}'", s),
            AttrValue::Int(i) => write!(f, "{}", i),
            AttrValue::Float(x) => write!(f, "{}", x),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_string())
    }
}

impl From<i64> for AttrValue {
    fn from(i: i64) -> Self {
        AttrValue::Int(i)
    }
}

impl From<f64> for AttrValue {
    fn from(x: f64) -> Self {
        AttrValue::Float(x)
    }
}

/// Shape and element type of a resolved dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetMeta {
    /// Dimension lengths; empty for a scalar dataset.
    pub shape: Vec<usize>,
    /// Declared element type.
    pub dtype: Dtype,
}

/// Error raised when a path string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid node path '{text}': {reason}")]
pub struct PathError {
    /// The offending path text.
    pub text: String,
    /// Why it was rejected.
    pub reason: String,
}

/// Hierarchical location of a node inside a container.
///
/// The root group is the empty path and displays as `/`. Paths are parsed
/// from slash-separated strings; empty segments are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct NodePath {
    segments: Vec<String>,
}

impl NodePath {
    /// Returns the root path `/`.
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Parses a path from its string form, e.g. `/structure/positions`.
    ///
    /// A leading slash is optional; `/` and the empty string both denote the
    /// root.
    pub fn parse(text: &str) -> Result<Self, PathError> {
        let trimmed = text.strip_prefix('/').unwrap_or(text);
        if trimmed.is_empty() {
            return Ok(Self::root());
        }
        let mut segments = Vec::new();
        for segment in trimmed.split('/') {
            if segment.is_empty() {
                return Err(PathError {
                    text: text.to_string(),
                    reason: "empty path segment".to_string(),
                });
            }
            segments.push(segment.to_string());
        }
        Ok(Self { segments })
    }

    /// True for the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Path segments from the root down.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Final segment, or `None` for the root.
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Parent path, or `None` for the root.
    pub fn parent(&self) -> Option<NodePath> {
        if self.segments.is_empty() {
            None
        } else {
            Some(NodePath {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Returns this path extended by one segment.
    pub fn join(&self, segment: &str) -> NodePath {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        NodePath { segments }
    }

    /// True if `ancestor` is a strict prefix of this path.
    pub fn is_descendant_of(&self, ancestor: &NodePath) -> bool {
        self.segments.len() > ancestor.segments.len()
            && self.segments[..ancestor.segments.len()] == ancestor.segments[..]
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "/")
        } else {
            for segment in &self.segments {
                write!(f, "/{}", segment)?;
            }
            Ok(())
        }
    }
}

impl From<NodePath> for String {
    fn from(path: NodePath) -> String {
        path.to_string()
    }
}

impl TryFrom<String> for NodePath {
    type Error = PathError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        NodePath::parse(&text)
    }
}
