//! Declarative schema node types.
//!
//! A schema describes the expected layout of one dataset family: which
//! groups and datasets exist, which are required, which attributes they
//! carry, and for datasets the expected shape, element type, unit and the
//! logical quantity they materialize. Nodes are plain data; all checking
//! logic lives in the validator.

use serde::{Deserialize, Serialize};

use crate::container::{AttrValue, Dtype, NodeKind, NodePath};
use crate::units::Unit;

use super::errors::{SchemaError, SchemaResult};

/// Name of the attribute that carries a dataset's unit string.
pub const UNITS_ATTR: &str = "units";

/// What the schema expects of one attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttrExpectation {
    /// The attribute must equal this value exactly.
    Value(AttrValue),
    /// The attribute is a unit string that must be dimensionally
    /// compatible with this unit; a different-but-convertible unit passes.
    Unit(Unit),
}

/// A declared attribute on a schema node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttrSpec {
    /// Attribute name.
    pub name: String,
    /// What the attribute must satisfy.
    #[serde(flatten)]
    pub expectation: AttrExpectation,
}

impl AttrSpec {
    /// Declares an attribute that must match a value exactly.
    pub fn value(name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self {
            name: name.into(),
            expectation: AttrExpectation::Value(value.into()),
        }
    }

    /// Declares a unit attribute with the given expected unit.
    pub fn unit(name: impl Into<String>, unit_text: &str) -> SchemaResult<Self> {
        Ok(Self {
            name: name.into(),
            expectation: AttrExpectation::Unit(Unit::parse(unit_text)?),
        })
    }
}

/// Expected dataset shape; `None` dimensions are wildcards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeSpec {
    /// Expected dimension lengths, `None` matching any length.
    pub dims: Vec<Option<usize>>,
}

impl ShapeSpec {
    /// A scalar (zero-dimensional) dataset.
    pub fn scalar() -> Self {
        Self { dims: Vec::new() }
    }

    /// A one-dimensional dataset of any length.
    pub fn vector() -> Self {
        Self { dims: vec![None] }
    }

    /// A two-dimensional dataset with any number of rows of fixed width.
    pub fn table(width: usize) -> Self {
        Self {
            dims: vec![None, Some(width)],
        }
    }

    /// An exact shape with no wildcards.
    pub fn exact(dims: &[usize]) -> Self {
        Self {
            dims: dims.iter().copied().map(Some).collect(),
        }
    }

    /// True when `actual` has the declared rank and every fixed dimension
    /// matches; wildcard dimensions always match.
    pub fn matches(&self, actual: &[usize]) -> bool {
        self.dims.len() == actual.len()
            && self
                .dims
                .iter()
                .zip(actual)
                .all(|(expected, &actual)| expected.map_or(true, |e| e == actual))
    }
}

impl std::fmt::Display for ShapeSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, dim) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match dim {
                Some(n) => write!(f, "{}", n)?,
                None => write!(f, "*")?,
            }
        }
        write!(f, ")")
    }
}

/// One expected location in the container hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    /// Hierarchical location of the node.
    pub path: NodePath,
    /// Whether a group or a dataset is expected there.
    pub kind: NodeKind,
    /// Whether absence of the node is an error.
    #[serde(default = "default_required")]
    pub required: bool,
    /// Attributes the node must carry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttrSpec>,
    /// Expected shape (datasets only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<ShapeSpec>,
    /// Expected element type (datasets only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dtype: Option<Dtype>,
    /// Logical name of the quantity this dataset materializes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
}

fn default_required() -> bool {
    true
}

impl SchemaNode {
    /// Declares a required group.
    pub fn group(path: &str) -> SchemaResult<Self> {
        Ok(Self {
            path: NodePath::parse(path)?,
            kind: NodeKind::Group,
            required: true,
            attributes: Vec::new(),
            shape: None,
            dtype: None,
            quantity: None,
        })
    }

    /// Declares a required dataset.
    pub fn dataset(path: &str) -> SchemaResult<Self> {
        Ok(Self {
            path: NodePath::parse(path)?,
            kind: NodeKind::Dataset,
            required: true,
            attributes: Vec::new(),
            shape: None,
            dtype: None,
            quantity: None,
        })
    }

    /// Marks the node optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Adds an exact-match attribute expectation.
    pub fn with_attr(mut self, spec: AttrSpec) -> Self {
        self.attributes.push(spec);
        self
    }

    /// Adds the conventional `units` attribute with an expected unit.
    pub fn with_unit(mut self, unit_text: &str) -> SchemaResult<Self> {
        self.attributes.push(AttrSpec::unit(UNITS_ATTR, unit_text)?);
        Ok(self)
    }

    /// Sets the expected shape.
    pub fn with_shape(mut self, shape: ShapeSpec) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Sets the expected element type.
    pub fn with_dtype(mut self, dtype: Dtype) -> Self {
        self.dtype = Some(dtype);
        self
    }

    /// Names the logical quantity built from this dataset.
    pub fn with_quantity(mut self, name: impl Into<String>) -> Self {
        self.quantity = Some(name.into());
        self
    }

    /// The node's unit attribute, if one is declared.
    pub fn unit_attr(&self) -> Option<(&str, &Unit)> {
        self.attributes.iter().find_map(|spec| match &spec.expectation {
            AttrExpectation::Unit(unit) => Some((spec.name.as_str(), unit)),
            AttrExpectation::Value(_) => None,
        })
    }

    /// Structural self-check used during registry construction.
    pub(super) fn validate_declaration(&self) -> SchemaResult<()> {
        if self.kind == NodeKind::Group
            && (self.shape.is_some() || self.dtype.is_some() || self.quantity.is_some())
        {
            return Err(SchemaError::GroupWithDatasetChecks {
                path: self.path.to_string(),
            });
        }

        let unit_attrs = self
            .attributes
            .iter()
            .filter(|spec| matches!(spec.expectation, AttrExpectation::Unit(_)))
            .count();
        if unit_attrs > 1 {
            return Err(SchemaError::MultipleUnitAttrs {
                path: self.path.to_string(),
            });
        }

        if let Some(name) = &self.quantity {
            if unit_attrs == 0 {
                return Err(SchemaError::QuantityWithoutUnit {
                    name: name.clone(),
                    path: self.path.to_string(),
                });
            }
        }

        Ok(())
    }
}
