//! Declarative dataset schemas.
//!
//! A [`SchemaRegistry`] describes the expected layout of one dataset
//! family: the group/dataset tree, required/optional status, attribute
//! expectations (exact values or unit compatibility), dataset shapes,
//! element types and the logical quantities to extract. The registry is
//! immutable once built and drives the validator's traversal, so the same
//! schema always produces findings in the same order.

mod errors;
mod registry;
mod types;
mod uppasd;

pub use errors::{SchemaError, SchemaResult};
pub use registry::SchemaRegistry;
pub use types::{AttrExpectation, AttrSpec, SchemaNode, ShapeSpec, UNITS_ATTR};
pub use uppasd::uppasd_schema;
