//! Built-in schema for UppASD atomistic spin-dynamics output.
//!
//! Layout and units are documented in FORMAT.md. The dataset family carries
//! the atomistic structure (positions, moments, optional exchange
//! couplings), the M(T) magnetization curve, and the derived micromagnetic
//! properties: exchange stiffness at 0 K and 300 K, the uniaxial anisotropy
//! constant at 300 K, and saturation polarization at 0 K and 300 K.

use crate::container::Dtype;

use super::errors::SchemaResult;
use super::registry::SchemaRegistry;
use super::types::{AttrSpec, SchemaNode, ShapeSpec};

/// Builds the schema registry for UppASD spin-dynamics datasets.
pub fn uppasd_schema() -> SchemaResult<SchemaRegistry> {
    let nodes = vec![
        SchemaNode::group("/")?
            .with_attr(AttrSpec::value("dataset_format", "uppasd")),
        SchemaNode::group("/structure")?,
        SchemaNode::dataset("/structure/positions")?
            .with_shape(ShapeSpec::table(3))
            .with_dtype(Dtype::F64)
            .with_unit("angstrom")?,
        SchemaNode::dataset("/structure/moments")?
            .with_shape(ShapeSpec::vector())
            .with_dtype(Dtype::F64)
            .with_unit("mu_B")?,
        SchemaNode::dataset("/structure/exchange_couplings")?
            .optional()
            .with_shape(ShapeSpec::table(4))
            .with_dtype(Dtype::F64)
            .with_unit("mRy")?,
        SchemaNode::group("/magnetization")?,
        SchemaNode::dataset("/magnetization/temperature")?
            .with_shape(ShapeSpec::vector())
            .with_dtype(Dtype::F64)
            .with_unit("K")?
            .with_quantity("T"),
        SchemaNode::dataset("/magnetization/moment")?
            .with_shape(ShapeSpec::vector())
            .with_dtype(Dtype::F64)
            .with_unit("A/m")?
            .with_quantity("M"),
        SchemaNode::group("/properties")?,
        SchemaNode::dataset("/properties/exchange_stiffness_0K")?
            .with_shape(ShapeSpec::scalar())
            .with_dtype(Dtype::F64)
            .with_unit("J/m")?
            .with_quantity("A_0"),
        SchemaNode::dataset("/properties/exchange_stiffness_300K")?
            .with_shape(ShapeSpec::scalar())
            .with_dtype(Dtype::F64)
            .with_unit("J/m")?
            .with_quantity("A_300"),
        SchemaNode::dataset("/properties/anisotropy_constant_300K")?
            .with_shape(ShapeSpec::scalar())
            .with_dtype(Dtype::F64)
            .with_unit("J/m^3")?
            .with_quantity("K_300"),
        SchemaNode::dataset("/properties/saturation_polarization_0K")?
            .with_shape(ShapeSpec::scalar())
            .with_dtype(Dtype::F64)
            .with_unit("T")?
            .with_quantity("Js_0"),
        SchemaNode::dataset("/properties/saturation_polarization_300K")?
            .with_shape(ShapeSpec::scalar())
            .with_dtype(Dtype::F64)
            .with_unit("T")?
            .with_quantity("Js_300"),
        SchemaNode::group("/notes")?.optional(),
    ];

    SchemaRegistry::new("uppasd", nodes)
}
