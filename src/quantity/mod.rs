//! Unit-tagged physical quantities.
//!
//! A [`Quantity`] pairs a validated numeric array with the unit it is
//! expressed in and the logical name the schema assigned to it. Quantities
//! are built once, after a dataset has passed structural and unit checks,
//! and are immutable from then on.

use ndarray::ArrayD;

use crate::units::Unit;

/// A named numeric array with a physical unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    name: String,
    values: ArrayD<f64>,
    unit: Unit,
}

impl Quantity {
    /// Creates a quantity whose values are already in `unit`.
    pub fn new(name: impl Into<String>, values: ArrayD<f64>, unit: Unit) -> Self {
        Self {
            name: name.into(),
            values,
            unit,
        }
    }

    /// Creates a quantity from values declared in a compatible source unit,
    /// rescaling them into `target`.
    ///
    /// Returns `None` when the units are dimensionally incompatible; the
    /// validator never calls this without having reconciled the units
    /// first, so `None` signals a caller bug rather than bad data.
    pub fn converted(
        name: impl Into<String>,
        values: ArrayD<f64>,
        declared: &Unit,
        target: Unit,
    ) -> Option<Self> {
        let factor = declared.factor_to(&target)?;
        Some(Self {
            name: name.into(),
            values: values * factor,
            unit: target,
        })
    }

    /// Logical name assigned by the schema.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The numeric payload.
    pub fn values(&self) -> &ArrayD<f64> {
        &self.values
    }

    /// The unit the values are expressed in.
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Number of elements in the payload.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True for an empty payload.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
