//! Unit reconciliation.
//!
//! A dataset declares its unit as a string attribute; the schema declares
//! the unit the quantity is expected in. Reconciliation separates the two
//! failure modes (unparseable text, wrong physical dimension) from the
//! benign case of a different-but-convertible unit, which passes and only
//! surfaces later as a rescaling factor at quantity build time.

use crate::container::{AttrValue, NodePath};
use crate::units::Unit;

use super::findings::Finding;

/// Outcome of reconciling a declared unit against the expected one.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledUnit {
    /// The unit the dataset actually declares.
    pub declared: Unit,
    /// Factor converting declared-unit values into expected-unit values.
    pub factor: f64,
}

/// Reconciles a dataset's declared unit attribute with the expected unit.
///
/// Returns the reconciled unit on success, or the finding to record:
/// `unit-unparseable` when the attribute is not a string or fails to parse,
/// `unit-incompatible` when the dimensions differ.
pub fn reconcile(
    path: &NodePath,
    attr_name: &str,
    declared: &AttrValue,
    expected: &Unit,
) -> Result<ReconciledUnit, Finding> {
    let text = match declared {
        AttrValue::Str(text) => text,
        other => return Err(Finding::unit_not_text(path.clone(), attr_name, other)),
    };

    let declared_unit = match Unit::parse(text) {
        Ok(unit) => unit,
        Err(e) => return Err(Finding::unit_unparseable(path.clone(), text, e)),
    };

    match declared_unit.factor_to(expected) {
        Some(factor) => Ok(ReconciledUnit {
            declared: declared_unit,
            factor,
        }),
        None => Err(Finding::unit_incompatible(
            path.clone(),
            text,
            expected.symbol(),
        )),
    }
}
