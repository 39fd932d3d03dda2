//! Dataset validation engine.
//!
//! Ties the schema registry, container access, unit reconciliation and
//! quantity building together: [`Validator::validate`] walks the declared
//! nodes, records [`Finding`]s for every violation it can observe in a
//! single pass, and materializes unit-converted [`crate::quantity::Quantity`]
//! values for every dataset that checks out.

mod findings;
mod reconcile;
mod validator;

pub use findings::{Finding, FindingCode, Severity, ValidationReport};
pub use reconcile::{reconcile, ReconciledUnit};
pub use validator::Validator;
