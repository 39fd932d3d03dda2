//! spinval - validate spin-dynamics simulation datasets
//!
//! Walks a hierarchical dataset container against a declarative schema,
//! accumulates per-path findings (missing nodes, wrong shapes and dtypes,
//! bad metadata, unparseable or dimensionally wrong units) and, for every
//! dataset that checks out, extracts its numeric payload as a unit-tagged
//! quantity in the schema's expected unit.

pub mod cli;
pub mod container;
pub mod quantity;
pub mod schema;
pub mod units;
pub mod validate;
