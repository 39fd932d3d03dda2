//! Schema-driven structural validation.
//!
//! The validator walks the registry's declared nodes in order (the schema
//! drives iteration, not the container) and accumulates findings instead
//! of aborting, so one pass reports every problem a dataset has. Only a
//! container I/O failure aborts the run; absence of a node is always a
//! per-path finding.

use tracing::debug;

use crate::container::{Container, ContainerError, NodeKind, NodePath};
use crate::quantity::Quantity;
use crate::schema::{AttrExpectation, SchemaNode, SchemaRegistry};

use super::findings::{Finding, ValidationReport};
use super::reconcile::{reconcile, ReconciledUnit};

/// Validates containers against one schema registry.
///
/// The validator borrows the registry and holds no other state, so a single
/// instance can check any number of containers; each run produces an
/// independent [`ValidationReport`].
pub struct Validator<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> Validator<'a> {
    /// Creates a validator for the given registry.
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// The registry this validator checks against.
    pub fn registry(&self) -> &SchemaRegistry {
        self.registry
    }

    /// Runs a full validation pass over `container`.
    ///
    /// Findings accumulate in traversal order. A missing required group
    /// reports itself and every declared descendant, each at its own path;
    /// an absent optional group silently skips its subtree. Datasets that
    /// pass every check and declare a quantity are materialized into the
    /// report's quantity map in the schema's expected unit.
    pub fn validate<C: Container>(&self, container: &C) -> Result<ValidationReport, ContainerError> {
        let mut report = ValidationReport::new();
        // Roots of subtrees that must not be resolved against the container:
        // missing required groups report descendants transitively, absent
        // optional groups drop them silently.
        let mut missing_roots: Vec<NodePath> = Vec::new();
        let mut skipped_roots: Vec<NodePath> = Vec::new();

        for node in self.registry.nodes() {
            if let Some(ancestor) = missing_roots
                .iter()
                .find(|root| node.path.is_descendant_of(root))
            {
                report.push(Finding::missing_ancestor(node.path.clone(), ancestor));
                continue;
            }
            if skipped_roots
                .iter()
                .any(|root| node.path.is_descendant_of(root))
            {
                continue;
            }

            debug!(path = %node.path, kind = %node.kind, "checking node");

            match container.node_kind(&node.path)? {
                None => {
                    if node.required {
                        report.push(Finding::missing_node(node.path.clone(), node.kind));
                        if node.kind == NodeKind::Group {
                            missing_roots.push(node.path.clone());
                        }
                    } else if node.kind == NodeKind::Group {
                        skipped_roots.push(node.path.clone());
                    }
                }
                Some(found) if found != node.kind => {
                    report.push(Finding::wrong_kind(node.path.clone(), node.kind, found));
                    if node.kind == NodeKind::Group {
                        missing_roots.push(node.path.clone());
                    }
                }
                Some(_) => self.check_present_node(container, node, &mut report)?,
            }
        }

        debug!(
            errors = report.error_count(),
            warnings = report.warning_count(),
            quantities = report.quantities().len(),
            "validation pass complete"
        );
        Ok(report)
    }

    /// Checks a node that resolved to the declared kind.
    fn check_present_node<C: Container>(
        &self,
        container: &C,
        node: &SchemaNode,
        report: &mut ValidationReport,
    ) -> Result<(), ContainerError> {
        let mut node_errors = 0usize;
        let mut reconciled: Option<ReconciledUnit> = None;

        if node.kind == NodeKind::Dataset {
            if let Some(meta) = container.dataset_meta(&node.path)? {
                if let Some(shape) = &node.shape {
                    if !shape.matches(&meta.shape) {
                        report.push(Finding::shape_mismatch(node.path.clone(), shape, &meta.shape));
                        node_errors += 1;
                    }
                }
                if let Some(expected) = node.dtype {
                    if meta.dtype != expected {
                        report.push(Finding::dtype_mismatch(node.path.clone(), expected, meta.dtype));
                        node_errors += 1;
                    }
                }
            }
        }

        for spec in &node.attributes {
            match container.attr(&node.path, &spec.name)? {
                None => {
                    report.push(Finding::missing_attribute(node.path.clone(), &spec.name));
                    node_errors += 1;
                }
                Some(actual) => match &spec.expectation {
                    AttrExpectation::Value(expected) => {
                        if &actual != expected {
                            report.push(Finding::attribute_mismatch(
                                node.path.clone(),
                                &spec.name,
                                expected,
                                &actual,
                            ));
                            node_errors += 1;
                        }
                    }
                    AttrExpectation::Unit(expected) => {
                        match reconcile(&node.path, &spec.name, &actual, expected) {
                            Ok(r) => reconciled = Some(r),
                            Err(finding) => {
                                report.push(finding);
                                node_errors += 1;
                            }
                        }
                    }
                },
            }
        }

        // A quantity is only materialized from a fully clean node; a node
        // with warnings elsewhere in the report still builds.
        if node_errors == 0 {
            if let (Some(name), Some(r)) = (&node.quantity, &reconciled) {
                if let Some((_, expected)) = node.unit_attr() {
                    let values = container.read_values(&node.path)?;
                    if let Some(quantity) =
                        Quantity::converted(name.as_str(), values, &r.declared, expected.clone())
                    {
                        debug!(name = %name, unit = %quantity.unit(), "built quantity");
                        report.insert_quantity(quantity);
                    }
                }
            }
        }

        if node.kind == NodeKind::Group {
            let declared = self.registry.declared_child_names(&node.path);
            for child in container.child_names(&node.path)? {
                if !declared.contains(&child.as_str()) {
                    report.push(Finding::unexpected_node(node.path.join(&child)));
                }
            }
        }

        Ok(())
    }
}
