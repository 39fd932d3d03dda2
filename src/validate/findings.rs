//! Findings and the validation report.
//!
//! A [`Finding`] is one diagnostic pinned to a container path, carrying a
//! stable rule code and a human-readable message. Findings are immutable
//! once created; the [`ValidationReport`] owns them in traversal order and
//! never deduplicates or reorders, so report output is reproducible and
//! directly assertable in tests.

use std::collections::HashMap;
use std::fmt;

use crate::container::{AttrValue, Dtype, NodeKind, NodePath};
use crate::quantity::Quantity;
use crate::schema::ShapeSpec;

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Suspicious but never blocks validity.
    Warning,
    /// Blocks validity.
    Error,
}

impl Severity {
    /// Returns the display form used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stable identifiers for the validation rules a finding can violate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingCode {
    /// A required schema path is absent from the container.
    MissingNode,
    /// A dataset's shape does not match the schema.
    ShapeMismatch,
    /// A dataset's element type does not match the schema.
    DtypeMismatch,
    /// A declared attribute is absent.
    MissingAttribute,
    /// A declared attribute has the wrong value.
    AttributeMismatch,
    /// A unit attribute could not be parsed.
    UnitUnparseable,
    /// A unit attribute has the wrong physical dimension.
    UnitIncompatible,
    /// Container content not declared in the schema.
    UnexpectedNode,
}

impl FindingCode {
    /// Returns the stable code string.
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingCode::MissingNode => "missing-node",
            FindingCode::ShapeMismatch => "shape-mismatch",
            FindingCode::DtypeMismatch => "dtype-mismatch",
            FindingCode::MissingAttribute => "missing-attribute",
            FindingCode::AttributeMismatch => "attribute-mismatch",
            FindingCode::UnitUnparseable => "unit-unparseable",
            FindingCode::UnitIncompatible => "unit-incompatible",
            FindingCode::UnexpectedNode => "unexpected-node",
        }
    }

    /// Severity this rule reports at.
    pub fn severity(&self) -> Severity {
        match self {
            FindingCode::UnexpectedNode => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for FindingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One diagnostic produced during validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    path: NodePath,
    code: FindingCode,
    message: String,
}

impl Finding {
    fn new(path: NodePath, code: FindingCode, message: String) -> Self {
        Self {
            path,
            code,
            message,
        }
    }

    /// A required node is absent.
    pub fn missing_node(path: NodePath, kind: NodeKind) -> Self {
        let message = format!("required {} is missing", kind);
        Self::new(path, FindingCode::MissingNode, message)
    }

    /// A node is unreachable because an ancestor group is missing.
    pub fn missing_ancestor(path: NodePath, ancestor: &NodePath) -> Self {
        let message = format!("unreachable: ancestor group '{}' is missing", ancestor);
        Self::new(path, FindingCode::MissingNode, message)
    }

    /// A declared path resolved to the wrong node kind.
    pub fn wrong_kind(path: NodePath, expected: NodeKind, found: NodeKind) -> Self {
        let message = format!("expected a {}, found a {}", expected, found);
        Self::new(path, FindingCode::MissingNode, message)
    }

    /// A dataset's shape does not satisfy the schema.
    pub fn shape_mismatch(path: NodePath, expected: &ShapeSpec, actual: &[usize]) -> Self {
        let message = format!("expected shape {}, found {:?}", expected, actual);
        Self::new(path, FindingCode::ShapeMismatch, message)
    }

    /// A dataset's element type does not satisfy the schema.
    pub fn dtype_mismatch(path: NodePath, expected: Dtype, actual: Dtype) -> Self {
        let message = format!("expected dtype {}, found {}", expected, actual);
        Self::new(path, FindingCode::DtypeMismatch, message)
    }

    /// A declared attribute is absent.
    pub fn missing_attribute(path: NodePath, name: &str) -> Self {
        let message = format!("missing attribute '{}'", name);
        Self::new(path, FindingCode::MissingAttribute, message)
    }

    /// A declared attribute has an unexpected value.
    pub fn attribute_mismatch(
        path: NodePath,
        name: &str,
        expected: &AttrValue,
        actual: &AttrValue,
    ) -> Self {
        let message = format!(
            "attribute '{}': expected {}, found {}",
            name, expected, actual
        );
        Self::new(path, FindingCode::AttributeMismatch, message)
    }

    /// A unit attribute is not a string.
    pub fn unit_not_text(path: NodePath, name: &str, actual: &AttrValue) -> Self {
        let message = format!(
            "unit attribute '{}' must be a string, found {} {}",
            name,
            actual.type_name(),
            actual
        );
        Self::new(path, FindingCode::UnitUnparseable, message)
    }

    /// A unit attribute string failed to parse.
    pub fn unit_unparseable(path: NodePath, declared: &str, reason: impl fmt::Display) -> Self {
        let message = format!("cannot parse unit '{}': {}", declared, reason);
        Self::new(path, FindingCode::UnitUnparseable, message)
    }

    /// A unit attribute has the wrong physical dimension.
    pub fn unit_incompatible(path: NodePath, declared: &str, expected: &str) -> Self {
        let message = format!(
            "unit '{}' is not convertible to expected unit '{}'",
            declared, expected
        );
        Self::new(path, FindingCode::UnitIncompatible, message)
    }

    /// A container child not declared in the schema.
    pub fn unexpected_node(path: NodePath) -> Self {
        let message = "not declared in the schema".to_string();
        Self::new(path, FindingCode::UnexpectedNode, message)
    }

    /// Where the finding occurred.
    pub fn path(&self) -> &NodePath {
        &self.path
    }

    /// The rule that was violated.
    pub fn code(&self) -> FindingCode {
        self.code
    }

    /// Severity of the finding.
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Human-readable description.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.severity(),
            self.code,
            self.path,
            self.message
        )
    }
}

/// Aggregate result of one validation run.
#[derive(Debug, Default)]
pub struct ValidationReport {
    findings: Vec<Finding>,
    quantities: HashMap<String, Quantity>,
}

impl ValidationReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no error-severity finding was recorded; warnings never
    /// block validity.
    pub fn is_valid(&self) -> bool {
        !self
            .findings
            .iter()
            .any(|f| f.severity() == Severity::Error)
    }

    /// All findings, in traversal order.
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Findings of one severity, traversal order preserved.
    pub fn findings_with_severity(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(move |f| f.severity() == severity)
    }

    /// Number of error findings.
    pub fn error_count(&self) -> usize {
        self.findings_with_severity(Severity::Error).count()
    }

    /// Number of warning findings.
    pub fn warning_count(&self) -> usize {
        self.findings_with_severity(Severity::Warning).count()
    }

    /// Successfully built quantities by logical name.
    ///
    /// Entries exist per-dataset regardless of overall validity; check
    /// [`is_valid`](Self::is_valid) before treating the map as complete.
    pub fn quantities(&self) -> &HashMap<String, Quantity> {
        &self.quantities
    }

    /// Looks up one built quantity.
    pub fn quantity(&self, name: &str) -> Option<&Quantity> {
        self.quantities.get(name)
    }

    pub(crate) fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub(crate) fn insert_quantity(&mut self, quantity: Quantity) {
        self.quantities.insert(quantity.name().to_string(), quantity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(text: &str) -> NodePath {
        NodePath::parse(text).unwrap()
    }

    #[test]
    fn test_code_strings() {
        assert_eq!(FindingCode::MissingNode.as_str(), "missing-node");
        assert_eq!(FindingCode::ShapeMismatch.as_str(), "shape-mismatch");
        assert_eq!(FindingCode::DtypeMismatch.as_str(), "dtype-mismatch");
        assert_eq!(FindingCode::MissingAttribute.as_str(), "missing-attribute");
        assert_eq!(FindingCode::AttributeMismatch.as_str(), "attribute-mismatch");
        assert_eq!(FindingCode::UnitUnparseable.as_str(), "unit-unparseable");
        assert_eq!(FindingCode::UnitIncompatible.as_str(), "unit-incompatible");
        assert_eq!(FindingCode::UnexpectedNode.as_str(), "unexpected-node");
    }

    #[test]
    fn test_only_unexpected_node_warns() {
        assert_eq!(FindingCode::UnexpectedNode.severity(), Severity::Warning);
        assert_eq!(FindingCode::MissingNode.severity(), Severity::Error);
        assert_eq!(FindingCode::UnitIncompatible.severity(), Severity::Error);
    }

    #[test]
    fn test_report_validity() {
        let mut report = ValidationReport::new();
        assert!(report.is_valid());

        report.push(Finding::unexpected_node(path("/extra")));
        assert!(report.is_valid());
        assert_eq!(report.warning_count(), 1);

        report.push(Finding::missing_node(path("/structure"), NodeKind::Group));
        assert!(!report.is_valid());
        assert_eq!(report.error_count(), 1);
    }

    #[test]
    fn test_findings_keep_insertion_order() {
        let mut report = ValidationReport::new();
        report.push(Finding::missing_node(path("/b"), NodeKind::Group));
        report.push(Finding::missing_node(path("/a"), NodeKind::Dataset));
        let paths: Vec<_> = report
            .findings()
            .iter()
            .map(|f| f.path().to_string())
            .collect();
        assert_eq!(paths, vec!["/b".to_string(), "/a".to_string()]);
    }

    #[test]
    fn test_finding_display() {
        let finding = Finding::missing_attribute(path("/structure/moments"), "units");
        let text = finding.to_string();
        assert!(text.contains("ERROR"));
        assert!(text.contains("missing-attribute"));
        assert!(text.contains("/structure/moments"));
    }
}
