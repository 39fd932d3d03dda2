//! Unit reconciliation tests through the full validation pipeline:
//! - Convertible-but-different units pass and rescale into the expected unit
//! - Dimensionally wrong units produce exactly one finding and no quantity
//! - Unparseable unit strings are reported distinctly
//! - Independent nodes are unaffected by each other's unit problems

use spinval::container::{MemoryContainer, MemoryDataset, NodePath};
use spinval::schema::uppasd_schema;
use spinval::validate::{FindingCode, Validator};

// =============================================================================
// Helper Functions
// =============================================================================

fn path(text: &str) -> NodePath {
    NodePath::parse(text).unwrap()
}

/// Minimal conforming container; tests then swap individual unit attrs.
fn container() -> MemoryContainer {
    let mut c = MemoryContainer::new();
    c.set_attr(&path("/"), "dataset_format", "uppasd").unwrap();

    c.insert_dataset(
        &path("/structure/positions"),
        MemoryDataset::new(
            spinval::container::Dtype::F64,
            vec![1, 3],
            vec![0.0, 0.0, 0.0],
        )
        .with_attr("units", "angstrom"),
    )
    .unwrap();
    c.insert_dataset(
        &path("/structure/moments"),
        MemoryDataset::vector(vec![2.2]).with_attr("units", "mu_B"),
    )
    .unwrap();
    c.insert_dataset(
        &path("/magnetization/temperature"),
        MemoryDataset::vector(vec![300.0]).with_attr("units", "K"),
    )
    .unwrap();
    c.insert_dataset(
        &path("/magnetization/moment"),
        MemoryDataset::vector(vec![1.5e6]).with_attr("units", "A/m"),
    )
    .unwrap();
    c.insert_dataset(
        &path("/properties/exchange_stiffness_0K"),
        MemoryDataset::scalar(2.1e-11).with_attr("units", "J/m"),
    )
    .unwrap();
    c.insert_dataset(
        &path("/properties/exchange_stiffness_300K"),
        MemoryDataset::scalar(1.6e-11).with_attr("units", "J/m"),
    )
    .unwrap();
    c.insert_dataset(
        &path("/properties/anisotropy_constant_300K"),
        MemoryDataset::scalar(4.5e5).with_attr("units", "J/m^3"),
    )
    .unwrap();
    c.insert_dataset(
        &path("/properties/saturation_polarization_0K"),
        MemoryDataset::scalar(2.2).with_attr("units", "T"),
    )
    .unwrap();
    c.insert_dataset(
        &path("/properties/saturation_polarization_300K"),
        MemoryDataset::scalar(2.0).with_attr("units", "T"),
    )
    .unwrap();

    c
}

// =============================================================================
// Convertible Unit Tests
// =============================================================================

/// Millitesla where tesla is expected: no finding, values rescaled.
#[test]
fn test_convertible_unit_rescales_into_expected() {
    let registry = uppasd_schema().unwrap();
    let mut c = container();
    c.insert_dataset(
        &path("/properties/saturation_polarization_300K"),
        MemoryDataset::scalar(2000.0).with_attr("units", "mT"),
    )
    .unwrap();

    let report = Validator::new(&registry).validate(&c).unwrap();
    assert!(report.is_valid(), "findings: {:?}", report.findings());

    let js = report.quantity("Js_300").unwrap();
    assert_eq!(js.unit().symbol(), "T");
    let value = js.values()[ndarray::IxDyn(&[])];
    assert!((value - 2.0).abs() < 1e-12, "value was {}", value);
}

/// Nanometre positions where angstroms are expected also pass; the
/// positions dataset declares no quantity, so only the check applies.
#[test]
fn test_convertible_unit_on_quantityless_dataset() {
    let registry = uppasd_schema().unwrap();
    let mut c = container();
    c.insert_dataset(
        &path("/structure/positions"),
        MemoryDataset::new(
            spinval::container::Dtype::F64,
            vec![1, 3],
            vec![0.0, 0.0, 0.0],
        )
        .with_attr("units", "nm"),
    )
    .unwrap();

    let report = Validator::new(&registry).validate(&c).unwrap();
    assert!(report.is_valid(), "findings: {:?}", report.findings());
}

// =============================================================================
// Incompatible Unit Tests
// =============================================================================

/// Metres where J/m is expected: exactly one unit-incompatible finding at
/// that path, no quantity for it, every other quantity intact.
#[test]
fn test_incompatible_unit_isolated_to_its_node() {
    let registry = uppasd_schema().unwrap();
    let mut c = container();
    c.insert_dataset(
        &path("/properties/exchange_stiffness_0K"),
        MemoryDataset::scalar(2.1e-11).with_attr("units", "m"),
    )
    .unwrap();

    let report = Validator::new(&registry).validate(&c).unwrap();
    assert!(!report.is_valid());

    let incompatible: Vec<_> = report
        .findings()
        .iter()
        .filter(|f| f.code() == FindingCode::UnitIncompatible)
        .collect();
    assert_eq!(incompatible.len(), 1);
    assert_eq!(
        incompatible[0].path().to_string(),
        "/properties/exchange_stiffness_0K"
    );

    assert!(report.quantity("A_0").is_none());
    for name in ["T", "M", "A_300", "K_300", "Js_0", "Js_300"] {
        assert!(report.quantity(name).is_some(), "missing quantity {}", name);
    }
}

/// Kelvin where A/m is expected fails even though both strings parse.
#[test]
fn test_parseable_but_wrong_dimension_fails() {
    let registry = uppasd_schema().unwrap();
    let mut c = container();
    c.insert_dataset(
        &path("/magnetization/moment"),
        MemoryDataset::vector(vec![1.5e6]).with_attr("units", "K"),
    )
    .unwrap();

    let report = Validator::new(&registry).validate(&c).unwrap();
    assert_eq!(report.error_count(), 1);
    assert_eq!(report.findings()[0].code(), FindingCode::UnitIncompatible);
    assert!(report.quantity("M").is_none());
}

// =============================================================================
// Unparseable Unit Tests
// =============================================================================

/// Unknown unit text is unit-unparseable, not unit-incompatible.
#[test]
fn test_unknown_unit_symbol_reported_as_unparseable() {
    let registry = uppasd_schema().unwrap();
    let mut c = container();
    c.insert_dataset(
        &path("/magnetization/temperature"),
        MemoryDataset::vector(vec![300.0]).with_attr("units", "degrees-ish"),
    )
    .unwrap();

    let report = Validator::new(&registry).validate(&c).unwrap();
    assert!(!report.is_valid());
    assert_eq!(report.findings()[0].code(), FindingCode::UnitUnparseable);
    assert!(report.quantity("T").is_none());
}

/// A non-string units attribute is also unparseable.
#[test]
fn test_numeric_units_attribute_reported_as_unparseable() {
    let registry = uppasd_schema().unwrap();
    let mut c = container();
    c.insert_dataset(
        &path("/magnetization/temperature"),
        MemoryDataset::vector(vec![300.0]).with_attr("units", 1i64),
    )
    .unwrap();

    let report = Validator::new(&registry).validate(&c).unwrap();
    assert!(!report.is_valid());
    assert_eq!(report.findings()[0].code(), FindingCode::UnitUnparseable);
}

/// A missing units attribute is missing-attribute, not a unit finding.
#[test]
fn test_missing_units_attribute() {
    let registry = uppasd_schema().unwrap();
    let mut c = container();
    c.insert_dataset(
        &path("/magnetization/temperature"),
        MemoryDataset::vector(vec![300.0]),
    )
    .unwrap();

    let report = Validator::new(&registry).validate(&c).unwrap();
    assert!(!report.is_valid());
    assert_eq!(report.findings()[0].code(), FindingCode::MissingAttribute);
    assert!(report.quantity("T").is_none());
}
