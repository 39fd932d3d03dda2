//! Physical units for dataset attributes.
//!
//! Datasets declare their unit as a plain string attribute (`"meV"`,
//! `"J/m^3"`, `"A/m"`). This module parses those strings into a [`Unit`],
//! a dimension vector over the seven SI base quantities plus a linear
//! conversion factor to coherent SI, so the validator can distinguish a
//! merely different unit (convertible, fine) from a dimensionally wrong one
//! (fatal). Only linear units appear in this dataset family; an offset
//! scale such as degrees Celsius is unsupported.

use std::fmt;

use thiserror::Error;

/// Errors raised while parsing a unit string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    /// The unit string was empty (or an operator had no operand).
    #[error("empty unit expression")]
    Empty,

    /// A symbol matched neither the unit table nor prefix + unit.
    #[error("unknown unit symbol '{symbol}'")]
    UnknownSymbol {
        /// The unresolvable symbol.
        symbol: String,
    },

    /// An exponent after `^` was not a small integer.
    #[error("invalid exponent '{text}'")]
    InvalidExponent {
        /// The offending exponent text.
        text: String,
    },
}

/// Exponents over the SI base quantities (m, kg, s, A, K, mol, cd).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimension {
    metre: i8,
    kilogram: i8,
    second: i8,
    ampere: i8,
    kelvin: i8,
    mole: i8,
    candela: i8,
}

impl Dimension {
    /// The dimensionless (all-zero) dimension.
    pub const NONE: Dimension = Dimension::new(0, 0, 0, 0, 0, 0, 0);
    /// Length.
    pub const LENGTH: Dimension = Dimension::new(1, 0, 0, 0, 0, 0, 0);
    /// Mass.
    pub const MASS: Dimension = Dimension::new(0, 1, 0, 0, 0, 0, 0);
    /// Time.
    pub const TIME: Dimension = Dimension::new(0, 0, 1, 0, 0, 0, 0);
    /// Electric current.
    pub const CURRENT: Dimension = Dimension::new(0, 0, 0, 1, 0, 0, 0);
    /// Thermodynamic temperature.
    pub const TEMPERATURE: Dimension = Dimension::new(0, 0, 0, 0, 1, 0, 0);
    /// Energy (joule): m^2 kg s^-2.
    pub const ENERGY: Dimension = Dimension::new(2, 1, -2, 0, 0, 0, 0);
    /// Magnetic flux density (tesla): kg s^-2 A^-1.
    pub const FLUX_DENSITY: Dimension = Dimension::new(0, 1, -2, -1, 0, 0, 0);
    /// Magnetic moment (A m^2), the dimension of the Bohr magneton.
    pub const MAGNETIC_MOMENT: Dimension = Dimension::new(2, 0, 0, 1, 0, 0, 0);

    const fn new(
        metre: i8,
        kilogram: i8,
        second: i8,
        ampere: i8,
        kelvin: i8,
        mole: i8,
        candela: i8,
    ) -> Self {
        Self {
            metre,
            kilogram,
            second,
            ampere,
            kelvin,
            mole,
            candela,
        }
    }

    /// Component-wise sum, the dimension of a product of quantities.
    pub const fn times(self, other: Dimension) -> Dimension {
        Dimension::new(
            self.metre + other.metre,
            self.kilogram + other.kilogram,
            self.second + other.second,
            self.ampere + other.ampere,
            self.kelvin + other.kelvin,
            self.mole + other.mole,
            self.candela + other.candela,
        )
    }

    /// Component-wise difference, the dimension of a quotient.
    pub const fn per(self, other: Dimension) -> Dimension {
        self.times(other.powi(-1))
    }

    /// Integer power of a dimension.
    pub const fn powi(self, exponent: i8) -> Dimension {
        Dimension::new(
            self.metre * exponent,
            self.kilogram * exponent,
            self.second * exponent,
            self.ampere * exponent,
            self.kelvin * exponent,
            self.mole * exponent,
            self.candela * exponent,
        )
    }

    /// True for the all-zero dimension.
    pub fn is_dimensionless(&self) -> bool {
        *self == Dimension::NONE
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let components = [
            ("m", self.metre),
            ("kg", self.kilogram),
            ("s", self.second),
            ("A", self.ampere),
            ("K", self.kelvin),
            ("mol", self.mole),
            ("cd", self.candela),
        ];
        let mut first = true;
        for (symbol, exponent) in components {
            if exponent == 0 {
                continue;
            }
            if !first {
                write!(f, " ")?;
            }
            first = false;
            if exponent == 1 {
                write!(f, "{}", symbol)?;
            } else {
                write!(f, "{}^{}", symbol, exponent)?;
            }
        }
        if first {
            write!(f, "1")?;
        }
        Ok(())
    }
}

/// A parsed physical unit: dimension plus linear factor to coherent SI.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Unit {
    symbol: String,
    dimension: Dimension,
    si_factor: f64,
}

impl Unit {
    /// Parses a unit expression, e.g. `meV`, `J/m^3`, `A/m`, `mu_B`.
    pub fn parse(text: &str) -> Result<Unit, UnitError> {
        parse(text)
    }

    /// The original unit text.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The unit's dimension vector.
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Multiplicative factor from this unit to coherent SI.
    pub fn si_factor(&self) -> f64 {
        self.si_factor
    }

    /// True when both units measure the same physical dimension.
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Factor converting values in this unit to values in `target`.
    ///
    /// `None` when the dimensions differ.
    pub fn factor_to(&self, target: &Unit) -> Option<f64> {
        if self.is_compatible(target) {
            Some(self.si_factor / target.si_factor)
        } else {
            None
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> String {
        unit.symbol
    }
}

impl TryFrom<String> for Unit {
    type Error = UnitError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        parse(&text)
    }
}

/// Named units resolvable without a prefix.
///
/// Bare symbols are consulted before prefix decomposition, so `m` stays the
/// metre, a bare `T` stays tesla, and `mT` resolves via the prefix table.
const BASE_UNITS: &[(&str, Dimension, f64)] = &[
    ("angstrom", Dimension::LENGTH, 1e-10),
    ("mu_B", Dimension::MAGNETIC_MOMENT, 9.274_010_078_3e-24),
    ("mol", Dimension::new(0, 0, 0, 0, 0, 1, 0), 1.0),
    ("Ry", Dimension::ENERGY, 2.179_872_361_103_5e-18),
    ("eV", Dimension::ENERGY, 1.602_176_634e-19),
    ("cd", Dimension::new(0, 0, 0, 0, 0, 0, 1), 1.0),
    ("Å", Dimension::LENGTH, 1e-10),
    ("g", Dimension::MASS, 1e-3),
    ("m", Dimension::LENGTH, 1.0),
    ("s", Dimension::TIME, 1.0),
    ("A", Dimension::CURRENT, 1.0),
    ("K", Dimension::TEMPERATURE, 1.0),
    ("J", Dimension::ENERGY, 1.0),
    ("T", Dimension::FLUX_DENSITY, 1.0),
    ("1", Dimension::NONE, 1.0),
];

/// Metric prefixes accepted in front of any base unit.
const PREFIXES: &[(&str, f64)] = &[
    ("f", 1e-15),
    ("p", 1e-12),
    ("n", 1e-9),
    ("u", 1e-6),
    ("µ", 1e-6),
    ("m", 1e-3),
    ("c", 1e-2),
    ("d", 1e-1),
    ("k", 1e3),
    ("M", 1e6),
    ("G", 1e9),
    ("T", 1e12),
];

/// Parses a unit expression.
///
/// Grammar: `product ('/' product)*` where later products divide, a product
/// is factors joined by `*` or `·`, and a factor is a (possibly prefixed)
/// symbol with an optional `^<int>` exponent.
pub fn parse(text: &str) -> Result<Unit, UnitError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(UnitError::Empty);
    }

    let mut dimension = Dimension::NONE;
    let mut si_factor = 1.0_f64;

    for (i, part) in trimmed.split('/').enumerate() {
        let (part_dimension, part_factor) = parse_product(part)?;
        if i == 0 {
            dimension = part_dimension;
            si_factor = part_factor;
        } else {
            dimension = dimension.per(part_dimension);
            si_factor /= part_factor;
        }
    }

    Ok(Unit {
        symbol: trimmed.to_string(),
        dimension,
        si_factor,
    })
}

fn parse_product(text: &str) -> Result<(Dimension, f64), UnitError> {
    let mut dimension = Dimension::NONE;
    let mut factor = 1.0_f64;
    let mut seen = false;

    for piece in text.split(['*', '·']) {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        seen = true;
        let (piece_dimension, piece_factor) = parse_factor(piece)?;
        dimension = dimension.times(piece_dimension);
        factor *= piece_factor;
    }

    if !seen {
        return Err(UnitError::Empty);
    }
    Ok((dimension, factor))
}

fn parse_factor(text: &str) -> Result<(Dimension, f64), UnitError> {
    let (symbol, exponent) = match text.split_once('^') {
        Some((symbol, exp_text)) => {
            let exponent: i8 = exp_text
                .trim()
                .parse()
                .map_err(|_| UnitError::InvalidExponent {
                    text: exp_text.to_string(),
                })?;
            (symbol.trim(), exponent)
        }
        None => (text, 1),
    };

    let (dimension, factor) = resolve_symbol(symbol)?;
    Ok((dimension.powi(exponent), factor.powi(exponent as i32)))
}

fn resolve_symbol(symbol: &str) -> Result<(Dimension, f64), UnitError> {
    if symbol.is_empty() {
        return Err(UnitError::Empty);
    }

    // Exact base symbols win over prefix interpretations, so `m` is the
    // metre and `cd` is the candela.
    if let Some(&(_, dimension, factor)) = BASE_UNITS.iter().find(|(s, _, _)| *s == symbol) {
        return Ok((dimension, factor));
    }

    for &(prefix, scale) in PREFIXES {
        if let Some(rest) = symbol.strip_prefix(prefix) {
            if let Some(&(_, dimension, factor)) = BASE_UNITS.iter().find(|(s, _, _)| *s == rest) {
                return Ok((dimension, factor * scale));
            }
        }
    }

    Err(UnitError::UnknownSymbol {
        symbol: symbol.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() <= 1e-12 * b.abs().max(1.0), "{} != {}", a, b);
    }

    #[test]
    fn test_base_symbols() {
        assert_eq!(parse("m").unwrap().dimension(), Dimension::LENGTH);
        assert_eq!(parse("K").unwrap().dimension(), Dimension::TEMPERATURE);
        assert_eq!(parse("J").unwrap().dimension(), Dimension::ENERGY);
        assert_eq!(parse("T").unwrap().dimension(), Dimension::FLUX_DENSITY);
    }

    #[test]
    fn test_prefixed_symbols() {
        assert_close(parse("meV").unwrap().si_factor(), 1.602_176_634e-22);
        assert_close(parse("mRy").unwrap().si_factor(), 2.179_872_361_103_5e-21);
        assert_close(parse("mT").unwrap().si_factor(), 1e-3);
        assert_close(parse("nm").unwrap().si_factor(), 1e-9);
        assert_close(parse("kg").unwrap().si_factor(), 1.0);
    }

    #[test]
    fn test_bare_symbol_beats_prefix() {
        // `m` must be the metre, not a dangling milli prefix.
        assert_eq!(parse("m").unwrap().dimension(), Dimension::LENGTH);
        assert_close(parse("m").unwrap().si_factor(), 1.0);
        // `mol` and `cd` must not decompose into prefix + symbol.
        assert_close(parse("mol").unwrap().si_factor(), 1.0);
        assert_close(parse("cd").unwrap().si_factor(), 1.0);
    }

    #[test]
    fn test_compound_units() {
        let stiffness = parse("J/m").unwrap();
        assert_eq!(
            stiffness.dimension(),
            Dimension::ENERGY.per(Dimension::LENGTH)
        );

        let anisotropy = parse("J/m^3").unwrap();
        assert_eq!(
            anisotropy.dimension(),
            Dimension::ENERGY.per(Dimension::LENGTH.powi(3))
        );

        let magnetization = parse("A/m").unwrap();
        assert_eq!(
            magnetization.dimension(),
            Dimension::CURRENT.per(Dimension::LENGTH)
        );

        let product = parse("A*m^2").unwrap();
        assert_eq!(product.dimension(), Dimension::MAGNETIC_MOMENT);
    }

    #[test]
    fn test_bohr_magneton() {
        let moment = parse("mu_B").unwrap();
        assert_eq!(moment.dimension(), Dimension::MAGNETIC_MOMENT);
        assert!(moment.is_compatible(&parse("A*m^2").unwrap()));
    }

    #[test]
    fn test_angstrom_forms() {
        assert_close(parse("angstrom").unwrap().si_factor(), 1e-10);
        assert_close(parse("Å").unwrap().si_factor(), 1e-10);
        assert!(parse("angstrom").unwrap().is_compatible(&parse("m").unwrap()));
    }

    #[test]
    fn test_conversion_factor() {
        let mev = parse("meV").unwrap();
        let joule = parse("J").unwrap();
        assert_close(mev.factor_to(&joule).unwrap(), 1.602_176_634e-22);
        assert_close(joule.factor_to(&mev).unwrap(), 1.0 / 1.602_176_634e-22);
    }

    #[test]
    fn test_incompatible_units() {
        let metre = parse("m").unwrap();
        let joule = parse("J").unwrap();
        assert!(!metre.is_compatible(&joule));
        assert!(metre.factor_to(&joule).is_none());
    }

    #[test]
    fn test_parse_failures() {
        assert_eq!(parse(""), Err(UnitError::Empty));
        assert!(matches!(
            parse("furlong"),
            Err(UnitError::UnknownSymbol { .. })
        ));
        assert!(matches!(
            parse("m^x"),
            Err(UnitError::InvalidExponent { .. })
        ));
    }

    #[test]
    fn test_dimension_display() {
        assert_eq!(Dimension::ENERGY.to_string(), "m^2 kg s^-2");
        assert_eq!(Dimension::NONE.to_string(), "1");
        assert_eq!(Dimension::FLUX_DENSITY.to_string(), "kg s^-2 A^-1");
    }

    #[test]
    fn test_serde_roundtrip() {
        let unit = parse("J/m^3").unwrap();
        let json = serde_json::to_string(&unit).unwrap();
        assert_eq!(json, "\"J/m^3\"");
        let restored: Unit = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, unit);
    }
}
