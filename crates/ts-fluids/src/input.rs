//! Flash-input validation.
//!
//! A flash input is exactly two independent properties. Only the pairs in
//! [`FlashPair::ALL`] fix a state; everything else is rejected before the
//! engine is consulted.

use std::fmt;
use std::str::FromStr;

use ts_core::{ensure_finite, ensure_positive, ensure_within};

use crate::error::{StateError, StateResult};
use crate::units::parse_property_value;

/// Independent property that may appear in a flash input.
///
/// Variant order is the canonical order used when storing a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Property {
    /// Temperature [K]
    Temperature,
    /// Absolute pressure [Pa]
    Pressure,
    /// Density [kg/m³]
    Density,
    /// Specific enthalpy [J/kg]
    Enthalpy,
    /// Specific entropy [J/(kg·K)]
    Entropy,
    /// Specific internal energy [J/kg]
    InternalEnergy,
    /// Vapor mass fraction [-]
    Quality,
}

impl Property {
    pub const ALL: [Property; 7] = [
        Property::Temperature,
        Property::Pressure,
        Property::Density,
        Property::Enthalpy,
        Property::Entropy,
        Property::InternalEnergy,
        Property::Quality,
    ];

    /// Public single-letter key, matching the state-point schema.
    pub fn symbol(self) -> &'static str {
        match self {
            Property::Temperature => "T",
            Property::Pressure => "P",
            Property::Density => "D",
            Property::Enthalpy => "H",
            Property::Entropy => "S",
            Property::InternalEnergy => "E",
            Property::Quality => "Q",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Property::Temperature => "temperature",
            Property::Pressure => "pressure",
            Property::Density => "density",
            Property::Enthalpy => "enthalpy",
            Property::Entropy => "entropy",
            Property::InternalEnergy => "internal energy",
            Property::Quality => "quality",
        }
    }

    /// Parse a symbol or long name, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        let prop = match name.as_str() {
            "t" | "temperature" => Property::Temperature,
            "p" | "pressure" => Property::Pressure,
            "d" | "density" | "rho" => Property::Density,
            "h" | "enthalpy" => Property::Enthalpy,
            "s" | "entropy" => Property::Entropy,
            "e" | "energy" | "internal_energy" | "internal energy" => Property::InternalEnergy,
            "q" | "quality" => Property::Quality,
            _ => return None,
        };
        Some(prop)
    }

    /// Check `value` against the physical domain of this property.
    pub fn check(self, value: f64) -> StateResult<f64> {
        let what = self.label();
        let checked = match self {
            Property::Temperature | Property::Pressure | Property::Density => {
                ensure_positive(value, what)?
            }
            Property::Quality => ensure_within(value, 0.0, 1.0, what)?,
            Property::Enthalpy | Property::Entropy | Property::InternalEnergy => {
                ensure_finite(value, what)?
            }
        };
        Ok(checked)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Property {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Property::parse(s)
            .ok_or_else(|| StateError::invalid_input(format!("unknown property '{}'", s.trim())))
    }
}

/// Supported independent-property pairs.
///
/// Named in canonical order: `TP` is temperature then pressure.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlashPair {
    TP,
    TD,
    TH,
    TS,
    TE,
    TQ,
    PD,
    PH,
    PS,
    PE,
    PQ,
    DH,
    DS,
    DE,
    HS,
    ES,
}

impl FlashPair {
    pub const ALL: [FlashPair; 16] = [
        FlashPair::TP,
        FlashPair::TD,
        FlashPair::TH,
        FlashPair::TS,
        FlashPair::TE,
        FlashPair::TQ,
        FlashPair::PD,
        FlashPair::PH,
        FlashPair::PS,
        FlashPair::PE,
        FlashPair::PQ,
        FlashPair::DH,
        FlashPair::DS,
        FlashPair::DE,
        FlashPair::HS,
        FlashPair::ES,
    ];

    /// Look up the pair for two properties in either order.
    ///
    /// Returns `None` for a repeated property and for combinations that do
    /// not fix a state (density, enthalpy, entropy or energy with quality).
    pub fn from_properties(a: Property, b: Property) -> Option<Self> {
        use Property::*;

        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let pair = match (lo, hi) {
            (Temperature, Pressure) => FlashPair::TP,
            (Temperature, Density) => FlashPair::TD,
            (Temperature, Enthalpy) => FlashPair::TH,
            (Temperature, Entropy) => FlashPair::TS,
            (Temperature, InternalEnergy) => FlashPair::TE,
            (Temperature, Quality) => FlashPair::TQ,
            (Pressure, Density) => FlashPair::PD,
            (Pressure, Enthalpy) => FlashPair::PH,
            (Pressure, Entropy) => FlashPair::PS,
            (Pressure, InternalEnergy) => FlashPair::PE,
            (Pressure, Quality) => FlashPair::PQ,
            (Density, Enthalpy) => FlashPair::DH,
            (Density, Entropy) => FlashPair::DS,
            (Density, InternalEnergy) => FlashPair::DE,
            (Enthalpy, Entropy) => FlashPair::HS,
            // Entropy sorts before energy in the enum, ES is stored as (E, S).
            (Entropy, InternalEnergy) => FlashPair::ES,
            _ => return None,
        };
        Some(pair)
    }

    /// The two properties in canonical order.
    pub fn properties(self) -> (Property, Property) {
        use Property::*;

        match self {
            FlashPair::TP => (Temperature, Pressure),
            FlashPair::TD => (Temperature, Density),
            FlashPair::TH => (Temperature, Enthalpy),
            FlashPair::TS => (Temperature, Entropy),
            FlashPair::TE => (Temperature, InternalEnergy),
            FlashPair::TQ => (Temperature, Quality),
            FlashPair::PD => (Pressure, Density),
            FlashPair::PH => (Pressure, Enthalpy),
            FlashPair::PS => (Pressure, Entropy),
            FlashPair::PE => (Pressure, InternalEnergy),
            FlashPair::PQ => (Pressure, Quality),
            FlashPair::DH => (Density, Enthalpy),
            FlashPair::DS => (Density, Entropy),
            FlashPair::DE => (Density, InternalEnergy),
            FlashPair::HS => (Enthalpy, Entropy),
            FlashPair::ES => (InternalEnergy, Entropy),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FlashPair::TP => "TP",
            FlashPair::TD => "TD",
            FlashPair::TH => "TH",
            FlashPair::TS => "TS",
            FlashPair::TE => "TE",
            FlashPair::TQ => "TQ",
            FlashPair::PD => "PD",
            FlashPair::PH => "PH",
            FlashPair::PS => "PS",
            FlashPair::PE => "PE",
            FlashPair::PQ => "PQ",
            FlashPair::DH => "DH",
            FlashPair::DS => "DS",
            FlashPair::DE => "DE",
            FlashPair::HS => "HS",
            FlashPair::ES => "ES",
        }
    }
}

impl fmt::Display for FlashPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A validated flash input: a supported pair with in-domain values.
///
/// Values are stored in the pair's canonical order regardless of the order
/// the caller supplied them in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlashInput {
    pair: FlashPair,
    first: f64,
    second: f64,
}

impl FlashInput {
    pub fn new(a: (Property, f64), b: (Property, f64)) -> StateResult<Self> {
        if a.0 == b.0 {
            return Err(StateError::invalid_input(format!(
                "{} supplied twice",
                a.0.label()
            )));
        }
        let pair = FlashPair::from_properties(a.0, b.0).ok_or_else(|| {
            StateError::invalid_input(format!(
                "unsupported input pair {}{}; supported pairs: {}",
                a.0.symbol(),
                b.0.symbol(),
                supported_pairs()
            ))
        })?;

        let a_value = a.0.check(a.1)?;
        let b_value = b.0.check(b.1)?;

        let (first, second) = if pair.properties().0 == a.0 {
            (a_value, b_value)
        } else {
            (b_value, a_value)
        };

        Ok(Self {
            pair,
            first,
            second,
        })
    }

    /// Build from named numeric entries, e.g. `[("T", 300.0), ("P", 1e5)]`.
    pub fn from_pairs<I, K>(inputs: I) -> StateResult<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let entries = inputs
            .into_iter()
            .map(|(name, value)| -> StateResult<(Property, f64)> {
                Ok((name.as_ref().parse()?, value))
            })
            .collect::<StateResult<Vec<_>>>()?;

        match entries.as_slice() {
            [a, b] => Self::new(*a, *b),
            other => Err(StateError::invalid_input(format!(
                "expected exactly two flash inputs, got {}",
                other.len()
            ))),
        }
    }

    pub fn pair(&self) -> FlashPair {
        self.pair
    }

    /// Both entries in canonical order.
    pub fn values(&self) -> [(Property, f64); 2] {
        let (a, b) = self.pair.properties();
        [(a, self.first), (b, self.second)]
    }

    pub fn value_of(&self, property: Property) -> Option<f64> {
        self.values()
            .into_iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v)
    }
}

impl fmt::Display for FlashInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [(a, va), (b, vb)] = self.values();
        write!(f, "{a}={va}, {b}={vb}")
    }
}

/// Validate numeric flash inputs (SI units).
pub fn validate<I, K>(inputs: I) -> StateResult<FlashInput>
where
    I: IntoIterator<Item = (K, f64)>,
    K: AsRef<str>,
{
    FlashInput::from_pairs(inputs)
}

/// Validate textual flash inputs such as `("T", "0 C")` or `("P", "1 atm")`.
pub fn validate_text<I, K, V>(inputs: I) -> StateResult<FlashInput>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let numeric = inputs
        .into_iter()
        .map(|(name, text)| -> StateResult<(&'static str, f64)> {
            let property: Property = name.as_ref().parse()?;
            let value = parse_property_value(property, text.as_ref())?;
            Ok((property.symbol(), value))
        })
        .collect::<StateResult<Vec<_>>>()?;

    FlashInput::from_pairs(numeric)
}

fn supported_pairs() -> String {
    FlashPair::ALL
        .iter()
        .map(|p| p.label())
        .collect::<Vec<_>>()
        .join(" ")
}
