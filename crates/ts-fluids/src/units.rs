//! Unit-aware text input for flash values.
//!
//! Converts user text such as `"0 C"`, `"14.7 psia"` or `"50%"` into the SI
//! value the engine expects. Plain numbers are taken as SI. Physical domain
//! checks stay with [`Property::check`](crate::Property::check); this layer
//! only converts.

use thiserror::Error;

use crate::error::StateError;
use crate::input::Property;

/// Error in unit parsing or conversion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    /// Input text did not parse to a number + optional unit
    #[error("Could not parse {quantity} from '{text}'")]
    ParseError { text: String, quantity: &'static str },

    /// Unit not recognized for this quantity
    #[error("Unknown unit '{unit}' for {quantity}")]
    UnknownUnit { unit: String, quantity: &'static str },

    /// Unit that needs qualification (plain "psi" requires "psia" or "psig")
    #[error("Ambiguous unit '{unit}': {reason}")]
    AmbiguousUnit { unit: String, reason: &'static str },
}

impl From<UnitError> for StateError {
    fn from(err: UnitError) -> Self {
        StateError::invalid_input(err.to_string())
    }
}

/// Parse `text` as a value of `property`, returning SI units.
pub fn parse_property_value(property: Property, text: &str) -> Result<f64, UnitError> {
    let text = text.trim();
    match property {
        Property::Temperature => parse_temperature(text),
        Property::Pressure => parse_pressure(text),
        Property::Density => parse_density(text),
        Property::Enthalpy | Property::InternalEnergy => parse_specific_energy(text, property),
        Property::Entropy => parse_specific_entropy(text),
        Property::Quality => parse_quality(text),
    }
}

/// Kelvin.
fn parse_temperature(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input, "temperature")?;

    let kelvin = match unit.to_lowercase().as_str() {
        "" | "k" | "kelvin" => value,
        "c" | "°c" | "degc" | "celsius" => value + 273.15,
        "f" | "°f" | "degf" | "fahrenheit" => (value + 459.67) * 5.0 / 9.0,
        "r" | "°r" | "degr" | "rankine" => value * 5.0 / 9.0,
        _ => return Err(unknown(unit, "temperature")),
    };
    Ok(kelvin)
}

/// Pa, absolute. Gauge units assume a standard atmosphere.
fn parse_pressure(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input, "pressure")?;

    let pa = match unit.to_lowercase().as_str() {
        "" | "pa" | "pascal" => value,
        "kpa" => value * 1e3,
        "mpa" => value * 1e6,
        "bar" => value * 1e5,
        "mbar" | "millibar" => value * 100.0,
        "barg" => (value + 1.013_25) * 1e5,
        "atm" => value * 101_325.0,
        "torr" | "mmhg" => value * 133.322_368,
        "psia" => value * 6_894.757,
        "psig" => (value + 14.695_95) * 6_894.757,
        "psi" => {
            return Err(UnitError::AmbiguousUnit {
                unit: unit.to_string(),
                reason: "use 'psia' (absolute) or 'psig' (gauge)",
            });
        }
        _ => return Err(unknown(unit, "pressure")),
    };
    Ok(pa)
}

/// kg/m³.
fn parse_density(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input, "density")?;

    let kg_m3 = match unit.to_lowercase().as_str() {
        "" | "kg/m^3" | "kg/m³" | "kg/m3" => value,
        "g/cm^3" | "g/cm³" | "g/cm3" | "g/ml" => value * 1e3,
        "g/l" => value,
        "lbm/ft^3" | "lbm/ft3" => value * 16.018_46,
        "mol/l" | "mol/dm3" => {
            return Err(UnitError::AmbiguousUnit {
                unit: unit.to_string(),
                reason: "molar density needs a molar mass; use a mass basis",
            });
        }
        _ => return Err(unknown(unit, "density")),
    };
    Ok(kg_m3)
}

/// J/kg.
fn parse_specific_energy(input: &str, property: Property) -> Result<f64, UnitError> {
    let quantity = property.label();
    let (value, unit) = split_value_and_unit(input, quantity)?;

    let j_kg = match unit.to_lowercase().as_str() {
        "" | "j/kg" => value,
        "kj/kg" => value * 1e3,
        "mj/kg" => value * 1e6,
        "btu/lbm" | "btu/lb" => value * 2_326.0,
        _ => return Err(unknown(unit, quantity)),
    };
    Ok(j_kg)
}

/// J/(kg·K).
fn parse_specific_entropy(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input, "entropy")?;

    let j_kg_k = match unit.to_lowercase().as_str() {
        "" | "j/(kg·k)" | "j/(kg k)" | "j/(kg*k)" | "j/kg/k" | "j/kg-k" => value,
        "kj/(kg·k)" | "kj/(kg k)" | "kj/(kg*k)" | "kj/kg/k" | "kj/kg-k" => value * 1e3,
        "btu/(lbm·r)" | "btu/(lbm r)" | "btu/(lbm*r)" | "btu/lbm/r" => value * 4_186.8,
        _ => return Err(unknown(unit, "entropy")),
    };
    Ok(j_kg_k)
}

/// Fraction, accepting percent notation.
fn parse_quality(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input, "quality")?;

    match unit {
        "" => Ok(value),
        "%" => Ok(value / 100.0),
        _ => Err(unknown(unit, "quality")),
    }
}

fn unknown(unit: &str, quantity: &'static str) -> UnitError {
    UnitError::UnknownUnit {
        unit: unit.to_string(),
        quantity,
    }
}

/// Split a value+unit string at the longest prefix that parses as a number.
///
/// - "70F" -> (70.0, "F")
/// - "1e5 Pa" -> (100000.0, "Pa")
/// - "300" -> (300.0, "")
fn split_value_and_unit<'a>(
    input: &'a str,
    quantity: &'static str,
) -> Result<(f64, &'a str), UnitError> {
    let trimmed = input.trim();

    let split = trimmed
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .rev()
        .find_map(|end| {
            let number = trimmed[..end].trim_end();
            looks_numeric(number)
                .then(|| number.parse::<f64>().ok())
                .flatten()
                .map(|value| (value, trimmed[end..].trim()))
        });

    split.ok_or_else(|| UnitError::ParseError {
        text: input.to_string(),
        quantity,
    })
}

// Rust's float parser also accepts "inf" and "nan"; unit text must not be
// swallowed as a number.
fn looks_numeric(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn parse_kelvin() {
        assert_eq!(parse_temperature("300 K").unwrap(), 300.0);
        assert_eq!(parse_temperature("300K").unwrap(), 300.0);
        assert_eq!(parse_temperature("300").unwrap(), 300.0);
    }

    #[test]
    fn parse_celsius_and_fahrenheit() {
        assert!(close(parse_temperature("0 C").unwrap(), 273.15));
        assert!(close(parse_temperature("32F").unwrap(), 273.15));
        assert!(close(parse_temperature("-40 °C").unwrap(), 233.15));
    }

    #[test]
    fn parse_pressure_absolute() {
        assert_eq!(parse_pressure("101325 Pa").unwrap(), 101_325.0);
        assert_eq!(parse_pressure("1 bar").unwrap(), 1e5);
        assert!(close(parse_pressure("101.3 kPa").unwrap(), 101_300.0));
        assert_eq!(parse_pressure("1e5").unwrap(), 1e5);
        assert!((parse_pressure("14.7 psia").unwrap() - 101_352.93).abs() < 0.01);
    }

    #[test]
    fn parse_pressure_gauge() {
        assert!(close(parse_pressure("0 psig").unwrap(), 14.695_95 * 6_894.757));
        assert!(close(parse_pressure("0 barg").unwrap(), 101_325.0));
    }

    #[test]
    fn reject_plain_psi() {
        assert!(matches!(
            parse_pressure("14.7 psi"),
            Err(UnitError::AmbiguousUnit { unit, .. }) if unit == "psi"
        ));
    }

    #[test]
    fn parse_density_units() {
        assert_eq!(parse_density("1000 kg/m3").unwrap(), 1000.0);
        assert_eq!(parse_density("1 g/cm^3").unwrap(), 1000.0);
    }

    #[test]
    fn parse_energy_units() {
        assert_eq!(
            parse_property_value(Property::Enthalpy, "250 kJ/kg").unwrap(),
            250_000.0
        );
        assert_eq!(
            parse_property_value(Property::InternalEnergy, "-12.5").unwrap(),
            -12.5
        );
        assert_eq!(
            parse_property_value(Property::Entropy, "6.5 kJ/kg/K").unwrap(),
            6_500.0
        );
    }

    #[test]
    fn parse_quality_percent() {
        assert_eq!(parse_quality("0.5").unwrap(), 0.5);
        assert_eq!(parse_quality("50%").unwrap(), 0.5);
        assert_eq!(parse_quality("50 %").unwrap(), 0.5);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_property_value(Property::Temperature, "hot"),
            Err(UnitError::ParseError { .. })
        ));
        assert!(matches!(
            parse_property_value(Property::Temperature, "inf"),
            Err(UnitError::ParseError { .. })
        ));
        assert!(matches!(
            parse_property_value(Property::Pressure, "3 furlongs"),
            Err(UnitError::UnknownUnit { .. })
        ));
    }

    #[test]
    fn unit_errors_become_invalid_input() {
        let err: StateError = parse_pressure("2 psi").unwrap_err().into();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidInput);
    }
}
