//! Query file schema.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_fluids::{FlashInput, Property, StateResult, parse_property_value, validate};

pub const LATEST_VERSION: u32 = 1;

/// A fluid and the state points to evaluate for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryFile {
    pub version: u32,
    pub fluid: String,
    #[serde(default)]
    pub points: Vec<PointDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Property name -> value, e.g. `T: 273.15` or `P: "1 atm"`.
    pub inputs: BTreeMap<String, InputValue>,
}

/// A plain SI number or text with a unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum InputValue {
    Number(f64),
    Text(String),
}

impl InputValue {
    /// SI value of this entry for `property`.
    pub fn to_si(&self, property: Property) -> StateResult<f64> {
        match self {
            InputValue::Number(v) => Ok(*v),
            InputValue::Text(text) => Ok(parse_property_value(property, text)?),
        }
    }
}

impl From<f64> for InputValue {
    fn from(value: f64) -> Self {
        InputValue::Number(value)
    }
}

impl From<&str> for InputValue {
    fn from(text: &str) -> Self {
        InputValue::Text(text.to_string())
    }
}

impl PointDef {
    pub fn new<I, K, V>(label: Option<&str>, inputs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<InputValue>,
    {
        Self {
            label: label.map(str::to_string),
            inputs: inputs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Validate this point's inputs into a flash input.
    pub fn flash_input(&self) -> StateResult<FlashInput> {
        let numeric = self
            .inputs
            .iter()
            .map(|(name, value)| -> StateResult<(&'static str, f64)> {
                let property: Property = name.parse()?;
                Ok((property.symbol(), value.to_si(property)?))
            })
            .collect::<StateResult<Vec<_>>>()?;
        validate(numeric)
    }

    /// Label for reports: the explicit label or `#<index>` (1-based).
    pub fn display_label(&self, index: usize) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => format!("#{}", index + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_numbers_and_unit_text() {
        let yaml = r#"
version: 1
fluid: nitrogen
points:
  - label: ambient
    inputs: { T: 273.15, P: 101300 }
  - inputs: { T: "0 C", P: "1 atm" }
"#;
        let file: QueryFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.points.len(), 2);
        assert_eq!(file.points[0].label.as_deref(), Some("ambient"));
        assert_eq!(file.points[1].inputs["T"], InputValue::Text("0 C".into()));

        let input = file.points[1].flash_input().unwrap();
        assert!((input.value_of(Property::Pressure).unwrap() - 101_325.0).abs() < 1e-9);
    }

    #[test]
    fn integer_yaml_values_are_numbers() {
        let point: PointDef = serde_yaml::from_str("inputs: { P: 100000, Q: 1 }").unwrap();
        assert_eq!(point.inputs["P"], InputValue::Number(100_000.0));
        assert!(point.flash_input().is_ok());
    }

    #[test]
    fn display_label_falls_back_to_position() {
        let point = PointDef::new(None, [("T", 300.0), ("P", 1e5)]);
        assert_eq!(point.display_label(2), "#3");
    }
}
