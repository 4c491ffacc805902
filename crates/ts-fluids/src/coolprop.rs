//! CoolProp-based property engine.

use rfluids::prelude::*;

use crate::catalog::{FluidCatalogEntry, Substance, resolve_fluid};
use crate::engine::{OverallBundle, PhaseBundle, PropertyEngine, RawEngineState};
use crate::error::EngineError;
use crate::input::{FlashInput, Property};
use crate::resolver::is_two_phase_quality;

/// Quality reported for states where CoolProp does not define one.
const SINGLE_PHASE_QUALITY: f64 = -1.0;

/// CoolProp backend (through `rfluids`) for catalog fluids.
///
/// Thread-safe: every evaluation builds its own rfluids `Fluid`, nothing is
/// cached between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoolPropEngine;

impl CoolPropEngine {
    pub fn new() -> Self {
        Self
    }

    fn fluid_at(
        &self,
        entry: &FluidCatalogEntry,
        a: (Property, f64),
        b: (Property, f64),
    ) -> Result<Fluid, EngineError> {
        let undefined: Fluid<Undefined> = match entry.substance {
            Substance::Pure(pure) => Fluid::from(pure),
            Substance::Mixture(mix) => Fluid::from(mix),
        };
        undefined
            .in_state(fluid_input(a.0, a.1), fluid_input(b.0, b.1))
            .map_err(|e| {
                classify(format!(
                    "{} at {}={}, {}={}: {e}",
                    entry.display_name, a.0, a.1, b.0, b.1
                ))
            })
    }

    fn saturated_phase(
        &self,
        entry: &FluidCatalogEntry,
        temperature: f64,
        quality: f64,
    ) -> Result<PhaseBundle, EngineError> {
        let mut fluid = self.fluid_at(
            entry,
            (Property::Temperature, temperature),
            (Property::Quality, quality),
        )?;
        Ok(PhaseBundle {
            density: fluid.density().ok(),
            cp: fluid.specific_heat().ok(),
            cv: fluid.specific_heat_const_volume().ok(),
            conductivity: fluid.conductivity().ok(),
            viscosity: fluid.dynamic_viscosity().ok(),
        })
    }
}

impl PropertyEngine for CoolPropEngine {
    type Fluid = &'static FluidCatalogEntry;

    fn name(&self) -> &str {
        "CoolProp"
    }

    fn lookup_fluid(&self, identifier: &str) -> Option<Self::Fluid> {
        resolve_fluid(identifier)
    }

    fn evaluate_state(
        &self,
        fluid: &Self::Fluid,
        input: &FlashInput,
    ) -> Result<RawEngineState, EngineError> {
        let entry: &FluidCatalogEntry = fluid;
        let [a, b] = input.values();
        let mut state = self.fluid_at(entry, a, b)?;

        let quality = state.quality().unwrap_or(SINGLE_PHASE_QUALITY);
        let two_phase = is_two_phase_quality(quality);

        let temperature = required(state.temperature(), "temperature")?;
        let density = required(state.density(), "density")?;

        let mut overall = OverallBundle {
            temperature,
            pressure: required(state.pressure(), "pressure")?,
            density,
            internal_energy: required(state.internal_energy(), "internal energy")?,
            enthalpy: required(state.enthalpy(), "enthalpy")?,
            entropy: required(state.entropy(), "entropy")?,
            cp: None,
            cv: None,
            sound_speed: None,
            quality,
            composition: composition(entry),
            liquid_density: None,
            vapor_density: None,
            conductivity: None,
            viscosity: None,
            surface_tension: None,
        };

        if !two_phase {
            overall.cp = state.specific_heat().ok();
            overall.cv = state.specific_heat_const_volume().ok();
            overall.sound_speed = state.sound_speed().ok();
            overall.liquid_density = Some(density);
            overall.vapor_density = Some(density);
            overall.conductivity = state.conductivity().ok();
            overall.viscosity = state.dynamic_viscosity().ok();
            return Ok(RawEngineState::single_phase(overall));
        }

        // Transport properties are undefined for the two-phase mixture itself;
        // evaluate them on the saturated boundaries at the same temperature.
        let liquid = self.saturated_phase(entry, temperature, 0.0)?;
        let vapor = self.saturated_phase(entry, temperature, 1.0)?;
        overall.liquid_density = liquid.density;
        overall.vapor_density = vapor.density;
        overall.surface_tension = state.surface_tension().ok();

        Ok(RawEngineState::two_phase(overall, liquid, vapor))
    }
}

fn fluid_input(property: Property, value: f64) -> FluidInput {
    match property {
        Property::Temperature => FluidInput::temperature(value),
        Property::Pressure => FluidInput::pressure(value),
        Property::Density => FluidInput::density(value),
        Property::Enthalpy => FluidInput::enthalpy(value),
        Property::Entropy => FluidInput::entropy(value),
        Property::InternalEnergy => FluidInput::internal_energy(value),
        Property::Quality => FluidInput::quality(value),
    }
}

// Predefined mixtures are opaque catalog identifiers; their component
// fractions are not exposed.
fn composition(entry: &FluidCatalogEntry) -> Vec<f64> {
    match entry.substance {
        Substance::Pure(_) => vec![1.0],
        Substance::Mixture(_) => Vec::new(),
    }
}

fn required<E: std::fmt::Display>(value: Result<f64, E>, what: &str) -> Result<f64, EngineError> {
    value.map_err(|e| classify(format!("could not evaluate {what}: {e}")))
}

/// Sort a CoolProp failure message into the engine error categories.
fn classify(message: String) -> EngineError {
    let lower = message.to_ascii_lowercase();
    let mentions = |markers: &[&str]| markers.iter().any(|m| lower.contains(m));

    if mentions(&["converge", "iteration", "solver", "brent", "secant"]) {
        EngineError::NoConvergence { message }
    } else if mentions(&[
        "out of range",
        "outside the range",
        "bound",
        "too low",
        "too high",
        "above the maximum",
        "below the minimum",
        "less than",
        "greater than",
        "must be",
    ]) {
        EngineError::OutOfBounds { message }
    } else if mentions(&["input pair", "not implemented", "not supported", "invalid input"]) {
        EngineError::UnsupportedInputs { message }
    } else {
        EngineError::NoConvergence { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_name() {
        assert_eq!(CoolPropEngine::new().name(), "CoolProp");
    }

    #[test]
    fn lookup_uses_catalog() {
        let engine = CoolPropEngine::new();
        assert_eq!(
            engine.lookup_fluid("Nitrogen").map(|e| e.canonical_id),
            Some("nitrogen")
        );
        assert!(engine.lookup_fluid("urine").is_none());
    }

    #[test]
    fn classifies_messages() {
        assert!(matches!(
            classify("Temperature to QT_flash [500 K] must be in range [200 K, 400 K]".into()),
            EngineError::OutOfBounds { .. }
        ));
        assert!(matches!(
            classify("Brent's method did not converge".into()),
            EngineError::NoConvergence { .. }
        ));
        assert!(matches!(
            classify("This pair of inputs [DmassSmass] is not implemented".into()),
            EngineError::UnsupportedInputs { .. }
        ));
        assert!(matches!(
            classify("something odd happened".into()),
            EngineError::NoConvergence { .. }
        ));
    }

    #[test]
    fn pure_fluids_report_unit_composition() {
        let nitrogen = resolve_fluid("nitrogen").unwrap();
        assert_eq!(composition(nitrogen), vec![1.0]);
        let r410a = resolve_fluid("r410a").unwrap();
        assert!(composition(r410a).is_empty());
    }
}
