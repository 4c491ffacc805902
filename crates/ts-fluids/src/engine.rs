//! Property engine abstraction.
//!
//! An engine resolves fluid identifiers and evaluates the thermodynamic state
//! for a validated [`FlashInput`]. Everything above this trait is engine
//! agnostic: validation, phase classification, result assembly and error
//! translation.

use std::fmt::Debug;
use std::sync::Arc;

use crate::error::EngineError;
use crate::input::{FlashInput, Property};

/// Overall (mixture-average) properties reported by an engine.
///
/// Units are SI and identical to the public state-point schema.
#[derive(Debug, Clone, PartialEq)]
pub struct OverallBundle {
    /// Temperature [K]
    pub temperature: f64,
    /// Pressure [Pa]
    pub pressure: f64,
    /// Density [kg/m³]
    pub density: f64,
    /// Specific internal energy [J/kg]
    pub internal_energy: f64,
    /// Specific enthalpy [J/kg]
    pub enthalpy: f64,
    /// Specific entropy [J/(kg·K)]
    pub entropy: f64,
    /// Isobaric heat capacity [J/(kg·K)], undefined inside the dome
    pub cp: Option<f64>,
    /// Isochoric heat capacity [J/(kg·K)], undefined inside the dome
    pub cv: Option<f64>,
    /// Speed of sound [m/s], undefined inside the dome
    pub sound_speed: Option<f64>,
    /// Vapor mass fraction. Values outside `[0, 1]` mark a single-phase state.
    pub quality: f64,
    /// Mole fractions of the fluid's components
    pub composition: Vec<f64>,
    /// Saturated liquid density [kg/m³]
    pub liquid_density: Option<f64>,
    /// Saturated vapor density [kg/m³]
    pub vapor_density: Option<f64>,
    /// Thermal conductivity [W/(m·K)]
    pub conductivity: Option<f64>,
    /// Dynamic viscosity [Pa·s]
    pub viscosity: Option<f64>,
    /// Surface tension [N/m]
    pub surface_tension: Option<f64>,
}

impl OverallBundle {
    /// The reported value for a flash-input property.
    pub fn value_of(&self, property: Property) -> f64 {
        match property {
            Property::Temperature => self.temperature,
            Property::Pressure => self.pressure,
            Property::Density => self.density,
            Property::Enthalpy => self.enthalpy,
            Property::Entropy => self.entropy,
            Property::InternalEnergy => self.internal_energy,
            Property::Quality => self.quality,
        }
    }

    pub(crate) fn set_value(&mut self, property: Property, value: f64) {
        match property {
            Property::Temperature => self.temperature = value,
            Property::Pressure => self.pressure = value,
            Property::Density => self.density = value,
            Property::Enthalpy => self.enthalpy = value,
            Property::Entropy => self.entropy = value,
            Property::InternalEnergy => self.internal_energy = value,
            Property::Quality => self.quality = value,
        }
    }

    /// Every reported scalar with its public key, skipping undefined ones.
    pub(crate) fn defined_scalars(&self) -> Vec<(&'static str, f64)> {
        let mut out = vec![
            ("T", self.temperature),
            ("P", self.pressure),
            ("D", self.density),
            ("E", self.internal_energy),
            ("H", self.enthalpy),
            ("S", self.entropy),
            ("Q", self.quality),
        ];
        let optional = [
            ("CP", self.cp),
            ("CV", self.cv),
            ("W", self.sound_speed),
            ("DL", self.liquid_density),
            ("DV", self.vapor_density),
            ("k", self.conductivity),
            ("mu", self.viscosity),
            ("sigma", self.surface_tension),
        ];
        out.extend(optional.into_iter().filter_map(|(k, v)| v.map(|v| (k, v))));
        out.extend(self.composition.iter().map(|&x| ("X", x)));
        out
    }
}

/// Properties of one saturated phase in a two-phase state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseBundle {
    /// Density [kg/m³]
    pub density: Option<f64>,
    /// Isobaric heat capacity [J/(kg·K)]
    pub cp: Option<f64>,
    /// Isochoric heat capacity [J/(kg·K)]
    pub cv: Option<f64>,
    /// Thermal conductivity [W/(m·K)]
    pub conductivity: Option<f64>,
    /// Dynamic viscosity [Pa·s]
    pub viscosity: Option<f64>,
}

/// The engine's direct output for one flash.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEngineState {
    pub overall: OverallBundle,
    pub liquid: Option<PhaseBundle>,
    pub vapor: Option<PhaseBundle>,
}

impl RawEngineState {
    pub fn single_phase(overall: OverallBundle) -> Self {
        Self {
            overall,
            liquid: None,
            vapor: None,
        }
    }

    pub fn two_phase(overall: OverallBundle, liquid: PhaseBundle, vapor: PhaseBundle) -> Self {
        Self {
            overall,
            liquid: Some(liquid),
            vapor: Some(vapor),
        }
    }
}

/// Equation-of-state backend.
///
/// Implementations must be thread-safe (`Send + Sync`) so one engine can be
/// shared between sessions.
pub trait PropertyEngine: Send + Sync {
    /// Engine-side handle for a resolved fluid.
    type Fluid: Clone + Debug + Send + Sync;

    /// Human-readable engine name.
    fn name(&self) -> &str;

    /// Resolve a fluid identifier, or `None` if the engine does not know it.
    fn lookup_fluid(&self, identifier: &str) -> Option<Self::Fluid>;

    /// Evaluate the full state of `fluid` at `input`.
    fn evaluate_state(
        &self,
        fluid: &Self::Fluid,
        input: &FlashInput,
    ) -> Result<RawEngineState, EngineError>;
}

impl<E: PropertyEngine + ?Sized> PropertyEngine for &E {
    type Fluid = E::Fluid;

    fn name(&self) -> &str {
        (**self).name()
    }

    fn lookup_fluid(&self, identifier: &str) -> Option<Self::Fluid> {
        (**self).lookup_fluid(identifier)
    }

    fn evaluate_state(
        &self,
        fluid: &Self::Fluid,
        input: &FlashInput,
    ) -> Result<RawEngineState, EngineError> {
        (**self).evaluate_state(fluid, input)
    }
}

impl<E: PropertyEngine + ?Sized> PropertyEngine for Arc<E> {
    type Fluid = E::Fluid;

    fn name(&self) -> &str {
        (**self).name()
    }

    fn lookup_fluid(&self, identifier: &str) -> Option<Self::Fluid> {
        (**self).lookup_fluid(identifier)
    }

    fn evaluate_state(
        &self,
        fluid: &Self::Fluid,
        input: &FlashInput,
    ) -> Result<RawEngineState, EngineError> {
        (**self).evaluate_state(fluid, input)
    }
}
