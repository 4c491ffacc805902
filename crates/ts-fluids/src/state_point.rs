//! Phase-aware state-point results.
//!
//! A [`StatePoint`] always carries the base keys
//! `CP CV D E H P Q S T W X`. Single-phase results add `DL DV k mu`;
//! two-phase results add `CPL CPV CVL CVV kL kV muL muV sigma DL DV`.
//! Units are SI throughout (K, Pa, kg/m³, J/kg, J/(kg·K), m/s, Pa·s,
//! W/(m·K), N/m).

use serde::ser::{Serialize, SerializeMap, Serializer};
use ts_core::units::{
    Density, DynVisc, Pressure, Temperature, ThermalCond, Velocity, k, kg_m3, m_s, pa, pa_s, w_mk,
};

use crate::engine::{OverallBundle, PhaseBundle};
use crate::error::{StateError, StateResult};
use crate::resolver::ResolvedState;

/// Keys present in every result.
pub const BASE_KEYS: [&str; 11] = ["CP", "CV", "D", "E", "H", "P", "Q", "S", "T", "W", "X"];

/// Keys added to single-phase results.
pub const SINGLE_PHASE_KEYS: [&str; 4] = ["DL", "DV", "k", "mu"];

/// Keys added to two-phase results.
pub const TWO_PHASE_KEYS: [&str; 11] = [
    "CPL", "CPV", "CVL", "CVV", "kL", "kV", "muL", "muV", "sigma", "DL", "DV",
];

/// Properties common to both phases.
///
/// `cp`, `cv` and `w` are `None` inside the two-phase dome, where engines do
/// not define them.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseProperties {
    /// Temperature [K]
    pub t: f64,
    /// Pressure [Pa]
    pub p: f64,
    /// Density [kg/m³]
    pub d: f64,
    /// Specific internal energy [J/kg]
    pub e: f64,
    /// Specific enthalpy [J/kg]
    pub h: f64,
    /// Specific entropy [J/(kg·K)]
    pub s: f64,
    /// Isobaric heat capacity [J/(kg·K)]
    pub cp: Option<f64>,
    /// Isochoric heat capacity [J/(kg·K)]
    pub cv: Option<f64>,
    /// Speed of sound [m/s]
    pub w: Option<f64>,
    /// Quality indicator as reported by the engine
    pub q: f64,
    /// Composition (mole fractions)
    pub x: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SinglePhaseState {
    pub base: BaseProperties,
    pub dl: f64,
    pub dv: f64,
    /// Thermal conductivity [W/(m·K)]
    pub k: f64,
    /// Dynamic viscosity [Pa·s]
    pub mu: f64,
}

/// One saturated phase of a two-phase state.
#[derive(Debug, Clone, PartialEq)]
pub struct SaturatedPhase {
    pub density: f64,
    pub cp: f64,
    pub cv: f64,
    pub conductivity: f64,
    pub viscosity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TwoPhaseState {
    pub base: BaseProperties,
    pub liquid: SaturatedPhase,
    pub vapor: SaturatedPhase,
    /// Surface tension [N/m]
    pub sigma: f64,
}

/// A fully assembled state point.
#[derive(Debug, Clone, PartialEq)]
pub enum StatePoint {
    SinglePhase(SinglePhaseState),
    TwoPhase(TwoPhaseState),
}

/// A value in the flat public schema.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue<'a> {
    Scalar(f64),
    /// Defined key with no value in this phase (serialized as `null`).
    Undefined,
    Vector(&'a [f64]),
}

impl StatePoint {
    pub fn base(&self) -> &BaseProperties {
        match self {
            StatePoint::SinglePhase(state) => &state.base,
            StatePoint::TwoPhase(state) => &state.base,
        }
    }

    pub fn is_two_phase(&self) -> bool {
        matches!(self, StatePoint::TwoPhase(_))
    }

    /// The exact key set of this result.
    pub fn keys(&self) -> Vec<&'static str> {
        let extra: &[&'static str] = match self {
            StatePoint::SinglePhase(_) => &SINGLE_PHASE_KEYS,
            StatePoint::TwoPhase(_) => &TWO_PHASE_KEYS,
        };
        BASE_KEYS.iter().chain(extra).copied().collect()
    }

    /// Scalar value for `key`.
    ///
    /// `None` for unknown keys, for keys outside this phase's schema, for
    /// undefined values and for the composition vector `X`.
    pub fn get(&self, key: &str) -> Option<f64> {
        match self.lookup(key)? {
            PropertyValue::Scalar(v) => Some(v),
            PropertyValue::Undefined | PropertyValue::Vector(_) => None,
        }
    }

    /// All keys with their values, in [`keys`](Self::keys) order.
    pub fn entries(&self) -> Vec<(&'static str, PropertyValue<'_>)> {
        self.keys()
            .into_iter()
            .filter_map(|key| self.lookup(key).map(|value| (key, value)))
            .collect()
    }

    pub fn temperature(&self) -> Temperature {
        k(self.base().t)
    }

    pub fn pressure(&self) -> Pressure {
        pa(self.base().p)
    }

    pub fn density(&self) -> Density {
        kg_m3(self.base().d)
    }

    /// Speed of sound; `None` inside the dome.
    pub fn sound_speed(&self) -> Option<Velocity> {
        self.base().w.map(m_s)
    }

    /// Dynamic viscosity of a single-phase state.
    pub fn viscosity(&self) -> Option<DynVisc> {
        match self {
            StatePoint::SinglePhase(state) => Some(pa_s(state.mu)),
            StatePoint::TwoPhase(_) => None,
        }
    }

    /// Thermal conductivity of a single-phase state.
    pub fn conductivity(&self) -> Option<ThermalCond> {
        match self {
            StatePoint::SinglePhase(state) => Some(w_mk(state.k)),
            StatePoint::TwoPhase(_) => None,
        }
    }

    fn lookup(&self, key: &str) -> Option<PropertyValue<'_>> {
        use PropertyValue::Scalar;

        let base = self.base();
        let optional = |v: Option<f64>| v.map_or(PropertyValue::Undefined, Scalar);
        let value = match key {
            "T" => Scalar(base.t),
            "P" => Scalar(base.p),
            "D" => Scalar(base.d),
            "E" => Scalar(base.e),
            "H" => Scalar(base.h),
            "S" => Scalar(base.s),
            "Q" => Scalar(base.q),
            "CP" => optional(base.cp),
            "CV" => optional(base.cv),
            "W" => optional(base.w),
            "X" => PropertyValue::Vector(&base.x),
            _ => match self {
                StatePoint::SinglePhase(state) => match key {
                    "DL" => Scalar(state.dl),
                    "DV" => Scalar(state.dv),
                    "k" => Scalar(state.k),
                    "mu" => Scalar(state.mu),
                    _ => return None,
                },
                StatePoint::TwoPhase(state) => match key {
                    "DL" => Scalar(state.liquid.density),
                    "DV" => Scalar(state.vapor.density),
                    "CPL" => Scalar(state.liquid.cp),
                    "CPV" => Scalar(state.vapor.cp),
                    "CVL" => Scalar(state.liquid.cv),
                    "CVV" => Scalar(state.vapor.cv),
                    "kL" => Scalar(state.liquid.conductivity),
                    "kV" => Scalar(state.vapor.conductivity),
                    "muL" => Scalar(state.liquid.viscosity),
                    "muV" => Scalar(state.vapor.viscosity),
                    "sigma" => Scalar(state.sigma),
                    _ => return None,
                },
            },
        };
        Some(value)
    }
}

impl Serialize for StatePoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            match value {
                PropertyValue::Scalar(v) => map.serialize_entry(key, &v)?,
                PropertyValue::Undefined => map.serialize_entry(key, &Option::<f64>::None)?,
                PropertyValue::Vector(xs) => map.serialize_entry(key, xs)?,
            }
        }
        map.end()
    }
}

/// Build the public result from a resolved engine state.
pub fn assemble(resolved: ResolvedState) -> StateResult<StatePoint> {
    match resolved {
        ResolvedState::SinglePhase(overall) => {
            let dl = require(overall.liquid_density, "DL")?;
            let dv = require(overall.vapor_density, "DV")?;
            let k = require(overall.conductivity, "k")?;
            let mu = require(overall.viscosity, "mu")?;
            let base = base_properties(overall, true)?;
            Ok(StatePoint::SinglePhase(SinglePhaseState {
                base,
                dl,
                dv,
                k,
                mu,
            }))
        }
        ResolvedState::TwoPhase {
            overall,
            liquid,
            vapor,
        } => {
            let sigma = require(overall.surface_tension, "sigma")?;
            let liquid = saturated(&liquid, ["DL", "CPL", "CVL", "kL", "muL"])?;
            let vapor = saturated(&vapor, ["DV", "CPV", "CVV", "kV", "muV"])?;
            let base = base_properties(overall, false)?;
            Ok(StatePoint::TwoPhase(TwoPhaseState {
                base,
                liquid,
                vapor,
                sigma,
            }))
        }
    }
}

fn base_properties(overall: OverallBundle, single_phase: bool) -> StateResult<BaseProperties> {
    if single_phase {
        require(overall.cp, "CP")?;
        require(overall.cv, "CV")?;
        require(overall.sound_speed, "W")?;
    }
    Ok(BaseProperties {
        t: overall.temperature,
        p: overall.pressure,
        d: overall.density,
        e: overall.internal_energy,
        h: overall.enthalpy,
        s: overall.entropy,
        cp: overall.cp,
        cv: overall.cv,
        w: overall.sound_speed,
        q: overall.quality,
        x: overall.composition,
    })
}

fn saturated(bundle: &PhaseBundle, keys: [&'static str; 5]) -> StateResult<SaturatedPhase> {
    let [density, cp, cv, conductivity, viscosity] = keys;
    Ok(SaturatedPhase {
        density: require(bundle.density, density)?,
        cp: require(bundle.cp, cp)?,
        cv: require(bundle.cv, cv)?,
        conductivity: require(bundle.conductivity, conductivity)?,
        viscosity: require(bundle.viscosity, viscosity)?,
    })
}

fn require(value: Option<f64>, property: &'static str) -> StateResult<f64> {
    value.ok_or(StateError::MissingProperty { property })
}
