//! Phase resolution.
//!
//! Calls the engine once, checks the raw result against the engine contract
//! and classifies it as single- or two-phase. No retries.

use tracing::{debug, warn};
use ts_core::{Tolerances, nearly_equal};

use crate::engine::{OverallBundle, PhaseBundle, PropertyEngine, RawEngineState};
use crate::error::{StateError, StateResult};
use crate::input::FlashInput;

/// A raw engine state that passed the contract checks.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedState {
    SinglePhase(OverallBundle),
    TwoPhase {
        overall: OverallBundle,
        liquid: PhaseBundle,
        vapor: PhaseBundle,
    },
}

impl ResolvedState {
    pub fn overall(&self) -> &OverallBundle {
        match self {
            ResolvedState::SinglePhase(overall) => overall,
            ResolvedState::TwoPhase { overall, .. } => overall,
        }
    }

    pub fn is_two_phase(&self) -> bool {
        matches!(self, ResolvedState::TwoPhase { .. })
    }
}

/// Engines mark single-phase states with a quality outside `[0, 1]`
/// (`-1`, `998`, ...). Saturated endpoints count as two-phase.
pub fn is_two_phase_quality(quality: f64) -> bool {
    (0.0..=1.0).contains(&quality)
}

/// Evaluate `input` for `fluid` and classify the phase.
///
/// `fluid_name` is the identifier the caller selected; it only appears in
/// error messages and logs.
pub fn resolve<E>(
    engine: &E,
    fluid_name: &str,
    fluid: &E::Fluid,
    input: &FlashInput,
) -> StateResult<ResolvedState>
where
    E: PropertyEngine + ?Sized,
{
    let raw = engine
        .evaluate_state(fluid, input)
        .map_err(|err| StateError::from_engine(err, fluid_name))?;

    let resolved = check_contract(raw, input).inspect_err(|err| {
        warn!(engine = engine.name(), fluid = fluid_name, %input, "{err}");
    })?;

    debug!(
        engine = engine.name(),
        fluid = fluid_name,
        %input,
        two_phase = resolved.is_two_phase(),
        "resolved state point"
    );
    Ok(resolved)
}

fn check_contract(raw: RawEngineState, input: &FlashInput) -> StateResult<ResolvedState> {
    let RawEngineState {
        mut overall,
        liquid,
        vapor,
    } = raw;

    for (key, value) in overall.defined_scalars() {
        if !value.is_finite() {
            return Err(StateError::contract(format!(
                "engine reported non-finite {key} = {value}"
            )));
        }
    }
    for (side, bundle) in [("liquid", &liquid), ("vapor", &vapor)] {
        if let Some(bundle) = bundle {
            check_phase_bundle(side, bundle)?;
        }
    }

    for (property, requested) in input.values() {
        let reported = overall.value_of(property);
        if !nearly_equal(reported, requested, Tolerances::ENGINE_ECHO) {
            return Err(StateError::contract(format!(
                "engine reported {} = {reported} for requested {requested}",
                property.symbol()
            )));
        }
        overall.set_value(property, requested);
    }

    if !is_two_phase_quality(overall.quality) {
        return Ok(ResolvedState::SinglePhase(overall));
    }

    match (liquid, vapor) {
        (Some(liquid), Some(vapor)) => Ok(ResolvedState::TwoPhase {
            overall,
            liquid,
            vapor,
        }),
        (None, _) => Err(StateError::contract(format!(
            "two-phase state (Q = {}) without saturated liquid properties",
            overall.quality
        ))),
        (_, None) => Err(StateError::contract(format!(
            "two-phase state (Q = {}) without saturated vapor properties",
            overall.quality
        ))),
    }
}

fn check_phase_bundle(side: &str, bundle: &PhaseBundle) -> StateResult<()> {
    let fields = [
        ("density", bundle.density),
        ("cp", bundle.cp),
        ("cv", bundle.cv),
        ("conductivity", bundle.conductivity),
        ("viscosity", bundle.viscosity),
    ];
    match fields
        .into_iter()
        .find(|(_, value)| value.is_some_and(|v| !v.is_finite()))
    {
        Some((name, value)) => Err(StateError::contract(format!(
            "engine reported non-finite {side} {name} = {value:?}"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::input::validate;

    fn overall(t: f64, p: f64, q: f64) -> OverallBundle {
        OverallBundle {
            temperature: t,
            pressure: p,
            density: 1.25,
            internal_energy: 2.0e5,
            enthalpy: 2.8e5,
            entropy: 6.7e3,
            cp: Some(1040.0),
            cv: Some(743.0),
            sound_speed: Some(337.0),
            quality: q,
            composition: vec![1.0],
            liquid_density: Some(1.25),
            vapor_density: Some(1.25),
            conductivity: Some(0.024),
            viscosity: Some(1.7e-5),
            surface_tension: None,
        }
    }

    #[test]
    fn quality_classification() {
        assert!(is_two_phase_quality(0.0));
        assert!(is_two_phase_quality(0.5));
        assert!(is_two_phase_quality(1.0));
        assert!(!is_two_phase_quality(-1.0));
        assert!(!is_two_phase_quality(998.0));
        assert!(!is_two_phase_quality(f64::NAN));
    }

    #[test]
    fn single_phase_inputs_are_pinned() {
        let input = validate([("T", 273.15), ("P", 101_300.0)]).unwrap();
        let raw = RawEngineState::single_phase(overall(273.150_000_01, 101_300.01, -1.0));

        let resolved = check_contract(raw, &input).unwrap();
        assert!(!resolved.is_two_phase());
        assert_eq!(resolved.overall().temperature, 273.15);
        assert_eq!(resolved.overall().pressure, 101_300.0);
    }

    #[test]
    fn echo_mismatch_is_contract_violation() {
        let input = validate([("T", 273.15), ("P", 101_300.0)]).unwrap();
        let raw = RawEngineState::single_phase(overall(280.0, 101_300.0, -1.0));

        let err = check_contract(raw, &input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EngineContract);
    }

    #[test]
    fn non_finite_output_is_contract_violation() {
        let input = validate([("T", 273.15), ("P", 101_300.0)]).unwrap();
        let mut bundle = overall(273.15, 101_300.0, -1.0);
        bundle.entropy = f64::NAN;

        let err = check_contract(RawEngineState::single_phase(bundle), &input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EngineContract);
    }

    #[test]
    fn non_finite_sub_bundle_is_contract_violation() {
        let input = validate([("T", 220.0), ("Q", 0.5)]).unwrap();
        let finite = PhaseBundle {
            density: Some(649.6),
            cp: Some(2041.3),
            cv: Some(1410.0),
            conductivity: Some(0.12),
            viscosity: Some(4.6e-4),
        };

        let mut liquid = finite.clone();
        liquid.cp = Some(f64::NAN);
        let raw = RawEngineState::two_phase(overall(220.0, 14_023.0, 0.5), liquid, finite.clone());
        let err = check_contract(raw, &input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EngineContract);
        assert!(err.to_string().contains("liquid cp"));

        let mut vapor = finite.clone();
        vapor.viscosity = Some(f64::INFINITY);
        let raw = RawEngineState::two_phase(overall(220.0, 14_023.0, 0.5), finite, vapor);
        let err = check_contract(raw, &input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EngineContract);
        assert!(err.to_string().contains("vapor viscosity"));
    }

    #[test]
    fn two_phase_needs_both_sub_bundles() {
        let input = validate([("T", 220.0), ("Q", 0.5)]).unwrap();
        let raw = RawEngineState {
            overall: overall(220.0, 14_023.0, 0.5),
            liquid: Some(PhaseBundle::default()),
            vapor: None,
        };

        let err = check_contract(raw, &input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EngineContract);
        assert!(err.to_string().contains("vapor"));
    }

    #[test]
    fn saturated_endpoint_is_two_phase() {
        let input = validate([("T", 220.0), ("Q", 0.0)]).unwrap();
        let raw = RawEngineState::two_phase(
            overall(220.0, 14_023.0, 0.0),
            PhaseBundle::default(),
            PhaseBundle::default(),
        );

        assert!(check_contract(raw, &input).unwrap().is_two_phase());
    }
}
