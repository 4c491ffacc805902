//! Replay engine backed by recorded states.
//!
//! Useful for deterministic tests and for machines without the CoolProp
//! native library. Only inputs that were recorded can be evaluated.

use std::sync::atomic::{AtomicUsize, Ordering};

use ts_core::{Tolerances, nearly_equal};

use crate::engine::{PropertyEngine, RawEngineState};
use crate::error::EngineError;
use crate::input::FlashInput;

#[derive(Debug, Clone)]
struct KnownFluid {
    id: String,
    aliases: Vec<String>,
}

impl KnownFluid {
    fn is_named(&self, name: &str) -> bool {
        self.id.eq_ignore_ascii_case(name) || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone)]
struct Recording {
    fluid: String,
    input: FlashInput,
    outcome: Result<RawEngineState, EngineError>,
}

/// Engine that answers from a fixed table of (fluid, input) -> outcome.
#[derive(Debug)]
pub struct RecordedEngine {
    name: String,
    fluids: Vec<KnownFluid>,
    recordings: Vec<Recording>,
    calls: AtomicUsize,
}

impl RecordedEngine {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fluids: Vec::new(),
            recordings: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Register a fluid id and the aliases that resolve to it.
    pub fn with_fluid(mut self, id: impl Into<String>, aliases: &[&str]) -> Self {
        self.fluids.push(KnownFluid {
            id: id.into(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        });
        self
    }

    /// Record the outcome for `input` on the fluid registered as `fluid`.
    pub fn record(
        mut self,
        fluid: impl Into<String>,
        input: FlashInput,
        outcome: Result<RawEngineState, EngineError>,
    ) -> Self {
        self.recordings.push(Recording {
            fluid: fluid.into(),
            input,
            outcome,
        });
        self
    }

    /// Number of `evaluate_state` calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn find(&self, fluid: &str, input: &FlashInput) -> Option<&Recording> {
        let tol = Tolerances::default();
        self.recordings.iter().find(|rec| {
            rec.fluid == fluid
                && rec.input.pair() == input.pair()
                && rec
                    .input
                    .values()
                    .iter()
                    .zip(input.values())
                    .all(|((_, a), (_, b))| nearly_equal(*a, b, tol))
        })
    }
}

impl PropertyEngine for RecordedEngine {
    /// The registered fluid id.
    type Fluid = String;

    fn name(&self) -> &str {
        &self.name
    }

    fn lookup_fluid(&self, identifier: &str) -> Option<Self::Fluid> {
        self.fluids
            .iter()
            .find(|f| f.is_named(identifier))
            .map(|f| f.id.clone())
    }

    fn evaluate_state(
        &self,
        fluid: &Self::Fluid,
        input: &FlashInput,
    ) -> Result<RawEngineState, EngineError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        match self.find(fluid, input) {
            Some(rec) => rec.outcome.clone(),
            None => Err(EngineError::OutOfBounds {
                message: format!("no recorded state for {fluid} at {input}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::validate;

    #[test]
    fn lookup_is_case_insensitive_and_alias_aware() {
        let engine = RecordedEngine::new("table").with_fluid("nitrogen", &["N2"]);
        assert_eq!(engine.lookup_fluid("NITROGEN").as_deref(), Some("nitrogen"));
        assert_eq!(engine.lookup_fluid("n2").as_deref(), Some("nitrogen"));
        assert_eq!(engine.lookup_fluid("oxygen"), None);
    }

    #[test]
    fn unrecorded_inputs_are_out_of_bounds() {
        let engine = RecordedEngine::new("table").with_fluid("nitrogen", &[]);
        let input = validate([("T", 300.0), ("P", 1e5)]).unwrap();

        let err = engine
            .evaluate_state(&"nitrogen".to_string(), &input)
            .unwrap_err();
        assert!(matches!(err, EngineError::OutOfBounds { .. }));
        assert_eq!(engine.calls(), 1);
    }

    #[test]
    fn replays_recorded_failures() {
        let input = validate([("T", 300.0), ("P", 1e5)]).unwrap();
        let failure = EngineError::Backend {
            code: 1,
            message: "boom".into(),
        };
        let engine = RecordedEngine::new("table")
            .with_fluid("nitrogen", &[])
            .record("nitrogen", input, Err(failure.clone()));

        let replayed = engine.evaluate_state(&"nitrogen".to_string(), &input);
        assert_eq!(replayed, Err(failure));
    }
}
