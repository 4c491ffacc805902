//! Fluid selection and state-point queries.

use tracing::debug;

use crate::engine::PropertyEngine;
use crate::error::{StateError, StateResult};
use crate::input::{FlashInput, validate};
use crate::resolver::resolve;
use crate::state_point::{StatePoint, assemble};

#[derive(Debug, Clone)]
struct ActiveFluid<F> {
    identifier: String,
    handle: F,
}

/// Owns one property engine and at most one active fluid.
///
/// Selection takes `&mut self` and queries take `&self`, so a session can
/// never observe a fluid change in the middle of a query.
#[derive(Debug)]
pub struct Session<E: PropertyEngine> {
    engine: E,
    active: Option<ActiveFluid<E::Fluid>>,
}

impl<E: PropertyEngine> Session<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            active: None,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Make `identifier` the active fluid.
    ///
    /// Surrounding whitespace is ignored for the lookup, but the identifier
    /// is recorded as given. Re-selecting the active fluid is a no-op. On
    /// failure the previous selection is kept.
    pub fn select_fluid(&mut self, identifier: &str) -> StateResult<()> {
        if self.active_fluid() == Some(identifier) {
            debug!(fluid = identifier, "fluid already active");
            return Ok(());
        }

        let handle = self
            .engine
            .lookup_fluid(identifier.trim())
            .ok_or_else(|| StateError::UnknownFluid {
                name: identifier.to_string(),
            })?;

        debug!(fluid = identifier, engine = self.engine.name(), "selected fluid");
        self.active = Some(ActiveFluid {
            identifier: identifier.to_string(),
            handle,
        });
        Ok(())
    }

    /// The identifier of the active fluid, as it was selected.
    pub fn active_fluid(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.identifier.as_str())
    }

    /// Compute the state point for two named inputs, e.g.
    /// `[("T", 273.15), ("P", 101.3e3)]`.
    pub fn state_point<I, K>(&self, inputs: I) -> StateResult<StatePoint>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        // The missing selection outranks malformed input.
        if self.active.is_none() {
            return Err(StateError::NoFluidSelected);
        }
        let input = validate(inputs)?;
        self.evaluate(&input)
    }

    /// Compute the state point for an already validated input.
    pub fn evaluate(&self, input: &FlashInput) -> StateResult<StatePoint> {
        let active = self.active.as_ref().ok_or(StateError::NoFluidSelected)?;
        let resolved = resolve(&self.engine, &active.identifier, &active.handle, input)?;
        assemble(resolved)
    }
}
