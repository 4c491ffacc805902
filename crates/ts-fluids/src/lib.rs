//! ts-fluids: state-point resolution for thermostate.
//!
//! Provides:
//! - Fluid catalog and session-scoped fluid selection
//! - Flash-input validation (the supported independent-pair table)
//! - Phase resolution against a `PropertyEngine`
//! - Phase-aware `StatePoint` results with a fixed public key schema
//! - A typed error taxonomy that every failure is translated into
//!
//! # Architecture
//!
//! The `PropertyEngine` trait isolates the resolution layer from the
//! equation-of-state backend. `CoolPropEngine` (via `rfluids`) is the
//! production backend; `RecordedEngine` replays fixed states for tests and
//! offline use.
//!
//! # Example
//!
//! ```no_run
//! use ts_fluids::{CoolPropEngine, Session};
//!
//! let mut session = Session::new(CoolPropEngine::new());
//! session.select_fluid("nitrogen")?;
//!
//! let state = session.state_point([("T", 273.15), ("P", 101.3e3)])?;
//! println!("h = {:?} J/kg", state.get("H"));
//! # Ok::<(), ts_fluids::StateError>(())
//! ```

pub mod catalog;
pub mod coolprop;
pub mod engine;
pub mod error;
pub mod input;
pub mod recorded;
pub mod resolver;
pub mod session;
pub mod state_point;
pub mod units;

// Re-exports for ergonomics
pub use catalog::{FluidCatalogEntry, FluidKind, filter_catalog, fluid_catalog, resolve_fluid};
pub use coolprop::CoolPropEngine;
pub use engine::{OverallBundle, PhaseBundle, PropertyEngine, RawEngineState};
pub use error::{EngineError, ErrorKind, StateError, StateResult};
pub use input::{FlashInput, FlashPair, Property, validate, validate_text};
pub use recorded::RecordedEngine;
pub use resolver::{ResolvedState, resolve};
pub use session::Session;
pub use state_point::{
    BaseProperties, PropertyValue, SaturatedPhase, SinglePhaseState, StatePoint, TwoPhaseState,
    assemble,
};
pub use units::{UnitError, parse_property_value};
