//! State-point errors and the translation of engine failures into them.

use serde::Serialize;
use thiserror::Error;
use ts_core::CoreError;

/// Result type for state-point operations.
pub type StateResult<T> = Result<T, StateError>;

/// Coarse category of a [`StateError`], stable for callers that branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    UnknownFluid,
    NoFluidSelected,
    InvalidInput,
    OutOfRange,
    Convergence,
    MissingProperty,
    EngineContract,
}

/// Every failure that crosses the public boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// Selection named a fluid the engine's catalog does not know.
    #[error("Unknown fluid '{name}'")]
    UnknownFluid { name: String },

    /// A state point was requested before any successful selection.
    #[error("No fluid selected")]
    NoFluidSelected,

    /// Malformed, ambiguous, or out-of-domain flash input.
    #[error("Invalid input: {what}")]
    InvalidInput { what: String },

    /// Inputs lie outside the fluid's valid envelope.
    #[error("State outside the valid range of {fluid}: {detail}")]
    OutOfRange { fluid: String, detail: String },

    /// The engine could not compute a consistent state.
    #[error("Property engine did not converge for {fluid}: {detail}")]
    Convergence { fluid: String, detail: String },

    /// The engine result lacks a property the public schema requires.
    #[error("Property engine did not report {property}")]
    MissingProperty { property: &'static str },

    /// The engine returned an internally inconsistent result.
    #[error("Property engine contract violated: {what}")]
    EngineContract { what: String },
}

impl StateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StateError::UnknownFluid { .. } => ErrorKind::UnknownFluid,
            StateError::NoFluidSelected => ErrorKind::NoFluidSelected,
            StateError::InvalidInput { .. } => ErrorKind::InvalidInput,
            StateError::OutOfRange { .. } => ErrorKind::OutOfRange,
            StateError::Convergence { .. } => ErrorKind::Convergence,
            StateError::MissingProperty { .. } => ErrorKind::MissingProperty,
            StateError::EngineContract { .. } => ErrorKind::EngineContract,
        }
    }

    pub fn invalid_input(what: impl Into<String>) -> Self {
        StateError::InvalidInput { what: what.into() }
    }

    pub fn contract(what: impl Into<String>) -> Self {
        StateError::EngineContract { what: what.into() }
    }

    /// Translate an engine failure for `fluid` into the public taxonomy.
    ///
    /// Backend status codes are dropped here; only the message survives.
    pub fn from_engine(err: EngineError, fluid: &str) -> Self {
        let fluid = fluid.to_string();
        match err {
            EngineError::OutOfBounds { message } => StateError::OutOfRange {
                fluid,
                detail: message,
            },
            EngineError::NoConvergence { message } => StateError::Convergence {
                fluid,
                detail: message,
            },
            EngineError::UnsupportedInputs { message } => StateError::InvalidInput {
                what: format!("{fluid}: {message}"),
            },
            EngineError::Backend { message, .. } => StateError::Convergence {
                fluid,
                detail: message,
            },
        }
    }
}

impl From<CoreError> for StateError {
    fn from(err: CoreError) -> Self {
        StateError::InvalidInput {
            what: err.to_string(),
        }
    }
}

/// Failures reported by a [`PropertyEngine`](crate::PropertyEngine).
///
/// These never reach callers directly; the session translates them with
/// [`StateError::from_engine`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("inputs outside the fluid envelope: {message}")]
    OutOfBounds { message: String },

    #[error("no converged state: {message}")]
    NoConvergence { message: String },

    #[error("input pair not supported: {message}")]
    UnsupportedInputs { message: String },

    #[error("backend status {code}: {message}")]
    Backend { code: i32, message: String },
}
