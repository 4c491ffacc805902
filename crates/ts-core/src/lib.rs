//! ts-core: shared foundation for thermostate.
//!
//! Contains:
//! - units (uom SI types + constructors for the state-point schema)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
