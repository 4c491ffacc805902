use crate::{CoreError, CoreResult};

/// Floating point type used throughout the system.
pub type Real = f64;

/// Absolute + relative tolerance pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Tolerances {
    /// Tolerance used to compare engine echoes of requested flash inputs.
    pub const ENGINE_ECHO: Tolerances = Tolerances {
        abs: 1e-6,
        rel: 1e-6,
    };
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> CoreResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> CoreResult<Real> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(CoreError::NotPositive { what, value: v })
    }
}

/// Finite and inside the closed interval `[min, max]`.
pub fn ensure_within(v: Real, min: Real, max: Real, what: &'static str) -> CoreResult<Real> {
    let v = ensure_finite(v, what)?;
    if (min..=max).contains(&v) {
        Ok(v)
    } else {
        Err(CoreError::OutOfDomain {
            what,
            value: v,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn engine_echo_tolerance_is_relative() {
        let tol = Tolerances::ENGINE_ECHO;
        assert!(nearly_equal(101_300.0, 101_300.05, tol));
        assert!(!nearly_equal(101_300.0, 101_301.0, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero() {
        assert!(ensure_positive(1.0, "p").is_ok());
        assert!(matches!(
            ensure_positive(0.0, "p"),
            Err(CoreError::NotPositive { what: "p", .. })
        ));
        assert!(matches!(
            ensure_positive(Real::INFINITY, "p"),
            Err(CoreError::NonFinite { .. })
        ));
    }

    #[test]
    fn ensure_within_is_inclusive() {
        assert_eq!(ensure_within(0.0, 0.0, 1.0, "q").unwrap(), 0.0);
        assert_eq!(ensure_within(1.0, 0.0, 1.0, "q").unwrap(), 1.0);
        assert!(ensure_within(1.0 + 1e-9, 0.0, 1.0, "q").is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn nearly_equal_is_symmetric(a in -1e9_f64..1e9, b in -1e9_f64..1e9) {
            let tol = Tolerances::ENGINE_ECHO;
            prop_assert_eq!(nearly_equal(a, b, tol), nearly_equal(b, a, tol));
        }

        #[test]
        fn ensure_within_accepts_unit_interval(q in 0.0_f64..=1.0) {
            prop_assert!(ensure_within(q, 0.0, 1.0, "q").is_ok());
        }
    }
}
