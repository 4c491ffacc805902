use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Value for {what} outside [{min}, {max}]: {value}")]
    OutOfDomain {
        what: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Value for {what} must be positive: {value}")]
    NotPositive { what: &'static str, value: f64 },
}
