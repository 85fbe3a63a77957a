//! Instrument construction errors.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Errors raised while building an instrument.
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -40.0 };
/// assert!(format!("{}", err).contains("-40"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Strike is non-positive or not finite.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Exercise time is non-positive or not finite.
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Barrier level is non-positive or not finite.
    #[error("Invalid barrier: H = {barrier}")]
    InvalidBarrier {
        /// The invalid barrier value
        barrier: f64,
    },

    /// Fixing schedule is empty or contains non-finite times.
    #[error("Invalid fixings: {message}")]
    InvalidFixings {
        /// Description of the problem
        message: String,
    },

    /// Any other parameter failure.
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Description of the parameter error
        message: String,
    },
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}
