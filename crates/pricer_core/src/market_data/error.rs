//! Market data error types.
//!
//! This module provides structured error handling for term structure
//! construction and lookups.

use crate::types::{InterpolationError, PricingError};
use thiserror::Error;

/// Market data operation errors.
///
/// # Variants
///
/// - `InvalidMaturity`: Negative (or, for rates, zero) time to maturity
/// - `InvalidStrike`: Non-positive strike price
/// - `InvalidExpiry`: Negative time to expiry
/// - `InvalidVolatility`: Non-positive or non-finite volatility quote
/// - `DecreasingVariance`: Black variance falls between two pillars
/// - `OutOfBounds`: Query outside valid domain with extrapolation disabled
/// - `Interpolation`: Wrapped interpolation error
/// - `InsufficientData`: Not enough data points for construction
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InvalidMaturity { t: -1.0 };
/// assert!(format!("{}", err).contains("-1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Invalid maturity.
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// The invalid maturity value
        t: f64,
    },

    /// Invalid strike price (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid expiry (negative).
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Invalid volatility quote.
    #[error("Invalid volatility: sigma = {sigma}")]
    InvalidVolatility {
        /// The rejected volatility
        sigma: f64,
    },

    /// Black variance must be non-decreasing in time.
    #[error("Decreasing variance at t = {t}: {variance} < {previous}")]
    DecreasingVariance {
        /// Pillar time where the variance drops
        t: f64,
        /// Variance at the pillar
        variance: f64,
        /// Variance at the previous pillar
        previous: f64,
    },

    /// Query point outside valid domain.
    #[error("Out of bounds: {x} not in [{min}, {max}]")]
    OutOfBounds {
        /// The query point that was out of bounds
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Interpolation error.
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    /// Insufficient data for construction.
    #[error("Insufficient data: got {got}, need {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },
}

impl From<MarketDataError> for PricingError {
    fn from(err: MarketDataError) -> Self {
        PricingError::MarketData(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_maturity_display() {
        let err = MarketDataError::InvalidMaturity { t: -1.5 };
        assert_eq!(format!("{}", err), "Invalid maturity: t = -1.5");
    }

    #[test]
    fn test_decreasing_variance_display() {
        let err = MarketDataError::DecreasingVariance {
            t: 0.5,
            variance: 0.01,
            previous: 0.02,
        };
        assert_eq!(
            format!("{}", err),
            "Decreasing variance at t = 0.5: 0.01 < 0.02"
        );
    }

    #[test]
    fn test_out_of_bounds_display() {
        let err = MarketDataError::OutOfBounds {
            x: 5.0,
            min: 0.0,
            max: 3.0,
        };
        assert_eq!(format!("{}", err), "Out of bounds: 5 not in [0, 3]");
    }

    #[test]
    fn test_from_interpolation_error() {
        let interp_err = InterpolationError::InsufficientData { got: 1, need: 2 };
        let mkt_err: MarketDataError = interp_err.into();
        assert!(matches!(mkt_err, MarketDataError::Interpolation(_)));
    }

    #[test]
    fn test_into_pricing_error() {
        let mkt_err = MarketDataError::InvalidMaturity { t: -1.0 };
        let pricing_err: PricingError = mkt_err.into();
        match pricing_err {
            PricingError::MarketData(msg) => assert!(msg.contains("-1")),
            other => panic!("Expected MarketData variant, got {:?}", other),
        }
    }
}
