//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors raised while an engine prices an instrument
//! - `DateError`: Errors from date construction and parsing
//! - `InterpolationError`: Errors from interpolation operations

use thiserror::Error;

/// Categorised pricing errors.
///
/// Raised at calculation time, after an engine has been built successfully.
/// Construction-time problems (mutually exclusive builder options and the
/// like) are reported by the engine layer's own configuration error.
///
/// # Variants
/// - `InvalidInput`: Invalid instrument data or market state (e.g. non-positive spot)
/// - `PreconditionFailed`: A pricing precondition does not hold (e.g. barrier already touched)
/// - `MarketData`: A term structure query failed
/// - `NumericalInstability`: Computation produced a non-finite value
/// - `UnsupportedInstrument`: Instrument shape not supported by the engine
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("negative or null underlying given".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: negative or null underlying given");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Invalid input data or parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A precondition required for pricing does not hold
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    /// Market data lookup failed
    #[error("Market data error: {0}")]
    MarketData(String),

    /// Numerical instability during computation
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    /// Instrument type not supported
    #[error("Unsupported instrument: {0}")]
    UnsupportedInstrument(String),
}

/// Date-related errors.
///
/// # Variants
/// - `InvalidDate`: Invalid date components (e.g., February 30th)
/// - `ParseError`: Failed to parse date string
///
/// # Examples
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),
}

/// Interpolation-related errors.
///
/// # Examples
/// ```
/// use pricer_core::types::InterpolationError;
///
/// let err = InterpolationError::OutOfBounds { x: 5.0, min: 0.0, max: 3.0 };
/// assert!(format!("{}", err).contains("outside valid domain"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpolationError {
    /// Query point outside valid interpolation domain.
    #[error("Query point {x} outside valid domain [{min}, {max}]")]
    OutOfBounds {
        /// The query point that was out of bounds
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Insufficient data points for interpolation.
    #[error("Insufficient data points: got {got}, need at least {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_display() {
        let err = PricingError::PreconditionFailed("barrier touched".to_string());
        assert_eq!(format!("{}", err), "Precondition failed: barrier touched");

        let err = PricingError::MarketData("t = -1".to_string());
        assert_eq!(format!("{}", err), "Market data error: t = -1");
    }

    #[test]
    fn test_pricing_error_is_std_error() {
        let err = PricingError::NumericalInstability("NaN payoff".to_string());
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_date_error_display() {
        let err = DateError::ParseError("bad".to_string());
        assert_eq!(format!("{}", err), "Date parse error: bad");
    }

    #[test]
    fn test_interpolation_error_display() {
        let err = InterpolationError::InsufficientData { got: 1, need: 2 };
        assert_eq!(
            format!("{}", err),
            "Insufficient data points: got 1, need at least 2"
        );
    }
}
