//! Error types for closed-form pricing.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Closed-form pricing errors.
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Volatility is non-positive or not finite.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Spot is non-positive or not finite.
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Exercise style the formula does not cover.
    #[error("Unsupported exercise style: {style}")]
    UnsupportedExerciseStyle {
        /// Name of the exercise style
        style: String,
    },

    /// Payoff the formula does not cover.
    #[error("Unsupported payoff: {payoff}")]
    UnsupportedPayoff {
        /// Name of the payoff
        payoff: String,
    },

    /// Spot already lies beyond the barrier.
    #[error("barrier touched")]
    BarrierTouched,

    /// Intermediate quantity is not a finite number.
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Description of the numerical issue
        message: String,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::InvalidVolatility { .. } | AnalyticalError::InvalidSpot { .. } => {
                PricingError::InvalidInput(err.to_string())
            }
            AnalyticalError::UnsupportedExerciseStyle { .. }
            | AnalyticalError::UnsupportedPayoff { .. } => {
                PricingError::UnsupportedInstrument(err.to_string())
            }
            AnalyticalError::BarrierTouched => PricingError::PreconditionFailed(err.to_string()),
            AnalyticalError::NumericalInstability { .. } => {
                PricingError::NumericalInstability(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = AnalyticalError::InvalidSpot { spot: -1.0 };
        assert_eq!(format!("{}", err), "Invalid spot price: S = -1");
        assert_eq!(AnalyticalError::BarrierTouched.to_string(), "barrier touched");
    }

    #[test]
    fn test_into_pricing_error() {
        let err: PricingError = AnalyticalError::BarrierTouched.into();
        assert!(matches!(err, PricingError::PreconditionFailed(_)));

        let err: PricingError = AnalyticalError::UnsupportedExerciseStyle {
            style: "American".to_string(),
        }
        .into();
        assert!(matches!(err, PricingError::UnsupportedInstrument(_)));

        let err: PricingError = AnalyticalError::NumericalInstability {
            message: "NaN".to_string(),
        }
        .into();
        assert!(matches!(err, PricingError::NumericalInstability(_)));
    }
}
