//! Error types for Monte Carlo engine construction.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Configuration error raised by [`McEngineBuilder`](super::McEngineBuilder).
///
/// These errors occur at build time, before any path is simulated.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Neither a step count nor a steps-per-year density was given.
    #[error("no time steps provided")]
    NoTimeSteps,

    /// Both a step count and a steps-per-year density were given.
    #[error("both time steps and time steps per year provided")]
    StepsOverspecified,

    /// A step count or density of zero.
    #[error("{name} must be positive, got 0")]
    ZeroSteps {
        /// Offending option.
        name: &'static str,
    },

    /// Both a sample count and an absolute tolerance were given.
    #[error("number of samples and tolerance are mutually exclusive")]
    SamplesAndTolerance,

    /// Neither a sample count nor an absolute tolerance was given.
    #[error("neither number of samples nor tolerance provided")]
    NoStoppingRule,

    /// Tolerance requested with a random policy that has no error estimate.
    #[error("chosen random generator policy ({policy}) does not allow an error estimate")]
    ErrorEstimateUnavailable {
        /// Policy name.
        policy: &'static str,
    },

    /// Tolerance not strictly positive and finite.
    #[error("absolute tolerance must be positive, got {tolerance}")]
    NonPositiveTolerance {
        /// Offending tolerance.
        tolerance: f64,
    },

    /// A sample count or cap of zero.
    #[error("{name} must be positive, got 0")]
    ZeroSamples {
        /// Offending option.
        name: &'static str,
    },

    /// Freeze offset negative or not finite.
    #[error("freeze offset must be finite and non-negative, got {offset}")]
    InvalidFreezeOffset {
        /// Offending offset.
        offset: f64,
    },
}

impl From<ConfigError> for PricingError {
    fn from(err: ConfigError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        assert_eq!(ConfigError::NoTimeSteps.to_string(), "no time steps provided");
        assert_eq!(
            ConfigError::StepsOverspecified.to_string(),
            "both time steps and time steps per year provided"
        );
        let err = ConfigError::ErrorEstimateUnavailable {
            policy: "low_discrepancy",
        };
        assert!(err.to_string().contains("does not allow an error estimate"));

        let err = ConfigError::ZeroSamples { name: "samples" };
        assert_eq!(err.to_string(), "samples must be positive, got 0");
    }

    #[test]
    fn test_into_pricing_error() {
        let err: PricingError = ConfigError::NoStoppingRule.into();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }
}
