//! Black-Scholes process with constant parameters.

use super::StochasticProcess1D;
use pricer_core::market_data::MarketDataError;

/// Time-homogeneous Black-Scholes process.
///
/// Holds only the four scalars (x0, q, r, σ); none of them change after
/// construction. Drift and diffusion are those of `ln S`:
///
/// ```text
/// μ = r − q − σ²/2,   σ(t, x) = σ
/// ```
///
/// # Example
///
/// ```
/// use pricer_models::models::{ConstantBlackScholesProcess, StochasticProcess1D};
///
/// let p = ConstantBlackScholesProcess::new(36.0, 0.0, 0.01, 0.2);
/// assert!((p.drift(0.0, 36.0).unwrap() - (0.01 - 0.02)).abs() < 1e-15);
/// assert_eq!(p.diffusion(5.0, 1.0).unwrap(), 0.2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstantBlackScholesProcess {
    x0: f64,
    dividend_yield: f64,
    risk_free_rate: f64,
    volatility: f64,
}

impl ConstantBlackScholesProcess {
    /// Construct from spot, dividend yield, risk-free rate and volatility.
    pub fn new(x0: f64, dividend_yield: f64, risk_free_rate: f64, volatility: f64) -> Self {
        Self {
            x0,
            dividend_yield,
            risk_free_rate,
            volatility,
        }
    }

    /// Continuously compounded dividend yield q.
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Continuously compounded risk-free rate r.
    #[inline]
    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    /// Volatility σ.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    #[inline]
    fn log_drift(&self) -> f64 {
        self.risk_free_rate - self.dividend_yield - 0.5 * self.volatility * self.volatility
    }
}

impl StochasticProcess1D for ConstantBlackScholesProcess {
    #[inline]
    fn x0(&self) -> f64 {
        self.x0
    }

    #[inline]
    fn drift(&self, _t: f64, _x: f64) -> Result<f64, MarketDataError> {
        Ok(self.log_drift())
    }

    #[inline]
    fn diffusion(&self, _t: f64, _x: f64) -> Result<f64, MarketDataError> {
        Ok(self.volatility)
    }

    #[inline]
    fn evolve(&self, _t0: f64, x0: f64, dt: f64, dw: f64) -> Result<f64, MarketDataError> {
        Ok(x0 * (self.log_drift() * dt + self.volatility * dt.sqrt() * dw).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_accessors() {
        let p = ConstantBlackScholesProcess::new(36.0, 0.02, 0.01, 0.25);
        assert_eq!(p.x0(), 36.0);
        assert_eq!(p.dividend_yield(), 0.02);
        assert_eq!(p.risk_free_rate(), 0.01);
        assert_eq!(p.volatility(), 0.25);
    }

    #[test]
    fn test_zero_volatility_drift() {
        let p = ConstantBlackScholesProcess::new(100.0, 0.01, 0.05, 0.0);
        assert_relative_eq!(p.drift(0.0, 100.0).unwrap(), 0.04, epsilon = 1e-15);
        let x1 = p.evolve(0.0, 100.0, 0.5, 1.7).unwrap();
        assert_relative_eq!(x1, 100.0 * (0.02_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_apply_is_exponential() {
        let p = ConstantBlackScholesProcess::new(36.0, 0.0, 0.01, 0.2);
        assert_relative_eq!(p.apply(36.0, 0.1), 36.0 * 0.1_f64.exp(), epsilon = 1e-12);
    }

    proptest! {
        #[test]
        fn prop_drift_and_diffusion_ignore_state(
            t in 0.0f64..10.0,
            x in 0.01f64..1000.0,
        ) {
            let p = ConstantBlackScholesProcess::new(36.0, 0.01, 0.03, 0.3);
            prop_assert_eq!(p.drift(t, x).unwrap(), p.drift(0.0, 36.0).unwrap());
            prop_assert_eq!(p.diffusion(t, x).unwrap(), 0.3);
        }

        #[test]
        fn prop_evolve_matches_default_step(
            dw in -5.0f64..5.0,
            dt in 1e-4f64..1.0,
        ) {
            let p = ConstantBlackScholesProcess::new(36.0, 0.01, 0.03, 0.3);
            let fast = p.evolve(0.0, 36.0, dt, dw).unwrap();
            let mu = p.drift(0.0, 36.0).unwrap();
            let slow = p.apply(36.0, mu * dt + 0.3 * dt.sqrt() * dw);
            prop_assert!((fast - slow).abs() <= 1e-12 * slow.abs());
        }
    }
}
