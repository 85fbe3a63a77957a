//! Generalised Black-Scholes process driven by term structures.
//!
//! ```text
//! d ln S = (r(t) − q(t) − σ_loc(t, S)²/2) dt + σ_loc(t, S) dW
//! ```
//!
//! where `r(t)` and `q(t)` are instantaneous forward rates of the risk-free
//! and dividend curves and `σ_loc` is the local volatility implied by the
//! Black volatility surface.

use std::sync::Arc;

use super::StochasticProcess1D;
use pricer_core::market_data::{
    CurveEnum, MarketDataError, VolSurfaceEnum, VolatilitySurface, YieldCurve,
};

/// Black-Scholes process with time-dependent rates and volatility.
///
/// Term structures are shared through `Arc` so that engines, pricers and
/// the parameter freezer observe the same market data without copying it.
#[derive(Debug, Clone)]
pub struct BlackScholesProcess {
    x0: f64,
    risk_free: Arc<CurveEnum<f64>>,
    dividend: Arc<CurveEnum<f64>>,
    volatility: Arc<VolSurfaceEnum<f64>>,
}

impl BlackScholesProcess {
    /// Construct from spot and the three term structures.
    ///
    /// # Arguments
    /// * `x0` - Spot level; validated by engines at pricing time
    /// * `risk_free` - Risk-free yield curve
    /// * `dividend` - Dividend yield curve
    /// * `volatility` - Black volatility surface
    pub fn new(
        x0: f64,
        risk_free: Arc<CurveEnum<f64>>,
        dividend: Arc<CurveEnum<f64>>,
        volatility: Arc<VolSurfaceEnum<f64>>,
    ) -> Self {
        Self {
            x0,
            risk_free,
            dividend,
            volatility,
        }
    }

    /// Risk-free yield curve.
    #[inline]
    pub fn risk_free_curve(&self) -> &CurveEnum<f64> {
        &self.risk_free
    }

    /// Dividend yield curve.
    #[inline]
    pub fn dividend_curve(&self) -> &CurveEnum<f64> {
        &self.dividend
    }

    /// Black volatility surface.
    #[inline]
    pub fn volatility_surface(&self) -> &VolSurfaceEnum<f64> {
        &self.volatility
    }

    /// Return a copy with a different spot, sharing the same term structures.
    pub fn with_spot(&self, x0: f64) -> Self {
        Self {
            x0,
            risk_free: Arc::clone(&self.risk_free),
            dividend: Arc::clone(&self.dividend),
            volatility: Arc::clone(&self.volatility),
        }
    }
}

impl StochasticProcess1D for BlackScholesProcess {
    #[inline]
    fn x0(&self) -> f64 {
        self.x0
    }

    fn drift(&self, t: f64, x: f64) -> Result<f64, MarketDataError> {
        let r = self.risk_free.instantaneous_forward(t)?;
        let q = self.dividend.instantaneous_forward(t)?;
        let sigma = self.volatility.local_volatility(x, t)?;
        Ok(r - q - 0.5 * sigma * sigma)
    }

    fn diffusion(&self, t: f64, x: f64) -> Result<f64, MarketDataError> {
        self.volatility.local_volatility(x, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::{BlackVarianceCurve, CurveInterpolation, InterpolatedCurve};

    fn flat_process() -> BlackScholesProcess {
        BlackScholesProcess::new(
            100.0,
            Arc::new(CurveEnum::flat(0.05)),
            Arc::new(CurveEnum::flat(0.02)),
            Arc::new(VolSurfaceEnum::flat(0.3)),
        )
    }

    #[test]
    fn test_flat_market_drift() {
        let p = flat_process();
        let expected = 0.05 - 0.02 - 0.5 * 0.09;
        assert_relative_eq!(p.drift(0.5, 100.0).unwrap(), expected, epsilon = 1e-8);
        assert_relative_eq!(p.diffusion(0.5, 100.0).unwrap(), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_term_structure_diffusion_follows_local_vol() {
        let vol = BlackVarianceCurve::new(&[0.25, 0.5], &[0.20, 0.25]).unwrap();
        let p = BlackScholesProcess::new(
            36.0,
            Arc::new(CurveEnum::flat(0.01)),
            Arc::new(CurveEnum::flat(0.0)),
            Arc::new(VolSurfaceEnum::from(vol)),
        );

        // First segment: variance 0.04·0.25 = 0.01 over 0.25 → local vol 0.2
        assert_relative_eq!(p.diffusion(0.1, 36.0).unwrap(), 0.20, epsilon = 1e-10);

        // Second segment: (0.0625·0.5 − 0.01) / 0.25 = 0.085 → sqrt
        assert_relative_eq!(
            p.diffusion(0.3, 36.0).unwrap(),
            0.085_f64.sqrt(),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_drift_uses_forward_rates() {
        let curve = InterpolatedCurve::new(
            &[0.0, 0.5],
            &[0.01, 0.015],
            CurveInterpolation::Linear,
            true,
        )
        .unwrap();
        let p = BlackScholesProcess::new(
            36.0,
            Arc::new(CurveEnum::from(curve.clone())),
            Arc::new(CurveEnum::flat(0.0)),
            Arc::new(VolSurfaceEnum::flat(0.0)),
        );
        let fwd = curve.instantaneous_forward(0.2).unwrap();
        assert_relative_eq!(p.drift(0.2, 36.0).unwrap(), fwd, epsilon = 1e-12);
    }

    #[test]
    fn test_with_spot_shares_term_structures() {
        let p = flat_process();
        let q = p.with_spot(50.0);
        assert_eq!(q.x0(), 50.0);
        assert!(Arc::ptr_eq(&p.risk_free, &q.risk_free));
    }

    #[test]
    fn test_negative_time_propagates_error() {
        let vol = BlackVarianceCurve::new(&[0.25], &[0.2]).unwrap();
        let p = BlackScholesProcess::new(
            36.0,
            Arc::new(CurveEnum::flat(0.01)),
            Arc::new(CurveEnum::flat(0.0)),
            Arc::new(VolSurfaceEnum::from(vol)),
        );
        assert!(p.diffusion(-1.0, 36.0).is_err());
    }
}
