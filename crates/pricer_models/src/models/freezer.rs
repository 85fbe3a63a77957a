//! Parameter freezing.
//!
//! Snapshots a [`BlackScholesProcess`] into a [`ConstantBlackScholesProcess`]
//! by reading every term structure once at a single time `t*`:
//!
//! ```text
//! r = zero_rate_r(t*),  q = zero_rate_q(t*),  σ = black_vol(K, t*)
//! ```
//!
//! `t*` is either the last grid time or the last grid time plus a small
//! offset. The offset keeps the volatility lookup off a pillar that sits
//! exactly at maturity, where the variance curve switches segments.

use super::{BlackScholesProcess, ConstantBlackScholesProcess, StochasticProcess1D};
use pricer_core::market_data::{VolatilitySurface, YieldCurve};
use pricer_core::types::PricingError;

/// Default offset for [`FreezePolicy::Offset`], in years.
pub const DEFAULT_FREEZE_OFFSET: f64 = 1.0e-2;

/// Time at which term structures are sampled when freezing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FreezePolicy {
    /// Sample at the last grid time.
    AtMaturity,
    /// Sample at the last grid time plus the given offset (years).
    Offset(f64),
}

impl Default for FreezePolicy {
    fn default() -> Self {
        FreezePolicy::Offset(DEFAULT_FREEZE_OFFSET)
    }
}

impl FreezePolicy {
    /// Check the offset is finite and non-negative.
    pub fn validate(&self) -> Result<(), PricingError> {
        match *self {
            FreezePolicy::AtMaturity => Ok(()),
            FreezePolicy::Offset(eps) if eps.is_finite() && eps >= 0.0 => Ok(()),
            FreezePolicy::Offset(eps) => Err(PricingError::InvalidInput(format!(
                "freeze offset must be finite and non-negative, got {}",
                eps
            ))),
        }
    }

    /// Sampling time for a grid ending at `t_end`.
    #[inline]
    pub fn freeze_time(&self, t_end: f64) -> f64 {
        match *self {
            FreezePolicy::AtMaturity => t_end,
            FreezePolicy::Offset(eps) => t_end + eps,
        }
    }
}

/// Freeze a term-structure process into a constant one.
///
/// # Arguments
/// * `process` - Source process; its spot is copied unchanged
/// * `grid_end` - Last time of the simulation grid
/// * `strike` - Strike used for the volatility lookup
/// * `policy` - Sampling time policy
///
/// # Errors
/// * `PricingError::InvalidInput` - Invalid offset, non-positive sampling
///   time, or non-positive or non-finite strike
/// * `PricingError::MarketData` - A term-structure query failed
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pricer_core::market_data::{CurveEnum, VolSurfaceEnum};
/// use pricer_models::models::{freeze_process, BlackScholesProcess, FreezePolicy};
///
/// let process = BlackScholesProcess::new(
///     36.0,
///     Arc::new(CurveEnum::flat(0.01)),
///     Arc::new(CurveEnum::flat(0.0)),
///     Arc::new(VolSurfaceEnum::flat(0.2)),
/// );
/// let frozen = freeze_process(&process, 0.25, 40.0, FreezePolicy::default()).unwrap();
/// assert!((frozen.risk_free_rate() - 0.01).abs() < 1e-12);
/// assert!((frozen.volatility() - 0.2).abs() < 1e-12);
/// ```
pub fn freeze_process(
    process: &BlackScholesProcess,
    grid_end: f64,
    strike: f64,
    policy: FreezePolicy,
) -> Result<ConstantBlackScholesProcess, PricingError> {
    policy.validate()?;
    if !strike.is_finite() || strike <= 0.0 {
        return Err(PricingError::InvalidInput(format!(
            "strike must be positive to freeze volatility, got {}",
            strike
        )));
    }

    let t = policy.freeze_time(grid_end);
    if t.is_nan() || t <= 0.0 {
        return Err(PricingError::InvalidInput(format!(
            "freeze time must be positive, got {}",
            t
        )));
    }

    let r = process.risk_free_curve().zero_rate(t)?;
    let q = process.dividend_curve().zero_rate(t)?;
    let sigma = process.volatility_surface().volatility(strike, t)?;

    Ok(ConstantBlackScholesProcess::new(process.x0(), q, r, sigma))
}
