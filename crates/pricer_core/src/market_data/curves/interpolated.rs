//! Interpolated zero curve implementation.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use crate::math::interpolators::{Interpolator, LinearInterpolator};
use num_traits::Float;

/// Interpolation method for yield curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurveInterpolation {
    /// Linear interpolation on zero rates; D(t) = exp(-r(t) t).
    #[default]
    Linear,

    /// Linear interpolation on ln D(t), i.e. piecewise constant forwards.
    LogLinear,
}

/// Pillar-based zero curve.
///
/// Stores (tenor, zero rate) pairs. A pillar at t = 0 is allowed and is the
/// usual way of pinning the short end of the curve; queries before the first
/// pillar or after the last one use the boundary rate when extrapolation is
/// enabled.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{YieldCurve, InterpolatedCurve, CurveInterpolation};
///
/// // 1% today, 1.5% in six months
/// let curve = InterpolatedCurve::new(
///     &[0.0, 181.0 / 365.0],
///     &[0.01, 0.015],
///     CurveInterpolation::Linear,
///     true,
/// ).unwrap();
///
/// let r = curve.zero_rate(0.25).unwrap();
/// assert!(r > 0.01 && r < 0.015);
/// ```
#[derive(Debug, Clone)]
pub struct InterpolatedCurve<T: Float> {
    tenors: Vec<T>,
    rates: Vec<T>,
    method: CurveInterpolation,
    allow_extrapolation: bool,
    /// Zero rates for `Linear`, log discount factors for `LogLinear`
    interp: LinearInterpolator<T>,
}

impl<T: Float> InterpolatedCurve<T> {
    /// Construct a zero curve from pillar points.
    ///
    /// # Errors
    ///
    /// * `MarketDataError::InsufficientData` - Fewer than 2 pillars or mismatched lengths
    /// * `MarketDataError::InvalidMaturity` - A negative tenor
    /// * `MarketDataError::Interpolation` - Tenors not strictly increasing
    pub fn new(
        tenors: &[T],
        rates: &[T],
        method: CurveInterpolation,
        allow_extrapolation: bool,
    ) -> Result<Self, MarketDataError> {
        if tenors.len() < 2 {
            return Err(MarketDataError::InsufficientData {
                got: tenors.len(),
                need: 2,
            });
        }
        if tenors.len() != rates.len() {
            return Err(MarketDataError::InsufficientData {
                got: rates.len(),
                need: tenors.len(),
            });
        }
        if let Some(&t) = tenors.iter().find(|&&t| t < T::zero()) {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }

        let interp = match method {
            CurveInterpolation::Linear => LinearInterpolator::new(tenors, rates)?,
            CurveInterpolation::LogLinear => {
                let log_dfs: Vec<T> = tenors
                    .iter()
                    .zip(rates.iter())
                    .map(|(&t, &r)| -r * t)
                    .collect();
                LinearInterpolator::new(tenors, &log_dfs)?
            }
        };

        Ok(Self {
            tenors: tenors.to_vec(),
            rates: rates.to_vec(),
            method,
            allow_extrapolation,
            interp,
        })
    }

    /// Return the tenor domain `(t_min, t_max)`.
    #[inline]
    pub fn domain(&self) -> (T, T) {
        (self.tenors[0], self.tenors[self.tenors.len() - 1])
    }

    /// Return the interpolation method.
    #[inline]
    pub fn method(&self) -> CurveInterpolation {
        self.method
    }

    /// Return whether extrapolation is allowed.
    #[inline]
    pub fn allow_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }

    /// Zero rate at `t`, honouring the extrapolation flag. Requires t > 0 for `LogLinear`.
    fn rate_at(&self, t: T) -> Result<T, MarketDataError> {
        let (t_min, t_max) = self.domain();
        let last = self.rates.len() - 1;

        if t < t_min || t > t_max {
            if !self.allow_extrapolation {
                return Err(MarketDataError::OutOfBounds {
                    x: t.to_f64().unwrap_or(0.0),
                    min: t_min.to_f64().unwrap_or(0.0),
                    max: t_max.to_f64().unwrap_or(0.0),
                });
            }
            return Ok(if t < t_min {
                self.rates[0]
            } else {
                self.rates[last]
            });
        }

        match self.method {
            CurveInterpolation::Linear => Ok(self.interp.interpolate(t)?),
            CurveInterpolation::LogLinear => {
                let log_df = self.interp.interpolate(t)?;
                Ok(-log_df / t)
            }
        }
    }
}

impl<T: Float> YieldCurve<T> for InterpolatedCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        if t == T::zero() {
            return Ok(T::one());
        }
        let rate = self.rate_at(t)?;
        Ok((-rate * t).exp())
    }

    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        self.rate_at(t)
    }
}
