//! Black variance curve: strike-independent, linear in total variance.

use super::VolatilitySurface;
use crate::market_data::error::MarketDataError;
use crate::math::interpolators::{Interpolator, LinearInterpolator};
use num_traits::Float;

/// Strike-independent Black volatility term structure.
///
/// Built from volatility quotes σᵢ at pillar times tᵢ > 0. The total
/// variance Vᵢ = σᵢ² tᵢ is interpolated linearly in time, anchored at
/// V(0) = 0. Beyond the last pillar the last volatility is held flat, i.e.
/// V(t) = V_n · t / t_n, when extrapolation is enabled (the default).
///
/// Local volatility is piecewise constant: `sqrt(dV/dt)` on each segment,
/// taking the right-hand segment at a pillar.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{BlackVarianceCurve, VolatilitySurface};
///
/// // 20% at three months, 25% at six months
/// let curve = BlackVarianceCurve::new(&[0.25_f64, 0.5], &[0.20, 0.25]).unwrap();
///
/// // Flat at 20% up to the first pillar
/// assert!((curve.volatility(40.0, 0.1).unwrap() - 0.20).abs() < 1e-12);
/// assert!((curve.volatility(40.0, 0.5).unwrap() - 0.25).abs() < 1e-12);
///
/// // Forward volatility between the pillars exceeds both quotes
/// assert!(curve.local_volatility(40.0, 0.3).unwrap() > 0.25);
/// ```
#[derive(Debug, Clone)]
pub struct BlackVarianceCurve<T: Float> {
    times: Vec<T>,
    variances: LinearInterpolator<T>,
    allow_extrapolation: bool,
}

impl<T: Float> BlackVarianceCurve<T> {
    /// Construct a variance curve from pillar times and Black volatilities.
    ///
    /// # Errors
    ///
    /// * `MarketDataError::InsufficientData` - No pillar or mismatched lengths
    /// * `MarketDataError::InvalidExpiry` - A non-positive pillar time
    /// * `MarketDataError::InvalidVolatility` - A non-positive or non-finite quote
    /// * `MarketDataError::DecreasingVariance` - Total variance falls between pillars
    /// * `MarketDataError::Interpolation` - Pillar times not strictly increasing
    pub fn new(times: &[T], vols: &[T]) -> Result<Self, MarketDataError> {
        if times.is_empty() {
            return Err(MarketDataError::InsufficientData { got: 0, need: 1 });
        }
        if times.len() != vols.len() {
            return Err(MarketDataError::InsufficientData {
                got: vols.len(),
                need: times.len(),
            });
        }
        if let Some(&t) = times.iter().find(|&&t| t <= T::zero()) {
            return Err(MarketDataError::InvalidExpiry {
                expiry: t.to_f64().unwrap_or(0.0),
            });
        }
        if let Some(&s) = vols.iter().find(|&&s| !(s > T::zero()) || !s.is_finite()) {
            return Err(MarketDataError::InvalidVolatility {
                sigma: s.to_f64().unwrap_or(f64::NAN),
            });
        }

        let mut knots = Vec::with_capacity(times.len() + 1);
        let mut variances = Vec::with_capacity(times.len() + 1);
        knots.push(T::zero());
        variances.push(T::zero());
        for (&t, &s) in times.iter().zip(vols.iter()) {
            let v = s * s * t;
            let previous = variances[variances.len() - 1];
            if v < previous {
                return Err(MarketDataError::DecreasingVariance {
                    t: t.to_f64().unwrap_or(0.0),
                    variance: v.to_f64().unwrap_or(0.0),
                    previous: previous.to_f64().unwrap_or(0.0),
                });
            }
            knots.push(t);
            variances.push(v);
        }

        Ok(Self {
            times: times.to_vec(),
            variances: LinearInterpolator::new(&knots, &variances)?,
            allow_extrapolation: true,
        })
    }

    /// Enable or disable flat-volatility extrapolation past the last pillar.
    pub fn with_extrapolation(mut self, allow: bool) -> Self {
        self.allow_extrapolation = allow;
        self
    }

    /// Last pillar time.
    #[inline]
    pub fn max_time(&self) -> T {
        self.times[self.times.len() - 1]
    }

    /// Pillar times.
    #[inline]
    pub fn times(&self) -> &[T] {
        &self.times
    }

    fn check_time(&self, t: T) -> Result<(), MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidExpiry {
                expiry: t.to_f64().unwrap_or(0.0),
            });
        }
        if t > self.max_time() && !self.allow_extrapolation {
            return Err(MarketDataError::OutOfBounds {
                x: t.to_f64().unwrap_or(0.0),
                min: 0.0,
                max: self.max_time().to_f64().unwrap_or(0.0),
            });
        }
        Ok(())
    }

    fn variance_at(&self, t: T) -> Result<T, MarketDataError> {
        self.check_time(t)?;
        let t_max = self.max_time();
        if t <= t_max {
            Ok(self.variances.interpolate(t)?)
        } else {
            let v_max = self.variances.interpolate(t_max)?;
            Ok(v_max * t / t_max)
        }
    }

    fn check_strike(strike: T) -> Result<(), MarketDataError> {
        if strike <= T::zero() {
            return Err(MarketDataError::InvalidStrike {
                strike: strike.to_f64().unwrap_or(0.0),
            });
        }
        Ok(())
    }
}

impl<T: Float> VolatilitySurface<T> for BlackVarianceCurve<T> {
    /// `sqrt(V(t) / t)`; at t = 0 the limit, which is the first-segment volatility.
    fn volatility(&self, strike: T, expiry: T) -> Result<T, MarketDataError> {
        Self::check_strike(strike)?;
        if expiry == T::zero() {
            return self.local_volatility(strike, expiry);
        }
        let v = self.variance_at(expiry)?;
        Ok((v / expiry).sqrt())
    }

    fn black_variance(&self, strike: T, expiry: T) -> Result<T, MarketDataError> {
        Self::check_strike(strike)?;
        self.variance_at(expiry)
    }

    fn local_volatility(&self, strike: T, t: T) -> Result<T, MarketDataError> {
        Self::check_strike(strike)?;
        self.check_time(t)?;
        let knots = self.variances.xs();
        let values = self.variances.ys();
        let n = knots.len();
        // Segment [knots[i], knots[i+1]) containing t; the tail beyond the last
        // pillar continues at the last pillar's Black variance rate.
        let slope = if t >= knots[n - 1] {
            values[n - 1] / knots[n - 1]
        } else {
            let i = knots.partition_point(|&k| k <= t) - 1;
            (values[i + 1] - values[i]) / (knots[i + 1] - knots[i])
        };
        Ok(slope.sqrt())
    }

    #[inline]
    fn strike_domain(&self) -> (T, T) {
        (T::zero(), T::infinity())
    }

    fn expiry_domain(&self) -> (T, T) {
        if self.allow_extrapolation {
            (T::zero(), T::infinity())
        } else {
            (T::zero(), self.max_time())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn two_pillar_curve() -> BlackVarianceCurve<f64> {
        BlackVarianceCurve::new(&[0.25, 0.5], &[0.20, 0.25]).unwrap()
    }

    #[test]
    fn test_reprices_pillars() {
        let curve = two_pillar_curve();
        assert_relative_eq!(curve.volatility(40.0, 0.25).unwrap(), 0.20, epsilon = 1e-14);
        assert_relative_eq!(curve.volatility(40.0, 0.5).unwrap(), 0.25, epsilon = 1e-14);
    }

    #[test]
    fn test_variance_linear_between_pillars() {
        let curve = two_pillar_curve();
        let v1 = 0.2 * 0.2 * 0.25;
        let v2 = 0.25 * 0.25 * 0.5;
        let mid = curve.black_variance(40.0, 0.375).unwrap();
        assert_relative_eq!(mid, 0.5 * (v1 + v2), epsilon = 1e-14);
    }

    #[test]
    fn test_local_vol_on_segments() {
        let curve = two_pillar_curve();
        assert_relative_eq!(curve.local_volatility(40.0, 0.0).unwrap(), 0.20, epsilon = 1e-14);
        assert_relative_eq!(curve.local_volatility(40.0, 0.1).unwrap(), 0.20, epsilon = 1e-14);

        // Right-hand segment at the pillar
        let fwd_var = (0.25 * 0.25 * 0.5 - 0.2 * 0.2 * 0.25) / 0.25;
        assert_relative_eq!(
            curve.local_volatility(40.0, 0.25).unwrap(),
            f64::sqrt(fwd_var),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_flat_vol_extrapolation() {
        let curve = two_pillar_curve();
        assert_relative_eq!(curve.volatility(40.0, 1.0).unwrap(), 0.25, epsilon = 1e-14);
        assert_relative_eq!(curve.local_volatility(40.0, 1.0).unwrap(), 0.25, epsilon = 1e-14);
    }

    #[test]
    fn test_extrapolation_disabled() {
        let curve = two_pillar_curve().with_extrapolation(false);
        assert!(matches!(
            curve.volatility(40.0, 1.0),
            Err(MarketDataError::OutOfBounds { .. })
        ));
        assert_eq!(curve.expiry_domain().1, 0.5);
    }

    #[test]
    fn test_rejects_decreasing_variance() {
        let result = BlackVarianceCurve::new(&[0.25_f64, 0.5], &[0.40, 0.20]);
        assert!(matches!(
            result,
            Err(MarketDataError::DecreasingVariance { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_quotes() {
        assert!(BlackVarianceCurve::new(&[0.0_f64, 0.5], &[0.2, 0.2]).is_err());
        assert!(BlackVarianceCurve::new(&[0.25_f64], &[0.0]).is_err());
        assert!(BlackVarianceCurve::<f64>::new(&[], &[]).is_err());
    }

    #[test]
    fn test_invalid_strike() {
        let curve = two_pillar_curve();
        assert!(matches!(
            curve.volatility(-1.0, 0.3),
            Err(MarketDataError::InvalidStrike { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_variance_non_decreasing(t1 in 0.0f64..2.0, dt in 0.0f64..1.0) {
            let curve = two_pillar_curve();
            let v1 = curve.black_variance(40.0, t1).unwrap();
            let v2 = curve.black_variance(40.0, t1 + dt).unwrap();
            prop_assert!(v2 >= v1 - 1e-15);
        }
    }
}
