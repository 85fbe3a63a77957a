//! Yield curve trait definition.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Width of the interval used to approximate instantaneous forward rates.
pub const FORWARD_DT: f64 = 1.0e-4;

/// Generic yield curve trait for discount factor and rate calculations.
///
/// Times are year fractions from the evaluation date. Rates are
/// continuously compounded.
///
/// # Invariants
///
/// - D(0) = 1
/// - D(t) > 0 for all t >= 0
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{YieldCurve, FlatCurve};
///
/// let curve = FlatCurve::new(0.05_f64);
///
/// let df = curve.discount_factor(1.0).unwrap();
/// assert!((df - 0.951229).abs() < 1e-5);
///
/// let rate = curve.zero_rate(1.0).unwrap();
/// assert!((rate - 0.05).abs() < 1e-10);
///
/// let fwd = curve.instantaneous_forward(0.5).unwrap();
/// assert!((fwd - 0.05).abs() < 1e-10);
/// ```
pub trait YieldCurve<T: Float> {
    /// Return the discount factor D(t) for maturity `t`.
    ///
    /// # Errors
    ///
    /// * `MarketDataError::InvalidMaturity` - If t < 0
    /// * `MarketDataError::OutOfBounds` - If t lies beyond the curve and extrapolation is off
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError>;

    /// Return the continuously compounded zero rate for maturity `t`.
    ///
    /// Default: `r(t) = -ln(D(t)) / t`, undefined at t = 0.
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        let df = self.discount_factor(t)?;
        Ok(-df.ln() / t)
    }

    /// Return the forward rate between `t1` and `t2`.
    ///
    /// ```text
    /// f(t1, t2) = -ln(D(t2) / D(t1)) / (t2 - t1)
    /// ```
    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        let dt = t2 - t1;
        if dt <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: dt.to_f64().unwrap_or(0.0),
            });
        }
        let df1 = self.discount_factor(t1)?;
        let df2 = self.discount_factor(t2)?;
        Ok(-(df2 / df1).ln() / dt)
    }

    /// Return the instantaneous forward rate at `t`.
    ///
    /// Approximated by the forward rate over `[t, t + FORWARD_DT]`.
    fn instantaneous_forward(&self, t: T) -> Result<T, MarketDataError> {
        let h = T::from(FORWARD_DT).unwrap_or_else(T::epsilon);
        self.forward_rate(t, t + h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct LinearRateCurve {
        a: f64,
        b: f64,
    }

    // r(t) = a + b t, so f(t) = a + 2 b t
    impl YieldCurve<f64> for LinearRateCurve {
        fn discount_factor(&self, t: f64) -> Result<f64, MarketDataError> {
            if t < 0.0 {
                return Err(MarketDataError::InvalidMaturity { t });
            }
            Ok((-(self.a + self.b * t) * t).exp())
        }
    }

    #[test]
    fn test_default_zero_rate() {
        let curve = LinearRateCurve { a: 0.01, b: 0.02 };
        assert_relative_eq!(curve.zero_rate(0.5).unwrap(), 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_default_zero_rate_rejects_zero_maturity() {
        let curve = LinearRateCurve { a: 0.01, b: 0.0 };
        assert!(matches!(
            curve.zero_rate(0.0),
            Err(MarketDataError::InvalidMaturity { .. })
        ));
    }

    #[test]
    fn test_default_forward_rate_invalid_order() {
        let curve = LinearRateCurve { a: 0.05, b: 0.0 };
        assert!(curve.forward_rate(2.0, 1.0).is_err());
    }

    #[test]
    fn test_instantaneous_forward_matches_derivative() {
        let curve = LinearRateCurve { a: 0.01, b: 0.02 };
        let f = curve.instantaneous_forward(0.25).unwrap();
        assert_relative_eq!(f, 0.01 + 2.0 * 0.02 * 0.25, epsilon = 1e-5);
    }
}
