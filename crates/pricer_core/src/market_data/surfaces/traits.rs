//! Volatility term structure trait definition.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Step used by the default finite-difference local volatility.
const LOCAL_VOL_DT: f64 = 1.0e-4;

/// Generic Black volatility term structure.
///
/// # Contract
///
/// - `volatility(strike, expiry)` returns the Black implied volatility σ(K, T)
/// - `black_variance(strike, expiry)` returns the total variance σ²(K, T)·T
/// - `local_volatility(strike, t)` returns the instantaneous volatility at `t`
///
/// The local volatility default is exact only for strike-independent
/// structures, where it reduces to `sqrt(dV/dt)`.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{VolatilitySurface, FlatVol};
///
/// let surface = FlatVol::new(0.20_f64);
/// assert_eq!(surface.volatility(100.0, 1.0).unwrap(), 0.20);
/// assert!((surface.black_variance(100.0, 0.5).unwrap() - 0.02).abs() < 1e-15);
/// assert_eq!(surface.local_volatility(100.0, 0.3).unwrap(), 0.20);
/// ```
pub trait VolatilitySurface<T: Float> {
    /// Return the Black volatility for given strike and expiry.
    ///
    /// # Errors
    ///
    /// * `MarketDataError::InvalidStrike` - If strike <= 0
    /// * `MarketDataError::InvalidExpiry` - If expiry < 0
    /// * `MarketDataError::OutOfBounds` - If outside the valid domain
    fn volatility(&self, strike: T, expiry: T) -> Result<T, MarketDataError>;

    /// Return the total Black variance σ²·T; zero at expiry 0.
    fn black_variance(&self, strike: T, expiry: T) -> Result<T, MarketDataError> {
        if expiry < T::zero() {
            return Err(MarketDataError::InvalidExpiry {
                expiry: expiry.to_f64().unwrap_or(0.0),
            });
        }
        if expiry == T::zero() {
            return Ok(T::zero());
        }
        let sigma = self.volatility(strike, expiry)?;
        Ok(sigma * sigma * expiry)
    }

    /// Return the instantaneous (local) volatility at time `t`.
    ///
    /// Default: forward difference of the total variance over
    /// `[t, t + 1e-4]`.
    fn local_volatility(&self, strike: T, t: T) -> Result<T, MarketDataError> {
        let h = T::from(LOCAL_VOL_DT).unwrap_or_else(T::epsilon);
        let v1 = self.black_variance(strike, t)?;
        let v2 = self.black_variance(strike, t + h)?;
        let slope = (v2 - v1) / h;
        if slope < T::zero() {
            return Err(MarketDataError::DecreasingVariance {
                t: (t + h).to_f64().unwrap_or(0.0),
                variance: v2.to_f64().unwrap_or(0.0),
                previous: v1.to_f64().unwrap_or(0.0),
            });
        }
        Ok(slope.sqrt())
    }

    /// Return the valid strike domain `(K_min, K_max)`.
    fn strike_domain(&self) -> (T, T);

    /// Return the valid expiry domain `(T_min, T_max)`.
    fn expiry_domain(&self) -> (T, T);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // σ(T) = a + b T
    struct LinearVol {
        a: f64,
        b: f64,
    }

    impl VolatilitySurface<f64> for LinearVol {
        fn volatility(&self, strike: f64, expiry: f64) -> Result<f64, MarketDataError> {
            if strike <= 0.0 {
                return Err(MarketDataError::InvalidStrike { strike });
            }
            Ok(self.a + self.b * expiry)
        }

        fn strike_domain(&self) -> (f64, f64) {
            (0.0, f64::INFINITY)
        }

        fn expiry_domain(&self) -> (f64, f64) {
            (0.0, f64::INFINITY)
        }
    }

    #[test]
    fn test_default_black_variance() {
        let surface = LinearVol { a: 0.2, b: 0.1 };
        assert_relative_eq!(
            surface.black_variance(100.0, 1.0).unwrap(),
            0.09,
            epsilon = 1e-14
        );
        assert_eq!(surface.black_variance(100.0, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_default_black_variance_negative_expiry() {
        let surface = LinearVol { a: 0.2, b: 0.0 };
        assert!(matches!(
            surface.black_variance(100.0, -1.0),
            Err(MarketDataError::InvalidExpiry { .. })
        ));
    }

    #[test]
    fn test_default_local_volatility() {
        // V(t) = (a + b t)^2 t, dV/dt = (a + b t)(a + 3 b t)
        let surface = LinearVol { a: 0.2, b: 0.1 };
        let t = 0.5;
        let expected = ((0.2 + 0.05) * (0.2 + 0.15_f64)).sqrt();
        assert_relative_eq!(
            surface.local_volatility(100.0, t).unwrap(),
            expected,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_default_local_volatility_decreasing_variance() {
        let surface = LinearVol { a: 0.2, b: -1.0 };
        assert!(matches!(
            surface.local_volatility(100.0, 0.15),
            Err(MarketDataError::DecreasingVariance { .. })
        ));
    }
}
