//! Static dispatch over the concrete volatility term structures.

use super::{BlackVarianceCurve, FlatVol, VolatilitySurface};
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Static dispatch enum wrapping concrete volatility implementations.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{VolSurfaceEnum, VolatilitySurface};
///
/// let vol = VolSurfaceEnum::flat(0.2_f64);
/// assert_eq!(vol.volatility(100.0, 1.0).unwrap(), 0.2);
/// ```
#[derive(Debug, Clone)]
pub enum VolSurfaceEnum<T: Float> {
    /// Constant volatility
    Flat(FlatVol<T>),
    /// Pillar-based Black variance curve
    VarianceCurve(BlackVarianceCurve<T>),
}

impl<T: Float> VolSurfaceEnum<T> {
    /// Create a flat volatility variant.
    #[inline]
    pub fn flat(sigma: T) -> Self {
        VolSurfaceEnum::Flat(FlatVol::new(sigma))
    }
}

impl<T: Float> VolatilitySurface<T> for VolSurfaceEnum<T> {
    fn volatility(&self, strike: T, expiry: T) -> Result<T, MarketDataError> {
        match self {
            VolSurfaceEnum::Flat(s) => s.volatility(strike, expiry),
            VolSurfaceEnum::VarianceCurve(s) => s.volatility(strike, expiry),
        }
    }

    fn black_variance(&self, strike: T, expiry: T) -> Result<T, MarketDataError> {
        match self {
            VolSurfaceEnum::Flat(s) => s.black_variance(strike, expiry),
            VolSurfaceEnum::VarianceCurve(s) => s.black_variance(strike, expiry),
        }
    }

    fn local_volatility(&self, strike: T, t: T) -> Result<T, MarketDataError> {
        match self {
            VolSurfaceEnum::Flat(s) => s.local_volatility(strike, t),
            VolSurfaceEnum::VarianceCurve(s) => s.local_volatility(strike, t),
        }
    }

    fn strike_domain(&self) -> (T, T) {
        match self {
            VolSurfaceEnum::Flat(s) => s.strike_domain(),
            VolSurfaceEnum::VarianceCurve(s) => s.strike_domain(),
        }
    }

    fn expiry_domain(&self) -> (T, T) {
        match self {
            VolSurfaceEnum::Flat(s) => s.expiry_domain(),
            VolSurfaceEnum::VarianceCurve(s) => s.expiry_domain(),
        }
    }
}

impl<T: Float> From<FlatVol<T>> for VolSurfaceEnum<T> {
    fn from(s: FlatVol<T>) -> Self {
        VolSurfaceEnum::Flat(s)
    }
}

impl<T: Float> From<BlackVarianceCurve<T>> for VolSurfaceEnum<T> {
    fn from(s: BlackVarianceCurve<T>) -> Self {
        VolSurfaceEnum::VarianceCurve(s)
    }
}
