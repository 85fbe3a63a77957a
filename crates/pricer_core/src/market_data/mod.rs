//! Market data structures driving the Black-Scholes process.
//!
//! # Architecture
//!
//! All structures are generic over `T: Float`; the Monte Carlo layers
//! instantiate them with `f64`.
//!
//! # Components
//!
//! - [`curves`]: Yield curve trait and implementations (FlatCurve, InterpolatedCurve)
//! - [`surfaces`]: Black volatility trait and implementations (FlatVol, BlackVarianceCurve)
//! - [`error`]: Market data error types (MarketDataError)
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::curves::{YieldCurve, FlatCurve};
//! use pricer_core::market_data::surfaces::{VolatilitySurface, FlatVol};
//!
//! let curve = FlatCurve::new(0.05_f64);
//! let df = curve.discount_factor(1.0).unwrap();
//! assert!((df - 0.951229).abs() < 1e-5);
//!
//! let vol_surface = FlatVol::new(0.20_f64);
//! let sigma = vol_surface.volatility(100.0, 1.0).unwrap();
//! assert_eq!(sigma, 0.20);
//! ```

pub mod curves;
pub mod error;
pub mod surfaces;

pub use curves::{CurveEnum, CurveInterpolation, FlatCurve, InterpolatedCurve, YieldCurve};
pub use error::MarketDataError;
pub use surfaces::{BlackVarianceCurve, FlatVol, VolSurfaceEnum, VolatilitySurface};
