//! # pricer_core: Market Data Foundation for Monte Carlo Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core serves as the bottom layer of the pricing stack, providing:
//! - Yield curves: `FlatCurve`, `InterpolatedCurve` (`market_data::curves`)
//! - Black volatility term structures: `FlatVol`, `BlackVarianceCurve`
//!   (`market_data::surfaces`)
//! - Piecewise linear interpolation (`math::interpolators`)
//! - Time types: `Date`, `DayCountConvention` (`types::time`)
//! - Error types: `PricingError`, `DateError`, `InterpolationError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::curves::{FlatCurve, YieldCurve};
//! use pricer_core::market_data::surfaces::{BlackVarianceCurve, VolatilitySurface};
//! use pricer_core::types::{Date, DayCountConvention};
//!
//! let today = Date::from_ymd(2022, 2, 24).unwrap();
//! let expiry = Date::from_ymd(2022, 5, 24).unwrap();
//! let t = DayCountConvention::ActualActual365.year_fraction_dates(today, expiry);
//!
//! let curve = FlatCurve::new(0.01_f64);
//! let df = curve.discount_factor(t).unwrap();
//! assert!(df < 1.0);
//!
//! let vols = BlackVarianceCurve::new(&[0.25, 0.5], &[0.20, 0.25]).unwrap();
//! let sigma = vols.volatility(40.0, t).unwrap();
//! assert!(sigma > 0.19 && sigma < 0.21);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for Date and DayCountConvention

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
