//! Closed-form pricing under constant Black-Scholes parameters.
//!
//! This module provides:
//! - [`distributions`]: standard normal CDF, PDF and inverse CDF
//! - [`BlackScholes`]: European vanilla and cash-or-nothing prices with dividend yield
//! - [`barrier_price`]: continuously monitored single barriers with rebate
//! - [`AnalyticEuropeanEngine`] and [`AnalyticBarrierEngine`]: reference
//!   engines for validating Monte Carlo results
//!
//! All formulas work in `f64`.

pub mod barrier;
pub mod black_scholes;
pub mod distributions;
pub mod error;

pub use barrier::{barrier_price, AnalyticBarrierEngine};
pub use black_scholes::{AnalyticEuropeanEngine, BlackScholes};
pub use distributions::{inverse_norm_cdf, norm_cdf, norm_pdf};
pub use error::AnalyticalError;
