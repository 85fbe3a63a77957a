//! Core time and error types.
//!
//! This module provides:
//! - `time`: `Date` and `DayCountConvention` for turning calendar dates into year fractions
//! - `error`: Structured error types for pricing, date and interpolation operations
//!
//! # Re-exports
//!
//! - [`Date`], [`DayCountConvention`], [`time_to_maturity_dates`] from `time`
//! - [`PricingError`], [`DateError`], [`InterpolationError`] from `error`

pub mod error;
pub mod time;

pub use error::{DateError, InterpolationError, PricingError};
pub use time::{time_to_maturity_dates, Date, DayCountConvention};
