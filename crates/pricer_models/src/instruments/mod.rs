//! Option instruments.
//!
//! This module provides:
//! - [`Payoff`] and [`OptionType`]: striked payoffs
//! - [`Exercise`]: exercise schedules in year fractions
//! - [`EuropeanOption`], [`DiscreteAveragingAsianOption`], [`BarrierOption`]
//! - [`Instrument`] and [`PricingEngine`]: the seam between instruments and engines
//!
//! Instruments validate their own arguments at construction; engines check
//! market-dependent preconditions (spot, barrier already touched) at
//! calculation time.

mod asian;
mod barrier;
mod error;
mod exercise;
mod payoff;
mod traits;
mod vanilla;

pub use asian::DiscreteAveragingAsianOption;
pub use barrier::{BarrierOption, BarrierType};
pub use error::InstrumentError;
pub use exercise::Exercise;
pub use payoff::{OptionType, Payoff};
pub use traits::{Instrument, PricingEngine, PricingResults};
pub use vanilla::EuropeanOption;
