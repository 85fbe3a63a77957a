//! Path pricers: discounted payoffs evaluated on one simulated path.
//!
//! # Key Components
//!
//! - [`PathPricer`]: the seam between path generation and payoff evaluation
//! - [`EuropeanPathPricer`]: terminal payoff
//! - [`ArithmeticAverageStrikePathPricer`]: average-strike Asian payoff on
//!   the fixing dates
//! - [`BiasedBarrierPathPricer`]: barrier monitored on grid points only
//! - [`BarrierPathPricer`]: barrier crossings between grid points sampled
//!   from the Brownian-bridge extremum
//!
//! A pricer is owned by one simulation loop, so it may carry mutable state
//! such as an auxiliary random stream.

mod asian;
mod barrier;
mod european;

pub use asian::ArithmeticAverageStrikePathPricer;
pub use barrier::{BarrierPathPricer, BiasedBarrierPathPricer, BARRIER_UNIFORM_SEED};
pub use european::EuropeanPathPricer;

use pricer_core::types::PricingError;

use crate::mc::Path;

/// Discounted payoff of a single path.
pub trait PathPricer {
    /// Value of `path`, discounted to time zero.
    ///
    /// # Errors
    /// Market-data failures for pricers that query term structures.
    fn price(&mut self, path: &Path) -> Result<f64, PricingError>;
}
