//! Instrument and pricing-engine seams.
//!
//! Instruments are plain data with a result slot. Engines read an
//! instrument's arguments through [`PricingEngine::calculate`]; the
//! instrument stores what comes back via [`Instrument::price_with`].

use pricer_core::types::PricingError;

use super::{Exercise, Payoff};

/// Outcome of a pricing call.
///
/// Closed-form engines report `samples = 0` and no error estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResults {
    /// Net present value
    pub value: f64,
    /// Standard error of the Monte Carlo estimate, when the random policy
    /// supports one
    pub error_estimate: Option<f64>,
    /// Number of samples drawn
    pub samples: usize,
    /// False when a tolerance target was not met before the sample cap
    pub converged: bool,
}

impl PricingResults {
    /// Result of an exact (closed-form) calculation.
    pub fn exact(value: f64) -> Self {
        Self {
            value,
            error_estimate: None,
            samples: 0,
            converged: true,
        }
    }
}

/// Computes [`PricingResults`] for instruments of type `I`.
///
/// Engines are configured once and may price many instruments; `calculate`
/// takes `&self` and must not keep state between calls.
pub trait PricingEngine<I> {
    /// Price `instrument`.
    ///
    /// # Errors
    /// Any precondition or market-data failure as a [`PricingError`].
    fn calculate(&self, instrument: &I) -> Result<PricingResults, PricingError>;
}

/// Common view of option instruments.
pub trait Instrument: Sized {
    /// Payoff at exercise.
    fn payoff(&self) -> &Payoff;

    /// Exercise schedule.
    fn exercise(&self) -> &Exercise;

    /// Last results stored by [`price_with`](Instrument::price_with).
    fn results(&self) -> Option<&PricingResults>;

    /// Mutable access to the result slot.
    fn results_slot(&mut self) -> &mut Option<PricingResults>;

    /// Price with `engine`, store the outcome and return it.
    ///
    /// A failed calculation clears previously stored results.
    fn price_with<E: PricingEngine<Self>>(
        &mut self,
        engine: &E,
    ) -> Result<PricingResults, PricingError> {
        match engine.calculate(self) {
            Ok(results) => {
                *self.results_slot() = Some(results);
                Ok(results)
            }
            Err(err) => {
                *self.results_slot() = None;
                Err(err)
            }
        }
    }

    /// Net present value from the stored results.
    fn npv(&self) -> Option<f64> {
        self.results().map(|r| r.value)
    }

    /// Error estimate from the stored results.
    fn error_estimate(&self) -> Option<f64> {
        self.results().and_then(|r| r.error_estimate)
    }
}
