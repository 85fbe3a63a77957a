//! European vanilla options.

use super::{Exercise, Instrument, InstrumentError, Payoff, PricingResults};

/// Option with a single payoff evaluated on the terminal level.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{EuropeanOption, Exercise, Instrument, OptionType, Payoff};
///
/// let option = EuropeanOption::new(
///     Payoff::plain_vanilla(OptionType::Put, 40.0).unwrap(),
///     Exercise::european(0.25).unwrap(),
/// )
/// .unwrap();
/// assert_eq!(option.maturity(), 0.25);
/// assert!(option.npv().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EuropeanOption {
    payoff: Payoff,
    exercise: Exercise,
    results: Option<PricingResults>,
}

impl EuropeanOption {
    /// Build from a payoff and an exercise with a positive last time.
    pub fn new(payoff: Payoff, exercise: Exercise) -> Result<Self, InstrumentError> {
        let expiry = exercise.last_time();
        if !expiry.is_finite() || expiry <= 0.0 {
            return Err(InstrumentError::InvalidExpiry { expiry });
        }
        Ok(Self {
            payoff,
            exercise,
            results: None,
        })
    }

    /// Last exercise time.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.exercise.last_time()
    }
}

impl Instrument for EuropeanOption {
    fn payoff(&self) -> &Payoff {
        &self.payoff
    }

    fn exercise(&self) -> &Exercise {
        &self.exercise
    }

    fn results(&self) -> Option<&PricingResults> {
        self.results.as_ref()
    }

    fn results_slot(&mut self) -> &mut Option<PricingResults> {
        &mut self.results
    }
}
