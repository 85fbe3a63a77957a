//! Discretely monitored arithmetic average-strike Asian options.

use super::{Exercise, Instrument, InstrumentError, Payoff, PricingResults};

/// Asian option whose strike is the arithmetic average of discrete fixings.
///
/// Payoff at maturity `T`:
///
/// ```text
/// max(ω·(S_T − A), 0),   A = (running_accumulator + Σ S(t_i)) / (past_fixings + n)
/// ```
///
/// `running_accumulator` and `past_fixings` describe a seasoned option:
/// the sum and the count of fixings already observed before the evaluation
/// date. Fixing times are year fractions; negative times refer to past
/// fixings already folded into the accumulator and are ignored by engines.
///
/// The payoff's own strike only serves as a volatility lookup for parameter
/// freezing.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteAveragingAsianOption {
    payoff: Payoff,
    exercise: Exercise,
    fixing_times: Vec<f64>,
    running_accumulator: f64,
    past_fixings: usize,
    results: Option<PricingResults>,
}

impl DiscreteAveragingAsianOption {
    /// Build an unseasoned option.
    ///
    /// Fixing times are sorted and de-duplicated.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::instruments::{
    ///     DiscreteAveragingAsianOption, Exercise, OptionType, Payoff,
    /// };
    ///
    /// let asian = DiscreteAveragingAsianOption::new(
    ///     Payoff::plain_vanilla(OptionType::Put, 40.0).unwrap(),
    ///     Exercise::european(0.25).unwrap(),
    ///     vec![0.2, 0.1, 0.25],
    /// )
    /// .unwrap();
    /// assert_eq!(asian.fixing_times(), &[0.1, 0.2, 0.25]);
    /// ```
    pub fn new(
        payoff: Payoff,
        exercise: Exercise,
        fixing_times: Vec<f64>,
    ) -> Result<Self, InstrumentError> {
        Self::seasoned(payoff, exercise, fixing_times, 0.0, 0)
    }

    /// Build an option with fixings already observed.
    ///
    /// # Errors
    /// * `InvalidExpiry` - Non-positive maturity
    /// * `InvalidFixings` - Empty schedule or non-finite times
    /// * `InvalidParameter` - Negative or non-finite accumulator
    pub fn seasoned(
        payoff: Payoff,
        exercise: Exercise,
        mut fixing_times: Vec<f64>,
        running_accumulator: f64,
        past_fixings: usize,
    ) -> Result<Self, InstrumentError> {
        let expiry = exercise.last_time();
        if !expiry.is_finite() || expiry <= 0.0 {
            return Err(InstrumentError::InvalidExpiry { expiry });
        }
        if fixing_times.is_empty() {
            return Err(InstrumentError::InvalidFixings {
                message: "no fixing times given".to_string(),
            });
        }
        if let Some(bad) = fixing_times.iter().find(|t| !t.is_finite()) {
            return Err(InstrumentError::InvalidFixings {
                message: format!("non-finite fixing time {}", bad),
            });
        }
        if !running_accumulator.is_finite() || running_accumulator < 0.0 {
            return Err(InstrumentError::InvalidParameter {
                message: format!(
                    "running accumulator must be finite and non-negative, got {}",
                    running_accumulator
                ),
            });
        }

        fixing_times.sort_by(f64::total_cmp);
        fixing_times.dedup();

        Ok(Self {
            payoff,
            exercise,
            fixing_times,
            running_accumulator,
            past_fixings,
            results: None,
        })
    }

    /// Sorted fixing times.
    #[inline]
    pub fn fixing_times(&self) -> &[f64] {
        &self.fixing_times
    }

    /// Fixing times not in the past.
    pub fn future_fixing_times(&self) -> impl Iterator<Item = f64> + '_ {
        self.fixing_times.iter().copied().filter(|&t| t >= 0.0)
    }

    /// Sum of fixings already observed.
    #[inline]
    pub fn running_accumulator(&self) -> f64 {
        self.running_accumulator
    }

    /// Count of fixings already observed.
    #[inline]
    pub fn past_fixings(&self) -> usize {
        self.past_fixings
    }

    /// Last exercise time.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.exercise.last_time()
    }
}

impl Instrument for DiscreteAveragingAsianOption {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::OptionType;

    fn put() -> Payoff {
        Payoff::plain_vanilla(OptionType::Put, 40.0).unwrap()
    }

    #[test]
    fn test_sorts_and_dedups_fixings() {
        let asian = DiscreteAveragingAsianOption::new(
            put(),
            Exercise::European(0.25),
            vec![0.25, 0.1, 0.1, -0.05],
        )
        .unwrap();
        assert_eq!(asian.fixing_times(), &[-0.05, 0.1, 0.25]);
        let future: Vec<f64> = asian.future_fixing_times().collect();
        assert_eq!(future, vec![0.1, 0.25]);
    }

    #[test]
    fn test_seasoned_fields() {
        let asian = DiscreteAveragingAsianOption::seasoned(
            put(),
            Exercise::European(0.25),
            vec![0.1, 0.2],
            72.0,
            2,
        )
        .unwrap();
        assert_eq!(asian.running_accumulator(), 72.0);
        assert_eq!(asian.past_fixings(), 2);
        assert_eq!(asian.maturity(), 0.25);
    }

    #[test]
    fn test_rejects_empty_fixings() {
        let result = DiscreteAveragingAsianOption::new(put(), Exercise::European(0.25), vec![]);
        assert!(matches!(result, Err(InstrumentError::InvalidFixings { .. })));
    }

    #[test]
    fn test_rejects_bad_accumulator() {
        let result = DiscreteAveragingAsianOption::seasoned(
            put(),
            Exercise::European(0.25),
            vec![0.1],
            -1.0,
            1,
        );
        assert!(matches!(result, Err(InstrumentError::InvalidParameter { .. })));
    }

    #[test]
    fn test_rejects_nan_fixing() {
        let result =
            DiscreteAveragingAsianOption::new(put(), Exercise::European(0.25), vec![f64::NAN]);
        assert!(matches!(result, Err(InstrumentError::InvalidFixings { .. })));
    }
}
