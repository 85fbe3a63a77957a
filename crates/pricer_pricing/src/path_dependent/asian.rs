use pricer_core::types::PricingError;
use pricer_models::instruments::OptionType;

use super::PathPricer;
use crate::mc::Path;

/// Arithmetic average-strike payoff `max(ω (S_T − A), 0)`.
///
/// The average `A` combines the fixings already observed
/// (`running_accumulator` over `past_fixings` dates) with the simulated
/// values at the fixing indices of the grid. `S_T` is the last path value,
/// i.e. the level at the last fixing.
#[derive(Debug, Clone, PartialEq)]
pub struct ArithmeticAverageStrikePathPricer {
    option_type: OptionType,
    discount: f64,
    running_accumulator: f64,
    past_fixings: usize,
    fixing_indices: Vec<usize>,
}

impl ArithmeticAverageStrikePathPricer {
    /// Pricer averaging the path at `fixing_indices`.
    pub fn new(
        option_type: OptionType,
        discount: f64,
        running_accumulator: f64,
        past_fixings: usize,
        fixing_indices: Vec<usize>,
    ) -> Self {
        Self {
            option_type,
            discount,
            running_accumulator,
            past_fixings,
            fixing_indices,
        }
    }
}

impl PathPricer for ArithmeticAverageStrikePathPricer {
    fn price(&mut self, path: &Path) -> Result<f64, PricingError> {
        let sum: f64 = self.fixing_indices.iter().map(|&i| path[i]).sum();
        let fixings = self.past_fixings + self.fixing_indices.len();
        let average = (self.running_accumulator + sum) / fixings as f64;
        let intrinsic = self.option_type.sign() * (path.back() - average);
        Ok(self.discount * intrinsic.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_average_over_fixings_only() {
        // grid indices 0..=4, fixings at 2 and 4
        let path = Path::from_values(vec![100.0, 500.0, 90.0, 500.0, 110.0]);
        let mut call =
            ArithmeticAverageStrikePathPricer::new(OptionType::Call, 1.0, 0.0, 0, vec![2, 4]);
        // A = (90 + 110) / 2 = 100
        assert_relative_eq!(call.price(&path).unwrap(), 10.0);

        let mut put =
            ArithmeticAverageStrikePathPricer::new(OptionType::Put, 1.0, 0.0, 0, vec![2, 4]);
        assert_eq!(put.price(&path).unwrap(), 0.0);
    }

    #[test]
    fn test_initial_fixing_included_when_listed() {
        let path = Path::from_values(vec![100.0, 80.0, 90.0]);
        let mut put =
            ArithmeticAverageStrikePathPricer::new(OptionType::Put, 0.5, 0.0, 0, vec![0, 1, 2]);
        // A = 90, S_T = 90
        assert_relative_eq!(put.price(&path).unwrap(), 0.0);

        let mut put =
            ArithmeticAverageStrikePathPricer::new(OptionType::Put, 0.5, 0.0, 0, vec![1, 2]);
        // A = 85, S_T = 90
        assert_eq!(put.price(&path).unwrap(), 0.0);
        let mut call =
            ArithmeticAverageStrikePathPricer::new(OptionType::Call, 0.5, 0.0, 0, vec![1, 2]);
        assert_relative_eq!(call.price(&path).unwrap(), 2.5);
    }

    #[test]
    fn test_seasoned_average() {
        let path = Path::from_values(vec![100.0, 100.0, 100.0]);
        // two past fixings summing to 260, two simulated at 100: A = 115
        let mut put =
            ArithmeticAverageStrikePathPricer::new(OptionType::Put, 1.0, 260.0, 2, vec![1, 2]);
        assert_relative_eq!(put.price(&path).unwrap(), 15.0);
    }
}
