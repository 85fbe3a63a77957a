use pricer_core::types::PricingError;
use pricer_models::instruments::Payoff;

use super::PathPricer;
use crate::mc::Path;

/// Terminal payoff times the discount factor to maturity.
#[derive(Debug, Clone, PartialEq)]
pub struct EuropeanPathPricer {
    payoff: Payoff,
    discount: f64,
}

impl EuropeanPathPricer {
    /// Pricer for `payoff` discounted by `discount`.
    pub fn new(payoff: Payoff, discount: f64) -> Self {
        Self { payoff, discount }
    }
}

impl PathPricer for EuropeanPathPricer {
    #[inline]
    fn price(&mut self, path: &Path) -> Result<f64, PricingError> {
        Ok(self.discount * self.payoff.value(path.back()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::instruments::OptionType;

    #[test]
    fn test_discounted_terminal_payoff() {
        let payoff = Payoff::plain_vanilla(OptionType::Put, 40.0).unwrap();
        let mut pricer = EuropeanPathPricer::new(payoff, 0.99);
        let path = Path::from_values(vec![36.0, 50.0, 35.0]);
        assert_relative_eq!(pricer.price(&path).unwrap(), 0.99 * 5.0);

        let path = Path::from_values(vec![36.0, 30.0, 45.0]);
        assert_eq!(pricer.price(&path).unwrap(), 0.0);
    }
}
