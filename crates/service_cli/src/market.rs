//! Market data and instruments built from a scenario.
//!
//! Dates become ACT/365 year fractions from the evaluation date.

use std::sync::Arc;

use pricer_core::market_data::{
    BlackVarianceCurve, CurveEnum, CurveInterpolation, InterpolatedCurve, VolSurfaceEnum,
};
use pricer_core::types::{Date, DayCountConvention};
use pricer_models::instruments::{
    BarrierOption, DiscreteAveragingAsianOption, EuropeanOption, Exercise, Payoff,
};
use pricer_models::models::BlackScholesProcess;

use crate::config::Scenario;
use crate::Result;

/// Priced instruments and the process driving them.
#[derive(Debug, Clone)]
pub struct Market {
    /// Term-structure process
    pub process: BlackScholesProcess,
    /// European option
    pub european: EuropeanOption,
    /// Arithmetic average-strike Asian option
    pub asian: DiscreteAveragingAsianOption,
    /// Barrier option
    pub barrier: BarrierOption,
}

impl Market {
    /// Build the process and the three options.
    pub fn from_scenario(scenario: &Scenario) -> Result<Self> {
        let market = &scenario.market;
        let options = &scenario.options;
        let today = market.evaluation_date;
        let time = |date: Date| DayCountConvention::ActualActual365.year_fraction_dates(today, date);

        let tenors: Vec<f64> = market.zero_curve.iter().map(|p| time(p.date)).collect();
        let rates: Vec<f64> = market.zero_curve.iter().map(|p| p.rate).collect();
        let curve = InterpolatedCurve::new(&tenors, &rates, CurveInterpolation::Linear, true)?;

        let expiries: Vec<f64> = market.volatilities.iter().map(|p| time(p.date)).collect();
        let vols: Vec<f64> = market.volatilities.iter().map(|p| p.vol).collect();
        let variance = BlackVarianceCurve::new(&expiries, &vols)?;

        let process = BlackScholesProcess::new(
            market.spot,
            Arc::new(CurveEnum::from(curve)),
            Arc::new(CurveEnum::flat(market.dividend_yield)),
            Arc::new(VolSurfaceEnum::from(variance)),
        );

        let payoff = Payoff::plain_vanilla(options.option_type, options.strike)?;
        let exercise = Exercise::european(time(options.maturity))?;
        let fixings = options.fixings.iter().map(|&d| time(d)).collect();

        Ok(Self {
            process,
            european: EuropeanOption::new(payoff, exercise.clone())?,
            asian: DiscreteAveragingAsianOption::new(payoff, exercise.clone(), fixings)?,
            barrier: BarrierOption::new(
                options.barrier_type,
                options.barrier,
                options.rebate,
                payoff,
                exercise,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::{VolatilitySurface, YieldCurve};
    use pricer_models::instruments::Instrument;
    use pricer_models::models::StochasticProcess1D;

    #[test]
    fn test_default_market() {
        let market = Market::from_scenario(&Scenario::default()).unwrap();
        assert_eq!(market.process.x0(), 36.0);
        assert_relative_eq!(market.european.maturity(), 89.0 / 365.0, epsilon = 1e-12);
        assert_eq!(market.asian.fixing_times().len(), 9);
        assert_relative_eq!(
            market.asian.fixing_times()[0],
            8.0 / 365.0,
            epsilon = 1e-12
        );
        assert_eq!(market.barrier.barrier(), 40.0);
        assert_eq!(market.european.payoff().strike(), 40.0);

        let r0 = market.process.risk_free_curve().zero_rate(1e-6).unwrap();
        assert_relative_eq!(r0, 0.01, epsilon = 1e-6);
        // the first vol pillar sits on the maturity date
        let vol = market
            .process
            .volatility_surface()
            .volatility(40.0, 89.0 / 365.0)
            .unwrap();
        assert_relative_eq!(vol, 0.20, epsilon = 1e-12);
    }

    #[test]
    fn test_bad_strike_surfaces_as_instrument_error() {
        let mut scenario = Scenario::default();
        scenario.options.strike = -1.0;
        assert!(matches!(
            Market::from_scenario(&scenario),
            Err(crate::CliError::Instrument(_))
        ));
    }
}
