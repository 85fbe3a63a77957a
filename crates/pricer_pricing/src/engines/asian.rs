use std::marker::PhantomData;

use pricer_core::market_data::YieldCurve;
use pricer_core::types::PricingError;
use pricer_models::instruments::{
    DiscreteAveragingAsianOption, Instrument, PricingEngine, PricingResults,
};
use pricer_models::models::{BlackScholesProcess, FreezePolicy};

use super::{require_european, run, simulated_process};
use crate::mc::{ConfigError, EngineDefaults, McEngineBuilder, McSettings, TimeGrid};
use crate::path_dependent::ArithmeticAverageStrikePathPricer;
use crate::rng::{PseudoRandom, RandomPolicy};

/// Monte Carlo engine for discretely monitored arithmetic average-strike
/// Asian options.
///
/// The grid passes through every future fixing and ends at the last one;
/// a step option, when given, refines it between fixings. Brownian bridge
/// construction is on by default and parameters are frozen at the last
/// fixing.
#[derive(Debug, Clone)]
pub struct McDiscreteArithmeticAsianEngine<R = PseudoRandom> {
    process: BlackScholesProcess,
    settings: McSettings,
    _policy: PhantomData<R>,
}

impl<R: RandomPolicy> McEngineBuilder<R> {
    /// Build a [`McDiscreteArithmeticAsianEngine`].
    ///
    /// Step options are optional. Defaults: Brownian bridge on, freeze
    /// policy `AtMaturity`.
    ///
    /// # Errors
    /// [`ConfigError`] for missing or conflicting options.
    pub fn build_asian(self) -> Result<McDiscreteArithmeticAsianEngine<R>, ConfigError> {
        let settings = self.settings(EngineDefaults {
            requires_steps: false,
            brownian_bridge: true,
            freeze_policy: FreezePolicy::AtMaturity,
        })?;
        Ok(McDiscreteArithmeticAsianEngine {
            process: self.process,
            settings,
            _policy: PhantomData,
        })
    }
}

impl<R> McDiscreteArithmeticAsianEngine<R> {
    /// Term-structure process.
    pub fn process(&self) -> &BlackScholesProcess {
        &self.process
    }

    /// Validated settings.
    pub fn settings(&self) -> &McSettings {
        &self.settings
    }
}

impl<R: RandomPolicy> PricingEngine<DiscreteAveragingAsianOption>
    for McDiscreteArithmeticAsianEngine<R>
{
    fn calculate(
        &self,
        option: &DiscreteAveragingAsianOption,
    ) -> Result<PricingResults, PricingError> {
        require_european(option.exercise())?;
        let payoff = option.payoff();
        if !payoff.is_plain_vanilla() {
            return Err(PricingError::UnsupportedInstrument(format!(
                "{} payoff not supported by the average-strike engine",
                payoff.name()
            )));
        }
        let fixings: Vec<f64> = option.future_fixing_times().collect();
        let last_fixing = match fixings.last() {
            Some(&t) => t,
            None => {
                return Err(PricingError::PreconditionFailed(
                    "no fixings in the future".to_string(),
                ))
            }
        };
        let steps = self
            .settings
            .time_stepping()
            .map(|stepping| stepping.steps_for(last_fixing));
        let grid = TimeGrid::with_mandatory(&fixings, steps)?;

        let process = simulated_process(&self.process, &grid, payoff.strike(), &self.settings)?;
        let discount = self
            .process
            .risk_free_curve()
            .discount_factor(option.maturity())?;
        let option_type = payoff.option_type();
        let fixing_indices = grid.mandatory_indices().to_vec();

        run::<R, _, _>("mc_asian_average_strike", &self.settings, &process, &grid, |_| {
            Ok(ArithmeticAverageStrikePathPricer::new(
                option_type,
                discount,
                option.running_accumulator(),
                option.past_fixings(),
                fixing_indices.clone(),
            ))
        })
    }
}
