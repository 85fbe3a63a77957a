use std::marker::PhantomData;

use pricer_core::market_data::YieldCurve;
use pricer_core::types::PricingError;
use pricer_models::instruments::{BarrierOption, Instrument, PricingEngine, PricingResults};
use pricer_models::models::{BlackScholesProcess, FreezePolicy, StochasticProcess1D};

use super::{require_european, run, simulated_process};
use crate::mc::{ConfigError, EngineDefaults, McEngineBuilder, McSettings, TimeGrid, TimeStepping};
use crate::path_dependent::{BarrierPathPricer, BiasedBarrierPathPricer, BARRIER_UNIFORM_SEED};
use crate::rng::{PseudoRandom, RandomPolicy};

/// Monte Carlo engine for single-barrier options with rebate.
///
/// By default crossings between grid points are detected by sampling the
/// Brownian-bridge extremum of each interval ([`BarrierPathPricer`]); with
/// `bias` only grid points are monitored ([`BiasedBarrierPathPricer`]).
/// Parameters are frozen at maturity by default.
#[derive(Debug, Clone)]
pub struct McBarrierEngine<R = PseudoRandom> {
    process: BlackScholesProcess,
    settings: McSettings,
    biased: bool,
    _policy: PhantomData<R>,
}

impl<R: RandomPolicy> McEngineBuilder<R> {
    /// Build a [`McBarrierEngine`].
    ///
    /// Requires a step option and a stopping option. Defaults: no Brownian
    /// bridge, unbiased monitoring, freeze policy `AtMaturity`.
    ///
    /// # Errors
    /// [`ConfigError`] for missing or conflicting options.
    pub fn build_barrier(self) -> Result<McBarrierEngine<R>, ConfigError> {
        let settings = self.settings(EngineDefaults {
            requires_steps: true,
            brownian_bridge: false,
            freeze_policy: FreezePolicy::AtMaturity,
        })?;
        Ok(McBarrierEngine {
            process: self.process,
            settings,
            biased: self.bias,
            _policy: PhantomData,
        })
    }
}

impl<R> McBarrierEngine<R> {
    /// Term-structure process.
    pub fn process(&self) -> &BlackScholesProcess {
        &self.process
    }

    /// Validated settings.
    pub fn settings(&self) -> &McSettings {
        &self.settings
    }

    /// Whether only grid points are monitored.
    pub fn is_biased(&self) -> bool {
        self.biased
    }
}

impl<R: RandomPolicy> PricingEngine<BarrierOption> for McBarrierEngine<R> {
    fn calculate(&self, option: &BarrierOption) -> Result<PricingResults, PricingError> {
        require_european(option.exercise())?;
        let payoff = option.payoff();
        if !payoff.is_plain_vanilla() {
            return Err(PricingError::UnsupportedInstrument(format!(
                "{} payoff not supported by the barrier engine",
                payoff.name()
            )));
        }
        let spot = self.process.x0();
        if spot <= 0.0 {
            return Err(PricingError::InvalidInput(
                "negative or null underlying given".to_string(),
            ));
        }
        let barrier_type = option.barrier_type();
        if barrier_type.triggered(spot, option.barrier()) {
            return Err(PricingError::PreconditionFailed(
                "barrier touched".to_string(),
            ));
        }

        let maturity = option.maturity();
        let steps = self
            .settings
            .time_stepping()
            .unwrap_or(TimeStepping::Steps(1))
            .steps_for(maturity);
        let grid = TimeGrid::uniform(maturity, steps)?;

        let process = simulated_process(&self.process, &grid, payoff.strike(), &self.settings)?;
        let curve = self.process.risk_free_curve();
        let discounts = grid
            .times()
            .iter()
            .map(|&t| curve.discount_factor(t))
            .collect::<Result<Vec<_>, _>>()?;

        if self.biased {
            run::<R, _, _>("mc_barrier_biased", &self.settings, &process, &grid, |_| {
                Ok(BiasedBarrierPathPricer::new(
                    barrier_type,
                    option.barrier(),
                    option.rebate(),
                    *payoff,
                    discounts.clone(),
                ))
            })
        } else {
            run::<R, _, _>("mc_barrier", &self.settings, &process, &grid, |stream| {
                BarrierPathPricer::new(
                    barrier_type,
                    option.barrier(),
                    option.rebate(),
                    *payoff,
                    self.process.clone(),
                    &grid,
                    discounts.clone(),
                    stream.seed(BARRIER_UNIFORM_SEED),
                )
            })
        }
    }
}
