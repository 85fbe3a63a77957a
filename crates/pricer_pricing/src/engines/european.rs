use std::marker::PhantomData;

use pricer_core::market_data::YieldCurve;
use pricer_core::types::PricingError;
use pricer_models::instruments::{EuropeanOption, Instrument, PricingEngine, PricingResults};
use pricer_models::models::{BlackScholesProcess, FreezePolicy};

use super::{require_european, run, simulated_process};
use crate::mc::{ConfigError, EngineDefaults, McEngineBuilder, McSettings, TimeGrid, TimeStepping};
use crate::path_dependent::EuropeanPathPricer;
use crate::rng::{PseudoRandom, RandomPolicy};

/// Monte Carlo engine for European options.
///
/// Paths run on a uniform grid up to maturity; each path pays the
/// discounted terminal payoff. The default freeze policy samples the
/// term structures slightly after maturity, `FreezePolicy::Offset(1e-2)`.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use pricer_core::market_data::{CurveEnum, VolSurfaceEnum};
/// use pricer_models::instruments::{EuropeanOption, Exercise, Instrument, OptionType, Payoff};
/// use pricer_models::models::BlackScholesProcess;
/// use pricer_pricing::mc::McEngineBuilder;
///
/// let process = BlackScholesProcess::new(
///     100.0,
///     Arc::new(CurveEnum::flat(0.05)),
///     Arc::new(CurveEnum::flat(0.0)),
///     Arc::new(VolSurfaceEnum::flat(0.2)),
/// );
/// let engine = McEngineBuilder::new(process)
///     .with_steps(1)
///     .with_samples(20_000)
///     .with_antithetic_variate(true)
///     .with_seed(42)
///     .build_european()
///     .unwrap();
///
/// let mut option = EuropeanOption::new(
///     Payoff::plain_vanilla(OptionType::Call, 100.0).unwrap(),
///     Exercise::european(1.0).unwrap(),
/// )
/// .unwrap();
/// let results = option.price_with(&engine).unwrap();
/// assert!((results.value - 10.4506).abs() < 0.3);
/// ```
#[derive(Debug, Clone)]
pub struct McEuropeanEngine<R = PseudoRandom> {
    process: BlackScholesProcess,
    settings: McSettings,
    _policy: PhantomData<R>,
}

impl<R: RandomPolicy> McEngineBuilder<R> {
    /// Build a [`McEuropeanEngine`].
    ///
    /// Requires a step option and a stopping option. Defaults: no Brownian
    /// bridge, freeze policy `Offset(1e-2)`.
    ///
    /// # Errors
    /// [`ConfigError`] for missing or conflicting options.
    pub fn build_european(self) -> Result<McEuropeanEngine<R>, ConfigError> {
        let settings = self.settings(EngineDefaults {
            requires_steps: true,
            brownian_bridge: false,
            freeze_policy: FreezePolicy::default(),
        })?;
        Ok(McEuropeanEngine {
            process: self.process,
            settings,
            _policy: PhantomData,
        })
    }
}

impl<R> McEuropeanEngine<R> {
    /// Term-structure process.
    pub fn process(&self) -> &BlackScholesProcess {
        &self.process
    }

    /// Validated settings.
    pub fn settings(&self) -> &McSettings {
        &self.settings
    }
}

impl<R: RandomPolicy> PricingEngine<EuropeanOption> for McEuropeanEngine<R> {
    fn calculate(&self, option: &EuropeanOption) -> Result<PricingResults, PricingError> {
        require_european(option.exercise())?;
        let maturity = option.maturity();
        let steps = self
            .settings
            .time_stepping()
            .unwrap_or(TimeStepping::Steps(1))
            .steps_for(maturity);
        let grid = TimeGrid::uniform(maturity, steps)?;

        let payoff = *option.payoff();
        let process = simulated_process(&self.process, &grid, payoff.strike(), &self.settings)?;
        let discount = self.process.risk_free_curve().discount_factor(grid.last())?;

        run::<R, _, _>("mc_european", &self.settings, &process, &grid, |_| {
            Ok(EuropeanPathPricer::new(payoff, discount))
        })
    }
}
