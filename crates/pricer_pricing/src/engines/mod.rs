//! Monte Carlo pricing engines.
//!
//! - [`McEuropeanEngine`]: European vanilla and cash-or-nothing options
//! - [`McDiscreteArithmeticAsianEngine`]: arithmetic average-strike Asian options
//! - [`McBarrierEngine`]: single barriers with rebate
//!
//! All three are built with [`McEngineBuilder`](crate::mc::McEngineBuilder)
//! and are generic over the [`RandomPolicy`]. When built with
//! `constant_parameters`, every pricing call freezes the term-structure
//! process at the end of its simulation grid and simulates the resulting
//! constant process instead; discounting and barrier crossing tests keep
//! using the term structures.

mod asian;
mod barrier;
mod european;

pub use asian::McDiscreteArithmeticAsianEngine;
pub use barrier::McBarrierEngine;
pub use european::McEuropeanEngine;

use pricer_core::types::PricingError;
use pricer_models::instruments::{Exercise, PricingResults};
use pricer_models::models::{freeze_process, BlackScholesProcess, ProcessEnum, StochasticProcess1D};
use tracing::debug;

use crate::mc::{simulate, McModel, McSettings, PathGenerator, Stream, TimeGrid};
use crate::path_dependent::PathPricer;
use crate::rng::RandomPolicy;

fn require_european(exercise: &Exercise) -> Result<(), PricingError> {
    if exercise.is_european() {
        Ok(())
    } else {
        Err(PricingError::PreconditionFailed(
            "not an European option".to_string(),
        ))
    }
}

/// Process whose paths are simulated on `grid`.
fn simulated_process(
    process: &BlackScholesProcess,
    grid: &TimeGrid,
    strike: f64,
    settings: &McSettings,
) -> Result<ProcessEnum, PricingError> {
    if settings.constant_parameters() {
        let frozen = freeze_process(process, grid.last(), strike, settings.freeze_policy())?;
        debug!(
            policy = ?settings.freeze_policy(),
            risk_free_rate = frozen.risk_free_rate(),
            dividend_yield = frozen.dividend_yield(),
            volatility = frozen.volatility(),
            "frozen process parameters"
        );
        Ok(ProcessEnum::from(frozen))
    } else {
        // query the last step once so a short term structure fails before any path
        let t = grid.times()[grid.steps() - 1];
        process.drift(t, process.x0())?;
        Ok(ProcessEnum::from(process.clone()))
    }
}

/// Simulate `process` on `grid` and price each path with a fresh pricer
/// per random stream.
fn run<R, P, M>(
    engine: &'static str,
    settings: &McSettings,
    process: &ProcessEnum,
    grid: &TimeGrid,
    make_pricer: M,
) -> Result<PricingResults, PricingError>
where
    R: RandomPolicy,
    P: PathPricer + Send,
    M: Fn(Stream) -> Result<P, PricingError> + Sync,
{
    debug!(
        engine,
        process = process.name(),
        random_policy = R::NAME,
        steps = grid.steps(),
        brownian_bridge = settings.brownian_bridge(),
        antithetic = settings.antithetic_variate(),
        stopping_rule = ?settings.stopping_rule(),
        parallel = ?settings.parallel(),
        "starting simulation"
    );

    let dimension = process.factors() * grid.steps();
    let outcome = simulate(settings.stopping_rule(), settings.parallel(), |stream| {
        let sequence = R::make_sequence_generator(dimension, stream.seed(settings.seed()));
        let generator = PathGenerator::new(
            process.clone(),
            grid.clone(),
            sequence,
            settings.brownian_bridge(),
        )?;
        Ok(McModel::new(
            generator,
            make_pricer(stream)?,
            settings.antithetic_variate(),
        ))
    })?;

    let stats = outcome.statistics;
    let results = PricingResults {
        value: stats.mean(),
        error_estimate: R::ALLOWS_ERROR_ESTIMATE.then(|| stats.error_estimate()),
        samples: stats.count(),
        converged: outcome.converged,
    };
    debug!(
        engine,
        value = results.value,
        error_estimate = ?results.error_estimate,
        samples = results.samples,
        "simulation finished"
    );
    Ok(results)
}
