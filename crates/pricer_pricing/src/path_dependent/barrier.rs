use pricer_core::types::PricingError;
use pricer_models::instruments::{BarrierType, Payoff};
use pricer_models::models::{BlackScholesProcess, StochasticProcess1D};

use super::PathPricer;
use crate::mc::{Path, TimeGrid};
use crate::rng::PricerRng;

/// Seed of the auxiliary uniform stream used for crossing detection.
pub const BARRIER_UNIFORM_SEED: u64 = 5;

/// Outcome of scanning a path for barrier hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Knock {
    active: bool,
    node: Option<usize>,
}

impl Knock {
    fn start(barrier_type: BarrierType) -> Self {
        Self {
            active: !barrier_type.is_knock_in(),
            node: None,
        }
    }

    /// Record a hit at grid node `node`; the first hit sets the knock node.
    #[inline]
    fn hit(&mut self, barrier_type: BarrierType, node: usize) {
        self.active = barrier_type.is_knock_in();
        if self.node.is_none() {
            self.node = Some(node);
        }
    }
}

#[inline]
fn hits(barrier_type: BarrierType, level: f64, barrier: f64) -> bool {
    if barrier_type.is_up() {
        level >= barrier
    } else {
        level <= barrier
    }
}

/// Terms shared by the biased and unbiased barrier pricers.
#[derive(Debug, Clone, PartialEq)]
struct BarrierTerms {
    barrier_type: BarrierType,
    barrier: f64,
    rebate: f64,
    payoff: Payoff,
    discounts: Vec<f64>,
}

impl BarrierTerms {
    fn settle(&self, knock: Knock, terminal: f64) -> f64 {
        let maturity_discount = self.discounts[self.discounts.len() - 1];
        if knock.active {
            return self.payoff.value(terminal) * maturity_discount;
        }
        if self.barrier_type.is_knock_in() {
            self.rebate * maturity_discount
        } else {
            let node = knock.node.unwrap_or(self.discounts.len() - 1);
            self.rebate * self.discounts[node]
        }
    }
}

/// Barrier pricer monitoring grid points only.
///
/// Crossings between grid points go unnoticed, so knock-outs are
/// overpriced and knock-ins underpriced relative to continuous monitoring.
#[derive(Debug, Clone, PartialEq)]
pub struct BiasedBarrierPathPricer {
    terms: BarrierTerms,
}

impl BiasedBarrierPathPricer {
    /// Pricer with `discounts[i]` the discount factor to grid time `i`.
    pub fn new(
        barrier_type: BarrierType,
        barrier: f64,
        rebate: f64,
        payoff: Payoff,
        discounts: Vec<f64>,
    ) -> Self {
        Self {
            terms: BarrierTerms {
                barrier_type,
                barrier,
                rebate,
                payoff,
                discounts,
            },
        }
    }
}

impl PathPricer for BiasedBarrierPathPricer {
    fn price(&mut self, path: &Path) -> Result<f64, PricingError> {
        let terms = &self.terms;
        let mut knock = Knock::start(terms.barrier_type);
        for (i, &level) in path.values().iter().enumerate().skip(1) {
            if hits(terms.barrier_type, level, terms.barrier) {
                knock.hit(terms.barrier_type, i);
            }
        }
        Ok(terms.settle(knock, path.back()))
    }
}

/// Barrier pricer that samples the path extremum inside every interval.
///
/// Conditional on the two end points of a step, the log-extremum of a
/// Brownian bridge is drawn from its exact distribution using one uniform
/// `u` per interval:
///
/// ```text
/// y = S_i · exp(½ (x ∓ √(x² − 2 σ² Δt ln u))),   x = ln(S_{i+1} / S_i)
/// ```
///
/// with `−` for the minimum (down barriers) and `+` for the maximum (up
/// barriers). `σ` is the diffusion of the term-structure process at the
/// start of the step, so the crossing test uses the full model even when
/// paths come from the frozen process.
#[derive(Debug, Clone)]
pub struct BarrierPathPricer {
    terms: BarrierTerms,
    process: BlackScholesProcess,
    times: Vec<f64>,
    uniforms: PricerRng,
    draws: Vec<f64>,
}

impl BarrierPathPricer {
    /// Pricer on `grid` whose uniform stream starts from `seed`.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` when `discounts` does not match the grid.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        barrier_type: BarrierType,
        barrier: f64,
        rebate: f64,
        payoff: Payoff,
        process: BlackScholesProcess,
        grid: &TimeGrid,
        discounts: Vec<f64>,
        seed: u64,
    ) -> Result<Self, PricingError> {
        if discounts.len() != grid.len() {
            return Err(PricingError::InvalidInput(format!(
                "{} discount factors given for a grid of {} points",
                discounts.len(),
                grid.len()
            )));
        }
        Ok(Self {
            terms: BarrierTerms {
                barrier_type,
                barrier,
                rebate,
                payoff,
                discounts,
            },
            process,
            times: grid.times().to_vec(),
            uniforms: PricerRng::from_seed(seed),
            draws: vec![0.0; grid.steps()],
        })
    }
}

impl PathPricer for BarrierPathPricer {
    fn price(&mut self, path: &Path) -> Result<f64, PricingError> {
        let n = path.len();
        if n < 2 {
            return Err(PricingError::InvalidInput(
                "the path cannot be empty".to_string(),
            ));
        }
        self.uniforms.fill_open_uniform(&mut self.draws);

        let terms = &self.terms;
        let up = terms.barrier_type.is_up();
        let mut knock = Knock::start(terms.barrier_type);
        let mut level = path.front();
        for i in 0..n - 1 {
            let next = path[i + 1];
            let vol = self.process.diffusion(self.times[i], level)?;
            let dt = self.times[i + 1] - self.times[i];
            let x = (next / level).ln();
            let spread = (x * x - 2.0 * vol * vol * dt * self.draws[i].ln()).sqrt();
            let y = if up { 0.5 * (x + spread) } else { 0.5 * (x - spread) };
            let extremum = level * y.exp();
            if hits(terms.barrier_type, extremum, terms.barrier) {
                knock.hit(terms.barrier_type, i + 1);
            }
            level = next;
        }
        Ok(terms.settle(knock, path.back()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::{CurveEnum, VolSurfaceEnum};
    use pricer_models::instruments::OptionType;
    use std::sync::Arc;

    fn put() -> Payoff {
        Payoff::plain_vanilla(OptionType::Put, 40.0).unwrap()
    }

    fn discounts() -> Vec<f64> {
        vec![1.0, 0.99, 0.98, 0.97]
    }

    fn biased(barrier_type: BarrierType, barrier: f64) -> BiasedBarrierPathPricer {
        BiasedBarrierPathPricer::new(barrier_type, barrier, 2.0, put(), discounts())
    }

    // ========================================================================
    // Biased pricer
    // ========================================================================

    #[test]
    fn test_up_in_activated() {
        let path = Path::from_values(vec![36.0, 41.0, 38.0, 35.0]);
        let value = biased(BarrierType::UpIn, 40.0).price(&path).unwrap();
        assert_relative_eq!(value, 5.0 * 0.97);
    }

    #[test]
    fn test_up_in_not_activated_pays_rebate_at_maturity() {
        let path = Path::from_values(vec![36.0, 39.0, 38.0, 35.0]);
        let value = biased(BarrierType::UpIn, 40.0).price(&path).unwrap();
        assert_relative_eq!(value, 2.0 * 0.97);
    }

    #[test]
    fn test_down_out_pays_rebate_at_first_knock() {
        let path = Path::from_values(vec![36.0, 37.0, 30.0, 29.0]);
        let value = biased(BarrierType::DownOut, 31.0).price(&path).unwrap();
        assert_relative_eq!(value, 2.0 * 0.98);
    }

    #[test]
    fn test_touching_barrier_counts() {
        let path = Path::from_values(vec![36.0, 40.0, 38.0, 35.0]);
        let value = biased(BarrierType::UpOut, 40.0).price(&path).unwrap();
        assert_relative_eq!(value, 2.0 * 0.99);
    }

    #[test]
    fn test_initial_point_not_monitored() {
        let path = Path::from_values(vec![41.0, 39.0, 38.0, 35.0]);
        let value = biased(BarrierType::UpIn, 40.0).price(&path).unwrap();
        assert_relative_eq!(value, 2.0 * 0.97);
    }

    // ========================================================================
    // Unbiased pricer
    // ========================================================================

    fn unbiased(barrier_type: BarrierType, barrier: f64, vol: f64) -> BarrierPathPricer {
        let process = BlackScholesProcess::new(
            36.0,
            Arc::new(CurveEnum::flat(0.01)),
            Arc::new(CurveEnum::flat(0.0)),
            Arc::new(VolSurfaceEnum::flat(vol)),
        );
        let grid = TimeGrid::uniform(0.75, 3).unwrap();
        BarrierPathPricer::new(
            barrier_type,
            barrier,
            2.0,
            put(),
            process,
            &grid,
            discounts(),
            BARRIER_UNIFORM_SEED,
        )
        .unwrap()
    }

    #[test]
    fn test_unbiased_detects_grid_hits() {
        // the sampled maximum of an interval is never below its end points
        let path = Path::from_values(vec![36.0, 41.0, 38.0, 35.0]);
        let mut pricer = unbiased(BarrierType::UpOut, 40.0, 0.2);
        for _ in 0..100 {
            assert_relative_eq!(pricer.price(&path).unwrap(), 2.0 * 0.99);
        }
    }

    #[test]
    fn test_unbiased_knocks_more_often_than_biased() {
        let path = Path::from_values(vec![36.0, 39.5, 39.0, 35.0]);
        let mut pricer = unbiased(BarrierType::UpIn, 40.0, 0.2);
        let activated = (0..1000)
            .filter(|_| pricer.price(&path).unwrap() > 2.0 * 0.97 + 1e-12)
            .count();
        assert!(activated > 0);
        assert!(activated < 1000);
        assert_eq!(biased(BarrierType::UpIn, 40.0).price(&path).unwrap(), 2.0 * 0.97);
    }

    #[test]
    fn test_unbiased_far_barrier_never_hit() {
        let path = Path::from_values(vec![36.0, 37.0, 36.5, 35.0]);
        let mut pricer = unbiased(BarrierType::DownIn, 1.0, 0.2);
        for _ in 0..100 {
            assert_relative_eq!(pricer.price(&path).unwrap(), 2.0 * 0.97);
        }
    }

    #[test]
    fn test_unbiased_rejects_mismatched_discounts() {
        let process = BlackScholesProcess::new(
            36.0,
            Arc::new(CurveEnum::flat(0.01)),
            Arc::new(CurveEnum::flat(0.0)),
            Arc::new(VolSurfaceEnum::flat(0.2)),
        );
        let grid = TimeGrid::uniform(1.0, 4).unwrap();
        let result = BarrierPathPricer::new(
            BarrierType::UpIn,
            40.0,
            0.0,
            put(),
            process,
            &grid,
            vec![1.0; 3],
            BARRIER_UNIFORM_SEED,
        );
        assert!(result.is_err());
    }
}
