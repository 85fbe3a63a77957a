//! Path generation from a stochastic process and a Gaussian sequence.

use pricer_core::types::PricingError;
use pricer_models::models::{ProcessEnum, StochasticProcess1D};

use super::brownian_bridge::BrownianBridge;
use super::path::Path;
use super::time_grid::TimeGrid;
use crate::rng::SequenceGenerator;

/// Turns Gaussian vectors into asset paths on a fixed grid.
///
/// Each call to [`next`](Self::next) consumes one vector of
/// `grid.steps()` draws; [`antithetic`](Self::antithetic) replays the last
/// vector with its sign flipped.
///
/// # Examples
///
/// ```rust
/// use pricer_models::models::{ConstantBlackScholesProcess, ProcessEnum};
/// use pricer_pricing::mc::{Path, PathGenerator, TimeGrid};
/// use pricer_pricing::rng::{PseudoRandom, RandomPolicy};
///
/// let process = ProcessEnum::from(ConstantBlackScholesProcess::new(100.0, 0.0, 0.05, 0.2));
/// let grid = TimeGrid::uniform(1.0, 12).unwrap();
/// let sequence = PseudoRandom::make_sequence_generator(grid.steps(), 42);
/// let mut generator = PathGenerator::new(process, grid, sequence, false).unwrap();
///
/// let mut path = Path::new(generator.grid().len());
/// generator.next(&mut path).unwrap();
/// assert_eq!(path.front(), 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct PathGenerator<G> {
    process: ProcessEnum,
    grid: TimeGrid,
    sequence: G,
    bridge: Option<BrownianBridge>,
    draws: Vec<f64>,
    increments: Vec<f64>,
}

impl<G: SequenceGenerator> PathGenerator<G> {
    /// Generator over `grid` driven by `sequence`.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` when the sequence dimension differs from
    /// `factors * grid.steps()`.
    pub fn new(
        process: ProcessEnum,
        grid: TimeGrid,
        sequence: G,
        brownian_bridge: bool,
    ) -> Result<Self, PricingError> {
        let dimension = process.factors() * grid.steps();
        if sequence.dimension() != dimension {
            return Err(PricingError::InvalidInput(format!(
                "sequence generator dimension ({}) incompatible with time grid ({} steps)",
                sequence.dimension(),
                grid.steps()
            )));
        }
        let bridge = if brownian_bridge {
            Some(BrownianBridge::new(&grid.times()[1..])?)
        } else {
            None
        };
        Ok(Self {
            process,
            grid,
            sequence,
            bridge,
            draws: vec![0.0; dimension],
            increments: vec![0.0; dimension],
        })
    }

    /// Simulation grid.
    #[inline]
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Process being simulated.
    #[inline]
    pub fn process(&self) -> &ProcessEnum {
        &self.process
    }

    /// Draw a fresh vector and write the resulting path.
    ///
    /// # Errors
    /// Market-data failures from the process.
    pub fn next(&mut self, path: &mut Path) -> Result<(), PricingError> {
        self.sequence.next_gaussian(&mut self.draws);
        match &self.bridge {
            Some(bridge) => bridge.transform(&self.draws, &mut self.increments),
            None => self.increments.copy_from_slice(&self.draws),
        }
        self.evolve(path, 1.0)
    }

    /// Path driven by the negated increments of the last [`next`](Self::next).
    ///
    /// # Errors
    /// Market-data failures from the process.
    pub fn antithetic(&mut self, path: &mut Path) -> Result<(), PricingError> {
        self.evolve(path, -1.0)
    }

    fn evolve(&self, path: &mut Path, sign: f64) -> Result<(), PricingError> {
        let times = self.grid.times();
        let mut x = self.process.x0();
        path[0] = x;
        for (i, &dw) in self.increments.iter().enumerate() {
            let t = times[i];
            let dt = times[i + 1] - t;
            x = self.process.evolve(t, x, dt, sign * dw)?;
            path[i + 1] = x;
        }
        Ok(())
    }
}
