//! The Monte Carlo sampling loop and its stopping rules.

use pricer_core::types::PricingError;
use rayon::prelude::*;
use tracing::warn;

use super::config::StoppingRule;
use super::path::Path;
use super::path_generator::PathGenerator;
use super::statistics::RunningStatistics;
use crate::path_dependent::PathPricer;
use crate::rng::{chunk_seed, SequenceGenerator};

/// Smallest batch drawn under a tolerance target.
pub const MIN_SAMPLES: usize = 1023;

/// Fraction of the projected sample count drawn per tolerance batch.
const BATCH_DAMPING: f64 = 0.8;

/// Which random stream a model draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    /// The single stream of a sequential run.
    Sequential,
    /// Chunk `k` of a parallel run.
    Chunk(u64),
}

impl Stream {
    /// Seed of this stream derived from `base`.
    ///
    /// ```rust
    /// use pricer_pricing::mc::Stream;
    ///
    /// assert_eq!(Stream::Sequential.seed(42), 42);
    /// assert_ne!(Stream::Chunk(0).seed(42), Stream::Chunk(1).seed(42));
    /// ```
    #[inline]
    pub fn seed(self, base: u64) -> u64 {
        match self {
            Stream::Sequential => base,
            Stream::Chunk(k) => chunk_seed(base, k),
        }
    }
}

/// Path generator and path pricer driven together.
#[derive(Debug)]
pub struct McModel<G, P> {
    generator: PathGenerator<G>,
    pricer: P,
    antithetic: bool,
    path: Path,
    twin: Path,
}

impl<G: SequenceGenerator, P: PathPricer> McModel<G, P> {
    /// Model pricing paths of `generator` with `pricer`.
    pub fn new(generator: PathGenerator<G>, pricer: P, antithetic: bool) -> Self {
        let len = generator.grid().len();
        Self {
            generator,
            pricer,
            antithetic,
            path: Path::new(len),
            twin: Path::new(len),
        }
    }

    /// Draw `samples` samples into `stats`.
    ///
    /// With antithetic variates one sample is the average of a path and its
    /// mirror.
    pub fn add_samples(
        &mut self,
        samples: usize,
        stats: &mut RunningStatistics,
    ) -> Result<(), PricingError> {
        for _ in 0..samples {
            self.generator.next(&mut self.path)?;
            let mut value = self.pricer.price(&self.path)?;
            if self.antithetic {
                self.generator.antithetic(&mut self.twin)?;
                value = 0.5 * (value + self.pricer.price(&self.twin)?);
            }
            stats.add(value);
        }
        Ok(())
    }
}

/// Accumulated statistics of a finished run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationOutcome {
    /// Sample statistics of the discounted payoffs.
    pub statistics: RunningStatistics,
    /// False when a tolerance target was missed at the sample cap.
    pub converged: bool,
}

enum Runner<'f, G, P, F> {
    Sequential(Box<McModel<G, P>>),
    Parallel {
        factory: &'f F,
        chunk_size: usize,
        next_chunk: u64,
    },
}

impl<G, P, F> Runner<'_, G, P, F>
where
    G: SequenceGenerator,
    P: PathPricer + Send,
    F: Fn(Stream) -> Result<McModel<G, P>, PricingError> + Sync,
{
    fn add(&mut self, samples: usize, stats: &mut RunningStatistics) -> Result<(), PricingError> {
        match self {
            Runner::Sequential(model) => model.add_samples(samples, stats),
            Runner::Parallel {
                factory,
                chunk_size,
                next_chunk,
            } => {
                let chunk_size = *chunk_size;
                let chunks = samples.div_ceil(chunk_size);
                let first = *next_chunk;
                *next_chunk += chunks as u64;
                let factory: &F = *factory;
                let partials = (0..chunks)
                    .into_par_iter()
                    .map(|c| {
                        let size = chunk_size.min(samples - c * chunk_size);
                        let mut model = factory(Stream::Chunk(first + c as u64))?;
                        let mut partial = RunningStatistics::new();
                        model.add_samples(size, &mut partial)?;
                        Ok(partial)
                    })
                    .collect::<Result<Vec<_>, PricingError>>()?;
                // merge in chunk order so the result does not depend on scheduling
                for partial in &partials {
                    stats.merge(partial);
                }
                Ok(())
            }
        }
    }
}

/// Run a simulation until `rule` is satisfied.
///
/// `factory` builds a model for a given random stream. A sequential run
/// (`parallel == None`) builds one model and keeps drawing from it; a
/// parallel run builds a fresh model for every chunk of `chunk_size`
/// samples and merges chunk statistics in chunk order.
///
/// Under [`StoppingRule::Tolerance`] the run starts with
/// [`MIN_SAMPLES`] samples, then repeatedly projects the number of samples
/// needed from the current error and draws 80% of the shortfall (at least
/// [`MIN_SAMPLES`], at most up to the cap). Reaching the cap first logs a
/// warning and returns with `converged = false`.
///
/// # Errors
/// Any error from model construction or pricing, and
/// `PricingError::NumericalInstability` for a non-finite mean.
pub fn simulate<G, P, F>(
    rule: StoppingRule,
    parallel: Option<usize>,
    factory: F,
) -> Result<SimulationOutcome, PricingError>
where
    G: SequenceGenerator,
    P: PathPricer + Send,
    F: Fn(Stream) -> Result<McModel<G, P>, PricingError> + Sync,
{
    let mut runner = match parallel {
        Some(chunk_size) => Runner::Parallel {
            factory: &factory,
            chunk_size: chunk_size.max(1),
            next_chunk: 0,
        },
        None => Runner::Sequential(Box::new(factory(Stream::Sequential)?)),
    };
    let mut stats = RunningStatistics::new();
    let mut converged = true;

    match rule {
        StoppingRule::Samples(samples) => runner.add(samples, &mut stats)?,
        StoppingRule::Tolerance {
            tolerance,
            max_samples,
        } => {
            runner.add(MIN_SAMPLES.min(max_samples), &mut stats)?;
            loop {
                let error = stats.error_estimate();
                if error <= tolerance || !error.is_finite() {
                    break;
                }
                let drawn = stats.count();
                if drawn >= max_samples {
                    warn!(
                        samples = drawn,
                        error_estimate = error,
                        tolerance,
                        "maximum number of samples reached before tolerance"
                    );
                    converged = false;
                    break;
                }
                let order = error * error / (tolerance * tolerance);
                let projected = drawn as f64 * order * BATCH_DAMPING - drawn as f64;
                let next = projected
                    .max(MIN_SAMPLES as f64)
                    .min((max_samples - drawn) as f64) as usize;
                runner.add(next.max(1), &mut stats)?;
            }
        }
    }

    if !stats.mean().is_finite() {
        return Err(PricingError::NumericalInstability(format!(
            "non-finite mean after {} samples",
            stats.count()
        )));
    }
    Ok(SimulationOutcome {
        statistics: stats,
        converged,
    })
}
