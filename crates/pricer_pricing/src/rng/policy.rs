//! Random policies: how an engine turns a seed into Gaussian draws.

use pricer_models::analytical::inverse_norm_cdf;

use super::prng::PricerRng;
use super::sobol::{splitmix64, SobolSequence};

/// Source of fixed-dimension Gaussian vectors, one vector per path.
pub trait SequenceGenerator: Send {
    /// Number of draws per vector.
    fn dimension(&self) -> usize;

    /// Write the next vector of standard normals into `out`.
    ///
    /// `out` must hold at least [`dimension`](Self::dimension) elements.
    fn next_gaussian(&mut self, out: &mut [f64]);
}

/// Compile-time choice of random numbers for a Monte Carlo engine.
///
/// Engines are generic over the policy so the generator type is resolved
/// statically. A policy without meaningful sample variance sets
/// [`ALLOWS_ERROR_ESTIMATE`](Self::ALLOWS_ERROR_ESTIMATE) to `false`, which
/// forbids tolerance-driven stopping.
pub trait RandomPolicy: Send + Sync + 'static {
    /// Generator built by this policy.
    type Generator: SequenceGenerator;

    /// Short identifier used in logs.
    const NAME: &'static str;

    /// Whether the sample standard error is a valid error estimate.
    const ALLOWS_ERROR_ESTIMATE: bool;

    /// Generator of the given dimension seeded with `seed`.
    fn make_sequence_generator(dimension: usize, seed: u64) -> Self::Generator;
}

/// Pseudo-random Gaussian vectors backed by [`PricerRng`].
#[derive(Debug, Clone)]
pub struct PseudoRandomSequence {
    rng: PricerRng,
    dimension: usize,
}

impl SequenceGenerator for PseudoRandomSequence {
    #[inline]
    fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    fn next_gaussian(&mut self, out: &mut [f64]) {
        self.rng.fill_normal(&mut out[..self.dimension]);
    }
}

/// Gaussian vectors from a scrambled Sobol-type sequence through the inverse
/// normal CDF.
#[derive(Debug, Clone)]
pub struct LowDiscrepancySequence {
    sobol: SobolSequence,
}

impl SequenceGenerator for LowDiscrepancySequence {
    #[inline]
    fn dimension(&self) -> usize {
        self.sobol.dimension()
    }

    fn next_gaussian(&mut self, out: &mut [f64]) {
        let n = self.sobol.dimension();
        self.sobol.next_into(&mut out[..n]);
        for value in out[..n].iter_mut() {
            *value = inverse_norm_cdf(*value);
        }
    }
}

/// Pseudo-random policy; the default for every engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct PseudoRandom;

impl RandomPolicy for PseudoRandom {
    type Generator = PseudoRandomSequence;
    const NAME: &'static str = "pseudo_random";
    const ALLOWS_ERROR_ESTIMATE: bool = true;

    fn make_sequence_generator(dimension: usize, seed: u64) -> Self::Generator {
        PseudoRandomSequence {
            rng: PricerRng::from_seed(seed),
            dimension,
        }
    }
}

/// Quasi-random (Sobol-type) policy.
///
/// Points are not independent, so no error estimate is reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowDiscrepancy;

impl RandomPolicy for LowDiscrepancy {
    type Generator = LowDiscrepancySequence;
    const NAME: &'static str = "low_discrepancy";
    const ALLOWS_ERROR_ESTIMATE: bool = false;

    fn make_sequence_generator(dimension: usize, seed: u64) -> Self::Generator {
        LowDiscrepancySequence {
            sobol: SobolSequence::new(dimension, seed),
        }
    }
}

/// Seed for chunk `chunk` of a parallel run started from `seed`.
///
/// Depends only on its arguments, so results do not depend on how chunks
/// are scheduled across threads.
#[inline]
pub fn chunk_seed(seed: u64, chunk: u64) -> u64 {
    splitmix64(seed ^ splitmix64(chunk.wrapping_add(1)))
}
