//! # Random Number Generation
//!
//! Seedable random sources for Monte Carlo path generation.
//!
//! - [`PricerRng`]: pseudo-random uniforms and normals over `rand::StdRng`
//! - [`SobolSequence`]: scrambled low-discrepancy points in (0, 1)
//! - [`RandomPolicy`]: compile-time selection of the Gaussian source used
//!   by an engine ([`PseudoRandom`] or [`LowDiscrepancy`])
//!
//! Every generator is owned by exactly one simulation loop; parallel runs
//! derive one independent generator per chunk with [`chunk_seed`].
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::{PseudoRandom, RandomPolicy, SequenceGenerator};
//!
//! let mut gen = PseudoRandom::make_sequence_generator(10, 42);
//! let mut draws = vec![0.0; gen.dimension()];
//! gen.next_gaussian(&mut draws);
//! ```

mod policy;
mod prng;
mod sobol;

pub use policy::{
    chunk_seed, LowDiscrepancy, LowDiscrepancySequence, PseudoRandom, PseudoRandomSequence,
    RandomPolicy, SequenceGenerator,
};
pub use prng::PricerRng;
pub use sobol::SobolSequence;
