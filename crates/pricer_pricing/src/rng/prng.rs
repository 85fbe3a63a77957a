//! Seeded pseudo-random generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Reproducible pseudo-random source for path simulation.
///
/// Wraps `StdRng` and draws standard normals with the Ziggurat method
/// (`rand_distr::StandardNormal`). The same seed always yields the same
/// stream.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::PricerRng;
///
/// let mut a = PricerRng::from_seed(42);
/// let mut b = PricerRng::from_seed(42);
/// assert_eq!(a.gen_normal(), b.gen_normal());
///
/// let mut buffer = vec![0.0; 16];
/// a.fill_normal(&mut buffer);
/// ```
#[derive(Debug, Clone)]
pub struct PricerRng {
    inner: StdRng,
    seed: u64,
}

impl PricerRng {
    /// Generator initialised from `seed`.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed used at construction.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform draw in [0, 1).
    #[inline]
    pub fn gen_uniform(&mut self) -> f64 {
        self.inner.gen()
    }

    /// Uniform draw in (0, 1], safe to pass to `ln`.
    #[inline]
    pub fn gen_open_uniform(&mut self) -> f64 {
        1.0 - self.inner.gen::<f64>()
    }

    /// Standard normal draw.
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Fill `buffer` with uniforms in (0, 1].
    #[inline]
    pub fn fill_open_uniform(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.gen_open_uniform();
        }
    }

    /// Fill `buffer` with standard normals.
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(&mut self.inner);
        }
    }
}
