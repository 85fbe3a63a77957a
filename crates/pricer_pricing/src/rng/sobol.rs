//! Scrambled Sobol-type low-discrepancy sequence.
//!
//! Points are generated in Gray-code order (Antonov-Saleev), so each new
//! point costs one XOR per dimension. The first dimension uses the canonical
//! van der Corput direction numbers; higher dimensions draw odd direction
//! numbers from a seeded hash, and every dimension carries a digital shift
//! so different seeds give independent randomised sequences.

/// 2^-53, mapping the top 53 bits of a word onto (0, 1).
const INV_2_53: f64 = 1.0 / 9_007_199_254_740_992.0;

/// Low-discrepancy sequence on the open unit hypercube.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::SobolSequence;
///
/// let mut sobol = SobolSequence::new(4, 42);
/// let mut point = [0.0; 4];
/// sobol.next_into(&mut point);
/// assert!(point.iter().all(|&u| u > 0.0 && u < 1.0));
/// ```
#[derive(Debug, Clone)]
pub struct SobolSequence {
    dimension: usize,
    index: u64,
    state: Vec<u64>,
    directions: Vec<[u64; 64]>,
    shifts: Vec<u64>,
}

impl SobolSequence {
    /// Sequence of the given dimension, randomised by `seed`.
    pub fn new(dimension: usize, seed: u64) -> Self {
        let directions = (0..dimension)
            .map(|d| direction_numbers(d as u64, seed))
            .collect();
        let shifts = (0..dimension)
            .map(|d| splitmix64(seed ^ ((d as u64 + 1) << 32)))
            .collect();
        Self {
            dimension,
            index: 0,
            state: vec![0; dimension],
            directions,
            shifts,
        }
    }

    /// Dimension of each point.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Write the next point into `out[..dimension]`.
    #[inline]
    pub fn next_into(&mut self, out: &mut [f64]) {
        for (d, value) in out.iter_mut().take(self.dimension).enumerate() {
            let shifted = self.state[d] ^ self.shifts[d];
            *value = ((shifted >> 11) as f64 + 0.5) * INV_2_53;
        }
        self.index = self.index.wrapping_add(1);
        let c = (self.index.trailing_zeros() as usize).min(63);
        for (state, directions) in self.state.iter_mut().zip(self.directions.iter()) {
            *state ^= directions[c];
        }
    }
}

fn direction_numbers(dim: u64, seed: u64) -> [u64; 64] {
    let mut v = [0_u64; 64];
    if dim == 0 {
        for (j, item) in v.iter_mut().enumerate() {
            *item = 1_u64 << (63 - j);
        }
        return v;
    }
    for (j, item) in v.iter_mut().enumerate() {
        let hash = splitmix64(seed ^ ((dim + 1) << 40) ^ j as u64);
        let mask = if j == 63 {
            u64::MAX
        } else {
            (1_u64 << (j + 1)) - 1
        };
        *item = ((hash | 1) & mask) << (63 - j);
    }
    v
}

/// SplitMix64 finaliser.
#[inline]
pub(crate) fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}
