//! Running sample statistics.

/// Single-pass accumulator of sample moments.
///
/// Uses Welford's update for the mean and the sum of squared deviations,
/// and Chan's pairwise formula for [`merge`](Self::merge), so chunked
/// accumulation agrees with sequential accumulation up to rounding.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::RunningStatistics;
///
/// let mut stats = RunningStatistics::new();
/// for x in [1.0, 2.0, 3.0, 4.0] {
///     stats.add(x);
/// }
/// assert_eq!(stats.count(), 4);
/// assert!((stats.mean() - 2.5).abs() < 1e-15);
/// assert!((stats.variance() - 5.0 / 3.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunningStatistics {
    count: usize,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl Default for RunningStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl RunningStatistics {
    /// Empty accumulator.
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Add one sample.
    #[inline]
    pub fn add(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Fold `other` into `self`.
    pub fn merge(&mut self, other: &RunningStatistics) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }
        let n_a = self.count as f64;
        let n_b = other.count as f64;
        let n = n_a + n_b;
        let delta = other.mean - self.mean;
        self.mean += delta * n_b / n;
        self.m2 += other.m2 + delta * delta * n_a * n_b / n;
        self.count += other.count;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Number of samples.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Sample mean; 0 when empty.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Unbiased sample variance; 0 with fewer than two samples.
    #[inline]
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            (self.m2 / (self.count - 1) as f64).max(0.0)
        }
    }

    /// Standard error of the mean, `sqrt(variance / count)`.
    #[inline]
    pub fn error_estimate(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.variance() / self.count as f64).sqrt()
        }
    }

    /// Smallest sample; `+inf` when empty.
    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest sample; `-inf` when empty.
    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_empty() {
        let stats = RunningStatistics::new();
        assert_eq!(stats.count(), 0);
        assert_eq!(stats.mean(), 0.0);
        assert_eq!(stats.variance(), 0.0);
        assert_eq!(stats.error_estimate(), 0.0);
    }

    #[test]
    fn test_constant_samples_have_zero_error() {
        let mut stats = RunningStatistics::new();
        for _ in 0..100 {
            stats.add(3.5);
        }
        assert_relative_eq!(stats.mean(), 3.5);
        assert_eq!(stats.error_estimate(), 0.0);
        assert_eq!(stats.min(), 3.5);
        assert_eq!(stats.max(), 3.5);
    }

    #[test]
    fn test_merge_with_empty() {
        let mut a = RunningStatistics::new();
        let mut b = RunningStatistics::new();
        b.add(1.0);
        b.add(2.0);
        a.merge(&b);
        assert_eq!(a, b);
        a.merge(&RunningStatistics::new());
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_merge_matches_sequential(
            xs in prop::collection::vec(-100.0f64..100.0, 1..200),
            split in 0usize..200,
        ) {
            let split = split.min(xs.len());
            let mut all = RunningStatistics::new();
            xs.iter().for_each(|&x| all.add(x));

            let mut left = RunningStatistics::new();
            let mut right = RunningStatistics::new();
            xs[..split].iter().for_each(|&x| left.add(x));
            xs[split..].iter().for_each(|&x| right.add(x));
            left.merge(&right);

            prop_assert_eq!(left.count(), all.count());
            prop_assert!((left.mean() - all.mean()).abs() < 1e-9);
            prop_assert!((left.variance() - all.variance()).abs() < 1e-7 * (1.0 + all.variance()));
            prop_assert_eq!(left.min(), all.min());
            prop_assert_eq!(left.max(), all.max());
        }

        #[test]
        fn prop_merge_commutes(
            xs in prop::collection::vec(-10.0f64..10.0, 1..50),
            ys in prop::collection::vec(-10.0f64..10.0, 1..50),
        ) {
            let mut a = RunningStatistics::new();
            let mut b = RunningStatistics::new();
            xs.iter().for_each(|&x| a.add(x));
            ys.iter().for_each(|&y| b.add(y));
            let mut ab = a;
            ab.merge(&b);
            let mut ba = b;
            ba.merge(&a);
            prop_assert!((ab.mean() - ba.mean()).abs() < 1e-12);
            prop_assert!((ab.variance() - ba.variance()).abs() < 1e-9);
        }
    }
}
