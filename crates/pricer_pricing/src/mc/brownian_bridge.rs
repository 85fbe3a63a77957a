//! Brownian bridge construction of Gaussian increments.
//!
//! The first input draw fixes the terminal Brownian value; each further draw
//! fills the midpoint of the widest remaining gap conditionally on its two
//! neighbours. The output is the usual vector of independent standardised
//! increments, so a path generator can consume it unchanged. With
//! low-discrepancy inputs this concentrates the best-distributed coordinates
//! on the directions that carry most of the path variance.

use pricer_core::types::PricingError;

/// Bridge over the positive times of a grid.
#[derive(Debug, Clone)]
pub struct BrownianBridge {
    size: usize,
    sqrt_dt: Vec<f64>,
    bridge_index: Vec<usize>,
    left_index: Vec<usize>,
    right_index: Vec<usize>,
    left_weight: Vec<f64>,
    right_weight: Vec<f64>,
    std_dev: Vec<f64>,
}

impl BrownianBridge {
    /// Bridge for the strictly increasing, positive `times` (grid times
    /// without the initial zero).
    ///
    /// # Errors
    /// `PricingError::InvalidInput` for an empty, non-positive or
    /// non-increasing set of times.
    pub fn new(times: &[f64]) -> Result<Self, PricingError> {
        let size = times.len();
        if size == 0 {
            return Err(PricingError::InvalidInput(
                "brownian bridge needs at least one time".to_string(),
            ));
        }
        if times[0] <= 0.0 || times.windows(2).any(|w| w[1] <= w[0]) {
            return Err(PricingError::InvalidInput(
                "brownian bridge times must be positive and increasing".to_string(),
            ));
        }

        let mut sqrt_dt = Vec::with_capacity(size);
        sqrt_dt.push(times[0].sqrt());
        for w in times.windows(2) {
            sqrt_dt.push((w[1] - w[0]).sqrt());
        }

        let mut bridge_index = vec![0; size];
        let mut left_index = vec![0; size];
        let mut right_index = vec![0; size];
        let mut left_weight = vec![0.0; size];
        let mut right_weight = vec![0.0; size];
        let mut std_dev = vec![0.0; size];

        // map[i] != 0 once point i has been constructed
        let mut map = vec![0usize; size];
        map[size - 1] = 1;
        bridge_index[0] = size - 1;
        std_dev[0] = times[size - 1].sqrt();

        let mut j = 0;
        for i in 1..size {
            while map[j] != 0 {
                j += 1;
            }
            let mut k = j;
            while map[k] == 0 {
                k += 1;
            }
            // j..k-1 is the next gap to fill, k its right end
            let l = j + ((k - 1 - j) >> 1);
            map[l] = i;
            bridge_index[i] = l;
            left_index[i] = j;
            right_index[i] = k;
            if j != 0 {
                let span = times[k] - times[j - 1];
                left_weight[i] = (times[k] - times[l]) / span;
                right_weight[i] = (times[l] - times[j - 1]) / span;
                std_dev[i] = ((times[l] - times[j - 1]) * (times[k] - times[l]) / span).sqrt();
            } else {
                left_weight[i] = (times[k] - times[l]) / times[k];
                right_weight[i] = times[l] / times[k];
                std_dev[i] = (times[l] * (times[k] - times[l]) / times[k]).sqrt();
            }
            j = k + 1;
            if j >= size {
                j = 0;
            }
        }

        Ok(Self {
            size,
            sqrt_dt,
            bridge_index,
            left_index,
            right_index,
            left_weight,
            right_weight,
            std_dev,
        })
    }

    /// Number of draws consumed and increments produced.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Map independent standard normals `input` to standardised increments
    /// written into `output`.
    ///
    /// Both slices must have length [`size`](Self::size).
    pub fn transform(&self, input: &[f64], output: &mut [f64]) {
        let n = self.size;
        output[n - 1] = self.std_dev[0] * input[0];
        for i in 1..n {
            let j = self.left_index[i];
            let k = self.right_index[i];
            let l = self.bridge_index[i];
            let left = if j != 0 {
                self.left_weight[i] * output[j - 1]
            } else {
                0.0
            };
            output[l] = left + self.right_weight[i] * output[k] + self.std_dev[i] * input[i];
        }
        // Brownian levels to increments, then standardise
        for i in (1..n).rev() {
            output[i] -= output[i - 1];
            output[i] /= self.sqrt_dt[i];
        }
        output[0] /= self.sqrt_dt[0];
    }
}
