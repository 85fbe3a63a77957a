//! Simulation time grids.

use pricer_core::types::PricingError;

/// Ordered simulation times starting at zero.
///
/// A grid is either uniform over `[0, end]` or built around a set of
/// mandatory times (e.g. averaging fixings). In the latter case the
/// positions of the mandatory times are kept so that path pricers can read
/// the simulated values on those dates.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::TimeGrid;
///
/// let grid = TimeGrid::with_mandatory(&[0.1, 0.25], Some(5)).unwrap();
/// assert_eq!(grid.times()[0], 0.0);
/// assert_eq!(grid.last(), 0.25);
/// assert_eq!(grid.mandatory_indices().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    times: Vec<f64>,
    mandatory_indices: Vec<usize>,
}

impl TimeGrid {
    /// `steps` equal intervals over `[0, end]`.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` if `end` is not positive or `steps` is zero.
    pub fn uniform(end: f64, steps: usize) -> Result<Self, PricingError> {
        if !end.is_finite() || end <= 0.0 {
            return Err(PricingError::InvalidInput(format!(
                "time grid end must be positive, got {}",
                end
            )));
        }
        if steps == 0 {
            return Err(PricingError::InvalidInput(
                "time grid needs at least one step".to_string(),
            ));
        }
        let dt = end / steps as f64;
        let mut times: Vec<f64> = (0..steps).map(|i| i as f64 * dt).collect();
        times.push(end);
        Ok(Self {
            times,
            mandatory_indices: vec![steps],
        })
    }

    /// Grid through the given mandatory times, starting at zero.
    ///
    /// Without `steps` the grid is exactly `{0} ∪ mandatory`. With `steps`,
    /// each interval between consecutive mandatory times is split into
    /// `max(round(length / dt_max), 1)` equal sub-steps where
    /// `dt_max = last / steps`.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` for an empty set, negative or non-finite
    /// times, a last time of zero, or `steps == Some(0)`.
    pub fn with_mandatory(mandatory: &[f64], steps: Option<usize>) -> Result<Self, PricingError> {
        let mut sorted = mandatory.to_vec();
        if sorted.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(PricingError::InvalidInput(
                "negative or non-finite times not allowed in a time grid".to_string(),
            ));
        }
        sorted.sort_by(f64::total_cmp);
        sorted.dedup();
        let last = match sorted.last() {
            Some(&t) if t > 0.0 => t,
            _ => {
                return Err(PricingError::InvalidInput(
                    "time grid needs a positive mandatory time".to_string(),
                ))
            }
        };
        if steps == Some(0) {
            return Err(PricingError::InvalidInput(
                "time grid needs at least one step".to_string(),
            ));
        }
        let dt_max = steps.map(|n| last / n as f64);

        let mut times = vec![0.0];
        let mut mandatory_indices = Vec::with_capacity(sorted.len());
        let mut begin = 0.0;
        for &end in &sorted {
            if end > 0.0 {
                let sub_steps = dt_max
                    .map(|dt| (((end - begin) / dt).round() as usize).max(1))
                    .unwrap_or(1);
                let dt = (end - begin) / sub_steps as f64;
                for n in 1..sub_steps {
                    times.push(begin + n as f64 * dt);
                }
                times.push(end);
            }
            mandatory_indices.push(times.len() - 1);
            begin = end;
        }
        Ok(Self {
            times,
            mandatory_indices,
        })
    }

    /// All grid times, starting at 0.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Number of grid points (steps + 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false; a grid holds at least two points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Number of intervals.
    #[inline]
    pub fn steps(&self) -> usize {
        self.times.len() - 1
    }

    /// Final time.
    #[inline]
    pub fn last(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Length of interval `i`, i.e. `t[i+1] - t[i]`.
    #[inline]
    pub fn dt(&self, i: usize) -> f64 {
        self.times[i + 1] - self.times[i]
    }

    /// Grid positions of the mandatory times, in increasing order.
    ///
    /// For a uniform grid this is the final index only.
    #[inline]
    pub fn mandatory_indices(&self) -> &[usize] {
        &self.mandatory_indices
    }
}
