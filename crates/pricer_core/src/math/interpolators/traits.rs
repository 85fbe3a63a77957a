//! Interpolator trait definition.

use crate::types::InterpolationError;
use num_traits::Float;

/// One-dimensional interpolator over a fixed set of knots.
pub trait Interpolator<T: Float> {
    /// Interpolated value at `x`.
    ///
    /// Returns `InterpolationError::OutOfBounds` outside [`Interpolator::domain`].
    fn interpolate(&self, x: T) -> Result<T, InterpolationError>;

    /// The closed range `(x_min, x_max)` covered by the knots.
    fn domain(&self) -> (T, T);
}
