//! Black volatility term structures.
//!
//! This module provides:
//! - [`VolatilitySurface`]: Generic trait for Black volatility, variance and local volatility
//! - [`FlatVol`]: Constant volatility implementation
//! - [`BlackVarianceCurve`]: Strike-independent term structure, linear in total variance
//! - [`VolSurfaceEnum`]: Static dispatch enum over the concrete surfaces

mod flat;
mod traits;
mod variance_curve;
mod vol_enum;

pub use flat::FlatVol;
pub use traits::VolatilitySurface;
pub use variance_curve::BlackVarianceCurve;
pub use vol_enum::VolSurfaceEnum;
