//! Numerical building blocks shared by the term structures.
//!
//! - [`interpolators`]: piecewise linear interpolation on sorted knots

pub mod interpolators;
