//! One-factor stochastic processes for Monte Carlo simulation.
//!
//! This module provides:
//! - [`StochasticProcess1D`]: drift, diffusion, initial state and the log-Euler step
//! - [`BlackScholesProcess`]: time-inhomogeneous process backed by term structures
//! - [`ConstantBlackScholesProcess`]: time-homogeneous process with frozen parameters
//! - [`ProcessEnum`]: static dispatch over the two variants
//! - [`freezer`]: the snapshot that turns the former into the latter
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use pricer_core::market_data::{CurveEnum, VolSurfaceEnum};
//! use pricer_models::models::{
//!     freeze_process, BlackScholesProcess, FreezePolicy, ProcessEnum, StochasticProcess1D,
//! };
//!
//! let process = BlackScholesProcess::new(
//!     36.0,
//!     Arc::new(CurveEnum::flat(0.01)),
//!     Arc::new(CurveEnum::flat(0.0)),
//!     Arc::new(VolSurfaceEnum::flat(0.2)),
//! );
//!
//! let frozen = freeze_process(&process, 0.25, 40.0, FreezePolicy::AtMaturity).unwrap();
//! let full = ProcessEnum::from(process);
//! let constant = ProcessEnum::from(frozen);
//!
//! // Flat market data: both variants agree
//! let d_full = full.drift(0.1, 36.0).unwrap();
//! let d_constant = constant.drift(0.1, 36.0).unwrap();
//! assert!((d_full - d_constant).abs() < 1e-10);
//! ```

mod black_scholes;
mod constant;
pub mod freezer;
mod process_enum;
mod stochastic;

pub use black_scholes::BlackScholesProcess;
pub use constant::ConstantBlackScholesProcess;
pub use freezer::{freeze_process, FreezePolicy, DEFAULT_FREEZE_OFFSET};
pub use process_enum::ProcessEnum;
pub use stochastic::StochasticProcess1D;
