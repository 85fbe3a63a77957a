//! # Pricer Pricing (L3: Monte Carlo Engines)
//!
//! Monte Carlo pricing on top of the processes and instruments of
//! `pricer_models`.
//!
//! This crate provides:
//! - [`rng`]: seeded pseudo-random and scrambled Sobol-type sequences behind the
//!   [`rng::RandomPolicy`] seam
//! - [`mc`]: time grids, path generation with optional Brownian bridge,
//!   running statistics, the stopping-rule driver and the engine builder
//! - [`path_dependent`]: per-path pricers for European, average-strike Asian
//!   and barrier payoffs
//! - [`engines`]: the three Monte Carlo engines
//!
//! ## Constant versus term-structure parameters
//!
//! Every engine simulates the term-structure [`BlackScholesProcess`] by
//! default. With `with_constant_parameters(true)` it freezes the process at
//! the end of the simulation grid, under the engine's
//! [`FreezePolicy`](pricer_models::models::FreezePolicy), and simulates the
//! constant process instead, which trades accuracy for speed.
//!
//! ## Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//! use pricer_core::market_data::{CurveEnum, VolSurfaceEnum};
//! use pricer_models::instruments::{BarrierOption, BarrierType, Exercise, Instrument, OptionType, Payoff};
//! use pricer_models::models::BlackScholesProcess;
//! use pricer_pricing::McEngineBuilder;
//!
//! let process = BlackScholesProcess::new(
//!     36.0,
//!     Arc::new(CurveEnum::flat(0.0125)),
//!     Arc::new(CurveEnum::flat(0.0)),
//!     Arc::new(VolSurfaceEnum::flat(0.2)),
//! );
//! let engine = McEngineBuilder::new(process)
//!     .with_steps(10)
//!     .with_samples(5_000)
//!     .with_seed(42)
//!     .with_constant_parameters(true)
//!     .build_barrier()
//!     .unwrap();
//!
//! let mut option = BarrierOption::new(
//!     BarrierType::UpIn,
//!     40.0,
//!     0.0,
//!     Payoff::plain_vanilla(OptionType::Put, 40.0).unwrap(),
//!     Exercise::european(0.25).unwrap(),
//! )
//! .unwrap();
//! let results = option.price_with(&engine).unwrap();
//! assert!(results.value > 0.0 && results.value < 1.0);
//! assert_eq!(results.samples, 5_000);
//! ```
//!
//! [`BlackScholesProcess`]: pricer_models::models::BlackScholesProcess

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod engines;
pub mod mc;
pub mod path_dependent;
pub mod rng;

pub use engines::{McBarrierEngine, McDiscreteArithmeticAsianEngine, McEuropeanEngine};
pub use mc::{ConfigError, McEngineBuilder, StoppingRule, TimeStepping};
pub use rng::{LowDiscrepancy, PseudoRandom, RandomPolicy};
