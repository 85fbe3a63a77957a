//! Monte Carlo simulation infrastructure.
//!
//! # Architecture
//!
//! ```text
//! McEngineBuilder ─▶ McSettings
//! simulate(StoppingRule)
//! └── McModel (one per Stream)
//!     ├── PathGenerator
//!     │   ├── ProcessEnum
//!     │   ├── TimeGrid
//!     │   ├── SequenceGenerator
//!     │   └── BrownianBridge (optional)
//!     └── PathPricer ─▶ RunningStatistics
//! ```
//!
//! Engines build a [`TimeGrid`] and a [`ProcessEnum`](pricer_models::models::ProcessEnum)
//! per pricing call, then hand [`simulate`] a factory producing one
//! [`McModel`] per random [`Stream`]. A sequential run uses a single stream
//! seeded with the configured seed; a parallel run derives one stream per
//! chunk.
//!
//! # Examples
//!
//! ```rust
//! use pricer_models::models::{ConstantBlackScholesProcess, ProcessEnum};
//! use pricer_models::instruments::{OptionType, Payoff};
//! use pricer_pricing::mc::{simulate, McModel, PathGenerator, StoppingRule, TimeGrid};
//! use pricer_pricing::path_dependent::EuropeanPathPricer;
//! use pricer_pricing::rng::{PseudoRandom, RandomPolicy};
//!
//! let outcome = simulate(StoppingRule::Samples(2_000), None, |stream| {
//!     let process = ProcessEnum::from(ConstantBlackScholesProcess::new(100.0, 0.0, 0.05, 0.2));
//!     let grid = TimeGrid::uniform(1.0, 1)?;
//!     let sequence = PseudoRandom::make_sequence_generator(grid.steps(), stream.seed(42));
//!     let generator = PathGenerator::new(process, grid, sequence, false)?;
//!     let payoff = Payoff::plain_vanilla(OptionType::Call, 100.0).unwrap();
//!     let pricer = EuropeanPathPricer::new(payoff, (-0.05f64).exp());
//!     Ok(McModel::new(generator, pricer, true))
//! })
//! .unwrap();
//!
//! assert_eq!(outcome.statistics.count(), 2_000);
//! assert!((outcome.statistics.mean() - 10.45).abs() < 1.0);
//! ```

mod brownian_bridge;
mod config;
mod error;
mod path;
mod path_generator;
mod simulation;
mod statistics;
mod time_grid;

pub use brownian_bridge::BrownianBridge;
pub use config::{McEngineBuilder, McSettings, StoppingRule, TimeStepping, DEFAULT_CHUNK_SIZE};
pub(crate) use config::EngineDefaults;
pub use error::ConfigError;
pub use path::Path;
pub use path_generator::PathGenerator;
pub use simulation::{simulate, McModel, SimulationOutcome, Stream, MIN_SAMPLES};
pub use statistics::RunningStatistics;
pub use time_grid::TimeGrid;
