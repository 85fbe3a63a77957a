//! # Pricer Models (L2: Business Logic)
//!
//! Stochastic processes, parameter freezing and option instruments.
//!
//! This crate provides:
//! - The [`models::StochasticProcess1D`] abstraction with a term-structure
//!   Black-Scholes process and its constant-parameter counterpart
//! - [`models::freezer`]: snapshotting a term-structure process into a
//!   constant one under an explicit [`models::FreezePolicy`]
//! - Instrument definitions (European, discrete average-strike Asian, barrier)
//!   and the [`instruments::PricingEngine`] seam engines implement
//! - Closed-form Black-Scholes and barrier formulas for validation
//!
//! ## Design Principles
//!
//! - **Enum-based processes** for static dispatch inside the path loop
//! - **Immutable market data** shared through `Arc`
//! - **Explicit failure**: every market query and precondition returns `Result`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod models;
