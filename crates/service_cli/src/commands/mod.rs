//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod compare;
pub mod scenario;
