//! Scenario command implementation
//!
//! Prints the effective scenario as TOML, a starting point for a scenario
//! file.

use crate::config::Scenario;
use crate::Result;

/// Run the scenario command
pub fn run(scenario: &Scenario) -> Result<()> {
    print!("{}", scenario.to_toml()?);
    Ok(())
}
