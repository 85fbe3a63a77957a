//! Scenario configuration.
//!
//! A scenario fixes the market, the three options and the simulation
//! settings of a comparison run. It is read from a TOML file; every field
//! has a default, so a partial file only overrides what it names:
//!
//! ```toml
//! [market]
//! evaluation_date = "2022-02-24"
//! spot = 36.0
//!
//! [simulation]
//! samples = 200000
//! parallel = true
//! ```
//!
//! Command-line flags take precedence over the file.

use std::path::Path;

use pricer_core::types::Date;
use pricer_models::instruments::{BarrierType, OptionType};
use serde::{Deserialize, Serialize};

use crate::{CliError, Result};

/// Zero rate quoted for a pillar date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePillar {
    /// Pillar date
    pub date: Date,
    /// Continuously compounded zero rate
    pub rate: f64,
}

/// Black volatility quoted for an expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolPillar {
    /// Expiry date
    pub date: Date,
    /// Black volatility
    pub vol: f64,
}

/// Market data section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarketConfig {
    /// Evaluation date; all times are ACT/365 year fractions from it
    pub evaluation_date: Date,
    /// Spot price of the underlying
    pub spot: f64,
    /// Flat continuous dividend yield
    pub dividend_yield: f64,
    /// Zero curve pillars, linear in zero rate
    pub zero_curve: Vec<RatePillar>,
    /// Black volatility pillars, linear in total variance
    pub volatilities: Vec<VolPillar>,
}

/// Option terms shared by the European, Asian and barrier options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsConfig {
    /// Call or put
    pub option_type: OptionType,
    /// Strike
    pub strike: f64,
    /// Maturity date
    pub maturity: Date,
    /// Averaging dates of the Asian option
    pub fixings: Vec<Date>,
    /// Barrier direction and effect
    pub barrier_type: BarrierType,
    /// Barrier level
    pub barrier: f64,
    /// Rebate paid when the barrier option does not pay out
    pub rebate: f64,
}

/// Simulation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Time steps for the European and barrier engines
    pub steps: usize,
    /// Optional refinement of the Asian fixing grid
    pub asian_steps: Option<usize>,
    /// Number of samples per engine
    pub samples: usize,
    /// Random seed
    pub seed: u64,
    /// Antithetic variates
    pub antithetic: bool,
    /// Split the samples into parallel chunks
    pub parallel: bool,
    /// Samples per chunk when running in parallel
    pub chunk_size: Option<usize>,
}

/// Complete comparison scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    /// Market data
    pub market: MarketConfig,
    /// Option terms
    pub options: OptionsConfig,
    /// Simulation settings
    pub simulation: SimulationConfig,
}

fn date(year: i32, month: u32, day: u32) -> Date {
    Date::from_ymd(year, month, day).expect("literal scenario dates are valid")
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            evaluation_date: date(2022, 2, 24),
            spot: 36.0,
            dividend_yield: 0.0,
            zero_curve: vec![
                RatePillar {
                    date: date(2022, 2, 24),
                    rate: 0.01,
                },
                RatePillar {
                    date: date(2022, 8, 24),
                    rate: 0.015,
                },
            ],
            volatilities: vec![
                VolPillar {
                    date: date(2022, 5, 24),
                    vol: 0.20,
                },
                VolPillar {
                    date: date(2022, 8, 24),
                    vol: 0.25,
                },
            ],
        }
    }
}

impl Default for OptionsConfig {
    fn default() -> Self {
        let fixings = [
            (3, 4),
            (3, 14),
            (3, 24),
            (4, 4),
            (4, 14),
            (4, 24),
            (5, 4),
            (5, 14),
            (5, 24),
        ]
        .iter()
        .map(|&(m, d)| date(2022, m, d))
        .collect();
        Self {
            option_type: OptionType::Put,
            strike: 40.0,
            maturity: date(2022, 5, 24),
            fixings,
            barrier_type: BarrierType::UpIn,
            barrier: 40.0,
            rebate: 0.0,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps: 10,
            asian_steps: None,
            samples: 1_000_000,
            seed: 42,
            antithetic: false,
            parallel: false,
            chunk_size: None,
        }
    }
}

impl Scenario {
    /// Load a scenario from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate a scenario from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(content)
            .map_err(|e| CliError::Scenario(format!("Failed to parse TOML: {}", e)))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Render the scenario as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Scenario(format!("Failed to render TOML: {}", e)))
    }

    /// Check the settings that the pricing layers do not check themselves.
    pub fn validate(&self) -> Result<()> {
        let today = self.market.evaluation_date;
        if self.market.zero_curve.len() < 2 {
            return Err(CliError::Scenario(
                "zero_curve needs at least two pillars".to_string(),
            ));
        }
        if self.market.volatilities.is_empty() {
            return Err(CliError::Scenario(
                "volatilities needs at least one pillar".to_string(),
            ));
        }
        if let Some(pillar) = self.market.zero_curve.iter().find(|p| p.date < today) {
            return Err(CliError::Scenario(format!(
                "zero_curve pillar {} precedes the evaluation date {}",
                pillar.date, today
            )));
        }
        if self.options.maturity <= today {
            return Err(CliError::Scenario(format!(
                "maturity {} is not after the evaluation date {}",
                self.options.maturity, today
            )));
        }
        if self.options.fixings.is_empty() {
            return Err(CliError::Scenario("fixings must not be empty".to_string()));
        }
        if self.simulation.samples == 0 {
            return Err(CliError::Scenario("samples must be positive".to_string()));
        }
        Ok(())
    }

    /// Apply command-line overrides.
    pub fn merge_with_cli(&mut self, overrides: &Overrides) {
        if let Some(steps) = overrides.steps {
            self.simulation.steps = steps;
        }
        if let Some(samples) = overrides.samples {
            self.simulation.samples = samples;
        }
        if let Some(seed) = overrides.seed {
            self.simulation.seed = seed;
        }
        if overrides.antithetic {
            self.simulation.antithetic = true;
        }
        if overrides.parallel {
            self.simulation.parallel = true;
        }
    }
}

/// Simulation settings given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Time steps override
    pub steps: Option<usize>,
    /// Sample count override
    pub samples: Option<usize>,
    /// Seed override
    pub seed: Option<u64>,
    /// Force antithetic variates on
    pub antithetic: bool,
    /// Force parallel chunks on
    pub parallel: bool,
}
