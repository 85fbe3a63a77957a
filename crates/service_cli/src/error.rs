//! CLI error types

use pricer_core::market_data::MarketDataError;
use pricer_core::types::PricingError;
use pricer_models::instruments::InstrumentError;
use pricer_pricing::ConfigError;
use thiserror::Error;

/// CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Scenario file not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Scenario file could not be parsed or is inconsistent
    #[error("Invalid scenario: {0}")]
    Scenario(String),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Market data could not be built from the scenario
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    /// Option terms rejected
    #[error("Instrument error: {0}")]
    Instrument(#[from] InstrumentError),

    /// Engine options rejected by the builder
    #[error("Engine configuration error: {0}")]
    EngineConfig(#[from] ConfigError),

    /// Pricing failed
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// CSV output failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
