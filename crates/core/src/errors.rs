//! Core error types for the pension rebalancer.
//!
//! Catalog problems are reported as [`ConfigError`] and are fatal: no
//! instrument-level figure can be trusted when the catalog is broken.
//! Bad user input is reported as [`ValidationError`]. Price lookups never
//! surface here during a rebalance pass; a failed lookup only marks one
//! instrument's price unavailable.

use thiserror::Error;

pub use pension_market_data::errors::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the rebalancer.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid catalog: {0}")]
    Config(#[from] ConfigError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Failed to load configuration: {0}")]
    ConfigIO(String),
}

/// Errors in the instrument catalog.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Instrument '{0}' is declared more than once")]
    DuplicateInstrument(String),

    #[error("Invalid instrument entry: {0}")]
    InvalidInstrument(String),

    #[error("Instrument '{id}' has invalid weight {weight}; expected a fraction between 0 and 1")]
    InvalidWeight { id: String, weight: f64 },

    #[error("Sleeve '{group}' has more than one substitute member: {members:?}")]
    MultipleSubstitutes { group: String, members: Vec<String> },

    #[error("Sleeve '{0}' has no members")]
    EmptySleeve(String),

    #[error("Instrument '{0}' is not in the catalog")]
    UnknownInstrument(String),

    #[error("Sleeve '{0}' is not in the catalog")]
    UnknownSleeve(String),

    #[error("Failed to parse catalog: {0}")]
    Parse(String),
}

/// Validation errors for user input.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{field} must be a non-negative amount, got {value}")]
    NegativeAmount { field: String, value: f64 },

    #[error("Weight for '{id}' must be between 0 and 1, got {weight}")]
    WeightOutOfRange { id: String, weight: f64 },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::ConfigIO(err.to_string())
    }
}
