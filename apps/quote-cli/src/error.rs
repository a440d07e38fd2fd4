//! # CLI Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ConfigError ──┐                                                        │
//! │  PricingError ─┼──► AppError ──► main() ──► stderr, exit code 1        │
//! │  serde_json ───┘                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use adquote_core::{AdTier, PricingError};
use thiserror::Error;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for the CLI.
pub type AppResult<T> = Result<T, AppError>;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML or does not match the schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Environment variable holds something that is not a price.
    #[error("Invalid value for {var}: '{value}'")]
    InvalidEnvValue { var: String, value: String },

    /// A customer entry has an empty id.
    #[error("Customer #{index} has an empty id")]
    EmptyCustomerId { index: usize },

    /// Two customer entries share an id.
    #[error("Customer id '{0}' is defined more than once")]
    DuplicateCustomer(String),

    /// A special price or scenario names a customer that is not defined.
    #[error("Unknown customer '{0}'")]
    UnknownCustomer(String),

    /// A special price rule is malformed.
    #[error("Invalid special price for customer '{customer}' ({tier}): {reason}")]
    InvalidSpecialPrice {
        customer: String,
        tier: AdTier,
        reason: String,
    },
}

/// Errors reported by the `adquote` binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Pricing failed: {0}")]
    Pricing(#[from] PricingError),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}
