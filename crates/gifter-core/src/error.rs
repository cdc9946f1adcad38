//! Core error types for gifter-core.
//!
//! Progression math never fails. Errors only arise when a tier table or
//! configuration file is loaded, edited, or validated.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for gifter-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tier table validation errors
    #[error("Invalid tier table: {0}")]
    TierTable(#[from] TierTableError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration document
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Reasons a tier table (or the reveal policy on top of it) is rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TierTableError {
    #[error("tier table has no tiers")]
    Empty,

    #[error("first tier must start at 0 coins, found {start}")]
    NotStartingAtZero { start: u64 },

    #[error("tier '{key}' starts at {actual} but the previous tier ends at {expected}")]
    Gap {
        key: String,
        expected: u64,
        actual: u64,
    },

    #[error("tier '{key}' has an empty coin range")]
    EmptyRange { key: String },

    #[error("tier '{key}' has growth factor {value}; it must be finite and greater than 1")]
    InvalidGrowthFactor { key: String, value: f64 },

    #[error("tier '{key}' must have a level count between 1 and 10000 when bounded, and none when unbounded")]
    InvalidLevelCount { key: String },

    #[error("tier table has no unbounded terminal tier")]
    MissingUnboundedTier,

    #[error("unbounded tier '{key}' must be the last tier")]
    UnboundedNotLast { key: String },

    #[error("duplicate tier key '{0}'")]
    DuplicateKey(String),

    #[error("unbounded tier base cost must be at least 1 coin")]
    InvalidBaseCost,

    #[error("reveal tier '{0}' is not a bounded tier in the table")]
    UnknownRevealTier(String),

    #[error("reveal level {level} is outside 1..={max} for tier '{key}'")]
    RevealLevelOutOfRange { key: String, level: u32, max: u32 },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
