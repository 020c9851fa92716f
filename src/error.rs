//! Error types for the fallible edges of the engine
//!
//! Battle verbs never return these: an invalid action is a silent no-op.
//! Errors only surface where input comes from outside the battle loop,
//! such as configuration files and environment overrides.

use thiserror::Error;

/// Errors produced while loading or validating engine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("pa.max must be at least 1")]
    ZeroActionPoints,

    #[error("trio.trade_discard_count must be between 1 and 3 (got {0})")]
    TradeDiscardCount(usize),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Load(Box::new(err))
    }
}
