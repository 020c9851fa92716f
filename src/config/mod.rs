//! Engine configuration
//!
//! Layered with figment, later layers winning:
//! 1. built-in defaults
//! 2. an optional TOML file
//! 3. `SKIRMISH_` environment variables (`__` separates nested keys,
//!    e.g. `SKIRMISH_PA__MAX=4`)

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::battle::ActionKind;
use crate::error::ConfigError;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "SKIRMISH_";

/// Top-level engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub pa: PaConfig,
    pub trio: TrioConfig,
    pub effects: EffectConfig,
}

/// Action point budget and per-action costs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaConfig {
    pub max: u32,
    pub costs: PaCosts,
}

impl Default for PaConfig {
    fn default() -> Self {
        Self {
            max: 3,
            costs: PaCosts::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaCosts {
    pub attack: u32,
    pub item: u32,
    pub switch: u32,
    pub attribute_test: u32,
    pub board_move: u32,
}

impl Default for PaCosts {
    fn default() -> Self {
        Self {
            attack: 2,
            item: 1,
            switch: 1,
            attribute_test: 1,
            board_move: 1,
        }
    }
}

impl PaCosts {
    pub fn cost(&self, kind: ActionKind) -> u32 {
        match kind {
            ActionKind::Attack => self.attack,
            ActionKind::Item => self.item,
            ActionKind::Switch => self.switch,
            ActionKind::AttributeTest => self.attribute_test,
            ActionKind::BoardMove => self.board_move,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrioConfig {
    /// Luck cards discarded by a trade; the rest stay on the field marked used
    pub trade_discard_count: usize,
}

impl Default for TrioConfig {
    fn default() -> Self {
        Self {
            trade_discard_count: 3,
        }
    }
}

/// Suggested presentation durations, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    pub attack_ms: u64,
    pub critical_ms: u64,
    pub trio_ms: u64,
    pub card_ms: u64,
    pub faint_ms: u64,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            attack_ms: 600,
            critical_ms: 1200,
            trio_ms: 1500,
            card_ms: 400,
            faint_ms: 1000,
        }
    }
}

impl EngineConfig {
    /// Load defaults, then `path` (if given), then the environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(EngineConfig::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        let config: EngineConfig = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pa.max == 0 {
            return Err(ConfigError::ZeroActionPoints);
        }
        if !(1..=3).contains(&self.trio.trade_discard_count) {
            return Err(ConfigError::TradeDiscardCount(
                self.trio.trade_discard_count,
            ));
        }
        Ok(())
    }
}
