//! Presentation hints
//!
//! The engine never waits on animations. It leaves a hint describing what
//! just happened and how long a host might show it; the host clears it.

use serde::{Deserialize, Serialize};

use crate::config::EffectConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectKind {
    Attack,
    Critical,
    Trio,
    Card,
    Faint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectHint {
    pub kind: EffectKind,
    pub duration_ms: u64,
}

impl EffectHint {
    pub fn new(kind: EffectKind, config: &EffectConfig) -> Self {
        let duration_ms = match kind {
            EffectKind::Attack => config.attack_ms,
            EffectKind::Critical => config.critical_ms,
            EffectKind::Trio => config.trio_ms,
            EffectKind::Card => config.card_ms,
            EffectKind::Faint => config.faint_ms,
        };
        Self { kind, duration_ms }
    }
}
