//! Battle phase state machine
//!
//! [`BattleEngine`] owns the [`BattleState`] of one battle and exposes the
//! verbs a host calls: navigation, PA spends, attacks, attribute tests and
//! card play. Hosts observe results through snapshots.

mod effect;
mod engine;
mod log;
mod observer;
mod pa;
mod phase;
mod state;

pub use attribute_test::{attribute_check, AttributeTest, Difficulty, ATTRIBUTE_TEST_THRESHOLD};
pub use effect::{EffectHint, EffectKind};
pub use engine::{
    BattleEngine, RollOutcome, BAD_LUCK_CARD_DAMAGE_PERCENT, BAD_LUCK_TRIO_DAMAGE_PERCENT,
    HEAL_PERCENT, RESURRECT_PERCENT,
};
pub use log::{BattleLog, LogEntry};
pub use observer::SnapshotObserver;
pub use pa::{ActionKind, PaLedger, PaSpend};
pub use phase::BattlePhase;
pub use state::BattleState;
