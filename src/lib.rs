//! skirmish - dice & card combat engine
//!
//! Resolves turn-based, dice-driven battles for a tabletop-style companion
//! tool: who may act, what a die roll means, how much damage results, and
//! how a shared deck of luck cards perturbs the fight.

pub mod battle;
pub mod cards;
pub mod catalog;
pub mod combat;
pub mod config;
pub mod error;
pub mod roster;
pub mod scenario;

pub use battle::{BattleEngine, BattlePhase, BattleState, SnapshotObserver};
pub use config::EngineConfig;
pub use error::ConfigError;
pub use roster::{Combatant, CombatantId, Roster};
