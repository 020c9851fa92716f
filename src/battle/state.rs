//! Battle state
//!
//! The single mutable aggregate for one battle. Only [`BattleEngine`]
//! mutates it; hosts read it through snapshots.
//!
//! [`BattleEngine`]: super::BattleEngine

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::attribute_test::AttributeTest;
use super::effect::EffectHint;
use super::log::BattleLog;
use super::pa::PaLedger;
use super::phase::BattlePhase;
use crate::cards::{BadLuckTrioEvent, CardTable, LuckTrio};
use crate::catalog::MoveId;
use crate::combat::{DamageBreakdown, HitClass};
use crate::roster::{Combatant, CombatantId, Roster};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleState {
    pub phase: BattlePhase,
    pub active: Option<CombatantId>,
    pub selected_move: Option<MoveId>,
    pub last_roll: Option<u32>,
    pub hit: Option<HitClass>,
    pub breakdown: Option<DamageBreakdown>,
    pub attribute_test: Option<AttributeTest>,
    pub cards: CardTable,
    /// Sum of bad-luck penalties, added to hit rolls
    pub bad_luck_penalty: i32,
    /// Next hit is a maximal critical
    pub aura_active: bool,
    pub pa: PaLedger,
    pub turn: u32,
    pub log: BattleLog,
    /// Eligible luck trio awaiting a choice
    pub pending_trio: Option<LuckTrio>,
    /// Raised at end of turn; cleared by the next draw
    pub pending_auto_draw: bool,
    pub effect_hint: Option<EffectHint>,
    pub last_bad_luck_trio: Option<BadLuckTrioEvent>,
    pub roster: Roster,
}

impl BattleState {
    /// Idle state: no battle running
    pub fn idle(roster: Roster, pa_max: u32) -> Self {
        Self {
            phase: BattlePhase::Idle,
            active: None,
            selected_move: None,
            last_roll: None,
            hit: None,
            breakdown: None,
            attribute_test: None,
            cards: CardTable::default(),
            bad_luck_penalty: 0,
            aura_active: false,
            pa: PaLedger::new(pa_max),
            turn: 0,
            log: BattleLog::default(),
            pending_trio: None,
            pending_auto_draw: false,
            effect_hint: None,
            last_bad_luck_trio: None,
            roster,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase != BattlePhase::Idle
    }

    pub fn active_combatant(&self) -> Option<&Combatant> {
        self.active.and_then(|id| self.roster.get(id))
    }

    pub fn active_combatant_mut(&mut self) -> Option<&mut Combatant> {
        let id = self.active?;
        self.roster.get_mut(id)
    }

    /// Drop the selection/result fields of the current action
    pub fn reset_transient(&mut self) {
        self.selected_move = None;
        self.last_roll = None;
        self.hit = None;
        self.breakdown = None;
        self.attribute_test = None;
    }

    pub fn record(&mut self, message: impl Into<String>) {
        self.log.push(self.turn, message);
    }

    /// SHA-256 of the serialized state, hex encoded
    pub fn digest(&self) -> Result<String, serde_json::Error> {
        let bytes = serde_json::to_vec(self)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }
}
