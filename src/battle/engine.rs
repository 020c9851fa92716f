//! Battle phase state machine
//!
//! Sequences a turn and owns every mutation of [`BattleState`]:
//! - PA gating for attacks, items, switches, attribute tests and board moves
//! - move selection with atomic use/PA/energy debits
//! - roll classification and damage resolution
//! - card draws, trio detection and card effects
//! - faint bookkeeping and turn advance
//!
//! Verbs whose preconditions fail are no-ops: they return `false`/`None`
//! and leave the state untouched.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::attribute_test::{AttributeTest, Difficulty};
use super::effect::{EffectHint, EffectKind};
use super::observer::SnapshotObserver;
use super::pa::ActionKind;
use super::phase::BattlePhase;
use super::state::BattleState;
use crate::cards::{
    effect_variant, BadLuckTrioEvent, Card, CardKind, CardTable, Drawn, EnergySource,
    SuperPunishment, TrioChoice, TrioResolution, TrioScan,
};
use crate::catalog::{move_by_id, AttributeKind, MoveId};
use crate::combat::{
    classify_hit, crit_threshold, percent_of, reduce_by_defense, resolve_damage, roll_d20,
    DamageBreakdown, HitClass, D20,
};
use crate::config::EngineConfig;
use crate::roster::{CombatantId, Roster};

/// Share of current HP dealt by a bad-luck trio
pub const BAD_LUCK_TRIO_DAMAGE_PERCENT: u32 = 80;

/// Share of current HP dealt by activating a bad-luck card (doubled on element match)
pub const BAD_LUCK_CARD_DAMAGE_PERCENT: u32 = 30;

/// Share of max HP restored by a heal card
pub const HEAL_PERCENT: u32 = 20;

/// Share of max HP restored by a resurrect card
pub const RESURRECT_PERCENT: u32 = 25;

/// What a submitted roll produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    pub roll: u32,
    pub hit: HitClass,
    pub breakdown: DamageBreakdown,
    pub hint: EffectHint,
}

/// Drives one battle at a time over a roster
pub struct BattleEngine<R: Rng = StdRng> {
    state: BattleState,
    config: EngineConfig,
    rng: R,
    observers: Vec<Box<dyn SnapshotObserver>>,
}

impl BattleEngine<StdRng> {
    /// Engine with a reproducible RNG
    pub fn seeded(config: EngineConfig, roster: Roster, seed: u64) -> Self {
        Self::new(config, roster, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> BattleEngine<R> {
    pub fn new(config: EngineConfig, roster: Roster, rng: R) -> Self {
        let state = BattleState::idle(roster, config.pa.max);
        Self {
            state,
            config,
            rng,
            observers: Vec::new(),
        }
    }

    /// Current battle state
    pub fn snapshot(&self) -> &BattleState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.state.roster
    }

    /// Roster access for the host between battles
    pub fn roster_mut(&mut self) -> Option<&mut Roster> {
        (!self.state.is_active()).then_some(&mut self.state.roster)
    }

    pub fn add_observer(&mut self, observer: Box<dyn SnapshotObserver>) {
        self.observers.push(observer);
    }

    fn notify(&mut self) {
        for observer in self.observers.iter_mut() {
            observer.on_snapshot(&self.state);
        }
    }

    fn hint(&mut self, kind: EffectKind) -> EffectHint {
        let hint = EffectHint::new(kind, &self.config.effects);
        self.state.effect_hint = Some(hint);
        hint
    }

    // ------------------------------------------------------------------
    // Battle lifecycle
    // ------------------------------------------------------------------

    /// Begin a battle with a freshly built and shuffled deck
    pub fn start_battle(&mut self, combatant: CombatantId) -> bool {
        let cards = CardTable::shuffled(&mut self.rng);
        self.begin(combatant, cards)
    }

    /// Begin a battle over a fixed deck, given top card first
    pub fn start_battle_with_deck(&mut self, combatant: CombatantId, deck: Vec<Card>) -> bool {
        self.begin(combatant, CardTable::from_deck(deck))
    }

    fn begin(&mut self, combatant: CombatantId, cards: CardTable) -> bool {
        if self.state.is_active() {
            debug!("start_battle ignored: battle already running");
            return false;
        }
        let Some(fighter) = self.state.roster.get(combatant).filter(|c| c.is_alive()) else {
            debug!("start_battle ignored: combatant {} unavailable", combatant);
            return false;
        };
        let name = fighter.name.clone();

        let roster = std::mem::take(&mut self.state.roster);
        let mut state = BattleState::idle(roster, self.config.pa.max);
        state.phase = BattlePhase::Menu;
        state.active = Some(combatant);
        state.turn = 1;
        state.cards = cards;
        state.record(format!("{} enters the battle", name));
        self.state = state;
        self.refresh_cards();

        info!(
            "Battle started with {} ({} cards in deck)",
            name,
            self.state.cards.deck.len()
        );
        self.notify();
        true
    }

    /// End the battle and reset all battle state
    pub fn end_battle(&mut self) -> bool {
        if !self.state.is_active() {
            return false;
        }
        let turns = self.state.turn;
        let roster = std::mem::take(&mut self.state.roster);
        let mut state = BattleState::idle(roster, self.config.pa.max);
        state.cards = CardTable::shuffled(&mut self.rng);
        self.state = state;

        info!("Battle ended after {} turns", turns);
        self.notify();
        true
    }

    // ------------------------------------------------------------------
    // Navigation and PA
    // ------------------------------------------------------------------

    /// Take a navigation edge
    ///
    /// Going to idle ends a running battle.
    pub fn set_phase(&mut self, phase: BattlePhase) -> bool {
        if phase == BattlePhase::Idle {
            return self.end_battle();
        }
        let from = self.state.phase;
        if !from.can_navigate(phase) {
            debug!("set_phase ignored: {} -> {} not allowed", from, phase);
            return false;
        }
        if from.is_result() {
            return self.acknowledge_result();
        }
        self.state.phase = phase;
        debug!("Phase {} -> {}", from, phase);
        self.notify();
        true
    }

    /// Leave a result phase for the menu, logging the outcome
    pub fn acknowledge_result(&mut self) -> bool {
        let line = match self.state.phase {
            BattlePhase::Result => {
                let name = self
                    .state
                    .selected_move
                    .and_then(move_by_id)
                    .map(|mv| mv.name)
                    .unwrap_or("attack");
                match (&self.state.hit, &self.state.breakdown) {
                    (Some(hit), Some(b)) if b.damaging => format!(
                        "{}: rolled {} for a {} ({}), {} damage",
                        name,
                        self.state.last_roll.unwrap_or_default(),
                        hit,
                        b.multiplier_label,
                        b.raw_total
                    ),
                    (Some(hit), _) => format!(
                        "{}: rolled {} for a {}",
                        name,
                        self.state.last_roll.unwrap_or_default(),
                        hit
                    ),
                    _ => format!("{}: no result", name),
                }
            }
            BattlePhase::AttributeTestResult => match self.state.attribute_test {
                Some(test) => format!(
                    "{} test (dc {}): rolled {} {}",
                    test.attribute,
                    test.difficulty.value(),
                    test.roll.unwrap_or_default(),
                    if test.success == Some(true) {
                        "and succeeded"
                    } else {
                        "and failed"
                    }
                ),
                None => "attribute test: no result".to_string(),
            },
            _ => return false,
        };

        self.state.record(line);
        self.state.phase = BattlePhase::Menu;
        self.notify();
        true
    }

    /// Debit the PA cost of `kind`
    pub fn spend_pa(&mut self, kind: ActionKind) -> bool {
        if !self.state.is_active() {
            return false;
        }
        if !self.debit(kind) {
            return false;
        }
        self.notify();
        true
    }

    fn debit(&mut self, kind: ActionKind) -> bool {
        let cost = self.config.pa.costs.cost(kind);
        if !self.state.pa.spend(kind, cost) {
            debug!(
                "Not enough PA for {} (need {}, have {})",
                kind, cost, self.state.pa.current
            );
            return false;
        }
        true
    }

    /// Refill PA, advance the turn and return to the menu
    pub fn end_turn(&mut self) -> bool {
        if !self.state.is_active() {
            return false;
        }
        self.state.pa.refill();
        self.state.turn += 1;
        self.state.reset_transient();
        self.state.phase = BattlePhase::Menu;
        self.state.pending_auto_draw = true;
        self.state.record(format!("Turn {} begins", self.state.turn));
        debug!("Turn {} begins", self.state.turn);
        self.notify();
        true
    }

    /// Make another living roster member the active combatant
    pub fn switch_active(&mut self, combatant: CombatantId) -> bool {
        if !self.state.is_active() || self.state.active == Some(combatant) {
            return false;
        }
        let Some(name) = self
            .state
            .roster
            .get(combatant)
            .filter(|c| c.is_alive())
            .map(|c| c.name.clone())
        else {
            debug!("switch ignored: combatant {} unavailable", combatant);
            return false;
        };
        if !self.debit(ActionKind::Switch) {
            return false;
        }

        self.state.active = Some(combatant);
        self.state.reset_transient();
        self.state.phase = BattlePhase::Menu;
        self.state.record(format!("{} steps in", name));
        self.refresh_cards();
        info!("Switched active combatant to {}", name);
        self.notify();
        true
    }

    // ------------------------------------------------------------------
    // Attacks
    // ------------------------------------------------------------------

    /// Commit to a move: one use, the attack PA cost and its energy
    pub fn select_move(&mut self, move_id: MoveId) -> bool {
        if self.state.phase != BattlePhase::AttackSelect {
            return false;
        }
        let Some(mv) = move_by_id(move_id) else {
            debug!("select_move ignored: unknown move {}", move_id);
            return false;
        };
        let Some(fighter) = self.state.active_combatant().filter(|c| c.is_alive()) else {
            return false;
        };
        if !fighter.move_slot(move_id).is_some_and(|slot| slot.uses > 0) {
            debug!("select_move ignored: {} cannot use {}", fighter.name, mv.name);
            return false;
        }
        if !self
            .state
            .pa
            .can_afford(self.config.pa.costs.cost(ActionKind::Attack))
        {
            debug!("select_move ignored: not enough PA for {}", mv.name);
            return false;
        }
        let Some(plan) = self.state.cards.plan_energy(mv.energy_type(), mv.energy_cost) else {
            debug!(
                "select_move ignored: {} needs {} {} energy",
                mv.name, mv.energy_cost, mv.element
            );
            return false;
        };

        // Every check passed; commit all debits together
        self.debit(ActionKind::Attack);
        if let Some(slot) = self
            .state
            .active_combatant_mut()
            .and_then(|c| c.move_slot_mut(move_id))
        {
            slot.uses -= 1;
        }
        let paid = self.state.cards.pay_energy(&plan);
        if plan.source == EnergySource::AmplifiedAura {
            self.state.aura_active = true;
        }

        self.state.reset_transient();
        self.state.selected_move = Some(move_id);
        self.state.phase = BattlePhase::Rolling;
        if !paid.is_empty() {
            debug!("{} paid with {} card(s) via {:?}", mv.name, paid.len(), plan.source);
            self.refresh_cards();
        }
        debug!("Selected {}", mv.name);
        self.notify();
        true
    }

    /// Classify a d20 roll for the selected move and resolve its damage
    pub fn submit_roll(&mut self, roll: u32) -> Option<RollOutcome> {
        if self.state.phase != BattlePhase::Rolling || !(1..=D20).contains(&roll) {
            return None;
        }
        let mv = self.state.selected_move.and_then(move_by_id)?;
        let attrs = self.state.active_combatant()?.attributes()?;

        let bonus = attrs.modifier(AttributeKind::Agility) + self.state.bad_luck_penalty;
        let threshold = crit_threshold(attrs.fortune);
        let aura = self.state.aura_active;
        let hit = classify_hit(roll, bonus, mv.accuracy, threshold, aura);
        let maximize = aura && hit == HitClass::CriticalHit;
        let breakdown = resolve_damage(mv, hit, &attrs, maximize, &mut self.rng);

        self.state.aura_active = false;
        self.state.last_roll = Some(roll);
        self.state.hit = Some(hit);
        self.state.breakdown = Some(breakdown.clone());
        self.state.phase = BattlePhase::Result;
        let hint = self.hint(if hit == HitClass::CriticalHit {
            EffectKind::Critical
        } else {
            EffectKind::Attack
        });

        debug!(
            "{} rolled {} (bonus {}, threshold {}): {} for {}",
            mv.name, roll, bonus, threshold, hit, breakdown.raw_total
        );
        self.notify();
        Some(RollOutcome {
            roll,
            hit,
            breakdown,
            hint,
        })
    }

    /// Apply damage from the opposing side to the active combatant
    ///
    /// Returns the damage dealt after defense.
    pub fn apply_incoming_damage(&mut self, amount: i32) -> Option<i32> {
        if !self.state.is_active() {
            return None;
        }
        let defense = self.state.active_combatant()?.attributes()?.defense();
        let dealt = reduce_by_defense(amount.max(0), defense);
        self.damage_active(dealt);
        self.notify();
        Some(dealt)
    }

    /// Reduce the active combatant's HP, running faint bookkeeping
    fn damage_active(&mut self, amount: i32) {
        let Some(fighter) = self.state.active_combatant_mut() else {
            return;
        };
        let fainted = fighter.take_damage(amount);
        let (name, hp) = (fighter.name.clone(), fighter.hp);
        if fainted {
            fighter.apply_faint_penalty();
        }

        debug!("{} takes {} damage ({} HP left)", name, amount, hp);
        if fainted {
            self.state
                .record(format!("{} fainted; every attribute drops by 1", name));
            self.hint(EffectKind::Faint);
            info!("{} fainted", name);
        }
    }

    // ------------------------------------------------------------------
    // Attribute tests
    // ------------------------------------------------------------------

    pub fn select_attribute_test(&mut self, attribute: AttributeKind, difficulty: Difficulty) -> bool {
        if self.state.phase != BattlePhase::AttributeTestSelect {
            return false;
        }
        if !self.state.active_combatant().is_some_and(|c| c.is_alive()) {
            return false;
        }
        if !self.debit(ActionKind::AttributeTest) {
            return false;
        }

        self.state.attribute_test = Some(AttributeTest::new(attribute, difficulty));
        self.state.phase = BattlePhase::AttributeTestRolling;
        debug!("Attribute test: {} at dc {}", attribute, difficulty.value());
        self.notify();
        true
    }

    /// Resolve the pending attribute test; returns success
    pub fn submit_attribute_roll(&mut self, roll: u32) -> Option<bool> {
        if self.state.phase != BattlePhase::AttributeTestRolling || !(1..=D20).contains(&roll) {
            return None;
        }
        let attrs = self.state.active_combatant()?.attributes()?;
        let test = self.state.attribute_test.as_mut()?;
        let modifier = attrs.modifier(test.attribute);
        let success = test.resolve(roll, modifier);

        self.state.phase = BattlePhase::AttributeTestResult;
        debug!(
            "Attribute roll {} + {}: {}",
            roll,
            modifier,
            if success { "success" } else { "failure" }
        );
        self.notify();
        Some(success)
    }

    // ------------------------------------------------------------------
    // Cards
    // ------------------------------------------------------------------

    /// Draw the top card onto the field (or into the pending hold)
    pub fn draw_card(&mut self) -> Option<Drawn> {
        if !self.state.is_active() {
            return None;
        }
        let Some(drawn) = self.state.cards.draw() else {
            debug!("draw ignored: deck empty or card pending");
            return None;
        };
        self.state.pending_auto_draw = false;
        match &drawn {
            Drawn::Placed { slot, card } => {
                self.state
                    .record(format!("Drew {} into slot {}", card, slot));
                self.refresh_cards();
            }
            Drawn::Pending { card } => {
                self.state
                    .record(format!("Drew {}; the field is full", card));
            }
        }
        self.notify();
        Some(drawn)
    }

    /// Place the pending card into `slot`
    pub fn replace_field_slot(&mut self, slot: usize) -> bool {
        if !self.state.is_active() {
            return false;
        }
        let Some(replaced) = self.state.cards.replace_slot(slot) else {
            debug!("replace ignored for slot {}", slot);
            return false;
        };
        if let Some(old) = replaced {
            self.state
                .record(format!("Replaced {} in slot {}", old, slot));
        }
        self.refresh_cards();
        self.notify();
        true
    }

    pub fn discard_pending_card(&mut self) -> bool {
        if !self.state.is_active() {
            return false;
        }
        let Some(card) = self.state.cards.discard_pending() else {
            return false;
        };
        self.state.record(format!("Discarded {}", card));
        self.notify();
        true
    }

    /// Resolve the eligible luck trio
    pub fn resolve_trio(&mut self, choice: TrioChoice) -> Option<TrioResolution> {
        if !self.state.is_active() {
            return None;
        }
        let trio = self.state.pending_trio.clone()?;
        let resolution = self.state.cards.resolve_luck_trio(
            &trio,
            choice,
            self.config.trio.trade_discard_count,
        )?;

        self.state.record(format!(
            "Luck trio of {} ({}): {}",
            trio.element,
            effect_variant(resolution.affinity),
            choice
        ));
        self.hint(EffectKind::Trio);
        self.refresh_cards();
        info!("Resolved {} luck trio: {}", trio.element, choice);
        self.notify();
        Some(resolution)
    }

    /// Activate an aura in place, or trigger a bad-luck card
    ///
    /// Heal and resurrect cards need a target; see [`Self::activate_heal`]
    /// and [`Self::activate_resurrect`].
    pub fn activate_card(&mut self, slot: usize) -> bool {
        if !self.state.is_active() {
            return false;
        }
        let Some(card) = self.state.cards.field_card(slot).cloned() else {
            return false;
        };

        match card.kind {
            CardKind::Aura { .. } => {
                if self.state.cards.activate_aura(slot).is_none() {
                    return false;
                }
                self.state.record(format!("Activated {}", card));
            }
            CardKind::BadLuck => {
                let Some(fighter) = self.state.active_combatant() else {
                    return false;
                };
                let mut damage = percent_of(fighter.hp, BAD_LUCK_CARD_DAMAGE_PERCENT);
                if fighter.element == card.element {
                    damage *= 2;
                }
                self.state.cards.discard_slot(slot);
                self.state
                    .record(format!("{} strikes for {} damage", card, damage));
                self.damage_active(damage);
                self.refresh_cards();
            }
            _ => return false,
        }

        self.hint(EffectKind::Card);
        self.notify();
        true
    }

    /// Use a heal card on a living roster member; returns their new HP
    pub fn activate_heal(&mut self, slot: usize, target: CombatantId) -> Option<i32> {
        self.restore(slot, target, CardKind::Heal)
    }

    /// Use a resurrect card on a fainted roster member; returns their new HP
    pub fn activate_resurrect(&mut self, slot: usize, target: CombatantId) -> Option<i32> {
        self.restore(slot, target, CardKind::Resurrect)
    }

    fn restore(&mut self, slot: usize, target: CombatantId, kind: CardKind) -> Option<i32> {
        if !self.state.is_active() {
            return None;
        }
        let card = self.state.cards.field_card(slot).filter(|c| c.kind == kind)?.clone();
        let combatant = self.state.roster.get_mut(target)?;
        let percent = match kind {
            CardKind::Heal if combatant.is_alive() => HEAL_PERCENT,
            CardKind::Resurrect if combatant.hp == 0 => RESURRECT_PERCENT,
            _ => return None,
        };
        let amount = percent_of(combatant.max_hp, percent);
        combatant.heal(amount);
        let (name, hp) = (combatant.name.clone(), combatant.hp);

        self.state.cards.consume_slot(slot);
        self.state
            .record(format!("{} restores {} to {} HP", card, name, hp));
        self.hint(EffectKind::Card);
        self.refresh_cards();
        self.notify();
        Some(hp)
    }

    pub fn shuffle_deck(&mut self) -> bool {
        if !self.state.is_active() {
            return false;
        }
        self.state.cards.shuffle(&mut self.rng);
        debug!("Shuffled {} cards", self.state.cards.deck.len());
        self.notify();
        true
    }

    /// Recycle the discard pile into the deck; returns cards moved
    pub fn replenish_deck(&mut self) -> usize {
        if !self.state.is_active() {
            return 0;
        }
        let moved = self.state.cards.replenish(&mut self.rng);
        if moved == 0 {
            self.state.record("Nothing to replenish");
        } else {
            self.state
                .record(format!("Shuffled {} discarded cards back into the deck", moved));
        }
        self.notify();
        moved
    }

    /// Re-scan the field after a mutation: fire bad-luck trios, surface
    /// luck trios and recompute the penalty
    fn refresh_cards(&mut self) {
        let Some(element) = self.state.active_combatant().map(|c| c.element) else {
            return;
        };

        match self.state.cards.scan_trios(element) {
            TrioScan::BadLuck { affinity, .. } => self.fire_bad_luck_trio(affinity),
            TrioScan::Luck(trio) => {
                if self.state.pending_trio.as_ref() != Some(&trio) {
                    debug!("Luck trio of {} available", trio.element);
                }
                self.state.pending_trio = Some(trio);
            }
            TrioScan::None => self.state.pending_trio = None,
        }

        self.state.bad_luck_penalty = self.state.cards.penalty(element);
        if !self.state.cards.is_conserved() {
            warn!(
                "Card count drifted: {} tracked, {} expected",
                self.state.cards.total_cards(),
                self.state.cards.initial_size + self.state.cards.spawned
            );
        }
    }

    fn fire_bad_luck_trio(&mut self, affinity: bool) {
        let punishment = SuperPunishment::roll(&mut self.rng);
        let cleared = self.state.cards.clear_field();
        let hp = self.state.active_combatant().map(|c| c.hp).unwrap_or(0);
        let damage = percent_of(hp, BAD_LUCK_TRIO_DAMAGE_PERCENT);

        self.state.pending_trio = None;
        self.state.record(format!(
            "Bad-luck trio ({}): {}; {} cards swept away, {} damage",
            effect_variant(affinity),
            punishment.description(),
            cleared,
            damage
        ));
        self.damage_active(damage);
        self.state.last_bad_luck_trio = Some(BadLuckTrioEvent {
            punishment,
            cleared,
            damage,
            affinity,
        });
        self.hint(EffectKind::Trio);
        info!("Bad-luck trio fired: {} for {} damage", punishment, damage);
    }

    // ------------------------------------------------------------------
    // Dice
    // ------------------------------------------------------------------

    /// Roll a d20 from the engine's RNG (for hosts without physical dice)
    pub fn roll_d20(&mut self) -> u32 {
        roll_d20(&mut self.rng)
    }

    pub fn clear_effect_hint(&mut self) {
        if self.state.effect_hint.take().is_some() {
            self.notify();
        }
    }
}
