//! Turn scenarios
//!
//! Tests the full turn loop, switching and fainting

use crate::harness::{bad_luck, TestBattle, LEAD, RESERVE};
use skirmish::battle::{ActionKind, BattlePhase, Difficulty};
use skirmish::catalog::{AttributeKind, Element};

/// Test: attack, acknowledge, end the turn
#[test]
fn test_full_turn() {
    let mut battle = TestBattle::start(5);
    let engine = &mut battle.engine;

    assert!(engine.set_phase(BattlePhase::AttackSelect));
    assert!(engine.select_move(2));
    assert_eq!(engine.snapshot().phase, BattlePhase::Rolling);
    assert!(!engine.set_phase(BattlePhase::Menu));

    let roll = engine.roll_d20();
    assert!((1..=20).contains(&roll));
    let outcome = engine.submit_roll(roll).unwrap();
    assert_eq!(engine.snapshot().hit, Some(outcome.hit));
    assert_eq!(engine.snapshot().last_roll, Some(roll));

    assert!(engine.acknowledge_result());
    assert!(!engine.acknowledge_result());
    assert_eq!(engine.snapshot().pa.current, 1);

    assert!(engine.end_turn());
    let state = engine.snapshot();
    assert_eq!(state.turn, 2);
    assert_eq!(state.pa.current, 3);
    assert_eq!(state.phase, BattlePhase::Menu);
    assert!(state.selected_move.is_none());
    assert!(state.breakdown.is_none());
    assert!(state.pending_auto_draw);
}

/// Test: end_turn from a mid-action phase resets to the menu
#[test]
fn test_end_turn_mid_action() {
    let mut battle = TestBattle::start(5);
    battle.engine.set_phase(BattlePhase::AttackSelect);
    battle.engine.select_move(2);
    assert!(battle.engine.end_turn());
    assert_eq!(battle.state().phase, BattlePhase::Menu);
    assert!(battle.state().selected_move.is_none());
}

/// Test: navigating to idle ends the battle and clears the table
#[test]
fn test_set_phase_idle_ends_battle() {
    let mut battle = TestBattle::with_deck(vec![
        bad_luck(1, Element::Water),
        bad_luck(2, Element::Grass),
        bad_luck(3, Element::Rock),
    ]);
    battle.draw(2);
    battle.engine.spend_pa(ActionKind::Item);
    assert_eq!(battle.state().cards.occupied(), 2);

    assert!(battle.engine.set_phase(BattlePhase::Idle));
    let state = battle.state();
    assert_eq!(state.phase, BattlePhase::Idle);
    assert!(!state.is_active());
    assert_eq!(state.active, None);
    assert_eq!(state.cards.occupied(), 0);
    assert!(state.cards.discard.is_empty());
    assert!(state.cards.pending.is_none());
    assert_eq!(state.bad_luck_penalty, 0);
    assert_eq!(state.pa.current, state.pa.max);
    assert_eq!(state.turn, 0);
    assert!(state.cards.is_conserved());

    // Already idle
    assert!(!battle.engine.set_phase(BattlePhase::Idle));
}

/// Test: idle rejects every battle verb
#[test]
fn test_idle_is_inert() {
    let mut battle = TestBattle::start(5);
    battle.engine.end_battle();
    let before = battle.digest();

    let engine = &mut battle.engine;
    assert!(!engine.spend_pa(ActionKind::Item));
    assert!(!engine.end_turn());
    assert!(engine.draw_card().is_none());
    assert!(!engine.switch_active(RESERVE));
    assert!(!engine.shuffle_deck());
    assert_eq!(engine.replenish_deck(), 0);
    assert!(engine.apply_incoming_damage(10).is_none());
    assert_eq!(battle.digest(), before);
}

/// Test: switching needs a different, living combatant
#[test]
fn test_switch_rules() {
    let mut battle = TestBattle::start(5);
    battle.engine.set_phase(BattlePhase::AttributeTestSelect);
    assert!(battle.engine.switch_active(RESERVE));
    assert_eq!(battle.state().phase, BattlePhase::Menu);
    assert_eq!(battle.state().active, Some(RESERVE));

    // Knock out the reserve, switch back, then knock out the lead
    battle.engine.apply_incoming_damage(1000);
    assert!(battle.engine.switch_active(LEAD));
    battle.engine.apply_incoming_damage(1000);
    assert!(!battle.engine.switch_active(RESERVE));
}

/// Test: a bad-luck trio can make the active combatant faint
#[test]
fn test_bad_luck_faint() {
    let mut battle = TestBattle::with_lead_hp(
        1,
        100,
        vec![
            bad_luck(1, Element::Fire),
            bad_luck(2, Element::Fire),
            bad_luck(3, Element::Fire),
        ],
    );
    let before = battle.engine.roster().get(LEAD).unwrap().attributes().unwrap();
    battle.draw(3);

    // round(1 * 0.8) = 1
    assert_eq!(battle.hp(LEAD), 0);
    let after = battle.engine.roster().get(LEAD).unwrap().attributes().unwrap();
    assert_eq!(after.agility, before.agility - 1);
    assert_eq!(battle.state().phase, BattlePhase::Menu);
    assert!(battle.state().log.contains("fainted"));
}

/// Test: attribute tests carry the difficulty and use the fixed threshold
#[test]
fn test_attribute_test() {
    let mut battle = TestBattle::start(5);
    let engine = &mut battle.engine;
    engine.set_phase(BattlePhase::AttributeTestSelect);
    assert!(engine.select_attribute_test(AttributeKind::Fortune, Difficulty::Extreme));
    assert!(engine.submit_attribute_roll(0).is_none());
    assert_eq!(engine.submit_attribute_roll(1), Some(false));
    assert_eq!(engine.snapshot().phase, BattlePhase::AttributeTestResult);
    assert!(engine.set_phase(BattlePhase::Menu));

    engine.set_phase(BattlePhase::AttributeTestSelect);
    assert!(engine.select_attribute_test(AttributeKind::Fortune, Difficulty::Extreme));
    // Emberfox at level 12: fortune 9 -> 4 + 2; 4 + 6 reaches 10
    assert_eq!(engine.submit_attribute_roll(4), Some(true));
    assert_eq!(
        engine.snapshot().attribute_test.map(|t| t.difficulty.value()),
        Some(20)
    );
}

/// Test: effect hints stay until the host clears them
#[test]
fn test_effect_hint_cleared() {
    let mut battle = TestBattle::start(5);
    battle.engine.set_phase(BattlePhase::AttackSelect);
    battle.engine.select_move(2);
    battle.engine.submit_roll(10);
    assert!(battle.state().effect_hint.is_some());
    battle.engine.clear_effect_hint();
    assert!(battle.state().effect_hint.is_none());
}
