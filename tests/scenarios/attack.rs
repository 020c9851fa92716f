//! Attack scenarios
//!
//! Tests move selection, roll classification and PA gating

use crate::harness::{roster, TestBattle};
use skirmish::battle::{ActionKind, BattleEngine, BattlePhase, EffectKind};
use skirmish::catalog::{species_by_name, AttributeOverride};
use skirmish::combat::HitClass;
use skirmish::roster::Combatant;
use skirmish::EngineConfig;

/// A level 1 Patchrat with +2 to hit and the base critical threshold
fn patchrat_engine() -> BattleEngine {
    let mut rat = Combatant::from_species(1, species_by_name("patchrat").unwrap(), 1);
    rat.overrides = Some(AttributeOverride {
        strength: 6,
        focus: 6,
        agility: 4,
        fortune: 0,
    });
    let roster = vec![rat].into_iter().collect();
    let mut engine = BattleEngine::seeded(EngineConfig::default(), roster, 3);
    assert!(engine.start_battle_with_deck(1, Vec::new()));
    engine
}

/// Test: accuracy 8, roll 13, bonus +2 is a strong hit
#[test]
fn test_strong_hit() {
    let mut engine = patchrat_engine();
    assert!(engine.set_phase(BattlePhase::AttackSelect));
    // Tackle: accuracy 8, 1d6 physical
    assert!(engine.select_move(1));

    let outcome = engine.submit_roll(13).expect("roll accepted");
    assert_eq!(outcome.hit, HitClass::StrongHit);
    assert_eq!(outcome.breakdown.multiplier_label, "strong x1.2");
    assert_eq!(outcome.hint.kind, EffectKind::Attack);

    // strength 6 -> +3 bonus
    let breakdown = &outcome.breakdown;
    assert_eq!(breakdown.attribute_bonus, 3);
    let expected = ((breakdown.sum + 3) * 120 + 50) / 100;
    assert_eq!(breakdown.raw_total, expected);
}

/// Test: a natural 1 is a critical miss whatever the bonus
#[test]
fn test_natural_one() {
    let mut engine = patchrat_engine();
    engine.set_phase(BattlePhase::AttackSelect);
    engine.select_move(1);

    let outcome = engine.submit_roll(1).unwrap();
    assert_eq!(outcome.hit, HitClass::CriticalMiss);
    assert_eq!(outcome.breakdown.raw_total, 0);
}

/// Test: the hit bonus picks up the bad-luck penalty
#[test]
fn test_penalty_lowers_hits() {
    use crate::harness::bad_luck;
    use skirmish::catalog::Element;

    let mut rat = Combatant::from_species(1, species_by_name("patchrat").unwrap(), 1);
    rat.overrides = Some(AttributeOverride {
        strength: 6,
        focus: 6,
        agility: 4,
        fortune: 0,
    });
    let mut engine = BattleEngine::seeded(
        EngineConfig::default(),
        vec![rat].into_iter().collect(),
        3,
    );
    engine.start_battle_with_deck(1, vec![bad_luck(1, Element::Fire), bad_luck(2, Element::Ice)]);
    engine.draw_card();
    engine.draw_card();
    assert_eq!(engine.snapshot().bad_luck_penalty, -4);

    engine.set_phase(BattlePhase::AttackSelect);
    engine.select_move(1);
    // 13 + 2 - 4 = 11: a plain hit
    assert_eq!(engine.submit_roll(13).unwrap().hit, HitClass::Hit);
}

/// Test: actions short on PA leave the state untouched
#[test]
fn test_pa_atomicity() {
    let mut battle = TestBattle::start(9);
    assert!(battle.engine.spend_pa(ActionKind::Attack));
    assert_eq!(battle.state().pa.current, 1);

    battle.engine.set_phase(BattlePhase::AttackSelect);
    let before = battle.digest();

    // Growl is free of energy but the attack still costs 2 PA
    assert!(!battle.engine.select_move(2));
    assert!(!battle.engine.spend_pa(ActionKind::Attack));
    assert_eq!(battle.digest(), before);

    battle.engine.set_phase(BattlePhase::Menu);
    battle.engine.spend_pa(ActionKind::Item);
    let before = battle.digest();
    assert!(!battle.engine.switch_active(crate::harness::RESERVE));
    assert_eq!(battle.digest(), before);
}

/// Test: a move with no uses left cannot be selected
#[test]
fn test_exhausted_move() {
    let mut roster = roster(12);
    if let Some(fox) = roster.get_mut(1) {
        for slot in fox.moves.iter_mut() {
            slot.uses = 0;
        }
    }
    let mut battle = TestBattle::build(EngineConfig::default(), roster, Vec::new());
    battle.engine.set_phase(BattlePhase::AttackSelect);
    let before = battle.digest();
    assert!(!battle.engine.select_move(2));
    assert_eq!(battle.digest(), before);
}

/// Test: raising the attack cost in config gates selection
#[test]
fn test_configured_attack_cost() {
    let mut config = EngineConfig::default();
    config.pa.costs.attack = 4;
    let mut battle = TestBattle::with_config(config, Vec::new());
    battle.engine.set_phase(BattlePhase::AttackSelect);
    assert!(!battle.engine.select_move(2));
    assert_eq!(battle.state().phase, BattlePhase::AttackSelect);
}
