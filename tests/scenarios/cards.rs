//! Card scenarios
//!
//! Tests draws, trios, penalties, card effects and card conservation

use crate::harness::{aura, bad_luck, heal, luck, roster, TestBattle, LEAD, RESERVE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use skirmish::battle::{BattlePhase, EffectKind};
use skirmish::cards::{AuraKind, CardKind, Drawn, TrioChoice, FIELD_SLOTS};
use skirmish::catalog::Element;
use skirmish::combat::percent_of;
use skirmish::EngineConfig;

/// Test: one matching and one other bad-luck card add up to -6
#[test]
fn test_penalty_formula() {
    let mut battle = TestBattle::with_deck(vec![
        bad_luck(1, Element::Fire),
        bad_luck(2, Element::Water),
    ]);
    battle.draw(2);
    assert_eq!(battle.state().bad_luck_penalty, -6);

    // The reserve is water: the match moves to the other card
    battle.engine.switch_active(RESERVE);
    assert_eq!(battle.state().bad_luck_penalty, -6);
}

/// Test: switching recomputes the penalty against the new element
#[test]
fn test_penalty_follows_active_combatant() {
    let mut battle = TestBattle::with_deck(vec![bad_luck(1, Element::Fire)]);
    battle.draw(1);
    assert_eq!(battle.state().bad_luck_penalty, -4);
    battle.engine.switch_active(RESERVE);
    assert_eq!(battle.state().bad_luck_penalty, -2);
}

/// Test: the third bad-luck card clears the field and deals 80% of current HP
#[test]
fn test_bad_luck_trio_fires() {
    let mut battle = TestBattle::with_lead_hp(
        50,
        100,
        vec![
            luck(1, Element::Grass),
            bad_luck(2, Element::Ice),
            bad_luck(3, Element::Rock),
            bad_luck(4, Element::Shadow),
        ],
    );
    battle.draw(4);

    let state = battle.state();
    assert_eq!(state.cards.occupied(), 0);
    assert_eq!(state.cards.discard.len(), 4);
    assert_eq!(battle.hp(LEAD), 10);
    assert_eq!(state.bad_luck_penalty, 0);

    let event = state.last_bad_luck_trio.as_ref().expect("trio recorded");
    assert_eq!(event.damage, 40);
    assert_eq!(event.cleared, 4);
    assert!(!event.affinity);
    assert_eq!(state.effect_hint.map(|h| h.kind), Some(EffectKind::Trio));
    assert!(state.log.contains("Bad-luck trio (standard)"));
}

/// Test: bad luck wins over a same-element luck trio
#[test]
fn test_trio_priority() {
    let mut battle = TestBattle::with_deck(vec![
        luck(1, Element::Fire),
        luck(2, Element::Fire),
        luck(3, Element::Fire),
        bad_luck(4, Element::Fire),
        bad_luck(5, Element::Fire),
        bad_luck(6, Element::Fire),
    ]);
    battle.draw(3);
    assert!(battle.state().pending_trio.is_some());

    battle.draw(3);
    let state = battle.state();
    assert!(state.pending_trio.is_none());
    assert_eq!(state.cards.occupied(), 0);
    assert_eq!(state.cards.spawned, 0);
    assert!(state.last_bad_luck_trio.as_ref().is_some_and(|e| e.affinity));
    assert!(state.log.contains("Bad-luck trio (amplified)"));
    assert!(battle.engine.resolve_trio(TrioChoice::Decline).is_none());
}

/// Test: a luck trio waits for a choice, then trades for a new card
#[test]
fn test_luck_trio_trade() {
    let mut battle = TestBattle::with_deck(vec![
        luck(1, Element::Water),
        luck(2, Element::Water),
        luck(3, Element::Water),
    ]);
    battle.draw(3);
    let trio = battle.state().pending_trio.clone().expect("trio pending");
    assert!(!trio.affinity);

    let resolution = battle
        .engine
        .resolve_trio(TrioChoice::Trade {
            element: Element::Fire,
        })
        .expect("trade accepted");
    assert_eq!(resolution.discarded.len(), 3);

    let state = battle.state();
    let spawned = state.cards.field_card(0).expect("spawned card");
    assert_eq!(spawned.element, Element::Fire);
    assert!(spawned.is_fresh_luck());
    assert!(state.pending_trio.is_none());
    assert!(state.cards.is_conserved());
}

/// Test: declining marks the trio used so it does not resurface
#[test]
fn test_luck_trio_decline() {
    let mut battle = TestBattle::with_deck(vec![
        luck(1, Element::Fire),
        luck(2, Element::Fire),
        luck(3, Element::Fire),
        luck(4, Element::Fire),
    ]);
    battle.draw(3);
    battle.engine.resolve_trio(TrioChoice::Decline).unwrap();
    assert!(battle.state().pending_trio.is_none());
    assert_eq!(battle.state().cards.occupied(), 3);

    // One fresh card is not a trio
    battle.draw(1);
    assert!(battle.state().pending_trio.is_none());
}

/// Test: a luck trio can clear a bad-luck card
#[test]
fn test_luck_trio_removes_bad_luck() {
    let mut battle = TestBattle::with_deck(vec![
        bad_luck(1, Element::Fire),
        luck(2, Element::Grass),
        luck(3, Element::Grass),
        luck(4, Element::Grass),
    ]);
    battle.draw(4);
    assert_eq!(battle.state().bad_luck_penalty, -4);

    // Slot 1 holds a luck card
    assert!(battle
        .engine
        .resolve_trio(TrioChoice::RemoveBadLuck { slot: 1 })
        .is_none());
    battle
        .engine
        .resolve_trio(TrioChoice::RemoveBadLuck { slot: 0 })
        .unwrap();

    let state = battle.state();
    assert_eq!(state.cards.occupied(), 0);
    assert_eq!(state.bad_luck_penalty, 0);
    assert_eq!(state.cards.discard.len(), 4);
}

/// Test: a partial trade keeps the leftover trio card in place
#[test]
fn test_configured_trade_count() {
    let mut config = EngineConfig::default();
    config.trio.trade_discard_count = 2;
    let mut battle = TestBattle::with_config(
        config,
        vec![
            luck(1, Element::Ice),
            luck(2, Element::Ice),
            luck(3, Element::Ice),
        ],
    );
    battle.draw(3);
    let resolution = battle
        .engine
        .resolve_trio(TrioChoice::Trade {
            element: Element::Ice,
        })
        .unwrap();
    assert_eq!(resolution.discarded.len(), 2);
    assert_eq!(resolution.retained, vec![2]);
    assert!(matches!(
        battle.state().cards.field_card(2).map(|c| c.kind),
        Some(CardKind::Luck { trio_used: true })
    ));
    // Spawned card plus the used one: no new trio
    assert!(battle.state().pending_trio.is_none());
}

/// Test: heal restores 20% of max HP
#[test]
fn test_heal() {
    let mut battle = TestBattle::with_lead_hp(40, 100, vec![heal(1, Element::Water)]);
    battle.draw(1);
    assert_eq!(battle.engine.activate_heal(0, LEAD), Some(60));
    assert_eq!(battle.hp(LEAD), 60);

    let state = battle.state();
    assert!(state.cards.field_card(0).is_none());
    assert_eq!(state.cards.consumed.len(), 1);
    assert!(state.cards.discard.is_empty());
    assert!(state.cards.is_conserved());
}

/// Test: heal needs a living target and a heal card
#[test]
fn test_heal_rejections() {
    let mut roster = roster(12);
    if let Some(reserve) = roster.get_mut(RESERVE) {
        reserve.hp = 0;
    }
    let mut battle = TestBattle::build(
        EngineConfig::default(),
        roster,
        vec![luck(1, Element::Fire), heal(2, Element::Grass)],
    );
    battle.draw(2);

    let before = battle.digest();
    assert!(battle.engine.activate_heal(0, LEAD).is_none());
    assert!(battle.engine.activate_heal(1, RESERVE).is_none());
    assert!(battle.engine.activate_heal(1, 77).is_none());
    assert!(battle.engine.activate_resurrect(1, RESERVE).is_none());
    assert_eq!(battle.digest(), before);

    assert!(battle.engine.activate_heal(1, LEAD).is_some());
}

/// Test: auras activate in place; an elemental aura then pays a full cost
#[test]
fn test_elemental_aura_pays_energy() {
    let mut battle = TestBattle::with_deck(vec![aura(1, Element::Rock, AuraKind::Elemental)]);
    battle.draw(1);
    battle.engine.set_phase(BattlePhase::AttackSelect);
    // Flame Fang needs two fire cards
    assert!(!battle.engine.select_move(4));

    battle.engine.set_phase(BattlePhase::Menu);
    assert!(battle.engine.activate_card(0));
    assert!(battle.state().cards.field_card(0).unwrap().is_activated());
    assert!(!battle.engine.activate_card(0));

    battle.engine.set_phase(BattlePhase::AttackSelect);
    assert!(battle.engine.select_move(4));
    let state = battle.state();
    assert_eq!(state.cards.occupied(), 0);
    assert!(!state.aura_active);
}

/// Test: with a full field the next card waits for a slot
#[test]
fn test_pending_placement() {
    let mut deck: Vec<_> = (1..=6)
        .map(|i| luck(i, Element::card_elements()[(i as usize) % 8]))
        .collect();
    deck[2] = bad_luck(3, Element::Ice);
    deck.push(luck(7, Element::Fire));
    deck.push(luck(8, Element::Water));
    let mut battle = TestBattle::with_deck(deck);

    battle.draw(6);
    assert!(matches!(
        battle.engine.draw_card(),
        Some(Drawn::Pending { .. })
    ));
    assert!(battle.engine.draw_card().is_none());

    let before = battle.digest();
    assert!(!battle.engine.replace_field_slot(2));
    assert_eq!(battle.digest(), before);

    assert!(battle.engine.replace_field_slot(4));
    assert_eq!(battle.state().cards.field_card(4).unwrap().element, Element::Fire);
    assert!(matches!(
        battle.engine.draw_card(),
        Some(Drawn::Pending { .. })
    ));
    assert!(battle.engine.discard_pending_card());
    assert_eq!(battle.state().cards.discard.len(), 2);
}

/// Test: an out-of-range slot is a programming error
#[test]
#[should_panic(expected = "out of range")]
fn test_out_of_range_slot() {
    let mut battle = TestBattle::with_deck(vec![luck(1, Element::Fire)]);
    battle.draw(1);
    battle.engine.activate_card(FIELD_SLOTS);
}

/// Test: replenish moves the discard back into the deck with new ids
#[test]
fn test_replenish() {
    let mut battle = TestBattle::with_deck(vec![
        bad_luck(1, Element::Fire),
        bad_luck(2, Element::Water),
        bad_luck(3, Element::Grass),
    ]);
    assert_eq!(battle.engine.replenish_deck(), 0);
    assert!(battle.state().log.contains("Nothing to replenish"));

    battle.draw(3);
    assert!(battle.state().cards.deck.is_empty());
    assert_eq!(battle.engine.replenish_deck(), 3);

    let state = battle.state();
    assert_eq!(state.cards.deck.len(), 3);
    assert!(state.cards.discard.is_empty());
    assert!(state.cards.deck.iter().all(|c| c.id.0 > 3));
    assert!(state.cards.is_conserved());
}

/// Test: bad-luck activation deals 30% of current HP, doubled on a match
#[test]
fn test_bad_luck_activation() {
    let mut battle = TestBattle::with_lead_hp(
        50,
        100,
        vec![bad_luck(1, Element::Water), bad_luck(2, Element::Fire)],
    );
    battle.draw(2);
    assert!(battle.engine.activate_card(0));
    assert_eq!(battle.hp(LEAD), 50 - percent_of(50, 30));
    let hp = battle.hp(LEAD);
    assert!(battle.engine.activate_card(1));
    assert_eq!(battle.hp(LEAD), hp - percent_of(hp, 30) * 2);
}

/// Test: no sequence of operations creates or loses cards
#[test]
fn test_conservation_under_random_play() {
    for seed in 0..8u64 {
        let mut battle = TestBattle::start(seed);
        let mut rng = StdRng::seed_from_u64(seed + 100);

        for _ in 0..300 {
            let slot = rng.random_range(0..FIELD_SLOTS);
            let target = if rng.random_bool(0.5) { LEAD } else { RESERVE };
            let engine = &mut battle.engine;
            match rng.random_range(0..10) {
                0 | 1 | 2 => {
                    engine.draw_card();
                }
                3 => {
                    engine.replace_field_slot(slot);
                }
                4 => {
                    engine.discard_pending_card();
                }
                5 => {
                    let choice = match rng.random_range(0..3) {
                        0 => TrioChoice::Trade {
                            element: Element::card_elements()[slot],
                        },
                        1 => TrioChoice::RemoveBadLuck { slot },
                        _ => TrioChoice::Decline,
                    };
                    engine.resolve_trio(choice);
                }
                6 => {
                    engine.activate_card(slot);
                }
                7 => {
                    engine.activate_heal(slot, target);
                    engine.activate_resurrect(slot, target);
                }
                8 => {
                    engine.replenish_deck();
                }
                _ => {
                    engine.set_phase(BattlePhase::AttackSelect);
                    let moves: Vec<_> = engine
                        .snapshot()
                        .active_combatant()
                        .map(|c| c.moves.iter().map(|m| m.move_id).collect())
                        .unwrap_or_default();
                    for id in moves {
                        if engine.select_move(id) {
                            let roll = engine.roll_d20();
                            engine.submit_roll(roll);
                            engine.acknowledge_result();
                            break;
                        }
                    }
                    engine.set_phase(BattlePhase::Menu);
                    engine.end_turn();
                }
            }

            let cards = &battle.state().cards;
            assert!(
                cards.is_conserved(),
                "seed {}: {} cards tracked, {} expected",
                seed,
                cards.total_cards(),
                cards.initial_size + cards.spawned
            );
        }
    }
}
