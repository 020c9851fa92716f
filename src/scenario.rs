//! Seeded self-play
//!
//! Runs a full battle with simple choices so the whole engine can be
//! exercised from the command line and reproduced from a seed: draw, settle
//! any trio, attack with the first usable move, take a hit, end the turn.

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::battle::{BattleEngine, BattlePhase, BattleState};
use crate::cards::{Drawn, TrioChoice, FIELD_SLOTS};
use crate::catalog::{all_species, species_by_name, Element};
use crate::config::EngineConfig;
use crate::roster::{Combatant, Roster};

/// Knobs for a self-play run
#[derive(Debug, Clone)]
pub struct ScenarioOptions {
    pub seed: u64,
    pub turns: u32,
    /// Species of the lead combatant
    pub species: String,
    pub level: u32,
}

impl Default for ScenarioOptions {
    fn default() -> Self {
        Self {
            seed: 1,
            turns: 10,
            species: "Emberfox".to_string(),
            level: 12,
        }
    }
}

/// Two-member roster: the chosen species plus the next one in the catalog
pub fn scenario_roster(species: &str, level: u32) -> Result<Roster> {
    let lead = species_by_name(species).with_context(|| format!("unknown species: {}", species))?;
    let species_list = all_species();
    let lead_index = species_list
        .iter()
        .position(|s| s.id == lead.id)
        .unwrap_or_default();
    let partner = &species_list[(lead_index + 1) % species_list.len()];

    Ok(vec![
        Combatant::from_species(1, lead, level),
        Combatant::from_species(2, partner, level),
    ]
    .into_iter()
    .collect())
}

/// Play up to `options.turns` turns and return the final state
pub fn run_scenario(config: EngineConfig, options: &ScenarioOptions) -> Result<BattleState> {
    if options.level == 0 {
        bail!("level must be at least 1");
    }
    let roster = scenario_roster(&options.species, options.level)?;
    let mut engine = BattleEngine::seeded(config, roster, options.seed);
    if !engine.start_battle(1) {
        bail!("could not start a battle with {}", options.species);
    }

    for _ in 0..options.turns {
        play_cards(&mut engine);
        attack(&mut engine);

        let incoming = engine.roll_d20() as i32;
        engine.apply_incoming_damage(incoming);

        if !engine
            .snapshot()
            .active_combatant()
            .is_some_and(|c| c.is_alive())
        {
            let next = engine.roster().living_except(None).map(|c| c.id).next();
            match next {
                Some(id) => {
                    // A fainted combatant may need the next turn's PA to swap out
                    if !engine.switch_active(id) {
                        engine.end_turn();
                        engine.switch_active(id);
                    }
                }
                None => {
                    info!("Every combatant has fainted");
                    break;
                }
            }
        }

        engine.end_turn();
    }

    let state = engine.snapshot().clone();
    info!(
        "Scenario finished on turn {} with {} log entries",
        state.turn,
        state.log.len()
    );
    Ok(state)
}

fn play_cards(engine: &mut BattleEngine) {
    if engine.snapshot().cards.deck.is_empty() {
        engine.replenish_deck();
    }

    if let Some(Drawn::Pending { .. }) = engine.draw_card() {
        let target = (0..FIELD_SLOTS).find(|&slot| {
            engine
                .snapshot()
                .cards
                .field_card(slot)
                .is_some_and(|c| !c.is_bad_luck() && !c.is_luck())
        });
        match target {
            Some(slot) => {
                engine.replace_field_slot(slot);
            }
            None => {
                engine.discard_pending_card();
            }
        }
    }

    let state = engine.snapshot();
    if state.pending_trio.is_some() {
        let bad_slot = state.cards.field_cards().find(|(_, c)| c.is_bad_luck()).map(|(i, _)| i);
        let choice = match (bad_slot, state.active_combatant().map(|c| c.element)) {
            (Some(slot), _) => TrioChoice::RemoveBadLuck { slot },
            (None, Some(element)) if !element.is_normal() => TrioChoice::Trade { element },
            _ => TrioChoice::Trade {
                element: Element::Fire,
            },
        };
        engine.resolve_trio(choice);
    }
}

fn attack(engine: &mut BattleEngine) {
    if !engine.set_phase(BattlePhase::AttackSelect) {
        return;
    }
    let moves: Vec<_> = engine
        .snapshot()
        .active_combatant()
        .map(|c| c.moves.iter().map(|slot| slot.move_id).collect())
        .unwrap_or_default();

    if !moves.into_iter().any(|id| engine.select_move(id)) {
        engine.set_phase(BattlePhase::Menu);
        return;
    }
    let roll = engine.roll_d20();
    engine.submit_roll(roll);
    engine.acknowledge_result();
}
