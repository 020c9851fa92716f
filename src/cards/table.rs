//! Card containers: deck, field, discard
//!
//! Every card lives in exactly one place:
//! - deck (ordered, face-down; the top is the end of the vector)
//! - field (six addressable slots, at most one card each)
//! - pending (a drawn card waiting for a slot while the field is full)
//! - discard (unordered)
//! - consumed (heal/resurrect cards used up by their effect)
//!
//! Every removal from the field lands in discard or consumed. The only way
//! a card enters play from nowhere is a trio trade, which is counted.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::card::{AuraKind, Card, CardId, CardKind};
use super::catalog::{build_deck, CardIdGen, TRADE_CARD_NAME};
use super::trio::{LuckTrio, TrioChoice, TrioResolution, TrioScan, TRIO_SIZE};
use crate::catalog::Element;

/// Number of field slots
pub const FIELD_SLOTS: usize = 6;

/// Penalty per bad-luck card sharing the combatant's element
pub const MATCHING_BAD_LUCK_PENALTY: i32 = -4;

/// Penalty per other bad-luck card
pub const BAD_LUCK_PENALTY: i32 = -2;

/// Where a drawn card went
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum Drawn {
    Placed { slot: usize, card: Card },
    /// Field full; the caller must pick a slot to replace
    Pending { card: Card },
}

/// How a move's energy cost gets paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnergySource {
    Free,
    Cards,
    ElementalAura,
    AmplifiedAura,
}

/// Field slots that will be discarded to pay an energy cost
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnergyPlan {
    pub source: EnergySource,
    pub slots: Vec<usize>,
}

/// The three card containers plus bookkeeping for conservation checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTable {
    pub deck: Vec<Card>,
    pub field: [Option<Card>; FIELD_SLOTS],
    pub pending: Option<Card>,
    pub discard: Vec<Card>,
    pub consumed: Vec<Card>,
    /// Size of the deck when the battle began
    pub initial_size: usize,
    /// Cards created by trio trades
    pub spawned: usize,
    ids: CardIdGen,
}

impl Default for CardTable {
    fn default() -> Self {
        Self::from_deck(Vec::new())
    }
}

impl CardTable {
    /// Build the full catalog deck and shuffle it
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut ids = CardIdGen::new();
        let mut deck = build_deck(&mut ids);
        deck.shuffle(rng);
        let initial_size = deck.len();
        Self {
            deck,
            field: Default::default(),
            pending: None,
            discard: Vec::new(),
            consumed: Vec::new(),
            initial_size,
            spawned: 0,
            ids,
        }
    }

    /// A table with a fixed deck, given top card first
    ///
    /// New ids continue after the highest id in the deck.
    pub fn from_deck(top_first: Vec<Card>) -> Self {
        let last = top_first.iter().map(|c| c.id).max().unwrap_or(CardId(0));
        let ids = CardIdGen::starting_after(last);
        let mut deck = top_first;
        deck.reverse();
        let initial_size = deck.len();
        Self {
            deck,
            field: Default::default(),
            pending: None,
            discard: Vec::new(),
            consumed: Vec::new(),
            initial_size,
            spawned: 0,
            ids,
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn field_card(&self, slot: usize) -> Option<&Card> {
        assert!(slot < FIELD_SLOTS, "field slot {} out of range", slot);
        self.field[slot].as_ref()
    }

    pub fn first_empty_slot(&self) -> Option<usize> {
        self.field.iter().position(|slot| slot.is_none())
    }

    pub fn occupied(&self) -> usize {
        self.field.iter().filter(|slot| slot.is_some()).count()
    }

    /// Field cards with their slots, in slot order
    pub fn field_cards(&self) -> impl Iterator<Item = (usize, &Card)> {
        self.field
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|c| (i, c)))
    }

    /// Cards currently accounted for in every container
    pub fn total_cards(&self) -> usize {
        self.deck.len()
            + self.occupied()
            + usize::from(self.pending.is_some())
            + self.discard.len()
            + self.consumed.len()
    }

    /// Nothing gained or lost beyond what trades spawned
    pub fn is_conserved(&self) -> bool {
        self.total_cards() == self.initial_size + self.spawned
    }

    /// Sum of bad-luck penalties against a combatant of `element`
    pub fn penalty(&self, element: Element) -> i32 {
        self.field_cards()
            .filter(|(_, c)| c.is_bad_luck())
            .map(|(_, c)| {
                if c.element == element {
                    MATCHING_BAD_LUCK_PENALTY
                } else {
                    BAD_LUCK_PENALTY
                }
            })
            .sum()
    }

    /// Scan for trios; bad luck takes priority over luck
    pub fn scan_trios(&self, active: Element) -> TrioScan {
        let bad: Vec<usize> = self
            .field_cards()
            .filter(|(_, c)| c.is_bad_luck())
            .map(|(i, _)| i)
            .collect();
        if bad.len() >= TRIO_SIZE {
            let affinity = bad
                .iter()
                .filter_map(|&i| self.field[i].as_ref())
                .any(|c| c.element == active);
            return TrioScan::BadLuck {
                slots: bad,
                affinity,
            };
        }

        for (_, card) in self.field_cards().filter(|(_, c)| c.is_fresh_luck()) {
            let slots: Vec<usize> = self
                .field_cards()
                .filter(|(_, c)| c.is_fresh_luck() && c.element == card.element)
                .map(|(i, _)| i)
                .take(TRIO_SIZE)
                .collect();
            if slots.len() == TRIO_SIZE {
                return TrioScan::Luck(LuckTrio {
                    element: card.element,
                    slots,
                    affinity: card.element == active,
                });
            }
        }

        TrioScan::None
    }

    // ------------------------------------------------------------------
    // Draw and placement
    // ------------------------------------------------------------------

    /// Draw the top card into the first empty slot, or hold it pending
    ///
    /// Returns `None` when the deck is empty or a card is already pending.
    pub fn draw(&mut self) -> Option<Drawn> {
        if self.pending.is_some() {
            return None;
        }
        let card = self.deck.pop()?;
        match self.first_empty_slot() {
            Some(slot) => {
                debug!("Drew {} into slot {}", card, slot);
                self.field[slot] = Some(card.clone());
                Some(Drawn::Placed { slot, card })
            }
            None => {
                debug!("Drew {} with a full field; holding it pending", card);
                self.pending = Some(card.clone());
                Some(Drawn::Pending { card })
            }
        }
    }

    /// Put the pending card into `slot`, discarding what was there
    ///
    /// Bad-luck cards are never replaced. Returns the replaced card, if any.
    pub fn replace_slot(&mut self, slot: usize) -> Option<Option<Card>> {
        assert!(slot < FIELD_SLOTS, "field slot {} out of range", slot);
        self.pending.as_ref()?;
        if self.field[slot].as_ref().is_some_and(|c| c.is_bad_luck()) {
            return None;
        }

        let incoming = self.pending.take()?;
        let replaced = self.field[slot].replace(incoming);
        if let Some(ref old) = replaced {
            self.discard.push(old.clone());
        }
        Some(replaced)
    }

    /// Send the pending card straight to discard
    pub fn discard_pending(&mut self) -> Option<Card> {
        let card = self.pending.take()?;
        self.discard.push(card.clone());
        Some(card)
    }

    /// Move the card in `slot` to discard
    pub fn discard_slot(&mut self, slot: usize) -> Option<Card> {
        assert!(slot < FIELD_SLOTS, "field slot {} out of range", slot);
        let card = self.field[slot].take()?;
        self.discard.push(card.clone());
        Some(card)
    }

    /// Remove the card in `slot` from play entirely
    pub fn consume_slot(&mut self, slot: usize) -> Option<Card> {
        assert!(slot < FIELD_SLOTS, "field slot {} out of range", slot);
        let card = self.field[slot].take()?;
        self.consumed.push(card.clone());
        Some(card)
    }

    /// Sweep the whole field into discard
    pub fn clear_field(&mut self) -> usize {
        let mut cleared = 0;
        for slot in 0..FIELD_SLOTS {
            if self.discard_slot(slot).is_some() {
                cleared += 1;
            }
        }
        cleared
    }

    // ------------------------------------------------------------------
    // Trio resolution
    // ------------------------------------------------------------------

    /// Resolve a luck trio with the caller's choice
    ///
    /// `trade_discard_count` trio cards are discarded on a trade; any trio
    /// cards beyond that stay on the field marked used. Returns `None` (and
    /// changes nothing) when the choice is not applicable.
    pub fn resolve_luck_trio(
        &mut self,
        trio: &LuckTrio,
        choice: TrioChoice,
        trade_discard_count: usize,
    ) -> Option<TrioResolution> {
        let valid = trio.slots.len() == TRIO_SIZE
            && trio.slots.iter().all(|&i| {
                self.field_card(i)
                    .is_some_and(|c| c.is_fresh_luck() && c.element == trio.element)
            });
        if !valid {
            return None;
        }

        let mut resolution = TrioResolution {
            choice,
            discarded: Vec::new(),
            retained: Vec::new(),
            spawned_slot: None,
            affinity: trio.affinity,
        };

        match choice {
            TrioChoice::Trade { element } => {
                if element.is_normal() {
                    return None;
                }
                let count = trade_discard_count.min(TRIO_SIZE);
                let (discard, keep) = trio.slots.split_at(count);
                for &slot in discard {
                    resolution.discarded.extend(self.discard_slot(slot));
                }
                for &slot in keep {
                    self.mark_trio_used(slot);
                    resolution.retained.push(slot);
                }
                resolution.spawned_slot = self.spawn_luck(element);
            }
            TrioChoice::RemoveBadLuck { slot } => {
                if !self.field_card(slot).is_some_and(|c| c.is_bad_luck()) {
                    return None;
                }
                for &trio_slot in &trio.slots {
                    resolution.discarded.extend(self.discard_slot(trio_slot));
                }
                resolution.discarded.extend(self.discard_slot(slot));
            }
            TrioChoice::Decline => {
                for &slot in &trio.slots {
                    self.mark_trio_used(slot);
                    resolution.retained.push(slot);
                }
            }
        }

        Some(resolution)
    }

    fn mark_trio_used(&mut self, slot: usize) {
        if let Some(card) = self.field[slot].as_mut() {
            if let CardKind::Luck { trio_used } = &mut card.kind {
                *trio_used = true;
            }
        }
    }

    /// Create a fresh luck card of `element` in the first empty slot
    fn spawn_luck(&mut self, element: Element) -> Option<usize> {
        let slot = self.first_empty_slot()?;
        let card = Card::new(self.ids.next_id(), TRADE_CARD_NAME, element, CardKind::luck());
        debug!("Spawned {} into slot {}", card, slot);
        self.field[slot] = Some(card);
        self.spawned += 1;
        Some(slot)
    }

    // ------------------------------------------------------------------
    // Energy and activation
    // ------------------------------------------------------------------

    /// Work out how a cost of `cost` cards of `element` would be paid
    ///
    /// Preference order: matching cards (neither bad luck nor aura) in slot order, an
    /// activated elemental aura, then an amplified aura (activated first).
    pub fn plan_energy(&self, element: Option<Element>, cost: u8) -> Option<EnergyPlan> {
        let Some(element) = element.filter(|_| cost > 0) else {
            return Some(EnergyPlan {
                source: EnergySource::Free,
                slots: Vec::new(),
            });
        };

        let matching: Vec<usize> = self
            .field_cards()
            .filter(|(_, c)| c.pays_energy(element))
            .map(|(i, _)| i)
            .take(cost as usize)
            .collect();
        if matching.len() == cost as usize {
            return Some(EnergyPlan {
                source: EnergySource::Cards,
                slots: matching,
            });
        }

        let elemental = self.field_cards().find(|(_, c)| {
            c.aura_kind() == Some(AuraKind::Elemental) && c.is_activated()
        });
        if let Some((slot, _)) = elemental {
            return Some(EnergyPlan {
                source: EnergySource::ElementalAura,
                slots: vec![slot],
            });
        }

        let amplified = self
            .field_cards()
            .filter(|(_, c)| c.aura_kind() == Some(AuraKind::Amplified))
            .max_by_key(|(i, c)| (c.is_activated(), std::cmp::Reverse(*i)));
        amplified.map(|(slot, _)| EnergyPlan {
            source: EnergySource::AmplifiedAura,
            slots: vec![slot],
        })
    }

    /// Discard the cards named by a plan
    pub fn pay_energy(&mut self, plan: &EnergyPlan) -> Vec<Card> {
        plan.slots
            .iter()
            .filter_map(|&slot| self.discard_slot(slot))
            .collect()
    }

    /// Flag the aura in `slot` as active; it stays on the field
    pub fn activate_aura(&mut self, slot: usize) -> Option<AuraKind> {
        assert!(slot < FIELD_SLOTS, "field slot {} out of range", slot);
        match self.field[slot].as_mut().map(|c| &mut c.kind) {
            Some(CardKind::Aura { kind, activated }) if !*activated => {
                *activated = true;
                Some(*kind)
            }
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Deck maintenance
    // ------------------------------------------------------------------

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.deck.shuffle(rng);
    }

    /// Move the discard pile into the deck under fresh ids, then shuffle
    ///
    /// Returns the number of cards recycled.
    pub fn replenish<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let recycled = self.discard.len();
        for mut card in self.discard.drain(..) {
            card.id = self.ids.next_id();
            card.kind.reset();
            self.deck.push(card);
        }
        self.deck.shuffle(rng);
        recycled
    }
}
