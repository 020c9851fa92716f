//! Card catalog and deck composition
//!
//! Every definition is crossed with its element list, one card per pair.
//! Luck and bad-luck definitions cover every card element; the support
//! cards (heal, resurrect, auras) cover a fixed subset.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::card::{AuraKind, Card, CardId, CardKind};
use crate::catalog::Element;

/// Which elements a definition is printed in
#[derive(Debug, Clone, Copy)]
pub enum Printing {
    EveryElement,
    Only(&'static [Element]),
}

/// A card definition
#[derive(Debug, Clone, Copy)]
pub struct CardDefinition {
    pub name: &'static str,
    pub kind: CardKind,
    pub printing: Printing,
}

/// Name given to luck cards spawned by a trio trade
pub const TRADE_CARD_NAME: &str = "Lucky Clover";

static DEFINITIONS: &[CardDefinition] = &[
    CardDefinition {
        name: TRADE_CARD_NAME,
        kind: CardKind::Luck { trio_used: false },
        printing: Printing::EveryElement,
    },
    CardDefinition {
        name: "Shooting Star",
        kind: CardKind::Luck { trio_used: false },
        printing: Printing::EveryElement,
    },
    CardDefinition {
        name: "Horseshoe",
        kind: CardKind::Luck { trio_used: false },
        printing: Printing::EveryElement,
    },
    CardDefinition {
        name: "Black Cat",
        kind: CardKind::BadLuck,
        printing: Printing::EveryElement,
    },
    CardDefinition {
        name: "Broken Mirror",
        kind: CardKind::BadLuck,
        printing: Printing::EveryElement,
    },
    CardDefinition {
        name: "Healing Herb",
        kind: CardKind::Heal,
        printing: Printing::Only(&[Element::Water, Element::Grass]),
    },
    CardDefinition {
        name: "Phoenix Feather",
        kind: CardKind::Resurrect,
        printing: Printing::Only(&[Element::Fire]),
    },
    CardDefinition {
        name: "Elemental Aura",
        kind: CardKind::Aura {
            kind: AuraKind::Elemental,
            activated: false,
        },
        printing: Printing::Only(&[Element::Electric, Element::Rock]),
    },
    CardDefinition {
        name: "Amplified Aura",
        kind: CardKind::Aura {
            kind: AuraKind::Amplified,
            activated: false,
        },
        printing: Printing::Only(&[Element::Psychic]),
    },
];

/// All card definitions
pub fn definitions() -> &'static [CardDefinition] {
    DEFINITIONS
}

/// Sequential card id source; ids are never reused within a battle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardIdGen {
    next: u32,
}

impl CardIdGen {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Continue numbering after an existing id
    pub fn starting_after(last: CardId) -> Self {
        Self { next: last.0 + 1 }
    }

    /// Generate a unique card ID
    pub fn next_id(&mut self) -> CardId {
        let id = CardId(self.next);
        self.next += 1;
        id
    }
}

impl Default for CardIdGen {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the fully-enumerated, unshuffled deck
pub fn build_deck(ids: &mut CardIdGen) -> Vec<Card> {
    let mut deck = Vec::new();
    for def in DEFINITIONS {
        let elements = match def.printing {
            Printing::EveryElement => Element::card_elements(),
            Printing::Only(elements) => elements,
        };
        for element in elements {
            deck.push(Card::new(ids.next_id(), def.name, *element, def.kind));
        }
    }
    deck
}

/// Outcomes rolled when a bad-luck trio fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuperPunishment {
    CursedTide,
    ShatteredMirror,
    BlackCatCrossing,
    ThirteenthHour,
    FallingLadder,
    EvilEye,
}

impl SuperPunishment {
    /// The six-entry punishment table
    pub fn table() -> &'static [SuperPunishment] {
        &[
            SuperPunishment::CursedTide,
            SuperPunishment::ShatteredMirror,
            SuperPunishment::BlackCatCrossing,
            SuperPunishment::ThirteenthHour,
            SuperPunishment::FallingLadder,
            SuperPunishment::EvilEye,
        ]
    }

    /// Roll one entry uniformly
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> SuperPunishment {
        Self::table()
            .choose(rng)
            .copied()
            .unwrap_or(SuperPunishment::EvilEye)
    }

    pub fn description(&self) -> &'static str {
        match self {
            SuperPunishment::CursedTide => "a cursed tide crashes over the field",
            SuperPunishment::ShatteredMirror => "seven years of bad luck arrive at once",
            SuperPunishment::BlackCatCrossing => "a black cat crosses every path",
            SuperPunishment::ThirteenthHour => "the clock strikes thirteen",
            SuperPunishment::FallingLadder => "a ladder topples from above",
            SuperPunishment::EvilEye => "the evil eye settles on the fighter",
        }
    }
}

impl std::fmt::Display for SuperPunishment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SuperPunishment::CursedTide => "cursed-tide",
            SuperPunishment::ShatteredMirror => "shattered-mirror",
            SuperPunishment::BlackCatCrossing => "black-cat-crossing",
            SuperPunishment::ThirteenthHour => "thirteenth-hour",
            SuperPunishment::FallingLadder => "falling-ladder",
            SuperPunishment::EvilEye => "evil-eye",
        };
        write!(f, "{}", s)
    }
}
