//! Card types
//!
//! A card's behavior is a tagged union: each variant carries only the
//! transient state that behavior uses (luck cards remember trio use, auras
//! remember activation).

use serde::{Deserialize, Serialize};

use crate::catalog::Element;

/// Card identifier, unique within a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Flavor of aura card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuraKind {
    /// Pays a move's whole energy cost once activated
    Elemental,
    /// Forces the next hit to be a maximal critical
    Amplified,
}

/// What a card does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "alignment", rename_all = "kebab-case")]
pub enum CardKind {
    Luck {
        /// Already part of a declined trio
        trio_used: bool,
    },
    BadLuck,
    Heal,
    Resurrect,
    Aura { kind: AuraKind, activated: bool },
}

impl CardKind {
    pub fn luck() -> Self {
        CardKind::Luck { trio_used: false }
    }

    pub fn aura(kind: AuraKind) -> Self {
        CardKind::Aura {
            kind,
            activated: false,
        }
    }

    /// Alignment label (auras are split by kind)
    pub fn alignment(&self) -> &'static str {
        match self {
            CardKind::Luck { .. } => "luck",
            CardKind::BadLuck => "bad-luck",
            CardKind::Heal => "heal",
            CardKind::Resurrect => "resurrect",
            CardKind::Aura {
                kind: AuraKind::Elemental,
                ..
            } => "aura-elemental",
            CardKind::Aura {
                kind: AuraKind::Amplified,
                ..
            } => "aura-amplified",
        }
    }

    /// Clear transient flags (used when a card is recycled into the deck)
    pub fn reset(&mut self) {
        match self {
            CardKind::Luck { trio_used } => *trio_used = false,
            CardKind::Aura { activated, .. } => *activated = false,
            _ => {}
        }
    }
}

/// A card instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub element: Element,
    pub kind: CardKind,
}

impl Card {
    pub fn new(id: CardId, name: &str, element: Element, kind: CardKind) -> Self {
        Self {
            id,
            name: name.to_string(),
            element,
            kind,
        }
    }

    pub fn is_bad_luck(&self) -> bool {
        self.kind == CardKind::BadLuck
    }

    /// Luck card not yet spent on a declined trio
    pub fn is_fresh_luck(&self) -> bool {
        matches!(self.kind, CardKind::Luck { trio_used: false })
    }

    pub fn is_luck(&self) -> bool {
        matches!(self.kind, CardKind::Luck { .. })
    }

    pub fn aura_kind(&self) -> Option<AuraKind> {
        match self.kind {
            CardKind::Aura { kind, .. } => Some(kind),
            _ => None,
        }
    }

    pub fn is_activated(&self) -> bool {
        matches!(self.kind, CardKind::Aura { activated: true, .. })
    }

    /// Counts toward a move's energy cost of `element`
    ///
    /// Auras never pay as plain cards; they have their own fallbacks.
    pub fn pays_energy(&self, element: Element) -> bool {
        !self.is_bad_luck() && self.aura_kind().is_none() && self.element == element
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} ({} {})",
            self.name,
            self.id,
            self.element,
            self.kind.alignment()
        )
    }
}
