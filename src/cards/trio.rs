//! Trio detection results and resolutions

use serde::{Deserialize, Serialize};

use super::card::Card;
use super::catalog::SuperPunishment;
use crate::catalog::Element;

/// Cards of one kind needed for a trio
pub const TRIO_SIZE: usize = 3;

/// Result of scanning the field for trios
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrioScan {
    None,
    /// Three or more bad-luck cards; fires unconditionally
    BadLuck { slots: Vec<usize>, affinity: bool },
    /// Three fresh luck cards of one element; waits for a choice
    Luck(LuckTrio),
}

/// An eligible luck trio awaiting a choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuckTrio {
    pub element: Element,
    /// Field slots of the matching cards, in slot order
    pub slots: Vec<usize>,
    /// Active combatant shares the trio's element
    pub affinity: bool,
}

/// How the caller resolves a pending luck trio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "choice", rename_all = "kebab-case")]
pub enum TrioChoice {
    /// Discard the trio and spawn a fresh luck card of `element`
    Trade { element: Element },
    /// Discard the trio plus the bad-luck card in `slot`
    RemoveBadLuck { slot: usize },
    /// Keep the cards in place, marked as used
    Decline,
}

impl std::fmt::Display for TrioChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrioChoice::Trade { element } => write!(f, "trade for {}", element),
            TrioChoice::RemoveBadLuck { slot } => write!(f, "remove bad luck in slot {}", slot),
            TrioChoice::Decline => write!(f, "decline"),
        }
    }
}

/// What a luck trio resolution moved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrioResolution {
    pub choice: TrioChoice,
    pub discarded: Vec<Card>,
    /// Trio cards left in place (marked used)
    pub retained: Vec<usize>,
    /// Slot of the spawned luck card, for trades
    pub spawned_slot: Option<usize>,
    pub affinity: bool,
}

/// Record of a fired bad-luck trio
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadLuckTrioEvent {
    pub punishment: SuperPunishment,
    /// Cards swept from the field
    pub cleared: usize,
    pub damage: i32,
    pub affinity: bool,
}

/// Label used when logging a trio effect
pub fn effect_variant(affinity: bool) -> &'static str {
    if affinity {
        "amplified"
    } else {
        "standard"
    }
}
