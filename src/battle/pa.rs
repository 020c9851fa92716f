//! Action points
//!
//! Every battle action is gated on PA. A spend either debits the full cost
//! or changes nothing.

use serde::{Deserialize, Serialize};

/// Actions that cost PA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Attack,
    Item,
    Switch,
    AttributeTest,
    BoardMove,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ActionKind::Attack => "attack",
            ActionKind::Item => "item",
            ActionKind::Switch => "switch",
            ActionKind::AttributeTest => "attribute-test",
            ActionKind::BoardMove => "board-move",
        };
        write!(f, "{}", s)
    }
}

/// A PA debit recorded for the current turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaSpend {
    pub kind: ActionKind,
    pub cost: u32,
}

/// Current/max PA plus this turn's spends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaLedger {
    pub current: u32,
    pub max: u32,
    pub spent: Vec<PaSpend>,
}

impl PaLedger {
    pub fn new(max: u32) -> Self {
        Self {
            current: max,
            max,
            spent: Vec::new(),
        }
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.current >= cost
    }

    /// Debit `cost`; false (and no change) if PA is short
    pub fn spend(&mut self, kind: ActionKind, cost: u32) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.current -= cost;
        self.spent.push(PaSpend { kind, cost });
        true
    }

    /// Start of a new turn: full PA, empty spend log
    pub fn refill(&mut self) {
        self.current = self.max;
        self.spent.clear();
    }
}
