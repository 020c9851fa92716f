//! Battle phases and the navigation edges a host may take directly

use serde::{Deserialize, Serialize};

/// Where the battle is in its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BattlePhase {
    /// No battle running
    #[default]
    Idle,
    Menu,
    AttackSelect,
    Rolling,
    Result,
    AttributeTestSelect,
    AttributeTestRolling,
    AttributeTestResult,
}

impl BattlePhase {
    /// Edges reachable through plain navigation
    ///
    /// Everything else (rolling, results, idle) is entered only by the
    /// operation that owns the transition.
    pub fn can_navigate(self, to: BattlePhase) -> bool {
        use BattlePhase::*;
        matches!(
            (self, to),
            (Menu, AttackSelect)
                | (AttackSelect, Menu)
                | (Menu, AttributeTestSelect)
                | (AttributeTestSelect, Menu)
                | (Result, Menu)
                | (AttributeTestResult, Menu)
        )
    }

    /// Phases that show a result awaiting acknowledgment
    pub fn is_result(self) -> bool {
        matches!(self, BattlePhase::Result | BattlePhase::AttributeTestResult)
    }
}

impl std::fmt::Display for BattlePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BattlePhase::Idle => "idle",
            BattlePhase::Menu => "menu",
            BattlePhase::AttackSelect => "attack-select",
            BattlePhase::Rolling => "rolling",
            BattlePhase::Result => "result",
            BattlePhase::AttributeTestSelect => "attribute-test-select",
            BattlePhase::AttributeTestRolling => "attribute-test-rolling",
            BattlePhase::AttributeTestResult => "attribute-test-result",
        };
        write!(f, "{}", s)
    }
}
