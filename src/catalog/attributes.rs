//! Creature attributes
//!
//! Four base stats plus a derived defense value. Modifiers are always
//! recomputed from the current base and level:
//! - modifier = floor(base / 2) + floor(level / 5)
//! - defense = (strength + agility) / 2

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::species::{species_by_id, SpeciesId};

/// Attribute names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttributeKind {
    /// Physical damage scaling
    Strength,
    /// Special damage scaling
    Focus,
    /// Added to hit rolls
    Agility,
    /// Lowers the critical threshold
    Fortune,
    /// Derived from strength and agility
    Defense,
}

impl AttributeKind {
    /// The four base attributes (defense is derived)
    pub fn base() -> &'static [AttributeKind] {
        &[
            AttributeKind::Strength,
            AttributeKind::Focus,
            AttributeKind::Agility,
            AttributeKind::Fortune,
        ]
    }
}

impl FromStr for AttributeKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strength" | "str" => Ok(AttributeKind::Strength),
            "focus" | "foc" => Ok(AttributeKind::Focus),
            "agility" | "agi" => Ok(AttributeKind::Agility),
            "fortune" | "luck" => Ok(AttributeKind::Fortune),
            "defense" | "def" => Ok(AttributeKind::Defense),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AttributeKind::Strength => "strength",
            AttributeKind::Focus => "focus",
            AttributeKind::Agility => "agility",
            AttributeKind::Fortune => "fortune",
            AttributeKind::Defense => "defense",
        };
        write!(f, "{}", s)
    }
}

/// Per-creature base attribute record that supersedes species/level defaults
///
/// Written by the faint penalty and by level-up bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeOverride {
    pub strength: i32,
    pub focus: i32,
    pub agility: i32,
    pub fortune: i32,
}

impl AttributeOverride {
    pub fn get(&self, kind: AttributeKind) -> Option<i32> {
        match kind {
            AttributeKind::Strength => Some(self.strength),
            AttributeKind::Focus => Some(self.focus),
            AttributeKind::Agility => Some(self.agility),
            AttributeKind::Fortune => Some(self.fortune),
            AttributeKind::Defense => None,
        }
    }

    /// Add `amount` to one base attribute, never dropping below 1
    pub fn adjust(&mut self, kind: AttributeKind, amount: i32) {
        let slot = match kind {
            AttributeKind::Strength => &mut self.strength,
            AttributeKind::Focus => &mut self.focus,
            AttributeKind::Agility => &mut self.agility,
            AttributeKind::Fortune => &mut self.fortune,
            AttributeKind::Defense => return,
        };
        *slot = (*slot + amount).max(1);
    }
}

/// Attributes resolved for a creature at a specific level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAttributes {
    pub level: u32,
    pub strength: i32,
    pub focus: i32,
    pub agility: i32,
    pub fortune: i32,
}

impl ResolvedAttributes {
    /// Current base value (defense is derived on the fly)
    pub fn base(&self, kind: AttributeKind) -> i32 {
        match kind {
            AttributeKind::Strength => self.strength,
            AttributeKind::Focus => self.focus,
            AttributeKind::Agility => self.agility,
            AttributeKind::Fortune => self.fortune,
            AttributeKind::Defense => self.defense(),
        }
    }

    pub fn defense(&self) -> i32 {
        (self.strength + self.agility) / 2
    }

    /// floor(base / 2) + floor(level / 5)
    pub fn modifier(&self, kind: AttributeKind) -> i32 {
        self.base(kind).div_euclid(2) + (self.level / 5) as i32
    }

    /// Snapshot the base values as an override record
    pub fn to_override(&self) -> AttributeOverride {
        AttributeOverride {
            strength: self.strength,
            focus: self.focus,
            agility: self.agility,
            fortune: self.fortune,
        }
    }
}

/// Resolve attributes for a species at a level
///
/// An override record, when present, replaces the species/level base values
/// entirely. Returns `None` for an unknown species.
pub fn attributes_for(
    species_id: SpeciesId,
    level: u32,
    overrides: Option<&AttributeOverride>,
) -> Option<ResolvedAttributes> {
    let species = species_by_id(species_id)?;

    if let Some(o) = overrides {
        return Some(ResolvedAttributes {
            level,
            strength: o.strength,
            focus: o.focus,
            agility: o.agility,
            fortune: o.fortune,
        });
    }

    let growth = (level / 10) as i32;
    Some(ResolvedAttributes {
        level,
        strength: species.strength + growth,
        focus: species.focus + growth,
        agility: species.agility + growth,
        fortune: species.fortune + growth,
    })
}
