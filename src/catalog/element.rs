//! Elemental types shared by creatures, moves and cards

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Elemental type of a creature, move or card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Element {
    /// Untyped; never appears on cards
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Rock,
    Psychic,
    Shadow,
}

impl Element {
    /// Get all elements
    pub fn all() -> &'static [Element] {
        &[
            Element::Normal,
            Element::Fire,
            Element::Water,
            Element::Grass,
            Element::Electric,
            Element::Ice,
            Element::Rock,
            Element::Psychic,
            Element::Shadow,
        ]
    }

    /// Elements that cards can carry (everything except normal)
    pub fn card_elements() -> &'static [Element] {
        &Self::all()[1..]
    }

    pub fn is_normal(&self) -> bool {
        *self == Element::Normal
    }
}

impl FromStr for Element {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(Element::Normal),
            "fire" => Ok(Element::Fire),
            "water" => Ok(Element::Water),
            "grass" | "plant" => Ok(Element::Grass),
            "electric" | "lightning" => Ok(Element::Electric),
            "ice" => Ok(Element::Ice),
            "rock" | "earth" => Ok(Element::Rock),
            "psychic" => Ok(Element::Psychic),
            "shadow" | "dark" => Ok(Element::Shadow),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Element::Normal => "normal",
            Element::Fire => "fire",
            Element::Water => "water",
            Element::Grass => "grass",
            Element::Electric => "electric",
            Element::Ice => "ice",
            Element::Rock => "rock",
            Element::Psychic => "psychic",
            Element::Shadow => "shadow",
        };
        write!(f, "{}", s)
    }
}
