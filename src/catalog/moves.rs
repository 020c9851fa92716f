//! Move catalog
//!
//! Static move table with derived energy costs. Energy cost is computed
//! once, at compile time, from the move's element and power.

use serde::{Deserialize, Serialize};

use self::table::MOVES;
use super::element::Element;
use crate::combat::DiceRoll;

/// Move identifier
pub type MoveId = u16;

/// How a move deals damage (and which attribute scales it)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoveCategory {
    /// Scales off strength
    Physical,
    /// Scales off focus
    Special,
    /// Deals no damage
    Status,
}

/// Reach of a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangeClass {
    Melee,
    Ranged,
    Area,
    SelfTarget,
}

/// A static move definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Move {
    pub id: MoveId,
    pub name: &'static str,
    pub element: Element,
    pub power: u32,
    /// Die value needed to hit
    pub accuracy: u32,
    pub dice: DiceRoll,
    pub category: MoveCategory,
    pub range: RangeClass,
    /// Energy cards required (0-4)
    pub energy_cost: u8,
    /// Level at which the move is learned
    pub learn_level: u32,
}

impl Move {
    #[allow(clippy::too_many_arguments)]
    const fn new(
        id: MoveId,
        name: &'static str,
        element: Element,
        power: u32,
        accuracy: u32,
        dice: DiceRoll,
        category: MoveCategory,
        range: RangeClass,
        learn_level: u32,
    ) -> Self {
        Self {
            id,
            name,
            element,
            power,
            accuracy,
            dice,
            category,
            range,
            energy_cost: energy_cost_for(element, power),
            learn_level,
        }
    }

    /// Element of the energy cards this move consumes, if it costs any
    pub fn energy_type(&self) -> Option<Element> {
        (self.energy_cost > 0).then_some(self.element)
    }

    pub fn is_status(&self) -> bool {
        self.category == MoveCategory::Status
    }

    /// Default number of uses for a freshly learned move
    pub fn default_uses(&self) -> u32 {
        match self.energy_cost {
            0 => 20,
            1 => 15,
            2 => 10,
            3 => 5,
            _ => 3,
        }
    }
}

/// Energy cost tiers. Normal-type and status (power 0) moves are free.
pub const fn energy_cost_for(element: Element, power: u32) -> u8 {
    if matches!(element, Element::Normal) || power == 0 {
        return 0;
    }
    if power <= 60 {
        1
    } else if power <= 100 {
        2
    } else if power <= 150 {
        3
    } else {
        4
    }
}

mod table {
    use super::{Move, MoveCategory::*, RangeClass::*};
    use crate::catalog::element::Element::*;
    use crate::combat::DiceRoll;

    pub(super) static MOVES: &[Move] = &[
        Move::new(1, "Tackle", Normal, 40, 8, DiceRoll::new(1, 6, 0), Physical, Melee, 1),
        Move::new(2, "Growl", Normal, 0, 6, DiceRoll::new(1, 4, 0), Status, Area, 1),
        Move::new(3, "Ember", Fire, 40, 9, DiceRoll::new(1, 8, 0), Special, Ranged, 1),
        Move::new(4, "Flame Fang", Fire, 65, 10, DiceRoll::new(2, 6, 0), Physical, Melee, 12),
        Move::new(5, "Inferno", Fire, 120, 14, DiceRoll::new(3, 8, 0), Special, Area, 30),
        Move::new(6, "Water Gun", Water, 40, 9, DiceRoll::new(1, 8, 0), Special, Ranged, 1),
        Move::new(7, "Aqua Tail", Water, 90, 12, DiceRoll::new(2, 8, 0), Physical, Melee, 20),
        Move::new(8, "Hydro Cannon", Water, 150, 15, DiceRoll::new(4, 8, 0), Special, Ranged, 40),
        Move::new(9, "Vine Whip", Grass, 45, 9, DiceRoll::new(1, 8, 0), Physical, Melee, 1),
        Move::new(10, "Leaf Storm", Grass, 130, 14, DiceRoll::new(3, 10, 0), Special, Area, 35),
        Move::new(11, "Spark", Electric, 65, 10, DiceRoll::new(2, 6, 0), Physical, Melee, 8),
        Move::new(12, "Thunderclap", Electric, 160, 16, DiceRoll::new(4, 10, 0), Special, Area, 45),
        Move::new(13, "Frost Breath", Ice, 60, 10, DiceRoll::new(2, 4, 0), Special, Ranged, 10),
        Move::new(14, "Rock Throw", Rock, 50, 10, DiceRoll::new(1, 10, 0), Physical, Ranged, 6),
        Move::new(15, "Mind Spike", Psychic, 80, 11, DiceRoll::new(2, 6, 0), Special, Ranged, 15),
        Move::new(16, "Shadow Claw", Shadow, 70, 10, DiceRoll::new(2, 6, 0), Physical, Melee, 14),
        Move::new(17, "Focus Energy", Normal, 0, 5, DiceRoll::new(1, 4, 0), Status, SelfTarget, 5),
        Move::new(18, "Hyper Beam", Normal, 150, 15, DiceRoll::new(4, 10, 0), Special, Ranged, 50),
        Move::new(19, "Calm Mind", Psychic, 0, 6, DiceRoll::new(1, 4, 0), Status, SelfTarget, 18),
    ];
}

/// Look up a move by id
pub fn move_by_id(id: MoveId) -> Option<&'static Move> {
    MOVES.iter().find(|m| m.id == id)
}

/// All moves in the catalog
pub fn all_moves() -> &'static [Move] {
    MOVES
}

/// Moves of the given elements (plus normal) learnable at or below `level`
pub fn learnable_moves(element: Element, level: u32) -> Vec<&'static Move> {
    MOVES
        .iter()
        .filter(|m| m.learn_level <= level && (m.element == element || m.element.is_normal()))
        .collect()
}
