//! Dice rolling system
//!
//! Rolls fixed dice formulas like "2d6+3" and the d20 hit die.
//! Every roll draws from a caller-supplied RNG so battles replay exactly
//! from a seed.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Faces on the hit die
pub const D20: u32 = 20;

/// A dice formula: count, sides and a flat modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceRoll {
    /// Number of dice to roll
    pub count: u32,
    /// Number of sides per die
    pub sides: u32,
    /// Modifier to add/subtract
    pub modifier: i32,
}

impl DiceRoll {
    /// Create a new dice roll
    pub const fn new(count: u32, sides: u32, modifier: i32) -> Self {
        Self {
            count,
            sides,
            modifier,
        }
    }

    /// Roll the dice and return the total
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        self.roll_detailed(rng).1
    }

    /// Roll and return individual die results plus total
    pub fn roll_detailed<R: Rng + ?Sized>(&self, rng: &mut R) -> (Vec<u32>, i32) {
        let results: Vec<u32> = (0..self.count)
            .map(|_| rng.random_range(1..=self.sides))
            .collect();
        let total = self.total_of(&results);
        (results, total)
    }

    /// Every die showing its highest face
    pub fn maximized(&self) -> (Vec<u32>, i32) {
        let results = vec![self.sides; self.count as usize];
        let total = self.total_of(&results);
        (results, total)
    }

    fn total_of(&self, results: &[u32]) -> i32 {
        let sum: u32 = results.iter().sum();
        sum as i32 + self.modifier
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.modifier > 0 {
            write!(f, "{}d{}+{}", self.count, self.sides, self.modifier)
        } else if self.modifier < 0 {
            write!(f, "{}d{}{}", self.count, self.sides, self.modifier)
        } else {
            write!(f, "{}d{}", self.count, self.sides)
        }
    }
}

/// Roll a single d20
pub fn roll_d20<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.random_range(1..=D20)
}

/// Natural 20
pub fn is_natural_max(roll: u32) -> bool {
    roll == D20
}

/// Natural 1
pub fn is_fumble(roll: u32) -> bool {
    roll == 1
}
