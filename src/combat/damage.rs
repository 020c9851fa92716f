//! Damage resolution
//!
//! Produces an attacker-side damage breakdown:
//! - roll the move's dice formula
//! - add the scaling attribute modifier (strength for physical, focus for special)
//! - apply the hit multiplier
//!
//! Target defense is not applied here; see [`reduce_by_defense`].

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::hit::HitClass;
use crate::catalog::{AttributeKind, Move, MoveCategory, MoveId, ResolvedAttributes};

/// Structured record of how a damage total was derived
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageBreakdown {
    pub move_id: MoveId,
    /// Dice formula, e.g. "2d6"
    pub dice: String,
    /// Individual die results
    pub rolls: Vec<u32>,
    /// Dice total including the formula's own modifier
    pub sum: i32,
    pub attribute_bonus: i32,
    pub scaling_attribute: Option<AttributeKind>,
    pub hit: HitClass,
    pub multiplier_label: String,
    pub raw_total: i32,
    /// False for status moves
    pub damaging: bool,
}

impl DamageBreakdown {
    /// Breakdown for a status move: no dice, no damage
    pub fn non_damaging(mv: &Move, hit: HitClass) -> Self {
        Self {
            move_id: mv.id,
            dice: mv.dice.to_string(),
            rolls: Vec::new(),
            sum: 0,
            attribute_bonus: 0,
            scaling_attribute: None,
            hit,
            multiplier_label: hit.multiplier_label().to_string(),
            raw_total: 0,
            damaging: false,
        }
    }
}

/// Attribute a move category scales off
pub fn scaling_attribute(category: MoveCategory) -> Option<AttributeKind> {
    match category {
        MoveCategory::Physical => Some(AttributeKind::Strength),
        MoveCategory::Special => Some(AttributeKind::Focus),
        MoveCategory::Status => None,
    }
}

/// Resolve the damage of a classified attack
///
/// With `maximize` set every die shows its highest face.
pub fn resolve_damage<R: Rng + ?Sized>(
    mv: &Move,
    hit: HitClass,
    attacker: &ResolvedAttributes,
    maximize: bool,
    rng: &mut R,
) -> DamageBreakdown {
    let Some(scaling) = scaling_attribute(mv.category) else {
        return DamageBreakdown::non_damaging(mv, hit);
    };

    let (rolls, sum) = if maximize {
        mv.dice.maximized()
    } else {
        mv.dice.roll_detailed(rng)
    };
    let attribute_bonus = attacker.modifier(scaling);
    let base = (sum + attribute_bonus).max(0);

    DamageBreakdown {
        move_id: mv.id,
        dice: mv.dice.to_string(),
        rolls,
        sum,
        attribute_bonus,
        scaling_attribute: Some(scaling),
        hit,
        multiplier_label: hit.multiplier_label().to_string(),
        raw_total: percent_of(base, hit.multiplier_percent()),
        damaging: true,
    }
}

/// Damage left after the target's defense: raw - floor(defense / 3), never negative
pub fn reduce_by_defense(raw: i32, defense: i32) -> i32 {
    (raw - defense.max(0) / 3).max(0)
}

/// `percent`% of a non-negative value, rounded half up
pub fn percent_of(value: i32, percent: u32) -> i32 {
    let value = value.max(0) as i64;
    ((value * percent as i64 + 50) / 100) as i32
}
