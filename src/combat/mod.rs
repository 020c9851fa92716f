//! Dice and damage resolution
//!
//! Implements the attacker-side combat math:
//! - Dice rolling (e.g., "2d6+3")
//! - Hit classification from a d20 roll
//! - Damage breakdowns scaled by attributes and hit quality

mod damage;
mod dice;
mod hit;

pub use damage::{
    percent_of, reduce_by_defense, resolve_damage, scaling_attribute, DamageBreakdown,
};
pub use dice::{is_fumble, is_natural_max, roll_d20, DiceRoll, D20};
pub use hit::{
    classify_hit, crit_threshold, HitClass, BASE_CRIT_THRESHOLD, MIN_CRIT_THRESHOLD,
    STRONG_HIT_MARGIN,
};
