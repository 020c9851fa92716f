//! Hit classification
//!
//! Buckets a d20 roll, checked in order:
//! 1. natural 1 is a critical miss, whatever the bonuses
//! 2. an active aura forces a critical hit
//! 3. roll at or above the critical threshold is a critical hit
//! 4. roll + bonus at or above accuracy + 5 is a strong hit
//! 5. roll + bonus at or above accuracy is a hit
//! 6. anything else misses

use serde::{Deserialize, Serialize};

use super::dice::is_fumble;

/// Critical threshold with no fortune
pub const BASE_CRIT_THRESHOLD: u32 = 20;

/// Lowest the critical threshold can go
pub const MIN_CRIT_THRESHOLD: u32 = 15;

/// Margin over accuracy needed for a strong hit
pub const STRONG_HIT_MARGIN: i32 = 5;

/// Discrete outcome of an attack roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HitClass {
    CriticalMiss,
    Miss,
    Hit,
    StrongHit,
    CriticalHit,
}

impl HitClass {
    /// Damage multiplier in percent
    pub fn multiplier_percent(&self) -> u32 {
        match self {
            HitClass::CriticalHit => 150,
            HitClass::StrongHit => 120,
            HitClass::Hit => 100,
            HitClass::Miss | HitClass::CriticalMiss => 0,
        }
    }

    /// Label reported in the damage breakdown
    pub fn multiplier_label(&self) -> &'static str {
        match self {
            HitClass::CriticalHit => "critical x1.5",
            HitClass::StrongHit => "strong x1.2",
            HitClass::Hit => "normal x1.0",
            HitClass::Miss => "miss x0",
            HitClass::CriticalMiss => "critical miss x0",
        }
    }

    pub fn connects(&self) -> bool {
        self.multiplier_percent() > 0
    }
}

impl std::fmt::Display for HitClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HitClass::CriticalMiss => "critical-miss",
            HitClass::Miss => "miss",
            HitClass::Hit => "hit",
            HitClass::StrongHit => "strong-hit",
            HitClass::CriticalHit => "critical-hit",
        };
        write!(f, "{}", s)
    }
}

/// Critical threshold: 20, lowered by 1 per 2 points of base fortune, never below 15
pub fn crit_threshold(fortune: i32) -> u32 {
    let reduction = fortune.max(0) as u32 / 2;
    BASE_CRIT_THRESHOLD
        .saturating_sub(reduction)
        .max(MIN_CRIT_THRESHOLD)
}

/// Classify a raw d20 roll
pub fn classify_hit(
    roll: u32,
    bonus: i32,
    accuracy: u32,
    crit_threshold: u32,
    aura_active: bool,
) -> HitClass {
    if is_fumble(roll) {
        return HitClass::CriticalMiss;
    }
    if aura_active || roll >= crit_threshold {
        return HitClass::CriticalHit;
    }

    let effective = roll as i32 + bonus;
    let accuracy = accuracy as i32;
    if effective >= accuracy + STRONG_HIT_MARGIN {
        HitClass::StrongHit
    } else if effective >= accuracy {
        HitClass::Hit
    } else {
        HitClass::Miss
    }
}
