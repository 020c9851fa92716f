//! Battle scenarios
//!
//! - Attack: move selection, hit classes, PA gating
//! - Cards: field placement, trios, penalties, card effects, conservation
//! - Turns: turn advance, switching, fainting

pub mod attack;
pub mod cards;
pub mod turns;
