//! Card deck engine
//!
//! Deck composition, the six-slot field, trio detection, the bad-luck
//! penalty and card-paid energy.

mod card;
mod catalog;
mod table;
mod trio;

pub use card::{AuraKind, Card, CardId, CardKind};
pub use catalog::{
    build_deck, definitions, CardDefinition, CardIdGen, Printing, SuperPunishment,
    TRADE_CARD_NAME,
};
pub use table::{
    CardTable, Drawn, EnergyPlan, EnergySource, BAD_LUCK_PENALTY, FIELD_SLOTS,
    MATCHING_BAD_LUCK_PENALTY,
};
pub use trio::{
    effect_variant, BadLuckTrioEvent, LuckTrio, TrioChoice, TrioResolution, TrioScan, TRIO_SIZE,
};
