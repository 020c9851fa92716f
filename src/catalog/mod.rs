//! Move and attribute catalog
//!
//! Immutable lookups with no side effects:
//! - Elements shared by creatures, moves and cards
//! - Move stats with derived energy costs
//! - Species base stats
//! - Attribute resolution and modifiers
//!
//! A missing entry is `None`, never an error.

mod attributes;
mod element;
mod moves;
mod species;

pub use attributes::{attributes_for, AttributeKind, AttributeOverride, ResolvedAttributes};
pub use element::Element;
pub use moves::{
    all_moves, energy_cost_for, learnable_moves, move_by_id, Move, MoveCategory, MoveId,
    RangeClass,
};
pub use species::{all_species, species_by_id, species_by_name, Species, SpeciesId};
