//! Species table: element and base attributes at level 1

use serde::Serialize;

use super::element::Element;

/// Species identifier
pub type SpeciesId = u16;

/// A creature species
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Species {
    pub id: SpeciesId,
    pub name: &'static str,
    pub element: Element,
    pub strength: i32,
    pub focus: i32,
    pub agility: i32,
    pub fortune: i32,
    /// Hit points at level 1
    pub base_hp: i32,
}

static SPECIES: &[Species] = &[
    Species { id: 1, name: "Emberfox", element: Element::Fire, strength: 9, focus: 12, agility: 11, fortune: 8, base_hp: 38 },
    Species { id: 2, name: "Tidepup", element: Element::Water, strength: 10, focus: 10, agility: 9, fortune: 9, base_hp: 44 },
    Species { id: 3, name: "Sproutling", element: Element::Grass, strength: 11, focus: 9, agility: 8, fortune: 10, base_hp: 46 },
    Species { id: 4, name: "Voltmouse", element: Element::Electric, strength: 8, focus: 11, agility: 14, fortune: 9, base_hp: 34 },
    Species { id: 5, name: "Frostling", element: Element::Ice, strength: 9, focus: 12, agility: 10, fortune: 7, base_hp: 40 },
    Species { id: 6, name: "Pebblehorn", element: Element::Rock, strength: 14, focus: 6, agility: 6, fortune: 8, base_hp: 52 },
    Species { id: 7, name: "Mindmoth", element: Element::Psychic, strength: 6, focus: 14, agility: 10, fortune: 12, base_hp: 34 },
    Species { id: 8, name: "Gloomcat", element: Element::Shadow, strength: 12, focus: 9, agility: 12, fortune: 11, base_hp: 38 },
    Species { id: 9, name: "Patchrat", element: Element::Normal, strength: 10, focus: 8, agility: 11, fortune: 14, base_hp: 40 },
];

/// Look up a species by id
pub fn species_by_id(id: SpeciesId) -> Option<&'static Species> {
    SPECIES.iter().find(|s| s.id == id)
}

/// Look up a species by (case-insensitive) name
pub fn species_by_name(name: &str) -> Option<&'static Species> {
    SPECIES.iter().find(|s| s.name.eq_ignore_ascii_case(name))
}

/// All species in the catalog
pub fn all_species() -> &'static [Species] {
    SPECIES
}

impl Species {
    /// Maximum HP at a given level
    pub fn max_hp_at(&self, level: u32) -> i32 {
        self.base_hp + (level.saturating_sub(1) as i32) * 3
    }
}
