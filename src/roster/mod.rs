//! Combatant roster
//!
//! The battle engine reads HP, level and moves from here and writes back
//! damage, healing, move uses and the faint penalty. Persisting the roster
//! between sessions is up to the host.

use serde::{Deserialize, Serialize};

use crate::catalog::{
    attributes_for, learnable_moves, species_by_id, AttributeKind, AttributeOverride, Element,
    MoveId, ResolvedAttributes, Species, SpeciesId,
};

/// Combatant identifier, unique within a roster
pub type CombatantId = u32;

/// Moves a freshly built combatant knows at most
pub const MAX_KNOWN_MOVES: usize = 4;

/// A learned move and its remaining uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSlot {
    pub move_id: MoveId,
    pub uses: u32,
    pub max_uses: u32,
}

/// A creature that can take part in battle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub species_id: SpeciesId,
    pub element: Element,
    pub level: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub moves: Vec<MoveSlot>,
    /// Supersedes species/level attribute defaults once set
    pub overrides: Option<AttributeOverride>,
}

impl Combatant {
    /// Build a combatant at full HP knowing its most recent learnable moves
    pub fn from_species(id: CombatantId, species: &Species, level: u32) -> Self {
        let learnable = learnable_moves(species.element, level);
        let skip = learnable.len().saturating_sub(MAX_KNOWN_MOVES);
        let moves = learnable
            .into_iter()
            .skip(skip)
            .map(|mv| MoveSlot {
                move_id: mv.id,
                uses: mv.default_uses(),
                max_uses: mv.default_uses(),
            })
            .collect();
        let max_hp = species.max_hp_at(level);

        Self {
            id,
            name: species.name.to_string(),
            species_id: species.id,
            element: species.element,
            level,
            hp: max_hp,
            max_hp,
            moves,
            overrides: None,
        }
    }

    pub fn attributes(&self) -> Option<ResolvedAttributes> {
        attributes_for(self.species_id, self.level, self.overrides.as_ref())
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn move_slot(&self, move_id: MoveId) -> Option<&MoveSlot> {
        self.moves.iter().find(|slot| slot.move_id == move_id)
    }

    pub fn move_slot_mut(&mut self, move_id: MoveId) -> Option<&mut MoveSlot> {
        self.moves.iter_mut().find(|slot| slot.move_id == move_id)
    }

    /// Take damage, stopping at 0 HP
    ///
    /// Returns true if this blow made the combatant faint.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        let was_alive = self.is_alive();
        self.hp = (self.hp - amount.max(0)).max(0);
        was_alive && !self.is_alive()
    }

    /// Heal (cannot exceed max_hp); returns HP actually restored
    pub fn heal(&mut self, amount: i32) -> i32 {
        let actual = amount.max(0).min(self.max_hp - self.hp);
        self.hp += actual;
        actual
    }

    /// Permanent -1 to every base attribute, floored at 1
    pub fn apply_faint_penalty(&mut self) {
        let Some(current) = self.attributes() else {
            return;
        };
        let mut record = self.overrides.unwrap_or_else(|| current.to_override());
        for kind in AttributeKind::base() {
            record.adjust(*kind, -1);
        }
        self.overrides = Some(record);
    }

    /// Gain a level, growing max HP and optionally one base attribute
    pub fn level_up(&mut self, bonus: Option<AttributeKind>) {
        let Some(species) = species_by_id(self.species_id) else {
            return;
        };
        self.level += 1;
        let grown = species.max_hp_at(self.level);
        if self.is_alive() {
            self.hp += grown - self.max_hp;
        }
        self.max_hp = grown;

        if let Some(kind) = bonus.filter(|k| *k != AttributeKind::Defense) {
            let Some(current) = self.attributes() else {
                return;
            };
            let mut record = self.overrides.unwrap_or_else(|| current.to_override());
            record.adjust(kind, 1);
            self.overrides = Some(record);
        }
    }
}

/// In-memory collection of combatants
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    combatants: Vec<Combatant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a combatant, replacing any with the same id
    pub fn insert(&mut self, combatant: Combatant) {
        match self.combatants.iter_mut().find(|c| c.id == combatant.id) {
            Some(existing) => *existing = combatant,
            None => self.combatants.push(combatant),
        }
    }

    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter()
    }

    /// Living combatants other than `except`
    pub fn living_except(&self, except: Option<CombatantId>) -> impl Iterator<Item = &Combatant> {
        self.combatants
            .iter()
            .filter(move |c| c.is_alive() && Some(c.id) != except)
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }
}

impl FromIterator<Combatant> for Roster {
    fn from_iter<I: IntoIterator<Item = Combatant>>(iter: I) -> Self {
        let mut roster = Roster::new();
        for combatant in iter {
            roster.insert(combatant);
        }
        roster
    }
}
