//! Creature, move and combatant data.
//!
//! Persisted shapes (`InventoryEntry`, `SpeciesData`) and the battle-time
//! [`Combatant`] built from them. Nothing here draws randomness or performs
//! I/O.
pub mod combatant;
pub mod error;
pub mod types;

pub use combatant::Combatant;
pub use error::{CombatantError, MoveError};
pub use types::{
    ElementType, EntryId, InventoryEntry, MoveDef, MoveEffect, MoveSet, MoveSlot, Rarity,
    SpeciesData, SpeciesId,
};
