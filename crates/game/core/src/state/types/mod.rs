pub mod common;
pub mod creature;
pub mod moves;

pub use common::{ElementType, EntryId, Rarity, SpeciesId};
pub use creature::{InventoryEntry, SpeciesData};
pub use moves::{MoveDef, MoveEffect, MoveSet, MoveSlot};
