//! Move catalog oracle.
//!
//! Provides static move definitions and the default move set handed to a
//! combatant of a given element.

use crate::state::{ElementType, MoveDef};

/// Oracle providing move definitions.
///
/// Catalogs are loaded once from data files and never change during play.
pub trait MoveOracle: Send + Sync {
    /// Looks up a move by its display name.
    fn move_def(&self, name: &str) -> Option<&MoveDef>;

    /// Returns the move set for an element, falling back to the catalog's
    /// default set when the element has none. `None` only if neither exists.
    fn move_set(&self, element: ElementType) -> Option<Vec<MoveDef>>;
}
