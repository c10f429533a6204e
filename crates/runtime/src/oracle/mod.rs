//! Runtime wrappers around static game content.
//!
//! [`OracleManager`] shares one loaded [`ContentBundle`] between services and
//! builds [`gacha_core::Env`] views on demand. The data is immutable at
//! runtime; player state lives in repositories.
mod rng;
mod species;

use std::sync::Arc;

use gacha_content::{ContentBundle, GachaPack, SpeciesCatalog, StarterPool};
use gacha_core::{Env, GameConfig};

pub use rng::{RngSource, SeededRng};
pub use species::{CachedSpeciesProvider, CatalogSpeciesProvider};

/// Shared read-only access to the loaded content.
#[derive(Clone, Debug)]
pub struct OracleManager {
    content: Arc<ContentBundle>,
}

impl OracleManager {
    pub fn new(content: ContentBundle) -> Self {
        Self {
            content: Arc::new(content),
        }
    }

    pub fn from_shared(content: Arc<ContentBundle>) -> Self {
        Self { content }
    }

    /// Rules environment with every oracle wired in.
    pub fn env(&self) -> Env<'_> {
        self.content.env()
    }

    pub fn config(&self) -> &GameConfig {
        &self.content.config
    }

    pub fn species(&self) -> &SpeciesCatalog {
        &self.content.species
    }

    pub fn starters(&self) -> &StarterPool {
        &self.content.starters
    }

    pub fn pack(&self, id: &str) -> Option<&GachaPack> {
        self.content.packs.get(id)
    }

    pub fn packs(&self) -> impl Iterator<Item = &GachaPack> {
        self.content.packs.iter()
    }

    pub fn content(&self) -> &Arc<ContentBundle> {
        &self.content
    }
}
