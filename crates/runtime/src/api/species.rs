//! Asynchronous source of species metadata.
//!
//! The rules never guess stats for a species they cannot resolve: a provider
//! either returns the full [`SpeciesData`] or `SpeciesUnavailable`.
use async_trait::async_trait;
use gacha_core::{SpeciesData, SpeciesId};

use super::errors::Result;

#[async_trait]
pub trait SpeciesProvider: Send + Sync {
    async fn species(&self, id: SpeciesId) -> Result<SpeciesData>;
}
