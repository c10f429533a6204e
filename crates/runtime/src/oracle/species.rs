//! Species providers backed by the content catalog.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use gacha_content::ContentBundle;
use gacha_core::{SpeciesData, SpeciesId};

use crate::api::{Result, RuntimeError, SpeciesProvider};

/// Serves species straight from the embedded table.
#[derive(Clone, Debug)]
pub struct CatalogSpeciesProvider {
    content: Arc<ContentBundle>,
}

impl CatalogSpeciesProvider {
    pub fn new(content: Arc<ContentBundle>) -> Self {
        Self { content }
    }
}

#[async_trait]
impl SpeciesProvider for CatalogSpeciesProvider {
    async fn species(&self, id: SpeciesId) -> Result<SpeciesData> {
        self.content
            .species
            .get(id)
            .cloned()
            .ok_or(RuntimeError::SpeciesUnavailable(id))
    }
}

/// Memoises successful lookups of an inner provider. Failures are not cached.
pub struct CachedSpeciesProvider<P> {
    inner: P,
    cache: RwLock<HashMap<SpeciesId, SpeciesData>>,
}

impl<P: SpeciesProvider> CachedSpeciesProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub async fn cached(&self) -> usize {
        self.cache.read().await.len()
    }
}

#[async_trait]
impl<P: SpeciesProvider> SpeciesProvider for CachedSpeciesProvider<P> {
    async fn species(&self, id: SpeciesId) -> Result<SpeciesData> {
        if let Some(data) = self.cache.read().await.get(&id) {
            return Ok(data.clone());
        }

        let data = self.inner.species(id).await?;
        tracing::debug!(species = %id, name = %data.name, "cached species");
        self.cache.write().await.insert(id, data.clone());
        Ok(data)
    }
}
