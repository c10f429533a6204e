//! Species table and starter pool loaders.

use std::collections::BTreeMap;
use std::path::Path;

use gacha_core::{ElementType, Rarity, SpeciesData, SpeciesId, Stats};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

const EMBEDDED_SPECIES: &str = include_str!("../../data/species.ron");
const EMBEDDED_STARTERS: &str = include_str!("../../data/starters.ron");

/// Placeholder in `sprite_template` replaced with the dex number.
const SPRITE_ID_PLACEHOLDER: &str = "{id}";

#[derive(Debug, Clone, Deserialize)]
struct SpeciesFile {
    #[serde(default)]
    sprite_template: String,
    species: Vec<SpeciesRecord>,
}

#[derive(Debug, Clone, Deserialize)]
struct SpeciesRecord {
    id: u32,
    name: String,
    elements: Vec<ElementType>,
    /// `(hp, atk, def, spd)`
    stats: (u32, u32, u32, u32),
    #[serde(default)]
    rarity: Rarity,
    #[serde(default)]
    sprite: Option<String>,
}

impl SpeciesRecord {
    fn into_species(self, sprite_template: &str) -> SpeciesData {
        let (hp, atk, def, spd) = self.stats;
        let sprite_url = self
            .sprite
            .unwrap_or_else(|| sprite_template.replace(SPRITE_ID_PLACEHOLDER, &self.id.to_string()));
        SpeciesData {
            id: SpeciesId(self.id),
            name: self.name,
            elements: self.elements,
            base_stats: Stats::new(hp, atk, def, spd),
            sprite_url,
            rarity: self.rarity,
        }
    }
}

/// All known species keyed by dex number.
#[derive(Debug, Clone, Default)]
pub struct SpeciesCatalog {
    species: BTreeMap<SpeciesId, SpeciesData>,
}

impl SpeciesCatalog {
    pub fn load(path: &Path) -> LoadResult<Self> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn embedded() -> LoadResult<Self> {
        Self::parse(EMBEDDED_SPECIES)
    }

    /// Parses and validates a species table.
    ///
    /// Every species needs at least one element and non-zero base stats, or
    /// it could not be turned into a combatant.
    pub fn parse(content: &str) -> LoadResult<Self> {
        let file: SpeciesFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse species RON: {}", e))?;

        let mut species = BTreeMap::new();
        for record in file.species {
            let data = record.into_species(&file.sprite_template);
            if data.elements.is_empty() {
                anyhow::bail!("Species {} ({}) has no elements", data.id, data.name);
            }
            if let Some(stat) = data.base_stats.first_zero() {
                anyhow::bail!("Species {} ({}) has zero {}", data.id, data.name, stat);
            }
            let id = data.id;
            if species.insert(id, data).is_some() {
                anyhow::bail!("Duplicate species {}", id);
            }
        }
        Ok(Self { species })
    }

    pub fn from_species(species: impl IntoIterator<Item = SpeciesData>) -> Self {
        Self {
            species: species.into_iter().map(|data| (data.id, data)).collect(),
        }
    }

    pub fn get(&self, id: SpeciesId) -> Option<&SpeciesData> {
        self.species.get(&id)
    }

    pub fn contains(&self, id: SpeciesId) -> bool {
        self.species.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpeciesData> {
        self.species.values()
    }

    /// Species with dex numbers in `[first, last]`, in dex order.
    pub fn in_range(&self, first: u32, last: u32) -> impl Iterator<Item = &SpeciesData> {
        self.species
            .range(SpeciesId(first)..=SpeciesId(last))
            .map(|(_, data)| data)
    }

    pub fn ids(&self) -> Vec<SpeciesId> {
        self.species.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

/// Species that may be offered as starter candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StarterPool {
    species: Vec<SpeciesId>,
}

impl StarterPool {
    pub fn load(path: &Path) -> LoadResult<Self> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn embedded() -> LoadResult<Self> {
        Self::parse(EMBEDDED_STARTERS)
    }

    pub fn parse(content: &str) -> LoadResult<Self> {
        let ids: Vec<u32> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse starter pool RON: {}", e))?;
        let mut species: Vec<SpeciesId> = ids.into_iter().map(SpeciesId).collect();
        species.sort_unstable();
        species.dedup();
        Ok(Self { species })
    }

    pub fn new(species: impl IntoIterator<Item = SpeciesId>) -> Self {
        let mut species: Vec<_> = species.into_iter().collect();
        species.sort_unstable();
        species.dedup();
        Self { species }
    }

    /// Fails on the first starter missing from `catalog`.
    pub fn check_against(&self, catalog: &SpeciesCatalog) -> LoadResult<()> {
        if let Some(missing) = self.species.iter().find(|id| !catalog.contains(**id)) {
            anyhow::bail!("Starter {} is not a known species", missing);
        }
        Ok(())
    }

    pub fn contains(&self, id: SpeciesId) -> bool {
        self.species.binary_search(&id).is_ok()
    }

    pub fn as_slice(&self) -> &[SpeciesId] {
        &self.species
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_species_cover_kanto() {
        let catalog = SpeciesCatalog::embedded().unwrap();
        assert_eq!(catalog.len(), 151);

        let bulbasaur = catalog.get(SpeciesId(1)).unwrap();
        assert_eq!(bulbasaur.name, "Bulbasaur");
        assert_eq!(bulbasaur.elements, [ElementType::Grass, ElementType::Poison]);
        assert_eq!(bulbasaur.base_stats, Stats::new(45, 49, 49, 45));
        assert_eq!(
            bulbasaur.sprite_url,
            "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/1.png"
        );
        assert_eq!(catalog.get(SpeciesId(150)).unwrap().rarity, Rarity::SSR);
    }

    #[test]
    fn every_rarity_has_species() {
        let catalog = SpeciesCatalog::embedded().unwrap();
        for rarity in Rarity::RAREST_FIRST {
            assert!(catalog.iter().any(|s| s.rarity == rarity), "{rarity}");
        }
    }

    #[test]
    fn explicit_sprite_wins_over_template() {
        let catalog = SpeciesCatalog::parse(
            r#"(
                sprite_template: "https://img/{id}.png",
                species: [
                    (id: 4, name: "Charmander", elements: [Fire], stats: (39, 52, 43, 65)),
                    (id: 7, name: "Squirtle", elements: [Water], stats: (44, 48, 65, 43), sprite: Some("local.png")),
                ],
            )"#,
        )
        .unwrap();
        assert_eq!(catalog.get(SpeciesId(4)).unwrap().sprite_url, "https://img/4.png");
        assert_eq!(catalog.get(SpeciesId(7)).unwrap().sprite_url, "local.png");
        assert_eq!(catalog.get(SpeciesId(4)).unwrap().rarity, Rarity::N);
    }

    #[test]
    fn rejects_zero_base_stat() {
        let err = SpeciesCatalog::parse(
            r#"(species: [(id: 1, name: "Blank", elements: [Normal], stats: (10, 0, 10, 10))])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("atk"));
    }

    #[test]
    fn in_range_is_inclusive() {
        let catalog = SpeciesCatalog::embedded().unwrap();
        let ids: Vec<_> = catalog.in_range(1, 3).map(|s| s.id.0).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[test]
    fn starters_exist_in_catalog() {
        let catalog = SpeciesCatalog::embedded().unwrap();
        let pool = StarterPool::embedded().unwrap();
        assert_eq!(pool.len(), 68);
        assert!(pool.contains(SpeciesId(25)));
        assert!(!pool.contains(SpeciesId(150)));
        pool.check_against(&catalog).unwrap();
    }
}
