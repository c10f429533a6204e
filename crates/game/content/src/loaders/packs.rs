//! Gacha pack loader.
//!
//! A pack file only names a dex range; the per-rarity pools are derived from
//! the species catalog so a species' rarity is defined in exactly one place.

use std::collections::BTreeMap;
use std::path::Path;

use gacha_core::{Rarity, RarityRates, SpeciesId};
use serde::Deserialize;

use crate::loaders::{LoadResult, SpeciesCatalog, read_file};

const EMBEDDED: &str = include_str!("../../data/packs.ron");

#[derive(Debug, Clone, Deserialize)]
struct PackRecord {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    cost: u64,
    rates: RarityRates,
    /// Inclusive dex range.
    dex: (u32, u32),
}

/// A purchasable pack with its pools resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct GachaPack {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cost: u64,
    pub rates: RarityRates,
    pools: BTreeMap<Rarity, Vec<SpeciesId>>,
}

impl GachaPack {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        cost: u64,
        rates: RarityRates,
        pools: impl IntoIterator<Item = (Rarity, Vec<SpeciesId>)>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            cost,
            rates,
            pools: pools.into_iter().collect(),
        }
    }

    /// Species of `rarity`, empty when the pack has none.
    pub fn pool(&self, rarity: Rarity) -> &[SpeciesId] {
        self.pools.get(&rarity).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total_species(&self) -> usize {
        self.pools.values().map(Vec::len).sum()
    }
}

/// All packs keyed by id.
#[derive(Debug, Clone, Default)]
pub struct PackCatalog {
    packs: BTreeMap<String, GachaPack>,
}

impl PackCatalog {
    pub fn load(path: &Path, species: &SpeciesCatalog) -> LoadResult<Self> {
        let content = read_file(path)?;
        Self::parse(&content, species)
    }

    pub fn embedded(species: &SpeciesCatalog) -> LoadResult<Self> {
        Self::parse(EMBEDDED, species)
    }

    pub fn parse(content: &str, species: &SpeciesCatalog) -> LoadResult<Self> {
        let records: Vec<PackRecord> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse packs RON: {}", e))?;

        let mut packs = BTreeMap::new();
        for record in records {
            record
                .rates
                .validate()
                .map_err(|e| anyhow::anyhow!("Invalid rates for pack '{}': {}", record.id, e))?;
            let (first, last) = record.dex;
            if first > last {
                anyhow::bail!("Pack '{}' has an inverted dex range", record.id);
            }

            let mut pools: BTreeMap<Rarity, Vec<SpeciesId>> = BTreeMap::new();
            for data in species.in_range(first, last) {
                pools.entry(data.rarity).or_default().push(data.id);
            }
            if pools.is_empty() {
                tracing::warn!(pack = %record.id, "pack has no species in range");
            }

            let pack = GachaPack {
                id: record.id.clone(),
                name: record.name,
                description: record.description,
                cost: record.cost,
                rates: record.rates,
                pools,
            };
            if packs.insert(record.id.clone(), pack).is_some() {
                anyhow::bail!("Duplicate pack '{}'", record.id);
            }
        }
        Ok(Self { packs })
    }

    pub fn from_packs(packs: impl IntoIterator<Item = GachaPack>) -> Self {
        Self {
            packs: packs.into_iter().map(|pack| (pack.id.clone(), pack)).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&GachaPack> {
        self.packs.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GachaPack> {
        self.packs.values()
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kanto_pack_pools_follow_species_rarity() {
        let species = SpeciesCatalog::embedded().unwrap();
        let packs = PackCatalog::embedded(&species).unwrap();
        let kanto = packs.get("kanto").unwrap();

        assert_eq!(kanto.name, "Kanto Region (Gen 1)");
        assert_eq!(kanto.cost, 500);
        assert_eq!(kanto.rates.ssr, 0.001);
        assert_eq!(kanto.total_species(), 151);
        assert!(kanto.pool(Rarity::SSR).contains(&SpeciesId(150)));
        assert!(kanto.pool(Rarity::N).contains(&SpeciesId(1)));
        for rarity in Rarity::RAREST_FIRST {
            for id in kanto.pool(rarity) {
                assert_eq!(species.get(*id).unwrap().rarity, rarity);
            }
        }
    }

    #[test]
    fn narrow_range_leaves_pools_empty() {
        let species = SpeciesCatalog::embedded().unwrap();
        let packs = PackCatalog::parse(
            r#"[(id: "starters", name: "Starters", cost: 100,
                 rates: (ssr: 0.0, sr: 0.5, r: 0.5, n: 0.0), dex: (1, 3))]"#,
            &species,
        )
        .unwrap();
        let pack = packs.get("starters").unwrap();
        assert!(pack.pool(Rarity::SSR).is_empty());
        assert_eq!(pack.pool(Rarity::N), [SpeciesId(1)]);
    }

    #[test]
    fn rejects_negative_rate() {
        let species = SpeciesCatalog::embedded().unwrap();
        let err = PackCatalog::parse(
            r#"[(id: "bad", name: "Bad", cost: 1,
                 rates: (ssr: -0.1, sr: 0.0, r: 0.0, n: 1.0), dex: (1, 151))]"#,
            &species,
        )
        .unwrap_err();
        assert!(err.to_string().contains("bad"));
    }
}
