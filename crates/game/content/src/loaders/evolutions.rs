//! Evolution line loader.

use std::collections::HashMap;
use std::path::Path;

use gacha_core::{EvolutionOracle, EvolutionRule, SpeciesId};

use crate::loaders::{LoadResult, SpeciesCatalog, read_file};

const EMBEDDED: &str = include_str!("../../data/evolutions.ron");

/// Evolution rules grouped by the species they start from.
#[derive(Debug, Clone, Default)]
pub struct EvolutionTable {
    lines: HashMap<SpeciesId, Vec<EvolutionRule>>,
}

impl EvolutionTable {
    pub fn load(path: &Path) -> LoadResult<Self> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn embedded() -> LoadResult<Self> {
        Self::parse(EMBEDDED)
    }

    pub fn parse(content: &str) -> LoadResult<Self> {
        let rules: Vec<EvolutionRule> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse evolutions RON: {}", e))?;
        Self::from_rules(rules)
    }

    pub fn from_rules(rules: impl IntoIterator<Item = EvolutionRule>) -> LoadResult<Self> {
        let mut lines: HashMap<SpeciesId, Vec<EvolutionRule>> = HashMap::new();
        for rule in rules {
            if rule.from == rule.to {
                anyhow::bail!("Species {} cannot evolve into itself", rule.from);
            }
            if rule.required_level == 0 {
                anyhow::bail!("Evolution {} -> {} requires level 0", rule.from, rule.to);
            }
            let line = lines.entry(rule.from).or_default();
            if line.iter().any(|existing| existing.to == rule.to) {
                anyhow::bail!("Duplicate evolution {} -> {}", rule.from, rule.to);
            }
            line.push(rule);
        }
        Ok(Self { lines })
    }

    /// Fails on the first rule naming a species missing from `catalog`.
    pub fn check_against(&self, catalog: &SpeciesCatalog) -> LoadResult<()> {
        for rule in self.lines.values().flatten() {
            for id in [rule.from, rule.to] {
                if !catalog.contains(id) {
                    anyhow::bail!(
                        "Evolution {} -> {} names unknown species {}",
                        rule.from,
                        rule.to,
                        id
                    );
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lines.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl EvolutionOracle for EvolutionTable {
    fn evolutions(&self, species: SpeciesId) -> Vec<EvolutionRule> {
        self.lines.get(&species).cloned().unwrap_or_default()
    }
}
