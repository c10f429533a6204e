//! Type effectiveness chart loader.

use std::collections::HashMap;
use std::path::Path;

use gacha_core::{ElementType, TypeChartOracle};

use crate::loaders::{LoadResult, read_file};

const EMBEDDED: &str = include_str!("../../data/type_chart.ron");

/// Sparse `(attack, defense) -> multiplier` table; unlisted pairs are neutral.
#[derive(Debug, Clone, Default)]
pub struct TypeChart {
    entries: HashMap<(ElementType, ElementType), f64>,
}

impl TypeChart {
    /// Load the chart from a RON list of `(attack, defense, multiplier)`.
    pub fn load(path: &Path) -> LoadResult<Self> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn embedded() -> LoadResult<Self> {
        Self::parse(EMBEDDED)
    }

    pub fn parse(content: &str) -> LoadResult<Self> {
        let rows: Vec<(ElementType, ElementType, f64)> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse type chart RON: {}", e))?;

        let mut entries = HashMap::with_capacity(rows.len());
        for (attack, defense, multiplier) in rows {
            if !multiplier.is_finite() || multiplier < 0.0 {
                anyhow::bail!("Invalid multiplier {} for {} -> {}", multiplier, attack, defense);
            }
            if entries.insert((attack, defense), multiplier).is_some() {
                anyhow::bail!("Duplicate type chart entry {} -> {}", attack, defense);
            }
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TypeChartOracle for TypeChart {
    fn multiplier(&self, attack: ElementType, defense: ElementType) -> f64 {
        self.entries.get(&(attack, defense)).copied().unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gacha_core::Effectiveness;

    #[test]
    fn embedded_chart_has_classic_matchups() {
        let chart = TypeChart::embedded().unwrap();
        assert_eq!(chart.multiplier(ElementType::Fire, ElementType::Grass), 2.0);
        assert_eq!(chart.multiplier(ElementType::Water, ElementType::Fire), 2.0);
        assert_eq!(chart.multiplier(ElementType::Grass, ElementType::Fire), 0.5);
        assert_eq!(
            chart.effectiveness(ElementType::Electric, ElementType::Water),
            Effectiveness::Super
        );
    }

    #[test]
    fn unlisted_pairs_are_neutral() {
        let chart = TypeChart::embedded().unwrap();
        assert_eq!(chart.multiplier(ElementType::Normal, ElementType::Fire), 1.0);
        assert_eq!(chart.multiplier(ElementType::Support, ElementType::Dragon), 1.0);
    }

    #[test]
    fn immunities_are_softened() {
        let chart = TypeChart::embedded().unwrap();
        assert_eq!(chart.multiplier(ElementType::Electric, ElementType::Ground), 0.5);
        assert_eq!(chart.multiplier(ElementType::Normal, ElementType::Ghost), 0.5);
    }

    #[test]
    fn rejects_duplicates_and_negative_values() {
        assert!(TypeChart::parse("[(Fire, Grass, 2.0), (Fire, Grass, 0.5)]").is_err());
        assert!(TypeChart::parse("[(Fire, Grass, -1.0)]").is_err());
    }
}
