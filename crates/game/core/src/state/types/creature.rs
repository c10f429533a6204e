use super::{ElementType, EntryId, Rarity, SpeciesId};
use crate::progression::Progress;
use crate::stats::Stats;

/// Species metadata supplied by the creature-data provider.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeciesData {
    pub id: SpeciesId,
    pub name: String,
    /// Primary element first.
    pub elements: Vec<ElementType>,
    pub base_stats: Stats,
    pub sprite_url: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
}

impl SpeciesData {
    /// The element used for matchups and move sets.
    pub fn primary_element(&self) -> ElementType {
        self.elements.first().copied().unwrap_or(ElementType::Normal)
    }
}

/// A creature owned by a player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryEntry {
    pub id: EntryId,
    pub species: SpeciesId,
    pub name: String,
    pub rarity: Rarity,
    pub level: u32,
    /// Experience towards the next level, `exp < level * exp_per_level`.
    pub exp: u32,
    pub stats: Stats,
    pub sprite_url: String,
    pub is_active: bool,
}

impl InventoryEntry {
    /// A fresh entry with the species' base stats and no experience.
    pub fn from_species(id: EntryId, species: &SpeciesData, level: u32, rarity: Rarity) -> Self {
        Self {
            id,
            species: species.id,
            name: species.name.clone(),
            rarity,
            level,
            exp: 0,
            stats: species.base_stats,
            sprite_url: species.sprite_url.clone(),
            is_active: false,
        }
    }

    pub fn progress(&self) -> Progress {
        Progress {
            level: self.level,
            exp: self.exp,
            stats: self.stats,
        }
    }

    pub fn apply_progress(&mut self, progress: &Progress) {
        self.level = progress.level;
        self.exp = progress.exp;
        self.stats = progress.stats;
    }

    /// Fraction of the way to the next level, in `[0, 1)`.
    pub fn exp_fraction(&self, exp_per_level: u32) -> f64 {
        let threshold = u64::from(self.level) * u64::from(exp_per_level);
        if threshold == 0 {
            return 0.0;
        }
        self.exp as f64 / threshold as f64
    }
}
