//! Persisted player state.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gacha_core::{EconomyRules, EntryId, InventoryEntry, Rarity, SpeciesData, Wallet};

use super::RepositoryError;

/// Stable player identifier, also used as the save file name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    const MAX_LEN: usize = 64;

    pub fn new(id: impl Into<String>) -> Result<Self, RepositoryError> {
        let id = id.into();
        let valid = !id.is_empty()
            && id.len() <= Self::MAX_LEN
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(RepositoryError::InvalidId(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PlayerId {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Currencies, energy and starter state of one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: PlayerId,
    pub display_name: String,
    pub coins: u64,
    pub scale: u64,
    pub energy: u32,
    /// `None` until the first regeneration check stamps it.
    pub last_energy_update: Option<DateTime<Utc>>,
    pub reroll_count: u32,
}

impl Profile {
    pub fn new(id: PlayerId, display_name: impl Into<String>, rules: &EconomyRules) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            coins: rules.starting_coins,
            scale: 0,
            energy: rules.max_energy,
            last_energy_update: None,
            reroll_count: rules.starting_rerolls,
        }
    }

    pub fn wallet(&self) -> Wallet {
        Wallet {
            coins: self.coins,
            scale: self.scale,
        }
    }

    pub fn set_wallet(&mut self, wallet: Wallet) {
        self.coins = wallet.coins;
        self.scale = wallet.scale;
    }
}

/// Everything persisted for one player; the unit of a repository transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub profile: Profile,
    pub inventory: Vec<InventoryEntry>,
    pub next_entry_id: u64,
}

impl PlayerRecord {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            inventory: Vec::new(),
            next_entry_id: 1,
        }
    }

    pub fn id(&self) -> &PlayerId {
        &self.profile.id
    }

    /// Adds a fresh entry for `species` and returns a copy of it.
    pub fn add_creature(
        &mut self,
        species: &SpeciesData,
        level: u32,
        rarity: Rarity,
    ) -> InventoryEntry {
        let id = EntryId(self.next_entry_id);
        self.next_entry_id += 1;
        let entry = InventoryEntry::from_species(id, species, level, rarity);
        self.inventory.push(entry.clone());
        entry
    }

    pub fn entry(&self, id: EntryId) -> Option<&InventoryEntry> {
        self.inventory.iter().find(|entry| entry.id == id)
    }

    pub fn entry_mut(&mut self, id: EntryId) -> Option<&mut InventoryEntry> {
        self.inventory.iter_mut().find(|entry| entry.id == id)
    }

    pub fn active(&self) -> Option<&InventoryEntry> {
        self.inventory.iter().find(|entry| entry.is_active)
    }

    /// The active creature, else the highest level one (newest on ties).
    pub fn battle_candidate(&self) -> Option<&InventoryEntry> {
        self.active().or_else(|| {
            self.inventory
                .iter()
                .max_by_key(|entry| (entry.level, entry.id))
        })
    }

    /// Marks `id` active and clears the flag everywhere else.
    pub fn set_active(&mut self, id: EntryId) -> bool {
        if self.entry(id).is_none() {
            return false;
        }
        for entry in &mut self.inventory {
            entry.is_active = entry.id == id;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gacha_core::{ElementType, SpeciesId, Stats};

    fn species(id: u32) -> SpeciesData {
        SpeciesData {
            id: SpeciesId(id),
            name: format!("Species {id}"),
            elements: vec![ElementType::Normal],
            base_stats: Stats::new(40, 40, 40, 40),
            sprite_url: String::new(),
            rarity: Rarity::N,
        }
    }

    fn record() -> PlayerRecord {
        let id = PlayerId::new("ash").unwrap();
        PlayerRecord::new(Profile::new(id, "Ash", &EconomyRules::default()))
    }

    #[test]
    fn new_profile_uses_starting_values() {
        let profile = record().profile;
        assert_eq!(profile.coins, 1000);
        assert_eq!(profile.scale, 0);
        assert_eq!(profile.energy, 50);
        assert_eq!(profile.reroll_count, 3);
        assert!(profile.last_energy_update.is_none());
    }

    #[test]
    fn player_id_rejects_path_characters() {
        assert!(PlayerId::new("../etc").is_err());
        assert!(PlayerId::new("").is_err());
        assert!(PlayerId::new("a".repeat(65)).is_err());
        assert!(PlayerId::new("red_1-b").is_ok());
    }

    #[test]
    fn entry_ids_increase() {
        let mut record = record();
        let first = record.add_creature(&species(1), 1, Rarity::N);
        let second = record.add_creature(&species(4), 1, Rarity::R);
        assert_eq!(first.id, EntryId(1));
        assert_eq!(second.id, EntryId(2));
        assert_eq!(record.next_entry_id, 3);
    }

    #[test]
    fn battle_candidate_prefers_active_then_level() {
        let mut record = record();
        let low = record.add_creature(&species(1), 3, Rarity::N);
        let high = record.add_creature(&species(4), 9, Rarity::N);
        assert_eq!(record.battle_candidate().unwrap().id, high.id);

        assert!(record.set_active(low.id));
        assert_eq!(record.battle_candidate().unwrap().id, low.id);
        assert_eq!(record.inventory.iter().filter(|e| e.is_active).count(), 1);
    }

    #[test]
    fn set_active_ignores_unknown_entry() {
        let mut record = record();
        record.add_creature(&species(1), 3, Rarity::N);
        assert!(!record.set_active(EntryId(42)));
        assert!(record.active().is_none());
    }
}
