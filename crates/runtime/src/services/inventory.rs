//! Inventory queries and the active creature.

use gacha_core::{EntryId, InventoryEntry, Rarity, exp_to_next_level};

use crate::api::{Result, RuntimeError};
use crate::repository::PlayerId;

use super::ServiceContext;

/// Experience towards the next level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryProgress {
    pub level: u32,
    pub exp: u32,
    pub next_level_exp: u64,
    /// `exp / next_level_exp`, in `[0, 1)`.
    pub fraction: f64,
}

pub struct InventoryService<'a> {
    pub(crate) ctx: &'a ServiceContext,
}

impl InventoryService<'_> {
    /// Entries newest first, optionally limited to one rarity.
    pub fn list(&self, player: &PlayerId, rarity: Option<Rarity>) -> Result<Vec<InventoryEntry>> {
        let record = self.ctx.repo.require(player)?;
        let mut entries: Vec<_> = record
            .inventory
            .into_iter()
            .filter(|entry| rarity.is_none_or(|rarity| entry.rarity == rarity))
            .collect();
        entries.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(entries)
    }

    pub fn get(&self, player: &PlayerId, entry: EntryId) -> Result<InventoryEntry> {
        let record = self.ctx.repo.require(player)?;
        record
            .entry(entry)
            .cloned()
            .ok_or(RuntimeError::EntryNotFound(entry))
    }

    /// Makes `entry` the creature that fights; at most one is active.
    pub fn set_active(&self, player: &PlayerId, entry: EntryId) -> Result<InventoryEntry> {
        let (active, _) = self.ctx.repo.transact(player, |record| {
            if !record.set_active(entry) {
                return Err(RuntimeError::EntryNotFound(entry));
            }
            record
                .entry(entry)
                .cloned()
                .ok_or(RuntimeError::EntryNotFound(entry))
        })?;
        tracing::debug!(player = %player, entry = %entry, "active creature changed");
        Ok(active)
    }

    pub fn progress(&self, player: &PlayerId, entry: EntryId) -> Result<EntryProgress> {
        let current = self.get(player, entry)?;
        let rules = &self.ctx.oracles.config().progression;
        Ok(EntryProgress {
            level: current.level,
            exp: current.exp,
            next_level_exp: exp_to_next_level(current.level, rules),
            fraction: current.exp_fraction(rules.exp_per_level),
        })
    }
}
