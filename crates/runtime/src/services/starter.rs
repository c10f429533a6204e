//! Starter selection for new players.

use gacha_core::{InventoryEntry, RngOracle, SpeciesData, SpeciesId};

use crate::api::{Result, RuntimeError};
use crate::events::{Acquisition, EconomyEvent};
use crate::oracle::SeededRng;
use crate::repository::{PlayerId, PlayerRecord};

use super::ServiceContext;

/// Candidates currently on offer.
#[derive(Debug, Clone)]
pub struct StarterOffer {
    pub candidates: Vec<SpeciesData>,
    pub rerolls_left: u32,
}

pub struct StarterService<'a> {
    pub(crate) ctx: &'a ServiceContext,
}

impl StarterService<'_> {
    /// Draws a fresh set of distinct candidates without spending a reroll.
    pub async fn offer(&self, player: &PlayerId) -> Result<StarterOffer> {
        let record = self.ctx.repo.require(player)?;
        ensure_no_starter(&record)?;
        let candidates = self.draw().await?;
        Ok(StarterOffer {
            candidates,
            rerolls_left: record.profile.reroll_count,
        })
    }

    /// Spends one reroll and draws again.
    pub async fn reroll(&self, player: &PlayerId) -> Result<StarterOffer> {
        let (rerolls_left, _) = self.ctx.repo.transact(player, |record| {
            ensure_no_starter(record)?;
            if record.profile.reroll_count == 0 {
                return Err(RuntimeError::NoRerollsLeft);
            }
            record.profile.reroll_count -= 1;
            Ok(record.profile.reroll_count)
        })?;
        tracing::debug!(player = %player, rerolls_left, "starter rerolled");

        let candidates = self.draw().await?;
        Ok(StarterOffer {
            candidates,
            rerolls_left,
        })
    }

    /// Adds `species` as the player's first creature and makes it active.
    pub async fn choose(&self, player: &PlayerId, species: SpeciesId) -> Result<InventoryEntry> {
        if !self.ctx.oracles.starters().contains(species) {
            return Err(RuntimeError::NotAStarter(species));
        }
        let data = self.ctx.species(species).await?;
        let rules = &self.ctx.oracles.config().economy;

        let (entry, _) = self.ctx.repo.transact(player, |record| {
            ensure_no_starter(record)?;
            let entry = record.add_creature(&data, rules.starter_level, rules.starter_rarity);
            record.set_active(entry.id);
            Ok(InventoryEntry {
                is_active: true,
                ..entry
            })
        })?;

        tracing::info!(player = %player, species = %entry.name, "starter chosen");
        self.ctx.events.publish(EconomyEvent::CreatureObtained {
            player: player.clone(),
            entry: entry.id,
            species: entry.species,
            rarity: entry.rarity,
            source: Acquisition::Starter,
        });
        Ok(entry)
    }

    async fn draw(&self) -> Result<Vec<SpeciesData>> {
        let count = self.ctx.oracles.config().economy.starter_candidates;
        let mut rng = self.ctx.rng.fork()?;
        let picks = sample_distinct(self.ctx.oracles.starters().as_slice(), count, &mut rng)?;

        let mut candidates = Vec::with_capacity(picks.len());
        for id in picks {
            candidates.push(self.ctx.species(id).await?);
        }
        Ok(candidates)
    }
}

fn ensure_no_starter(record: &PlayerRecord) -> Result<()> {
    if !record.inventory.is_empty() {
        return Err(RuntimeError::StarterAlreadyChosen);
    }
    Ok(())
}

/// Partial Fisher-Yates: the first `count` positions of a shuffled copy.
fn sample_distinct(
    pool: &[SpeciesId],
    count: usize,
    rng: &mut SeededRng,
) -> Result<Vec<SpeciesId>> {
    if pool.len() < count {
        return Err(RuntimeError::StarterPoolTooSmall { required: count });
    }
    if count == 0 {
        return Ok(Vec::new());
    }
    let mut shuffled = pool.to_vec();
    let last = u32::try_from(shuffled.len() - 1).unwrap_or(u32::MAX);
    for i in 0..count {
        let j = rng.range(i as u32, last) as usize;
        shuffled.swap(i, j);
    }
    shuffled.truncate(count);
    Ok(shuffled)
}
