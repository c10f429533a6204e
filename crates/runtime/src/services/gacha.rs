//! Pack pulls.

use gacha_content::GachaPack;
use gacha_core::{InventoryEntry, pick_from_pool};

use crate::api::{Result, RuntimeError};
use crate::events::{Acquisition, EconomyEvent};
use crate::repository::PlayerId;

use super::ServiceContext;

pub struct GachaService<'a> {
    pub(crate) ctx: &'a ServiceContext,
}

impl<'a> GachaService<'a> {
    pub fn packs(&self) -> impl Iterator<Item = &'a GachaPack> + 'a {
        self.ctx.oracles.packs()
    }

    /// Buys one creature from `pack_id`.
    ///
    /// The rarity roll, pool pick and species lookup all happen before any
    /// coins move; a failure in any of them charges nothing. The coin check
    /// is repeated inside the transaction.
    pub async fn pull(&self, player: &PlayerId, pack_id: &str) -> Result<InventoryEntry> {
        let pack = self
            .ctx
            .oracles
            .pack(pack_id)
            .ok_or_else(|| RuntimeError::UnknownPack(pack_id.to_owned()))?;
        let cost = pack.cost;

        let record = self.ctx.repo.require(player)?;
        ensure_coins(record.profile.coins, cost)?;

        let mut rng = self.ctx.rng.fork()?;
        let rarity = pack.rates.roll(&mut rng);
        let species_id = pick_from_pool(pack.pool(rarity), rarity, &mut rng)?;
        let species = self.ctx.species(species_id).await?;

        let (entry, record) = self.ctx.repo.transact(player, |record| {
            ensure_coins(record.profile.coins, cost)?;
            record.profile.coins -= cost;
            Ok(record.add_creature(&species, 1, rarity))
        })?;

        tracing::info!(
            player = %player,
            pack = %pack.id,
            species = %entry.name,
            %rarity,
            "pack pulled"
        );
        self.ctx.events.publish(EconomyEvent::CoinsSpent {
            player: player.clone(),
            amount: cost,
            remaining: record.profile.coins,
        });
        self.ctx.events.publish(EconomyEvent::CreatureObtained {
            player: player.clone(),
            entry: entry.id,
            species: entry.species,
            rarity,
            source: Acquisition::Pack(pack.id.clone()),
        });
        Ok(entry)
    }
}

fn ensure_coins(available: u64, required: u64) -> Result<()> {
    if available < required {
        return Err(RuntimeError::InsufficientCoins {
            required,
            available,
        });
    }
    Ok(())
}
