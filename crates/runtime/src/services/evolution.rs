//! Evolution options and the evolve transaction.

use gacha_core::{
    EntryId, EvolutionCost, EvolutionError, EvolutionRule, InventoryEntry, OracleError, SpeciesData,
    SpeciesId, check_affordable, check_eligibility, evolution_cost, find_rule, scale_stats,
};

use crate::api::{Result, RuntimeError};
use crate::events::EconomyEvent;
use crate::repository::PlayerId;

use super::ServiceContext;

/// One evolution the entry could take.
#[derive(Debug, Clone)]
pub struct EvolutionOption {
    pub rule: EvolutionRule,
    pub target: SpeciesData,
    pub cost: EvolutionCost,
    /// The entry has reached the required level.
    pub eligible: bool,
    /// The player holds both currencies.
    pub affordable: bool,
}

#[derive(Debug, Clone)]
pub struct Evolved {
    pub entry: InventoryEntry,
    pub from: SpeciesId,
    pub cost: EvolutionCost,
}

pub struct EvolutionService<'a> {
    pub(crate) ctx: &'a ServiceContext,
}

impl EvolutionService<'_> {
    /// Every evolution leaving the entry's species; empty for final forms.
    pub async fn options(
        &self,
        player: &PlayerId,
        entry: EntryId,
    ) -> Result<Vec<EvolutionOption>> {
        let record = self.ctx.repo.require(player)?;
        let current = record.entry(entry).ok_or(RuntimeError::EntryNotFound(entry))?;
        let wallet = record.profile.wallet();
        let economy = &self.ctx.oracles.config().economy;
        let rules = self.ctx.oracles.env().evolutions()?.evolutions(current.species);

        let mut options = Vec::with_capacity(rules.len());
        for rule in rules {
            let target = self.ctx.species(rule.to).await?;
            let cost = evolution_cost(target.rarity, economy);
            options.push(EvolutionOption {
                rule,
                eligible: check_eligibility(current.level, &rule).is_ok(),
                affordable: check_affordable(cost, wallet).is_ok(),
                target,
                cost,
            });
        }
        Ok(options)
    }

    /// Evolves `entry` into `target`, or into the first listed evolution
    /// when no target is given.
    ///
    /// Level and currency are checked again inside the transaction. Level,
    /// experience and the active flag carry over; stats are rescaled by the
    /// ratio of the two species' base stats.
    pub async fn evolve(
        &self,
        player: &PlayerId,
        entry: EntryId,
        target: Option<SpeciesId>,
    ) -> Result<Evolved> {
        let record = self.ctx.repo.require(player)?;
        let current = record.entry(entry).ok_or(RuntimeError::EntryNotFound(entry))?;
        let from = current.species;

        let line = self.ctx.oracles.env().evolution_line(from)?;
        let rule = match target {
            Some(to) => find_rule(&line, from, to)?,
            None => line
                .first()
                .copied()
                .ok_or(OracleError::NoEvolutionLine(from))?,
        };
        check_eligibility(current.level, &rule)?;

        let old = self.ctx.species(from).await?;
        let new = self.ctx.species(rule.to).await?;
        let cost = evolution_cost(new.rarity, &self.ctx.oracles.config().economy);

        let (evolved, record) = self.ctx.repo.transact(player, |record| {
            let mut wallet = record.profile.wallet();
            let creature = record
                .entry_mut(entry)
                .ok_or(RuntimeError::EntryNotFound(entry))?;
            if creature.species != rule.from {
                return Err(EvolutionError::NotInLine {
                    from: creature.species,
                    to: rule.to,
                }
                .into());
            }
            check_eligibility(creature.level, &rule)?;
            wallet.pay(cost)?;

            creature.stats = scale_stats(&creature.stats, &old.base_stats, &new.base_stats);
            creature.species = new.id;
            creature.name = new.name.clone();
            creature.sprite_url = new.sprite_url.clone();
            creature.rarity = new.rarity;
            let evolved = creature.clone();
            record.profile.set_wallet(wallet);
            Ok(evolved)
        })?;

        tracing::info!(
            player = %player,
            entry = %entry,
            from = %old.name,
            to = %new.name,
            coins = cost.coins,
            scale = cost.scale,
            "creature evolved"
        );
        self.ctx.events.publish(EconomyEvent::CoinsSpent {
            player: player.clone(),
            amount: cost.coins,
            remaining: record.profile.coins,
        });
        self.ctx.events.publish(EconomyEvent::Evolved {
            player: player.clone(),
            entry,
            from,
            to: new.id,
        });

        Ok(Evolved {
            entry: evolved,
            from,
            cost,
        })
    }
}
