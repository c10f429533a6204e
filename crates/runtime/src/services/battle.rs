//! Wild battles: encounter setup, the turn loop and settlement.

use gacha_core::{
    Battle, BattleResult, Combatant, EntryId, RngOracle, Side, SpeciesId, apply_victory,
    wild_level, wild_stats,
};

use crate::api::{MoveProvider, Result, RuntimeError};
use crate::events::{BattleEvent, BattleOutcome, EconomyEvent};
use crate::repository::PlayerId;

use super::ServiceContext;
use super::energy::{regenerate_energy, spend_energy};

/// A battle that has been paid for and is ready to run.
#[derive(Debug, Clone)]
pub struct Encounter {
    pub player: PlayerId,
    pub entry: EntryId,
    pub enemy_species: SpeciesId,
    pub enemy_level: u32,
    pub battle: Battle,
    pub energy_left: u32,
}

#[derive(Debug, Clone)]
pub struct BattleSummary {
    pub entry: EntryId,
    pub enemy: String,
    pub enemy_level: u32,
    pub outcome: BattleOutcome,
    pub rounds: u32,
    /// One rendered line per turn.
    pub log: Vec<String>,
}

impl BattleSummary {
    pub fn result(&self) -> Option<&BattleResult> {
        match &self.outcome {
            BattleOutcome::Victory(result) => Some(result),
            _ => None,
        }
    }
}

pub struct BattleService<'a> {
    pub(crate) ctx: &'a ServiceContext,
}

impl BattleService<'_> {
    /// Begins a battle, runs it to the end and settles it.
    pub async fn run(
        &self,
        player: &PlayerId,
        player_moves: &dyn MoveProvider,
    ) -> Result<BattleSummary> {
        let mut encounter = self.begin(player).await?;
        self.fight(&mut encounter, player_moves).await
    }

    /// Builds both combatants and charges the energy cost.
    ///
    /// The fighter is the active creature, else the highest level one. The
    /// enemy species is drawn uniformly from the species table. Energy is
    /// regenerated and spent in one transaction after everything else has
    /// been resolved, so a failed setup costs nothing.
    pub async fn begin(&self, player: &PlayerId) -> Result<Encounter> {
        let record = self.ctx.repo.require(player)?;
        let fighter = record
            .battle_candidate()
            .cloned()
            .ok_or(RuntimeError::NoCreatures)?;

        let config = self.ctx.oracles.config();
        let env = self.ctx.oracles.env();
        let mut rng = self.ctx.rng.fork()?;

        let ids = self.ctx.oracles.species().ids();
        if ids.is_empty() {
            return Err(RuntimeError::Internal("species table is empty"));
        }
        let last = u32::try_from(ids.len() - 1).unwrap_or(u32::MAX);
        let enemy_id = ids[(rng.range(0, last) as usize).min(ids.len() - 1)];

        let own = self.ctx.species(fighter.species).await?;
        let wild = self.ctx.species(enemy_id).await?;
        let enemy_level = wild_level(fighter.level, &mut rng, &config.encounter);

        let own_element = own.primary_element();
        let wild_element = wild.primary_element();
        let player_side =
            Combatant::from_entry(&fighter, own_element, env.move_set(own_element)?)?;
        let enemy_side = Combatant::new(
            wild.name.clone(),
            enemy_level,
            wild_element,
            wild_stats(&wild.base_stats, enemy_level),
            env.move_set(wild_element)?,
        )?;
        let battle = Battle::new(player_side, enemy_side, config.battle.cooldown_policy);

        let cost = config.economy.battle_energy_cost;
        let now = self.ctx.clock.now();
        let (energy_left, _) = self.ctx.repo.transact(player, |record| {
            regenerate_energy(&mut record.profile, now, &config.economy);
            spend_energy(&mut record.profile, cost)?;
            Ok(record.profile.energy)
        })?;

        tracing::info!(
            player = %player,
            fighter = %fighter.name,
            level = fighter.level,
            enemy = %wild.name,
            enemy_level,
            "battle started"
        );
        self.ctx.events.publish(EconomyEvent::EnergySpent {
            player: player.clone(),
            amount: cost,
            remaining: energy_left,
        });
        self.ctx.events.publish(BattleEvent::Started {
            player: player.clone(),
            entry: fighter.id,
            enemy: wild.id,
            enemy_level,
        });

        Ok(Encounter {
            player: player.clone(),
            entry: fighter.id,
            enemy_species: wild.id,
            enemy_level,
            battle,
            energy_left,
        })
    }

    /// Drives turns until a side falls or the round limit passes, then
    /// settles the outcome.
    pub async fn fight(
        &self,
        encounter: &mut Encounter,
        player_moves: &dyn MoveProvider,
    ) -> Result<BattleSummary> {
        let log = self.drive(encounter, player_moves).await?;
        self.settle(encounter, log)
    }

    async fn drive(
        &self,
        encounter: &mut Encounter,
        player_moves: &dyn MoveProvider,
    ) -> Result<Vec<String>> {
        let env = self.ctx.oracles.env();
        let mut rng = self.ctx.rng.fork()?;
        let limit = self.ctx.config.round_limit;
        let mut log = Vec::new();

        while !encounter.battle.is_over() && encounter.battle.round() <= limit {
            let side = encounter.battle.to_act();
            let provider = match side {
                Side::Player => player_moves,
                Side::Enemy => self.ctx.enemy_moves.as_ref(),
            };
            let slot = provider.choose_move(&encounter.battle, side).await?;
            let report = encounter.battle.act(slot, &mut rng, &env)?;
            let message = report.outcome.describe();
            tracing::debug!(round = report.round, %side, "{message}");

            self.ctx.events.publish(BattleEvent::Turn {
                player: encounter.player.clone(),
                report,
                message: message.clone(),
            });
            log.push(message);
        }
        Ok(log)
    }

    /// Victory settles rewards and progression in one transaction. Defeats
    /// and stalemates change nothing.
    fn settle(&self, encounter: &Encounter, log: Vec<String>) -> Result<BattleSummary> {
        let battle = &encounter.battle;
        let outcome = match battle.winner() {
            Some(Side::Player) => BattleOutcome::Victory(self.reward(encounter)?),
            Some(Side::Enemy) => BattleOutcome::Defeat,
            None => BattleOutcome::Stalemate,
        };
        // the round counter has already moved past an unfinished last round
        let rounds = if battle.is_over() {
            battle.round()
        } else {
            battle.round().saturating_sub(1)
        };

        tracing::info!(player = %encounter.player, ?outcome, rounds, "battle finished");
        self.ctx.events.publish(BattleEvent::Finished {
            player: encounter.player.clone(),
            outcome,
            rounds,
        });

        Ok(BattleSummary {
            entry: encounter.entry,
            enemy: battle.enemy().name().to_owned(),
            enemy_level: encounter.enemy_level,
            outcome,
            rounds,
            log,
        })
    }

    fn reward(&self, encounter: &Encounter) -> Result<BattleResult> {
        let rules = &self.ctx.oracles.config().progression;
        let mut rng = self.ctx.rng.fork()?;
        let (result, _) = self.ctx.repo.transact(&encounter.player, |record| {
            let entry = record
                .entry_mut(encounter.entry)
                .ok_or(RuntimeError::EntryNotFound(encounter.entry))?;
            let settlement =
                apply_victory(&entry.progress(), encounter.enemy_level, &mut rng, rules)?;
            entry.apply_progress(&settlement.progress);

            let result = settlement.result;
            record.profile.coins = record.profile.coins.saturating_add(result.coin_gained);
            record.profile.scale = record.profile.scale.saturating_add(result.scale_dropped);
            Ok(result)
        })?;

        if result.leveled_up {
            tracing::info!(
                player = %encounter.player,
                entry = %encounter.entry,
                from = result.old_level,
                to = result.new_level,
                "creature leveled up"
            );
        }
        self.ctx.events.publish(EconomyEvent::RewardsGranted {
            player: encounter.player.clone(),
            entry: encounter.entry,
            result,
        });
        Ok(result)
    }
}
