//! Energy regeneration and spending.

use chrono::{DateTime, Duration, Utc};

use gacha_core::EconomyRules;

use crate::api::{Result, RuntimeError};
use crate::repository::{PlayerId, Profile};

use super::ServiceContext;

/// Energy after regeneration, with the time the next point arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnergyStatus {
    pub energy: u32,
    pub max: u32,
    /// `None` when the bar is full.
    pub next_point_at: Option<DateTime<Utc>>,
}

/// Credits one point per whole regeneration interval since the last update.
///
/// A missing timestamp is stamped with `now`. A full bar also restamps, so
/// time spent full never banks energy. Otherwise the timestamp advances by
/// the whole intervals consumed, keeping the partial interval. Returns the
/// points gained.
pub fn regenerate_energy(profile: &mut Profile, now: DateTime<Utc>, rules: &EconomyRules) -> u32 {
    let Some(last) = profile.last_energy_update else {
        profile.last_energy_update = Some(now);
        return 0;
    };
    if profile.energy >= rules.max_energy {
        profile.last_energy_update = Some(now);
        return 0;
    }

    let interval = i64::from(rules.energy_regen_minutes.max(1));
    let intervals = (now - last).num_minutes().max(0) / interval;
    if intervals == 0 {
        return 0;
    }

    let missing = rules.max_energy - profile.energy;
    let gained = u32::try_from(intervals).unwrap_or(u32::MAX).min(missing);
    profile.energy += gained;
    profile.last_energy_update = Some(last + Duration::minutes(intervals * interval));
    gained
}

/// Deducts `amount` or fails without change.
pub fn spend_energy(profile: &mut Profile, amount: u32) -> Result<()> {
    if profile.energy < amount {
        return Err(RuntimeError::InsufficientEnergy {
            required: amount,
            available: profile.energy,
        });
    }
    profile.energy -= amount;
    Ok(())
}

fn status(profile: &Profile, rules: &EconomyRules) -> EnergyStatus {
    let next_point_at = if profile.energy < rules.max_energy {
        profile
            .last_energy_update
            .map(|last| last + Duration::minutes(i64::from(rules.energy_regen_minutes)))
    } else {
        None
    };
    EnergyStatus {
        energy: profile.energy,
        max: rules.max_energy,
        next_point_at,
    }
}

/// Energy operations against the player repository.
pub struct EnergyService<'a> {
    pub(crate) ctx: &'a ServiceContext,
}

impl EnergyService<'_> {
    /// Applies regeneration, persists it and reports the bar.
    pub fn refresh(&self, player: &PlayerId) -> Result<EnergyStatus> {
        let rules = &self.ctx.oracles.config().economy;
        let now = self.ctx.clock.now();
        let (gained, record) = self.ctx.repo.transact(player, |record| {
            Ok(regenerate_energy(&mut record.profile, now, rules))
        })?;
        if gained > 0 {
            tracing::debug!(
                player = %player,
                gained,
                energy = record.profile.energy,
                "energy regenerated"
            );
        }
        Ok(status(&record.profile, rules))
    }
}
