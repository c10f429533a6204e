//! Asynchronous abstraction for choosing moves in a battle.
//!
//! The battle driver asks a [`MoveProvider`] for a slot whenever a side is
//! due to act, so battles can run with human input, scripted fixtures or AI
//! policies on either side.
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use gacha_core::{Battle, RngOracle, Side};

use super::errors::{Result, RuntimeError};
use crate::oracle::{OracleManager, SeededRng};

/// Trait for choosing the move slot `side` uses next.
///
/// Implementations should only return slots from
/// [`Battle::usable_slots`]; anything else is rejected by the battle.
#[async_trait]
pub trait MoveProvider: Send + Sync {
    async fn choose_move(&self, battle: &Battle, side: Side) -> Result<usize>;
}

fn usable(battle: &Battle, side: Side) -> Result<Vec<usize>> {
    let slots = battle.usable_slots(side);
    if slots.is_empty() {
        return Err(RuntimeError::NoUsableMoves { side });
    }
    Ok(slots)
}

/// Picks uniformly among usable moves after a fixed think delay.
pub struct RandomMoveProvider {
    rng: Mutex<SeededRng>,
    delay: Duration,
}

impl RandomMoveProvider {
    pub fn new(rng: SeededRng, delay: Duration) -> Self {
        Self {
            rng: Mutex::new(rng),
            delay,
        }
    }
}

#[async_trait]
impl MoveProvider for RandomMoveProvider {
    async fn choose_move(&self, battle: &Battle, side: Side) -> Result<usize> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let slots = usable(battle, side)?;
        let mut rng = self.rng.lock().map_err(|_| RuntimeError::RngPoisoned)?;
        let last = u32::try_from(slots.len() - 1).unwrap_or(u32::MAX);
        let pick = rng.range(0, last) as usize;
        Ok(slots[pick.min(slots.len() - 1)])
    }
}

/// Replays a fixed queue of slots. Useful for tests.
#[derive(Debug, Default)]
pub struct ScriptedMoveProvider {
    slots: Mutex<VecDeque<usize>>,
}

impl ScriptedMoveProvider {
    pub fn new(slots: impl IntoIterator<Item = usize>) -> Self {
        Self {
            slots: Mutex::new(slots.into_iter().collect()),
        }
    }
}

#[async_trait]
impl MoveProvider for ScriptedMoveProvider {
    async fn choose_move(&self, _battle: &Battle, _side: Side) -> Result<usize> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| RuntimeError::Internal("scripted move queue lock poisoned"))?;
        slots.pop_front().ok_or(RuntimeError::ScriptExhausted)
    }
}

/// Always returns the same slot.
#[derive(Clone, Copy, Debug)]
pub struct RepeatingMoveProvider(pub usize);

#[async_trait]
impl MoveProvider for RepeatingMoveProvider {
    async fn choose_move(&self, _battle: &Battle, _side: Side) -> Result<usize> {
        Ok(self.0)
    }
}

/// Auto-player: heals when low, otherwise maximises expected damage.
pub struct GreedyMoveProvider {
    oracles: OracleManager,
    heal_below: f64,
}

impl GreedyMoveProvider {
    pub const HEAL_BELOW: f64 = 0.35;

    pub fn new(oracles: OracleManager) -> Self {
        Self {
            oracles,
            heal_below: Self::HEAL_BELOW,
        }
    }

    /// HP ratio under which a ready heal is preferred.
    pub fn heal_below(mut self, ratio: f64) -> Self {
        self.heal_below = ratio;
        self
    }
}

#[async_trait]
impl MoveProvider for GreedyMoveProvider {
    async fn choose_move(&self, battle: &Battle, side: Side) -> Result<usize> {
        let slots = usable(battle, side)?;
        let me = battle.combatant(side);
        let foe = battle.combatant(side.opponent());

        let def = |slot: usize| me.moves()[slot].def();
        if me.hp().ratio() < self.heal_below
            && let Some(&slot) = slots.iter().find(|&&slot| def(slot).is_heal())
        {
            return Ok(slot);
        }

        let env = self.oracles.env();
        let types = env.types();
        let expected = |slot: usize| {
            let def = def(slot);
            if !def.is_damaging() {
                return 0.0;
            }
            f64::from(def.power)
                * f64::from(def.accuracy)
                * types.multiplier(def.element, foe.element())
        };

        let best = slots
            .iter()
            .copied()
            .max_by(|a, b| expected(*a).total_cmp(&expected(*b)));
        best.ok_or(RuntimeError::NoUsableMoves { side })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gacha_content::ContentBundle;
    use gacha_core::{Combatant, CooldownPolicy, ElementType, MoveDef, Stats};

    fn combatant(name: &str, element: ElementType, hp: u32) -> Combatant {
        Combatant::new(
            name,
            10,
            element,
            Stats::new(hp, 30, 30, 30),
            [
                MoveDef::new("Tackle", ElementType::Normal, 40, 100, 0),
                MoveDef::new("Water Gun", ElementType::Water, 40, 100, 0),
                MoveDef::heal("Heal", 3),
            ],
        )
        .unwrap()
    }

    fn oracles() -> OracleManager {
        OracleManager::new(ContentBundle::embedded().unwrap())
    }

    #[tokio::test]
    async fn greedy_prefers_super_effective() {
        let battle = Battle::new(
            combatant("Squirtle", ElementType::Water, 40),
            combatant("Charmander", ElementType::Fire, 40),
            CooldownPolicy::Uniform,
        );
        let slot = GreedyMoveProvider::new(oracles())
            .choose_move(&battle, Side::Player)
            .await
            .unwrap();
        assert_eq!(slot, 1);
    }

    #[tokio::test]
    async fn greedy_heals_when_low() {
        let player = combatant("Squirtle", ElementType::Water, 40).with_current_hp(5);
        let battle = Battle::new(
            player,
            combatant("Charmander", ElementType::Fire, 40),
            CooldownPolicy::Uniform,
        );
        let slot = GreedyMoveProvider::new(oracles())
            .choose_move(&battle, Side::Player)
            .await
            .unwrap();
        assert_eq!(slot, 2);
    }

    #[tokio::test]
    async fn random_picks_usable_slots() {
        let battle = Battle::new(
            combatant("A", ElementType::Normal, 40),
            combatant("B", ElementType::Normal, 40),
            CooldownPolicy::Uniform,
        );
        let provider = RandomMoveProvider::new(SeededRng::seed_from_u64(9), Duration::ZERO);
        for _ in 0..50 {
            let slot = provider.choose_move(&battle, Side::Enemy).await.unwrap();
            assert!(slot < 3);
        }
    }

    #[tokio::test]
    async fn scripted_runs_out() {
        let battle = Battle::new(
            combatant("A", ElementType::Normal, 40),
            combatant("B", ElementType::Normal, 40),
            CooldownPolicy::Uniform,
        );
        let provider = ScriptedMoveProvider::new([2, 0]);
        assert_eq!(provider.choose_move(&battle, Side::Player).await.unwrap(), 2);
        assert_eq!(provider.choose_move(&battle, Side::Player).await.unwrap(), 0);
        assert!(matches!(
            provider.choose_move(&battle, Side::Player).await,
            Err(RuntimeError::ScriptExhausted)
        ));
    }
}
