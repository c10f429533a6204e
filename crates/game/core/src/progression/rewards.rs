//! Victory rewards.

use crate::config::ProgressionRules;
use crate::env::RngOracle;

/// Currency and experience granted for one win.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rewards {
    pub exp: u64,
    pub coins: u64,
    pub scale: u64,
}

impl Rewards {
    /// `exp = 50 * L`, `coins = 50 + 10 * L`, `scale = uniform(1, 20)`.
    ///
    /// Draws exactly once from `rng`.
    pub fn roll(
        enemy_level: u32,
        rng: &mut (impl RngOracle + ?Sized),
        rules: &ProgressionRules,
    ) -> Self {
        let level = u64::from(enemy_level);
        Self {
            exp: u64::from(rules.exp_per_enemy_level) * level,
            coins: u64::from(rules.base_coin_reward) + u64::from(rules.coins_per_enemy_level) * level,
            scale: u64::from(rules.scale_drop.roll(rng)),
        }
    }
}

/// Summary of a settled victory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleResult {
    pub exp_gained: u64,
    pub coin_gained: u64,
    pub scale_dropped: u64,
    pub leveled_up: bool,
    pub old_level: u32,
    pub new_level: u32,
}
