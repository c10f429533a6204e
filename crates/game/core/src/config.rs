//! Balance constants and tunable parameters.
//!
//! Every number that shapes a battle or a reward lives here as a named default
//! so balance changes never touch the rules themselves. The whole tree can be
//! overridden from TOML (see `gacha-content::ConfigLoader`); missing keys fall
//! back to the defaults below.

use crate::env::RngOracle;
use crate::error::{ErrorSeverity, GameError};
use crate::state::Rarity;
use crate::stats::StatKind;

/// Top-level game configuration.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub battle: BattleRules,
    pub progression: ProgressionRules,
    pub encounter: EncounterRules,
    pub economy: EconomyRules,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Move slots per combatant.
    pub const MAX_MOVES: usize = 4;

    pub fn new() -> Self {
        Self::default()
    }

    /// Checks the values that would otherwise make a rule misbehave
    /// (e.g. a zero level threshold would never terminate the level-up loop).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let battle = &self.battle;
        if !(0.0..=1.0).contains(&battle.heal_fraction) {
            return Err(ConfigError::OutOfRange {
                field: "battle.heal_fraction",
            });
        }
        if !(0.0..=1.0).contains(&battle.crit_chance) {
            return Err(ConfigError::OutOfRange {
                field: "battle.crit_chance",
            });
        }
        if !battle.crit_multiplier.is_finite() || battle.crit_multiplier < 1.0 {
            return Err(ConfigError::OutOfRange {
                field: "battle.crit_multiplier",
            });
        }
        battle.variance.validate("battle.variance")?;
        if battle.variance.max == 0 {
            return Err(ConfigError::OutOfRange {
                field: "battle.variance",
            });
        }
        if battle.min_damage_level_divisor == 0 {
            return Err(ConfigError::Zero {
                field: "battle.min_damage_level_divisor",
            });
        }

        let progression = &self.progression;
        if progression.exp_per_level == 0 {
            return Err(ConfigError::Zero {
                field: "progression.exp_per_level",
            });
        }
        progression.scale_drop.validate("progression.scale_drop")?;
        for kind in StatKind::ALL {
            progression.growth.get(kind).validate(kind.growth_field())?;
        }

        let economy = &self.economy;
        if economy.energy_regen_minutes == 0 {
            return Err(ConfigError::Zero {
                field: "economy.energy_regen_minutes",
            });
        }
        if economy.starter_level == 0 {
            return Err(ConfigError::Zero {
                field: "economy.starter_level",
            });
        }
        Ok(())
    }
}

/// Turn resolution parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleRules {
    /// Fraction of max HP restored by a heal move.
    pub heal_fraction: f64,
    /// Probability in `[0, 1]` that a damaging hit is critical.
    pub crit_chance: f64,
    pub crit_multiplier: f64,
    /// Damage variance in percent, inclusive on both ends.
    pub variance: RollRange,
    /// Absolute lower bound of the damage floor.
    pub min_damage: u32,
    /// The damage floor also grows as `attacker.level / divisor`.
    pub min_damage_level_divisor: u32,
    pub cooldown_policy: CooldownPolicy,
}

impl BattleRules {
    pub const HEAL_FRACTION: f64 = 0.5;
    pub const CRIT_CHANCE: f64 = 1.0 / 16.0;
    pub const CRIT_MULTIPLIER: f64 = 1.5;
    pub const VARIANCE: RollRange = RollRange::new(85, 100);
    pub const MIN_DAMAGE: u32 = 1;
    pub const MIN_DAMAGE_LEVEL_DIVISOR: u32 = 5;
}

impl Default for BattleRules {
    fn default() -> Self {
        Self {
            heal_fraction: Self::HEAL_FRACTION,
            crit_chance: Self::CRIT_CHANCE,
            crit_multiplier: Self::CRIT_MULTIPLIER,
            variance: Self::VARIANCE,
            min_damage: Self::MIN_DAMAGE,
            min_damage_level_divisor: Self::MIN_DAMAGE_LEVEL_DIVISOR,
            cooldown_policy: CooldownPolicy::default(),
        }
    }
}

/// Which sides of a battle must respect move cooldowns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CooldownPolicy {
    /// Both sides are gated and both move sets tick down each round.
    #[default]
    Uniform,
    /// Only the player is gated; the AI may repeat any move every turn.
    PlayerOnly,
}

/// Rewards and level-up parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgressionRules {
    pub exp_per_enemy_level: u32,
    pub base_coin_reward: u32,
    pub coins_per_enemy_level: u32,
    pub scale_drop: RollRange,
    /// Threshold to leave level `L` is `L * exp_per_level`.
    pub exp_per_level: u32,
    pub growth: StatGrowth,
}

impl ProgressionRules {
    pub const EXP_PER_ENEMY_LEVEL: u32 = 50;
    pub const BASE_COIN_REWARD: u32 = 50;
    pub const COINS_PER_ENEMY_LEVEL: u32 = 10;
    pub const SCALE_DROP: RollRange = RollRange::new(1, 20);
    pub const EXP_PER_LEVEL: u32 = 100;
}

impl Default for ProgressionRules {
    fn default() -> Self {
        Self {
            exp_per_enemy_level: Self::EXP_PER_ENEMY_LEVEL,
            base_coin_reward: Self::BASE_COIN_REWARD,
            coins_per_enemy_level: Self::COINS_PER_ENEMY_LEVEL,
            scale_drop: Self::SCALE_DROP,
            exp_per_level: Self::EXP_PER_LEVEL,
            growth: StatGrowth::default(),
        }
    }
}

/// Per-level stat growth ranges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatGrowth {
    pub hp: RollRange,
    pub atk: RollRange,
    pub def: RollRange,
    pub spd: RollRange,
}

impl StatGrowth {
    pub const fn get(&self, kind: StatKind) -> RollRange {
        match kind {
            StatKind::Hp => self.hp,
            StatKind::Atk => self.atk,
            StatKind::Def => self.def,
            StatKind::Spd => self.spd,
        }
    }
}

impl Default for StatGrowth {
    fn default() -> Self {
        Self {
            hp: RollRange::new(2, 4),
            atk: RollRange::new(1, 2),
            def: RollRange::new(1, 2),
            spd: RollRange::new(1, 2),
        }
    }
}

/// Wild enemy generation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncounterRules {
    /// Enemy level is the player's level minus up to this many levels.
    pub max_level_gap: u32,
}

impl EncounterRules {
    pub const MAX_LEVEL_GAP: u32 = 1;
}

impl Default for EncounterRules {
    fn default() -> Self {
        Self {
            max_level_gap: Self::MAX_LEVEL_GAP,
        }
    }
}

/// Currency, energy and starter parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EconomyRules {
    pub max_energy: u32,
    pub energy_regen_minutes: u32,
    pub battle_energy_cost: u32,
    pub evolution_coin_cost: u64,
    /// Scale cost keyed by the rarity of the evolved form.
    pub evolution_scale_cost: RarityCost,
    pub starting_coins: u64,
    pub starting_rerolls: u32,
    pub starter_level: u32,
    pub starter_rarity: Rarity,
    pub starter_candidates: usize,
}

impl EconomyRules {
    pub const MAX_ENERGY: u32 = 50;
    pub const ENERGY_REGEN_MINUTES: u32 = 1;
    pub const BATTLE_ENERGY_COST: u32 = 1;
    pub const EVOLUTION_COIN_COST: u64 = 2500;
    pub const STARTING_COINS: u64 = 1000;
    pub const STARTING_REROLLS: u32 = 3;
    pub const STARTER_LEVEL: u32 = 5;
    pub const STARTER_CANDIDATES: usize = 3;
}

impl Default for EconomyRules {
    fn default() -> Self {
        Self {
            max_energy: Self::MAX_ENERGY,
            energy_regen_minutes: Self::ENERGY_REGEN_MINUTES,
            battle_energy_cost: Self::BATTLE_ENERGY_COST,
            evolution_coin_cost: Self::EVOLUTION_COIN_COST,
            evolution_scale_cost: RarityCost::default(),
            starting_coins: Self::STARTING_COINS,
            starting_rerolls: Self::STARTING_REROLLS,
            starter_level: Self::STARTER_LEVEL,
            starter_rarity: Rarity::R,
            starter_candidates: Self::STARTER_CANDIDATES,
        }
    }
}

/// A cost per rarity tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RarityCost {
    pub ssr: u64,
    pub sr: u64,
    pub r: u64,
    pub n: u64,
}

impl RarityCost {
    pub const fn for_rarity(&self, rarity: Rarity) -> u64 {
        match rarity {
            Rarity::SSR => self.ssr,
            Rarity::SR => self.sr,
            Rarity::R => self.r,
            Rarity::N => self.n,
        }
    }
}

impl Default for RarityCost {
    fn default() -> Self {
        Self {
            ssr: 5000,
            sr: 1500,
            r: 500,
            n: 200,
        }
    }
}

/// Inclusive integer range used for every uniform draw in the rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollRange {
    pub min: u32,
    pub max: u32,
}

impl RollRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub const fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Draws a value in `[min, max]`.
    pub fn roll(&self, rng: &mut (impl RngOracle + ?Sized)) -> u32 {
        rng.range(self.min, self.max)
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvertedRange { field });
        }
        Ok(())
    }
}

/// Rejected configuration values.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must not be zero")]
    Zero { field: &'static str },

    #[error("{field} is out of range")]
    OutOfRange { field: &'static str },

    #[error("{field} has min greater than max")]
    InvertedRange { field: &'static str },
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Zero { .. } => "CONFIG_ZERO",
            Self::OutOfRange { .. } => "CONFIG_OUT_OF_RANGE",
            Self::InvertedRange { .. } => "CONFIG_INVERTED_RANGE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_balance() {
        let config = GameConfig::new();
        assert_eq!(config.battle.heal_fraction, 0.5);
        assert_eq!(config.battle.crit_chance, 0.0625);
        assert_eq!(config.battle.variance, RollRange::new(85, 100));
        assert_eq!(config.battle.cooldown_policy, CooldownPolicy::Uniform);
        assert_eq!(config.progression.exp_per_level, 100);
        assert_eq!(config.economy.max_energy, 50);
        assert_eq!(config.economy.evolution_scale_cost.for_rarity(Rarity::SR), 1500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_exp_threshold_is_rejected() {
        let mut config = GameConfig::new();
        config.progression.exp_per_level = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Zero {
                field: "progression.exp_per_level"
            })
        ));
    }

    #[test]
    fn inverted_growth_range_is_rejected() {
        let mut config = GameConfig::new();
        config.progression.growth.def = RollRange::new(3, 1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedRange { .. })
        ));
    }

    #[test]
    fn cooldown_policy_parses_from_snake_case() {
        assert_eq!(
            "player_only".parse::<CooldownPolicy>(),
            Ok(CooldownPolicy::PlayerOnly)
        );
    }
}
