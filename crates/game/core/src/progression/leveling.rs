//! Experience and level-up accounting.

use crate::config::ProgressionRules;
use crate::env::RngOracle;
use crate::error::{ErrorSeverity, GameError};
use crate::stats::{StatKind, Stats};

use super::rewards::{BattleResult, Rewards};

/// The persisted fields a win can change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Progress {
    pub level: u32,
    pub exp: u32,
    pub stats: Stats,
}

/// Result of feeding experience into [`gain_experience`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelUpReport {
    pub progress: Progress,
    pub levels_gained: u32,
    /// Sum of every threshold paid to level up.
    pub exp_consumed: u64,
}

/// A victory applied to a creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VictorySettlement {
    pub result: BattleResult,
    pub progress: Progress,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProgressionError {
    #[error("creature level must be at least 1")]
    ZeroLevel,

    #[error("enemy level must be at least 1")]
    ZeroEnemyLevel,

    #[error("exp_per_level must be positive")]
    ZeroThreshold,
}

impl GameError for ProgressionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ZeroLevel | Self::ZeroEnemyLevel => ErrorSeverity::Validation,
            Self::ZeroThreshold => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroLevel => "PROGRESSION_ZERO_LEVEL",
            Self::ZeroEnemyLevel => "PROGRESSION_ZERO_ENEMY_LEVEL",
            Self::ZeroThreshold => "PROGRESSION_ZERO_THRESHOLD",
        }
    }
}

/// Experience needed to leave `level`.
pub fn exp_to_next_level(level: u32, rules: &ProgressionRules) -> u64 {
    u64::from(level) * u64::from(rules.exp_per_level)
}

/// Adds `exp_gain` and resolves every level-up it pays for.
///
/// The threshold is re-read after each increment, so it grows every
/// iteration and the loop ends for any finite gain. Each level draws stat
/// growth in `hp, atk, def, spd` order.
pub fn gain_experience(
    progress: &Progress,
    exp_gain: u64,
    rng: &mut (impl RngOracle + ?Sized),
    rules: &ProgressionRules,
) -> Result<LevelUpReport, ProgressionError> {
    if progress.level == 0 {
        return Err(ProgressionError::ZeroLevel);
    }
    if rules.exp_per_level == 0 {
        return Err(ProgressionError::ZeroThreshold);
    }

    let mut level = progress.level;
    let mut stats = progress.stats;
    let mut exp = u64::from(progress.exp) + exp_gain;
    let mut exp_consumed = 0;

    while exp >= exp_to_next_level(level, rules) {
        let threshold = exp_to_next_level(level, rules);
        exp -= threshold;
        exp_consumed += threshold;
        level = level.saturating_add(1);
        for kind in StatKind::ALL {
            let gain = rules.growth.get(kind).roll(rng);
            let stat = stats.get_mut(kind);
            *stat = stat.saturating_add(gain);
        }
    }

    Ok(LevelUpReport {
        progress: Progress {
            level,
            // below `level * exp_per_level` after the loop, which fits u32 for any reachable level
            exp: u32::try_from(exp).unwrap_or(u32::MAX),
            stats,
        },
        levels_gained: level - progress.level,
        exp_consumed,
    })
}

/// Rolls victory rewards against `enemy_level` and feeds the experience
/// into the winner's progress. Call once per won battle; losses call nothing.
pub fn apply_victory(
    progress: &Progress,
    enemy_level: u32,
    rng: &mut (impl RngOracle + ?Sized),
    rules: &ProgressionRules,
) -> Result<VictorySettlement, ProgressionError> {
    if enemy_level == 0 {
        return Err(ProgressionError::ZeroEnemyLevel);
    }
    let rewards = Rewards::roll(enemy_level, rng, rules);
    let report = gain_experience(progress, rewards.exp, rng, rules)?;

    Ok(VictorySettlement {
        result: BattleResult {
            exp_gained: rewards.exp,
            coin_gained: rewards.coins,
            scale_dropped: rewards.scale,
            leveled_up: report.progress.level > progress.level,
            old_level: progress.level,
            new_level: report.progress.level,
        },
        progress: report.progress,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use proptest::prelude::*;

    fn starter() -> Progress {
        Progress {
            level: 5,
            exp: 0,
            stats: Stats::new(39, 52, 43, 65),
        }
    }

    #[test]
    fn large_gain_terminates_and_conserves_exp() {
        let rules = ProgressionRules::default();
        let mut rng = PcgRng::from_seed(9);

        let report = gain_experience(&starter(), 999_999, &mut rng, &rules).unwrap();

        let progress = report.progress;
        assert!(u64::from(progress.exp) < exp_to_next_level(progress.level, &rules));
        assert_eq!(report.exp_consumed + u64::from(progress.exp), 999_999);
        assert_eq!(report.levels_gained, progress.level - 5);
    }

    #[test]
    fn single_level_up_applies_growth_once() {
        let rules = ProgressionRules::default();
        let mut rng = PcgRng::from_seed(1);
        let before = Progress {
            level: 5,
            exp: 480,
            stats: Stats::new(39, 52, 43, 65),
        };

        let report = gain_experience(&before, 50, &mut rng, &rules).unwrap();

        assert_eq!(report.progress.level, 6);
        assert_eq!(report.progress.exp, 30);
        let stats = report.progress.stats;
        assert!((41..=43).contains(&stats.hp));
        assert!((53..=54).contains(&stats.atk));
        assert!((44..=45).contains(&stats.def));
        assert!((66..=67).contains(&stats.spd));
    }

    #[test]
    fn threshold_uses_incremented_level() {
        let rules = ProgressionRules::default();
        let mut rng = PcgRng::from_seed(2);
        let before = Progress {
            level: 1,
            exp: 0,
            stats: Stats::new(10, 10, 10, 10),
        };
        // 100 to reach 2, then 200 to reach 3: 250 stops at level 2 with 150
        let report = gain_experience(&before, 250, &mut rng, &rules).unwrap();
        assert_eq!(report.progress.level, 2);
        assert_eq!(report.progress.exp, 150);
    }

    #[test]
    fn victory_reports_rewards_and_levels() {
        let rules = ProgressionRules::default();
        let mut rng = PcgRng::from_seed(4);

        let settlement = apply_victory(&starter(), 10, &mut rng, &rules).unwrap();

        let result = settlement.result;
        assert_eq!(result.exp_gained, 500);
        assert_eq!(result.coin_gained, 150);
        assert!((1..=20).contains(&result.scale_dropped));
        assert!(result.leveled_up);
        assert_eq!(result.old_level, 5);
        assert_eq!(result.new_level, 6);
        assert_eq!(settlement.progress.exp, 0);
    }

    #[test]
    fn below_threshold_does_not_level() {
        let rules = ProgressionRules::default();
        let mut rng = PcgRng::from_seed(4);
        let settlement = apply_victory(&starter(), 1, &mut rng, &rules).unwrap();
        assert!(!settlement.result.leveled_up);
        assert_eq!(settlement.progress.exp, 50);
        assert_eq!(settlement.progress.stats, starter().stats);
    }

    #[test]
    fn invalid_levels_are_rejected() {
        let rules = ProgressionRules::default();
        let mut rng = PcgRng::from_seed(4);
        assert_eq!(
            apply_victory(&starter(), 0, &mut rng, &rules),
            Err(ProgressionError::ZeroEnemyLevel)
        );
        let zero = Progress {
            level: 0,
            ..starter()
        };
        assert_eq!(
            gain_experience(&zero, 10, &mut rng, &rules),
            Err(ProgressionError::ZeroLevel)
        );
    }

    proptest! {
        #[test]
        fn exp_is_conserved(level in 1u32..200, exp_frac in 0u32..100, gain in 0u64..2_000_000, seed in any::<u64>()) {
            let rules = ProgressionRules::default();
            let start_exp = exp_frac * level;
            let before = Progress { level, exp: start_exp, stats: Stats::new(10, 10, 10, 10) };
            let mut rng = PcgRng::from_seed(seed);

            let report = gain_experience(&before, gain, &mut rng, &rules).unwrap();

            prop_assert!(u64::from(report.progress.exp) < exp_to_next_level(report.progress.level, &rules));
            prop_assert_eq!(report.exp_consumed + u64::from(report.progress.exp), u64::from(start_exp) + gain);
            prop_assert!(report.progress.level >= level);
        }
    }
}
