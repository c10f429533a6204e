//! Wild enemy generation.

use crate::config::EncounterRules;
use crate::env::RngOracle;
use crate::stats::Stats;

/// `max(1, player_level - uniform(0, max_level_gap))`.
pub fn wild_level(
    player_level: u32,
    rng: &mut (impl RngOracle + ?Sized),
    rules: &EncounterRules,
) -> u32 {
    let gap = rng.range(0, rules.max_level_gap);
    player_level.saturating_sub(gap).max(1)
}

/// Scales species base stats to `level`.
///
/// ```text
/// hp    = floor(base_hp * 1.8 * L / 100) + L + 10
/// other = floor(base * 2 * L / 100) + L + 5
/// ```
pub fn wild_stats(base: &Stats, level: u32) -> Stats {
    let level = u64::from(level);
    let hp = u64::from(base.hp) * 18 * level / 1000 + level + 10;
    let other = |stat: u32| u64::from(stat) * 2 * level / 100 + level + 5;
    Stats {
        hp: saturate(hp),
        atk: saturate(other(base.atk)),
        def: saturate(other(base.def)),
        spd: saturate(other(base.spd)),
    }
}

fn saturate(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
