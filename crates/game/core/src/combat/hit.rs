//! Accuracy and critical rolls.

use crate::config::BattleRules;
use crate::env::RngOracle;

/// Every random input a single turn can consume.
///
/// Drawn up front in a fixed order (accuracy, variance, crit) so a turn
/// always advances the generator by the same amount, whichever branch it
/// takes. Tests construct this directly to pin an outcome.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnRolls {
    /// Uniform percentage in `[0, 100)`.
    pub accuracy: f64,
    /// Damage variance percent, within `BattleRules::variance`.
    pub variance: u32,
    /// Uniform real in `[0, 1)`.
    pub crit: f64,
}

impl TurnRolls {
    pub fn draw(rng: &mut (impl RngOracle + ?Sized), rules: &BattleRules) -> Self {
        let accuracy = rng.percent();
        let variance = rules.variance.roll(rng);
        let crit = rng.unit();
        Self {
            accuracy,
            variance,
            crit,
        }
    }

    /// Guaranteed hit, no variance, no critical.
    pub const fn steady() -> Self {
        Self {
            accuracy: 0.0,
            variance: 100,
            crit: 1.0,
        }
    }

    /// Guaranteed miss for any move below 100 accuracy.
    pub const fn whiff() -> Self {
        Self {
            accuracy: 99.999,
            variance: 100,
            crit: 1.0,
        }
    }
}

/// A move hits unless the roll exceeds its accuracy.
pub fn check_hit(roll: f64, accuracy: u8) -> bool {
    roll <= f64::from(accuracy)
}

/// A hit is critical when the roll falls below the crit chance.
pub fn check_critical(roll: f64, chance: f64) -> bool {
    roll < chance
}
