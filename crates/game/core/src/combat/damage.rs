//! Damage calculation.

use crate::config::BattleRules;
use crate::state::Combatant;

/// Per-hit multipliers on top of the base formula.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageModifiers {
    /// Variance percent, `85..=100` by default.
    pub variance: u32,
    pub critical: bool,
    /// From the type chart, `1.0` when unmapped.
    pub type_multiplier: f64,
}

impl DamageModifiers {
    pub const NEUTRAL: Self = Self {
        variance: 100,
        critical: false,
        type_multiplier: 1.0,
    };
}

/// Smallest damage a landed hit can deal: `max(min_damage, level / divisor)`.
pub fn min_damage_floor(level: u32, rules: &BattleRules) -> u32 {
    rules
        .min_damage
        .max(level / rules.min_damage_level_divisor.max(1))
}

/// Calculate damage from a damaging move.
///
/// # Formula
///
/// ```text
/// level_factor = 2 * level / 5 + 2
/// stat_factor  = atk / def
/// base         = level_factor * power * stat_factor / 50 + 2
/// damage       = floor(base * variance / 100 * crit * type)
/// damage       = max(damage, min_damage_floor(level))
/// ```
///
/// The base term is kept as an exact integer ratio,
/// `((2L + 10) * power * atk + 500 * def) / (250 * def)`, and divided once at
/// the end so whole-number results are not lost to rounding.
pub fn calculate_damage(
    attacker: &Combatant,
    defender: &Combatant,
    power: u32,
    modifiers: DamageModifiers,
    rules: &BattleRules,
) -> u32 {
    let level = u128::from(attacker.level());
    let atk = u128::from(attacker.stats().atk);
    let def = u128::from(defender.stats().def).max(1);

    // u32 inputs keep every product below 2^100
    let scaled_base = (2 * level + 10) * u128::from(power) * atk + 500 * def;
    let crit = if modifiers.critical {
        rules.crit_multiplier
    } else {
        1.0
    };

    let numerator = scaled_base as f64
        * f64::from(modifiers.variance)
        * crit
        * modifiers.type_multiplier;
    let raw = (numerator / (25_000.0 * def as f64)).floor();

    // float-to-int casts saturate and map NaN to 0
    (raw as u32).max(min_damage_floor(attacker.level(), rules))
}
