//! Evolution eligibility, cost and stat rescaling.

use crate::config::EconomyRules;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Rarity, SpeciesId};
use crate::stats::{StatKind, Stats};

/// `from` may evolve into `to` once it reaches `required_level`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionRule {
    pub from: SpeciesId,
    pub to: SpeciesId,
    pub required_level: u32,
}

/// Price of one evolution in both currencies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionCost {
    pub coins: u64,
    pub scale: u64,
}

/// Currency a player holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wallet {
    pub coins: u64,
    pub scale: u64,
}

impl Wallet {
    /// Deducts `cost`, failing without change when either balance is short.
    pub fn pay(&mut self, cost: EvolutionCost) -> Result<(), EvolutionError> {
        check_affordable(cost, *self)?;
        self.coins -= cost.coins;
        self.scale -= cost.scale;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EvolutionError {
    #[error("requires level {required}, creature is level {current}")]
    LevelTooLow { required: u32, current: u32 },

    #[error("requires {required} coins, have {available}")]
    InsufficientCoins { required: u64, available: u64 },

    #[error("requires {required} scale, have {available}")]
    InsufficientScale { required: u64, available: u64 },

    #[error("{from} cannot evolve into {to}")]
    NotInLine { from: SpeciesId, to: SpeciesId },
}

impl GameError for EvolutionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::LevelTooLow { .. }
            | Self::InsufficientCoins { .. }
            | Self::InsufficientScale { .. } => ErrorSeverity::Recoverable,
            Self::NotInLine { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LevelTooLow { .. } => "EVOLUTION_LEVEL_TOO_LOW",
            Self::InsufficientCoins { .. } => "EVOLUTION_INSUFFICIENT_COINS",
            Self::InsufficientScale { .. } => "EVOLUTION_INSUFFICIENT_SCALE",
            Self::NotInLine { .. } => "EVOLUTION_NOT_IN_LINE",
        }
    }
}

/// Scale cost follows the rarity of the evolved form; coins are flat.
pub fn evolution_cost(target: Rarity, rules: &EconomyRules) -> EvolutionCost {
    EvolutionCost {
        coins: rules.evolution_coin_cost,
        scale: rules.evolution_scale_cost.for_rarity(target),
    }
}

/// Picks the rule leading from `from` to `to`.
pub fn find_rule(
    rules: &[EvolutionRule],
    from: SpeciesId,
    to: SpeciesId,
) -> Result<EvolutionRule, EvolutionError> {
    rules
        .iter()
        .find(|rule| rule.from == from && rule.to == to)
        .copied()
        .ok_or(EvolutionError::NotInLine { from, to })
}

pub fn check_eligibility(level: u32, rule: &EvolutionRule) -> Result<(), EvolutionError> {
    if level < rule.required_level {
        return Err(EvolutionError::LevelTooLow {
            required: rule.required_level,
            current: level,
        });
    }
    Ok(())
}

pub fn check_affordable(cost: EvolutionCost, wallet: Wallet) -> Result<(), EvolutionError> {
    if wallet.coins < cost.coins {
        return Err(EvolutionError::InsufficientCoins {
            required: cost.coins,
            available: wallet.coins,
        });
    }
    if wallet.scale < cost.scale {
        return Err(EvolutionError::InsufficientScale {
            required: cost.scale,
            available: wallet.scale,
        });
    }
    Ok(())
}

/// Rescales each stat by `new_base / old_base`, floored.
///
/// A stat is left unchanged when either base value is zero.
pub fn scale_stats(current: &Stats, old_base: &Stats, new_base: &Stats) -> Stats {
    let mut scaled = *current;
    for kind in StatKind::ALL {
        let old = u64::from(old_base.get(kind));
        let new = u64::from(new_base.get(kind));
        if old == 0 || new == 0 {
            continue;
        }
        let value = u64::from(current.get(kind)) * new / old;
        *scaled.get_mut(kind) = u32::try_from(value).unwrap_or(u32::MAX);
    }
    scaled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bulbasaur_line() -> EvolutionRule {
        EvolutionRule {
            from: SpeciesId(1),
            to: SpeciesId(2),
            required_level: 16,
        }
    }

    #[test]
    fn eligibility_follows_required_level() {
        let rule = bulbasaur_line();
        assert!(check_eligibility(16, &rule).is_ok());
        assert_eq!(
            check_eligibility(15, &rule),
            Err(EvolutionError::LevelTooLow {
                required: 16,
                current: 15
            })
        );
    }

    #[test]
    fn cost_scales_with_target_rarity() {
        let rules = EconomyRules::default();
        assert_eq!(
            evolution_cost(Rarity::SSR, &rules),
            EvolutionCost {
                coins: 2500,
                scale: 5000
            }
        );
        assert_eq!(evolution_cost(Rarity::N, &rules).scale, 200);
    }

    #[test]
    fn wallet_pay_is_all_or_nothing() {
        let mut wallet = Wallet {
            coins: 3000,
            scale: 100,
        };
        let cost = EvolutionCost {
            coins: 2500,
            scale: 500,
        };
        assert!(matches!(
            wallet.pay(cost),
            Err(EvolutionError::InsufficientScale { .. })
        ));
        assert_eq!(wallet.coins, 3000);

        wallet.scale = 600;
        wallet.pay(cost).unwrap();
        assert_eq!(wallet, Wallet { coins: 500, scale: 100 });
    }

    #[test]
    fn stats_scale_by_base_ratio() {
        let current = Stats::new(60, 55, 50, 48);
        let old_base = Stats::new(45, 49, 49, 45);
        let new_base = Stats::new(60, 62, 63, 60);
        let scaled = scale_stats(&current, &old_base, &new_base);
        assert_eq!(scaled, Stats::new(80, 69, 64, 64));
    }

    #[test]
    fn zero_base_leaves_stat_unchanged() {
        let current = Stats::new(60, 55, 50, 48);
        let old_base = Stats::new(0, 49, 49, 45);
        let new_base = Stats::new(60, 0, 63, 60);
        let scaled = scale_stats(&current, &old_base, &new_base);
        assert_eq!(scaled.hp, 60);
        assert_eq!(scaled.atk, 55);
        assert_eq!(scaled.def, 64);
    }

    #[test]
    fn find_rule_rejects_other_lines() {
        let rules = [bulbasaur_line()];
        assert!(find_rule(&rules, SpeciesId(1), SpeciesId(2)).is_ok());
        assert!(matches!(
            find_rule(&rules, SpeciesId(1), SpeciesId(3)),
            Err(EvolutionError::NotInLine { .. })
        ));
    }
}
