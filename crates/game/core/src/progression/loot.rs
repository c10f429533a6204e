//! Weighted rarity rolls for gacha packs.

use crate::env::RngOracle;
use crate::error::{ErrorSeverity, GameError};
use crate::state::Rarity;

/// Probability of each tier.
///
/// Rates are accumulated rarest first; whatever is left over falls to `N`,
/// so they need not sum to 1.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RarityRates {
    pub ssr: f64,
    pub sr: f64,
    pub r: f64,
    pub n: f64,
}

impl RarityRates {
    pub const fn get(&self, rarity: Rarity) -> f64 {
        match rarity {
            Rarity::SSR => self.ssr,
            Rarity::SR => self.sr,
            Rarity::R => self.r,
            Rarity::N => self.n,
        }
    }

    pub fn validate(&self) -> Result<(), LootError> {
        for rarity in Rarity::RAREST_FIRST {
            let rate = self.get(rarity);
            if !rate.is_finite() || rate < 0.0 {
                return Err(LootError::InvalidRate { rarity });
            }
        }
        Ok(())
    }

    /// Maps a roll in `[0, 1)` to the first tier whose cumulative rate
    /// reaches it.
    pub fn pick(&self, roll: f64) -> Rarity {
        let mut cumulative = 0.0;
        for rarity in Rarity::RAREST_FIRST {
            cumulative += self.get(rarity);
            if roll <= cumulative {
                return rarity;
            }
        }
        Rarity::N
    }

    pub fn roll(&self, rng: &mut (impl RngOracle + ?Sized)) -> Rarity {
        self.pick(rng.unit())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LootError {
    #[error("no creatures in the {0} pool")]
    EmptyPool(Rarity),

    #[error("rate for {rarity} must be a non-negative number")]
    InvalidRate { rarity: Rarity },
}

impl GameError for LootError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyPool(_) => "LOOT_EMPTY_POOL",
            Self::InvalidRate { .. } => "LOOT_INVALID_RATE",
        }
    }
}

/// Uniform pick from `pool`, `EmptyPool` when there is nothing to pick.
pub fn pick_from_pool<T: Copy>(
    pool: &[T],
    rarity: Rarity,
    rng: &mut (impl RngOracle + ?Sized),
) -> Result<T, LootError> {
    if pool.is_empty() {
        return Err(LootError::EmptyPool(rarity));
    }
    let last = u32::try_from(pool.len() - 1).unwrap_or(u32::MAX);
    let index = rng.range(0, last) as usize;
    Ok(pool[index.min(pool.len() - 1)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    fn pack() -> RarityRates {
        RarityRates {
            ssr: 0.001,
            sr: 0.025,
            r: 0.010,
            n: 0.70,
        }
    }

    #[test]
    fn rolls_accumulate_rarest_first() {
        let rates = pack();
        assert_eq!(rates.pick(0.0), Rarity::SSR);
        assert_eq!(rates.pick(0.0005), Rarity::SSR);
        assert_eq!(rates.pick(0.001), Rarity::SSR);
        assert_eq!(rates.pick(0.0011), Rarity::SR);
        assert_eq!(rates.pick(0.03), Rarity::R);
        assert_eq!(rates.pick(0.5), Rarity::N);
    }

    #[test]
    fn leftover_probability_falls_to_common() {
        assert_eq!(pack().pick(0.99), Rarity::N);
    }

    #[test]
    fn negative_rate_is_rejected() {
        let rates = RarityRates {
            sr: -0.1,
            ..pack()
        };
        assert_eq!(
            rates.validate(),
            Err(LootError::InvalidRate { rarity: Rarity::SR })
        );
    }

    #[test]
    fn empty_pool_is_an_error() {
        let mut rng = PcgRng::from_seed(1);
        let empty: [u32; 0] = [];
        assert_eq!(
            pick_from_pool(&empty, Rarity::SSR, &mut rng),
            Err(LootError::EmptyPool(Rarity::SSR))
        );
    }

    #[test]
    fn pool_pick_stays_in_pool() {
        let mut rng = PcgRng::from_seed(12);
        let pool = [4u32, 7, 1];
        for _ in 0..100 {
            assert!(pool.contains(&pick_from_pool(&pool, Rarity::N, &mut rng).unwrap()));
        }
    }
}
