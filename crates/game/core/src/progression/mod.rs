//! Progression accounting.
//!
//! Everything that flows back into persisted state after a battle or a
//! purchase: victory rewards and level-ups, evolution eligibility and cost,
//! and gacha rarity rolls. All functions are pure over their inputs and the
//! supplied `RngOracle`; callers persist the results.

mod evolution;
mod leveling;
mod loot;
mod rewards;

pub use evolution::{
    EvolutionCost, EvolutionError, EvolutionRule, Wallet, check_affordable, check_eligibility,
    evolution_cost, find_rule, scale_stats,
};
pub use leveling::{
    LevelUpReport, Progress, ProgressionError, VictorySettlement, apply_victory,
    exp_to_next_level, gain_experience,
};
pub use loot::{LootError, RarityRates, pick_from_pool};
pub use rewards::{BattleResult, Rewards};
