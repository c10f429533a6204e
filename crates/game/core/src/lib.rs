//! Deterministic battle and progression rules for the creature gacha game.
//!
//! `gacha-core` defines the canonical rules (turn resolution, the battle state
//! machine, rewards, level-ups, evolution and loot rolls) as pure functions
//! over plain data. Randomness is always injected through [`RngOracle`] and
//! static data is read through the oracles bundled in [`Env`], so the same
//! inputs always produce the same outputs. Persistence, species lookups and
//! pacing belong to the runtime.
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod progression;
pub mod state;
pub mod stats;

pub use combat::{
    DamageModifiers, TurnError, TurnOutcome, TurnRolls, TurnTarget, calculate_damage,
    min_damage_floor, resolve_turn, resolve_turn_with_rolls,
};
pub use config::{
    BattleRules, ConfigError, CooldownPolicy, EconomyRules, EncounterRules, GameConfig,
    ProgressionRules, RarityCost, RollRange, StatGrowth,
};
pub use engine::{Battle, BattleError, Side, TurnReport, wild_level, wild_stats};
pub use env::{
    Effectiveness, Env, EvolutionOracle, MoveOracle, NeutralTypeChart, OracleError, PcgRng,
    RngOracle, TypeChartOracle,
};
pub use error::{ErrorSeverity, GameError};
pub use progression::{
    BattleResult, EvolutionCost, EvolutionError, EvolutionRule, LevelUpReport, LootError,
    Progress, ProgressionError, RarityRates, Rewards, VictorySettlement, Wallet, apply_victory,
    check_affordable, check_eligibility, evolution_cost, exp_to_next_level, find_rule,
    gain_experience, pick_from_pool, scale_stats,
};
pub use state::{
    Combatant, CombatantError, ElementType, EntryId, InventoryEntry, MoveDef, MoveEffect,
    MoveError, MoveSet, MoveSlot, Rarity, SpeciesData, SpeciesId,
};
pub use stats::{HpMeter, StatKind, Stats};
