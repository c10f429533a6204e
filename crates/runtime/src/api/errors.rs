//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from repositories, providers and the core rules so clients
//! can bubble them up with consistent context.
use thiserror::Error;

use gacha_core::{
    BattleError, CombatantError, EntryId, ErrorSeverity, EvolutionError, GameError, LootError,
    OracleError, ProgressionError, Side, SpeciesId,
};

pub use crate::repository::RepositoryError;
use crate::repository::PlayerId;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("player '{0}' not found")]
    PlayerNotFound(PlayerId),

    #[error("species {0} is unavailable")]
    SpeciesUnavailable(SpeciesId),

    #[error("unknown pack '{0}'")]
    UnknownPack(String),

    #[error("not enough coins: need {required}, have {available}")]
    InsufficientCoins { required: u64, available: u64 },

    #[error("not enough energy: need {required}, have {available}")]
    InsufficientEnergy { required: u32, available: u32 },

    #[error("inventory entry {0} not found")]
    EntryNotFound(EntryId),

    #[error("no creatures in inventory")]
    NoCreatures,

    #[error("a starter has already been chosen")]
    StarterAlreadyChosen,

    #[error("no starter rerolls left")]
    NoRerollsLeft,

    #[error("species {0} is not a starter")]
    NotAStarter(SpeciesId),

    #[error("starter pool has fewer than {required} species")]
    StarterPoolTooSmall { required: usize },

    #[error("no usable moves for {side}")]
    NoUsableMoves { side: Side },

    #[error("scripted move queue is empty")]
    ScriptExhausted,

    #[error("random source lock was poisoned")]
    RngPoisoned,

    #[error("oracle manager not configured")]
    MissingOracles,

    #[error("invariant violated: {0}")]
    Internal(&'static str),

    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error(transparent)]
    Combatant(#[from] CombatantError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Progression(#[from] ProgressionError),

    #[error(transparent)]
    Evolution(#[from] EvolutionError),

    #[error(transparent)]
    Loot(#[from] LootError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        use RuntimeError::*;
        match self {
            Repository(_) | RngPoisoned => ErrorSeverity::Fatal,
            Internal(_) | ScriptExhausted => ErrorSeverity::Internal,
            MissingOracles => ErrorSeverity::Fatal,
            InsufficientCoins { .. }
            | InsufficientEnergy { .. }
            | NoRerollsLeft
            | NoUsableMoves { .. }
            | SpeciesUnavailable(_) => ErrorSeverity::Recoverable,
            PlayerNotFound(_)
            | UnknownPack(_)
            | EntryNotFound(_)
            | NoCreatures
            | StarterAlreadyChosen
            | NotAStarter(_)
            | StarterPoolTooSmall { .. } => ErrorSeverity::Validation,
            Battle(e) => e.severity(),
            Combatant(e) => e.severity(),
            Oracle(e) => e.severity(),
            Progression(e) => e.severity(),
            Evolution(e) => e.severity(),
            Loot(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use RuntimeError::*;
        match self {
            Repository(_) => "RUNTIME_REPOSITORY",
            PlayerNotFound(_) => "RUNTIME_PLAYER_NOT_FOUND",
            SpeciesUnavailable(_) => "RUNTIME_SPECIES_UNAVAILABLE",
            UnknownPack(_) => "RUNTIME_UNKNOWN_PACK",
            InsufficientCoins { .. } => "RUNTIME_INSUFFICIENT_COINS",
            InsufficientEnergy { .. } => "RUNTIME_INSUFFICIENT_ENERGY",
            EntryNotFound(_) => "RUNTIME_ENTRY_NOT_FOUND",
            NoCreatures => "RUNTIME_NO_CREATURES",
            StarterAlreadyChosen => "RUNTIME_STARTER_ALREADY_CHOSEN",
            NoRerollsLeft => "RUNTIME_NO_REROLLS_LEFT",
            NotAStarter(_) => "RUNTIME_NOT_A_STARTER",
            StarterPoolTooSmall { .. } => "RUNTIME_STARTER_POOL_TOO_SMALL",
            NoUsableMoves { .. } => "RUNTIME_NO_USABLE_MOVES",
            ScriptExhausted => "RUNTIME_SCRIPT_EXHAUSTED",
            RngPoisoned => "RUNTIME_RNG_POISONED",
            MissingOracles => "RUNTIME_MISSING_ORACLES",
            Internal(_) => "RUNTIME_INTERNAL",
            Battle(e) => e.error_code(),
            Combatant(e) => e.error_code(),
            Oracle(e) => e.error_code(),
            Progression(e) => e.error_code(),
            Evolution(e) => e.error_code(),
            Loot(e) => e.error_code(),
        }
    }
}
