//! Data-integrity errors for moves and combatants.
//!
//! These are rejected before any rule runs; the resolver assumes valid input.

use crate::error::{ErrorSeverity, GameError};
use crate::stats::StatKind;

/// A catalog move that breaks a data-integrity rule.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("move name is empty")]
    EmptyName,

    #[error("move '{name}' has accuracy {accuracy}, expected 0-100")]
    AccuracyOutOfRange { name: String, accuracy: u8 },

    #[error("heal move '{name}' must have power 0, found {power}")]
    HealWithPower { name: String, power: u32 },

    #[error("move '{name}' has neither power nor an effect")]
    NoEffect { name: String },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName => "MOVE_EMPTY_NAME",
            Self::AccuracyOutOfRange { .. } => "MOVE_ACCURACY_OUT_OF_RANGE",
            Self::HealWithPower { .. } => "MOVE_HEAL_WITH_POWER",
            Self::NoEffect { .. } => "MOVE_NO_EFFECT",
        }
    }
}

/// Invalid input when building a combatant.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatantError {
    #[error("{name} has level 0")]
    ZeroLevel { name: String },

    #[error("{name} has a zero {stat} stat")]
    ZeroStat { name: String, stat: StatKind },

    #[error("{name} has no moves")]
    NoMoves { name: String },

    #[error("{name} has {count} moves, at most {max} allowed")]
    TooManyMoves {
        name: String,
        count: usize,
        max: usize,
    },

    #[error(transparent)]
    InvalidMove(#[from] MoveError),
}

impl GameError for CombatantError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroLevel { .. } => "COMBATANT_ZERO_LEVEL",
            Self::ZeroStat { .. } => "COMBATANT_ZERO_STAT",
            Self::NoMoves { .. } => "COMBATANT_NO_MOVES",
            Self::TooManyMoves { .. } => "COMBATANT_TOO_MANY_MOVES",
            Self::InvalidMove(err) => err.error_code(),
        }
    }
}
