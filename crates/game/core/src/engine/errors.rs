//! Error types for the battle state machine.

use crate::combat::TurnError;
use crate::error::{ErrorSeverity, GameError};

/// Errors raised by [`Battle::act`](super::Battle::act).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleError {
    #[error("the battle is already over")]
    Finished,

    #[error(transparent)]
    Turn(#[from] TurnError),
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Finished => ErrorSeverity::Internal,
            Self::Turn(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Finished => "BATTLE_FINISHED",
            Self::Turn(err) => err.error_code(),
        }
    }
}
