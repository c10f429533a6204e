//! Turn validation errors.

use crate::error::{ErrorSeverity, GameError};

/// A turn that cannot be resolved. Raised before any state changes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    #[error("move slot {slot} does not exist ({available} moves equipped)")]
    InvalidSlot { slot: usize, available: usize },

    #[error("{name} is on cooldown for {remaining} more turn(s)")]
    OnCooldown { name: String, remaining: u32 },

    #[error("{name} has fainted and cannot act")]
    AttackerDefeated { name: String },

    #[error("{name} has already fainted")]
    DefenderDefeated { name: String },
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OnCooldown { .. } => ErrorSeverity::Recoverable,
            Self::InvalidSlot { .. } => ErrorSeverity::Validation,
            Self::AttackerDefeated { .. } | Self::DefenderDefeated { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidSlot { .. } => "TURN_INVALID_SLOT",
            Self::OnCooldown { .. } => "TURN_ON_COOLDOWN",
            Self::AttackerDefeated { .. } => "TURN_ATTACKER_DEFEATED",
            Self::DefenderDefeated { .. } => "TURN_DEFENDER_DEFEATED",
        }
    }
}
