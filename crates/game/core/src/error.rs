//! Common error infrastructure for gacha-core.
//!
//! Domain-specific errors (e.g. `TurnError`, `EvolutionError`) live next to the
//! rules they validate. This module only provides the shared classification
//! so callers can decide how to surface a failure without matching on every
//! concrete variant.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller can retry with a different choice (another move, more currency)
/// - **Validation**: the input was malformed and must be fixed before retrying
/// - **Internal**: the rules reached a state that should not be reachable
/// - **Fatal**: required data is missing and the operation cannot proceed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: move on cooldown, not enough coins.
    Recoverable,

    /// Examples: level 0, heal move with power, empty move list.
    Validation,

    /// Examples: acting after the battle finished.
    Internal,

    /// Examples: move catalog not wired into the environment.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug or missing wiring.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all gacha-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Stable across releases so front ends can map codes to messages.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
