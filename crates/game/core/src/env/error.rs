//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{ElementType, SpeciesId};

/// Errors that occur when accessing oracle data.
///
/// A missing oracle is fatal: the rules cannot invent move sets or evolution
/// lines. Missing entries are validation errors on the caller's reference.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// MoveOracle is not available in the environment.
    #[error("MoveOracle not available")]
    MovesNotAvailable,

    /// EvolutionOracle is not available in the environment.
    #[error("EvolutionOracle not available")]
    EvolutionsNotAvailable,

    /// A move name is not present in the catalog.
    #[error("move '{0}' not found")]
    MoveNotFound(String),

    /// No move set is registered for the element nor the default set.
    #[error("no move set for element {0}")]
    MoveSetNotFound(ElementType),

    /// Species has no registered evolutions.
    #[error("species {0} has no evolution line")]
    NoEvolutionLine(SpeciesId),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            MovesNotAvailable | EvolutionsNotAvailable => ErrorSeverity::Fatal,
            MoveNotFound(_) | MoveSetNotFound(_) | NoEvolutionLine(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            MovesNotAvailable => "ORACLE_MOVES_NOT_AVAILABLE",
            EvolutionsNotAvailable => "ORACLE_EVOLUTIONS_NOT_AVAILABLE",
            MoveNotFound(_) => "ORACLE_MOVE_NOT_FOUND",
            MoveSetNotFound(_) => "ORACLE_MOVE_SET_NOT_FOUND",
            NoEvolutionLine(_) => "ORACLE_NO_EVOLUTION_LINE",
        }
    }
}
