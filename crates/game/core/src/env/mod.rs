//! Traits describing read-only game data.
//!
//! Oracles expose the move catalog, the type chart and evolution lines. The
//! [`Env`] aggregate bundles them with the balance configuration so the rules
//! can access everything they need without hard coupling to concrete
//! implementations. Randomness is not part of the bundle: it is mutable and is
//! passed into each operation separately.
mod error;
mod evolution;
mod moves;
mod rng;
mod types;

pub use error::OracleError;
pub use evolution::EvolutionOracle;
pub use moves::MoveOracle;
pub use rng::{PcgRng, RngOracle};
pub use types::{Effectiveness, NeutralTypeChart, TypeChartOracle};

use crate::config::GameConfig;
use crate::progression::EvolutionRule;
use crate::state::{ElementType, MoveDef, SpeciesId};

static NEUTRAL_CHART: NeutralTypeChart = NeutralTypeChart;

/// Aggregates the configuration and read-only oracles used by the rules.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    config: &'a GameConfig,
    moves: Option<&'a dyn MoveOracle>,
    types: Option<&'a dyn TypeChartOracle>,
    evolutions: Option<&'a dyn EvolutionOracle>,
}

impl<'a> Env<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self {
            config,
            moves: None,
            types: None,
            evolutions: None,
        }
    }

    pub fn with_all(
        config: &'a GameConfig,
        moves: &'a dyn MoveOracle,
        types: &'a dyn TypeChartOracle,
        evolutions: &'a dyn EvolutionOracle,
    ) -> Self {
        Self {
            config,
            moves: Some(moves),
            types: Some(types),
            evolutions: Some(evolutions),
        }
    }

    #[must_use]
    pub fn with_moves(mut self, moves: &'a dyn MoveOracle) -> Self {
        self.moves = Some(moves);
        self
    }

    #[must_use]
    pub fn with_types(mut self, types: &'a dyn TypeChartOracle) -> Self {
        self.types = Some(types);
        self
    }

    #[must_use]
    pub fn with_evolutions(mut self, evolutions: &'a dyn EvolutionOracle) -> Self {
        self.evolutions = Some(evolutions);
        self
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    /// Returns the MoveOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::MovesNotAvailable` if no move oracle was provided.
    pub fn moves(&self) -> Result<&'a dyn MoveOracle, OracleError> {
        self.moves.ok_or(OracleError::MovesNotAvailable)
    }

    /// Returns the type chart, or a neutral chart when none was provided.
    pub fn types(&self) -> &'a dyn TypeChartOracle {
        match self.types {
            Some(types) => types,
            None => &NEUTRAL_CHART,
        }
    }

    /// Returns the EvolutionOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::EvolutionsNotAvailable` if no evolution oracle was provided.
    pub fn evolutions(&self) -> Result<&'a dyn EvolutionOracle, OracleError> {
        self.evolutions.ok_or(OracleError::EvolutionsNotAvailable)
    }

    /// Resolves the move set a combatant of `element` fights with.
    pub fn move_set(&self, element: ElementType) -> Result<Vec<MoveDef>, OracleError> {
        self.moves()?
            .move_set(element)
            .ok_or(OracleError::MoveSetNotFound(element))
    }

    /// Evolution rules leaving `species`; errors when the line is empty.
    pub fn evolution_line(&self, species: SpeciesId) -> Result<Vec<EvolutionRule>, OracleError> {
        let rules = self.evolutions()?.evolutions(species);
        if rules.is_empty() {
            return Err(OracleError::NoEvolutionLine(species));
        }
        Ok(rules)
    }
}

impl core::fmt::Debug for Env<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Env")
            .field("config", self.config)
            .field("moves", &self.moves.is_some())
            .field("types", &self.types.is_some())
            .field("evolutions", &self.evolutions.is_some())
            .finish()
    }
}
