//! Evolution line oracle.

use crate::progression::EvolutionRule;
use crate::state::SpeciesId;

/// Oracle mapping a species to the forms it can evolve into.
pub trait EvolutionOracle: Send + Sync {
    /// All evolution rules whose `from` is `species`, possibly empty.
    fn evolutions(&self, species: SpeciesId) -> Vec<EvolutionRule>;
}
