//! Repository layer for dynamic runtime data.
//!
//! Repositories hold data that CHANGES during play: player profiles and
//! inventories. Static content (species, moves, packs) is served by oracles,
//! not repositories.

mod error;
mod file;
mod memory;
mod traits;
mod types;

pub use error::RepositoryError;
pub use file::FilePlayerRepository;
pub use memory::InMemoryPlayerRepository;
pub use traits::PlayerRepository;
pub use types::{PlayerId, PlayerRecord, Profile};
