//! Runtime orchestration for the creature gacha game.
//!
//! This crate wires the pure rules in `gacha-core` and the static data in
//! `gacha-content` to player persistence, species lookups, move providers and
//! an event bus. Consumers embed [`Runtime`] and drive the game through its
//! services.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the traits and errors downstream clients interact with
//! - [`services`] implements the player-facing operations
//! - [`events`] provides the topic-based event bus
//! - [`oracle`] and [`repository`] provide data adapters reused by other crates
pub mod api;
pub mod events;
pub mod oracle;
pub mod repository;
pub mod runtime;
pub mod services;

pub use api::{
    Clock, GreedyMoveProvider, ManualClock, MoveProvider, RandomMoveProvider,
    RepeatingMoveProvider, Result, RuntimeError, ScriptedMoveProvider, SpeciesProvider,
    SystemClock,
};
pub use events::{Acquisition, BattleEvent, BattleOutcome, EconomyEvent, Event, EventBus, Topic};
pub use oracle::{
    CachedSpeciesProvider, CatalogSpeciesProvider, OracleManager, RngSource, SeededRng,
};
pub use repository::{
    FilePlayerRepository, InMemoryPlayerRepository, PlayerId, PlayerRecord, PlayerRepository,
    Profile, RepositoryError,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use services::{
    BattleSummary, EnergyStatus, Encounter, EntryProgress, EvolutionOption, Evolved,
    StarterOffer,
};
