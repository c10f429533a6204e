//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the services can stay focused on orchestration.

pub mod clock;
pub mod errors;
pub mod providers;
pub mod species;

pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::{Result, RuntimeError};
pub use providers::{
    GreedyMoveProvider, MoveProvider, RandomMoveProvider, RepeatingMoveProvider,
    ScriptedMoveProvider,
};
pub use species::SpeciesProvider;
