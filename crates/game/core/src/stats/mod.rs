//! Creature stats and the HP resource.
//!
//! Stats are four flat integers. Base values come from species data; an
//! inventory entry carries its own grown copy. HP is the only resource that
//! changes during a battle and is tracked by [`HpMeter`].

pub mod core;
pub mod resources;

pub use core::{StatKind, Stats};
pub use resources::HpMeter;
