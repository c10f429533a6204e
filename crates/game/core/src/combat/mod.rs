//! Turn resolution.
//!
//! Pure functions that resolve one move from an attacker against a defender.
//! Randomness enters either through an `RngOracle` or as explicit
//! [`TurnRolls`], which is the seam tests use to pin outcomes.
//!
//! # Core Functions
//!
//! - `resolve_turn`: draw rolls, then resolve
//! - `resolve_turn_with_rolls`: accuracy check, heal or damage, cooldown bookkeeping
//! - `calculate_damage`: level/power/stat formula with variance, crit, type and floor

pub mod damage;
pub mod error;
pub mod hit;
pub mod result;

pub use damage::{DamageModifiers, calculate_damage, min_damage_floor};
pub use error::TurnError;
pub use hit::{TurnRolls, check_critical, check_hit};
pub use result::{
    TurnOutcome, TurnTarget, heal_amount, resolve_turn, resolve_turn_with_rolls, validate_turn,
};
