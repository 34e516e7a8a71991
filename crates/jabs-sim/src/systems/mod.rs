//! Per-tick systems, one per step of the engine tick.
//!
//! Systems are free functions over `&mut World` plus the engine-owned state
//! they need. Anything order-sensitive walks the roster, which iterates in
//! ascending battler id.

pub mod ai;
pub mod cleanup;
pub mod cooldown;
pub mod damage;
pub mod engagement;
pub mod hit;
pub mod movement;
pub mod phase;
pub mod snapshot;
