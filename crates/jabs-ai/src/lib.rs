//! Battler AI for JABS.
//!
//! Implements the per-tick action decision and the boss phase state
//! machine. Everything here is a pure function over plain data so that
//! identical inputs always yield identical decisions.

pub mod conditions;
pub mod decision;
pub mod phase;

pub use jabs_core as core;

#[cfg(test)]
mod tests;
