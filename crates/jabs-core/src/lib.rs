//! Core types and definitions for the JABS action battle engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! battler components, static data tables, commands, engine events,
//! HUD snapshots, constants and the error taxonomy.
//! It has no dependency on the ECS or on any runtime loop.

pub mod commands;
pub mod components;
pub mod constants;
pub mod data;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
