//! Battle engine for JABS.
//!
//! Owns the hecs ECS world, runs the systems in a fixed per-tick order and
//! produces `EngineSnapshot`s for the HUD and host collaborators.

pub mod combo;
pub mod engagement;
pub mod engine;
pub mod membership;
pub mod refresh;
pub mod roster;
pub mod scenario;
pub mod switches;
pub mod systems;
pub mod world_setup;

pub use jabs_core as core;
pub use engine::{EngineConfig, JabsEngine};
