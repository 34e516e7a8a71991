//! Headless JABS runner.
//!
//! Wires the engine crates into a real-time loop driven from a command
//! channel. The binary loads a config, starts a demo arena and lets a
//! simple autopilot play the party leader.

pub mod config;
pub mod game_loop;
pub mod pilot;
pub mod state;

pub use jabs_core as core;
