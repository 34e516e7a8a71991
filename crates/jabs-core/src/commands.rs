//! Commands sent to the engine from the host or input layer.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::types::{BattlerId, Facing, TilePos};

/// All possible engine commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngineCommand {
    // --- Engine lifecycle ---
    /// Start the real-time loop.
    Activate,
    /// Stop the loop and return to turn-based rules.
    Deactivate,
    Pause,
    Resume,

    // --- Roster ---
    /// Spawn a battler from a template at a tile.
    SpawnBattler {
        id: BattlerId,
        template: String,
        position: TilePos,
    },
    /// Remove a battler from the map without loot.
    RemoveBattler { id: BattlerId },
    /// Restore hp and reset phase, cooldowns and combos.
    ReviveBattler { id: BattlerId },

    // --- Player input ---
    /// Step one tile (or turn, if blocked).
    MovePlayer { id: BattlerId, direction: Facing },
    /// Use the action in `slot`.
    PlayerAction { id: BattlerId, slot: usize },

    // --- Host flags ---
    SetSwitch { switch: u32, value: bool },
    /// Whether the host is running a turn-based battle.
    SetTurnBattle { active: bool },
}
