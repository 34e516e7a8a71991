//! Engine snapshot: the HUD-facing state published after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{DangerLevel, EnginePhase, Faction};
use crate::events::EngineEvent;
use crate::types::{BattlerId, Facing, SimTime, TilePos};

/// Complete visible engine state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub time: SimTime,
    pub phase: EnginePhase,
    /// Membership predicate, forced true while the engine is active.
    pub party_in_battle: bool,
    /// Refresh request consumed at the end of this tick.
    pub refresh_menu: bool,
    pub battlers: Vec<BattlerView>,
    pub events: Vec<EngineEvent>,
}

/// One battler as the HUD sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattlerView {
    pub id: BattlerId,
    pub faction: Faction,
    pub template: String,
    pub position: TilePos,
    pub facing: Facing,
    pub hp: i32,
    pub max_hp: i32,
    pub mp: i32,
    pub tp: i32,
    pub dead: bool,
    pub engaged: bool,
    pub danger_indicator: bool,
    /// Only populated while the danger indicator is visible.
    pub danger_level: Option<DangerLevel>,
    /// Current phase name for phased battlers.
    pub phase: Option<String>,
    pub combo: u32,
    /// Slots whose cooldown is at zero.
    pub ready_slots: Vec<usize>,
}
