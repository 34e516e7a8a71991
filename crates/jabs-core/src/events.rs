//! Events emitted by the engine each tick for HUD, logging and collaborators.

use serde::{Deserialize, Serialize};

use crate::enums::DiscardReason;
use crate::types::{ActionId, BattlerId, TilePos};

/// One target struck by one committed action. Produced and consumed within
/// a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitEvent {
    pub attacker: BattlerId,
    pub target: BattlerId,
    pub action: ActionId,
    pub damage: i32,
    /// Position in the attacker's chain against this target (1 = fresh).
    pub combo: u32,
    pub tick: u64,
}

/// Everything observable that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngineEvent {
    /// Attacker entered engagement with target.
    Engaged {
        attacker: BattlerId,
        target: BattlerId,
    },
    /// Attacker left engagement with target.
    Disengaged {
        attacker: BattlerId,
        target: BattlerId,
    },
    PhaseChanged {
        battler: BattlerId,
        from: u8,
        to: u8,
        name: String,
    },
    /// A battler committed an action (cooldown reset).
    ActionCommitted {
        battler: BattlerId,
        action: ActionId,
        slot: usize,
        target: Option<BattlerId>,
    },
    /// A decision or player action was dropped instead of committed.
    ActionDiscarded {
        battler: BattlerId,
        slot: Option<usize>,
        reason: DiscardReason,
    },
    Hit(HitEvent),
    Knockback {
        battler: BattlerId,
        to: TilePos,
    },
    Defeated {
        battler: BattlerId,
        by: Option<BattlerId>,
    },
    LootDropped {
        from: BattlerId,
        item: u32,
        at: TilePos,
    },
    Revived {
        battler: BattlerId,
    },
    SwitchChanged {
        switch: u32,
        value: bool,
    },
}
