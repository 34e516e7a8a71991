//! Enumeration types used throughout the engine.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Which side of the fight a battler is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    /// Player-controlled party leader or member.
    Player,
    /// AI-controlled battler fighting alongside the party.
    Ally,
    /// Hostile battler.
    #[default]
    Enemy,
}

impl Faction {
    /// Player and allies share a side.
    pub const fn is_player_aligned(self) -> bool {
        matches!(self, Faction::Player | Faction::Ally)
    }

    /// Whether a battler of this faction may strike one of `other`.
    pub const fn opposes(self, other: Faction) -> bool {
        self.is_player_aligned() != other.is_player_aligned()
    }

    /// Fixed capability: only enemies ever show a danger indicator.
    pub const fn shows_danger_indicator(self) -> bool {
        matches!(self, Faction::Enemy)
    }

    /// Whether the AI decision engine drives battlers of this faction.
    pub const fn is_ai_controlled(self) -> bool {
        !matches!(self, Faction::Player)
    }
}

/// Top-level engine state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnginePhase {
    /// Engine not running; the host's turn-based rules apply.
    #[default]
    Inactive,
    /// Ticking.
    Active,
    /// Still active for membership purposes, but time does not advance.
    Paused,
}

impl EnginePhase {
    /// Active or paused. Party membership is forced while this holds.
    pub const fn is_engaged_mode(self) -> bool {
        matches!(self, EnginePhase::Active | EnginePhase::Paused)
    }
}

/// Hitbox region of an action, laid out on the tile grid relative to the actor's facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum HitboxShape {
    /// The single tile in front of the actor.
    Adjacent,
    /// The tile in front plus its two side neighbours.
    Arc,
    /// A straight projectile line in front of the actor, stopped by walls.
    Line { length: u32 },
    /// Every tile within a Chebyshev radius around the actor.
    Burst { radius: u32 },
}

/// Threat rating of an enemy relative to the party leader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DangerLevel {
    Worthless,
    Simple,
    Moderate,
    Challenging,
    Dangerous,
    Deadly,
}

impl DangerLevel {
    /// Rate an enemy by `enemy_level - leader_level`.
    pub fn from_level_gap(gap: i32) -> Self {
        if gap <= DANGER_WORTHLESS_GAP {
            DangerLevel::Worthless
        } else if gap <= DANGER_SIMPLE_GAP {
            DangerLevel::Simple
        } else if gap <= DANGER_MODERATE_GAP {
            DangerLevel::Moderate
        } else if gap <= DANGER_CHALLENGING_GAP {
            DangerLevel::Challenging
        } else if gap <= DANGER_DANGEROUS_GAP {
            DangerLevel::Dangerous
        } else {
            DangerLevel::Deadly
        }
    }
}

/// Why a decision or hit was dropped instead of committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscardReason {
    /// The target died or left the map before the commit.
    StaleTarget,
    /// The actor itself is gone.
    StaleActor,
    /// Not enough mp for the chosen action.
    Unaffordable,
    /// The slot or action is not configured.
    MissingAction,
    /// The slot is still cooling down.
    NotReady,
}
