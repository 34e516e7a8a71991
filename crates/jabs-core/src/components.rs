//! ECS components making up a Battler Record.
//!
//! Components are plain data with a few read-only helpers.
//! Mutation rules live in the systems that own them:
//! cooldowns are decremented only by the scheduler and reset only on commit,
//! phase state only moves forward except on reset.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::data::PhaseConfig;
use crate::enums::Faction;
use crate::error::JabsError;
use crate::types::{ActionId, BattlerId};

/// Identity of a battler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battler {
    pub id: BattlerId,
    pub faction: Faction,
    /// Template the battler was spawned from (loot lookup, revive).
    pub template: String,
}

impl Battler {
    /// Fixed by faction and not overridable per battler.
    pub fn show_danger_indicator(&self) -> bool {
        self.faction.shows_danger_indicator()
    }
}

/// Core stats.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub hp: i32,
    pub max_hp: i32,
    #[serde(default)]
    pub mp: i32,
    #[serde(default)]
    pub max_mp: i32,
    #[serde(default)]
    pub tp: i32,
    #[serde(default)]
    pub max_tp: i32,
    pub attack: i32,
    pub defense: i32,
    #[serde(default = "default_level")]
    pub level: u32,
    /// Speed boost points: faster movement and a small damage bonus.
    #[serde(default)]
    pub speed_boost: i32,
}

fn default_level() -> u32 {
    1
}

impl Stats {
    /// Remaining hp as an integer percentage of max hp (0..=100).
    pub fn hp_percent(&self) -> u32 {
        if self.max_hp <= 0 {
            return 0;
        }
        let pct = (self.hp.max(0) as i64 * 100) / self.max_hp as i64;
        pct.clamp(0, 100) as u32
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }
}

/// Per-action recharge timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldown {
    pub action: ActionId,
    /// Configured duration in ticks.
    pub duration: u32,
    /// Ticks until ready. Unsigned, so never negative.
    pub remaining: u32,
}

impl Cooldown {
    pub fn new(action: ActionId, duration: u32) -> Self {
        Self {
            action,
            duration,
            remaining: 0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.remaining == 0
    }
}

/// Action slots of a battler. The index in `slots` is the slot number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    pub slots: Vec<Cooldown>,
}

impl Loadout {
    pub fn get(&self, slot: usize) -> Option<&Cooldown> {
        self.slots.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Cooldown> {
        self.slots.get_mut(slot)
    }
}

/// One ordered stage of a multi-stage battler. Ordered by `key` only.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,
    pub key: u8,
    /// Eligible once hp% is at or below this value.
    pub hp_threshold: u32,
}

impl PartialEq for Phase {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl PartialOrd for Phase {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Phase {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl From<&PhaseConfig> for Phase {
    fn from(cfg: &PhaseConfig) -> Self {
        Phase {
            name: cfg.name.clone(),
            key: cfg.key,
            hp_threshold: cfg.hp_threshold,
        }
    }
}

/// Attached phase progression. `current` always names a phase in `phases`.
/// Not deserializable: construction goes through `PhaseState::new`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseState {
    current: u8,
    phases: Vec<Phase>,
}

impl PhaseState {
    /// Build from a phase list. The list is sorted by key; keys must be
    /// unique and the lowest key becomes the starting phase.
    pub fn new(mut phases: Vec<Phase>) -> Result<Self, JabsError> {
        phases.sort();
        let first = phases.first().ok_or_else(|| JabsError::MissingConfiguration {
            what: "phase list is empty".into(),
        })?;
        if phases.windows(2).any(|w| w[0].key == w[1].key) {
            return Err(JabsError::InvariantViolation {
                what: "phase keys must be unique".into(),
            });
        }
        Ok(Self {
            current: first.key,
            phases,
        })
    }

    pub fn current_key(&self) -> u8 {
        self.current
    }

    pub fn current_phase(&self) -> &Phase {
        // `current` is only ever set to a key found in `phases`.
        self.phases
            .iter()
            .find(|p| p.key == self.current)
            .unwrap_or(&self.phases[0])
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn opening_key(&self) -> u8 {
        self.phases[0].key
    }

    pub fn terminal_key(&self) -> u8 {
        self.phases[self.phases.len() - 1].key
    }

    pub fn is_terminal(&self) -> bool {
        self.current == self.terminal_key()
    }

    /// Move to `key`. Refuses unknown keys and backward moves.
    /// Returns whether the current phase changed.
    pub fn advance_to(&mut self, key: u8) -> Result<bool, JabsError> {
        if !self.phases.iter().any(|p| p.key == key) {
            return Err(JabsError::InvariantViolation {
                what: format!("phase key {key} is not configured"),
            });
        }
        if key <= self.current {
            return Ok(false);
        }
        self.current = key;
        Ok(true)
    }

    /// Back to the opening phase (revive / full reset).
    pub fn reset(&mut self) {
        self.current = self.opening_key();
    }
}

/// Aggro configuration plus engagement-derived flags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aggro {
    pub aggro_radius: f64,
    /// Always strictly greater than `aggro_radius`.
    pub disengage_radius: f64,
    pub requires_sight: bool,
    /// Mirrors the engagement tracker after each tick.
    pub engaged: bool,
    /// Only ever true for enemies.
    pub danger_indicator_visible: bool,
}

/// Movement cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mobility {
    /// Ticks between tile steps after speed boost is applied.
    pub interval: u32,
    /// Earliest tick at which the next step may happen.
    pub next_step_tick: u64,
}

/// Marks a battler whose hp reached zero. Enemies are despawned once loot
/// is dispatched; player-aligned battlers stay on the map until revived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dead {
    pub tick: u64,
}
