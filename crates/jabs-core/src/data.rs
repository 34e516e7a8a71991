//! Static data tables: actions, battler templates and loot.
//!
//! Read-only input to the engine. Usually deserialized from JSON once at
//! startup and then shared by reference.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::components::Stats;
use crate::constants::{DEFAULT_AGGRO_RADIUS, DEFAULT_DISENGAGE_RADIUS, DEFAULT_MOVE_INTERVAL};
use crate::enums::{Faction, HitboxShape};
use crate::error::DataError;
use crate::types::ActionId;

/// HP gate on an action, evaluated against the actor's remaining hp percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "when")]
pub enum HpCondition {
    /// Usable only while hp% is at or below `percent`.
    Below { percent: u32 },
    /// Usable only while hp% is at or above `percent`.
    Above { percent: u32 },
}

impl HpCondition {
    pub fn holds(&self, hp_percent: u32) -> bool {
        match *self {
            HpCondition::Below { percent } => hp_percent <= percent,
            HpCondition::Above { percent } => hp_percent >= percent,
        }
    }
}

/// Per-action configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionConfig {
    pub id: ActionId,
    pub name: String,
    /// Base power fed into the damage formula.
    pub power: i32,
    /// Furthest target distance (tiles) at which the AI considers this action.
    pub range: f64,
    /// Closest target distance (tiles) at which the AI considers this action.
    #[serde(default)]
    pub min_distance: f64,
    pub hitbox: HitboxShape,
    /// Cooldown in ticks.
    pub cooldown: u32,
    /// Static AI rank. Higher wins.
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub hp_condition: Option<HpCondition>,
    /// Phase keys in which the action is allowed. `None` = every phase.
    #[serde(default)]
    pub phases: Option<Vec<u8>>,
    /// Tiles a struck target is pushed along the actor's facing.
    #[serde(default)]
    pub knockback: u32,
    #[serde(default)]
    pub mp_cost: i32,
    /// Tp granted to the actor per connecting hit.
    #[serde(default)]
    pub tp_gain: i32,
}

impl ActionConfig {
    /// Whether the action may be used in the phase with `key`.
    pub fn allowed_in_phase(&self, key: u8) -> bool {
        self.phases
            .as_ref()
            .map_or(true, |keys| keys.contains(&key))
    }
}

/// Phase entry on a battler template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseConfig {
    pub name: String,
    pub key: u8,
    /// Phase becomes eligible once hp% drops to or below this value.
    pub hp_threshold: u32,
}

/// One roll on a loot table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootEntry {
    pub item: u32,
    /// Drop chance in percent (0..=100).
    pub chance: u32,
}

/// Everything needed to spawn a battler of a given kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattlerTemplate {
    pub name: String,
    pub faction: Faction,
    pub stats: Stats,
    /// Action per slot. Slot order is the AI tie-break order.
    pub actions: Vec<ActionId>,
    #[serde(default = "default_aggro_radius")]
    pub aggro_radius: f64,
    #[serde(default = "default_disengage_radius")]
    pub disengage_radius: f64,
    /// Require line of sight to enter engagement.
    #[serde(default)]
    pub requires_sight: bool,
    #[serde(default)]
    pub phases: Vec<PhaseConfig>,
    #[serde(default)]
    pub loot: Vec<LootEntry>,
    #[serde(default = "default_move_interval")]
    pub move_interval: u32,
}

fn default_aggro_radius() -> f64 {
    DEFAULT_AGGRO_RADIUS
}

fn default_disengage_radius() -> f64 {
    DEFAULT_DISENGAGE_RADIUS
}

fn default_move_interval() -> u32 {
    DEFAULT_MOVE_INTERVAL
}

/// The complete static table set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameData {
    pub actions: Vec<ActionConfig>,
    pub templates: Vec<BattlerTemplate>,
}

impl GameData {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let data: GameData = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    /// Read and parse a JSON file.
    pub fn load(path: &std::path::Path) -> Result<Self, DataError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn action(&self, id: ActionId) -> Option<&ActionConfig> {
        self.actions.iter().find(|a| a.id == id)
    }

    pub fn template(&self, name: &str) -> Option<&BattlerTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Structural checks that would otherwise surface as confusing runtime
    /// behavior. Dangling action references are left to the engine, which
    /// skips them per battler.
    pub fn validate(&self) -> Result<(), DataError> {
        let mut ids = BTreeSet::new();
        for action in &self.actions {
            if !ids.insert(action.id) {
                return Err(DataError::InvalidTable(format!(
                    "duplicate {}",
                    action.id
                )));
            }
        }

        let mut names = BTreeSet::new();
        for template in &self.templates {
            if !names.insert(template.name.as_str()) {
                return Err(DataError::InvalidTable(format!(
                    "duplicate template '{}'",
                    template.name
                )));
            }
            let mut keys = BTreeSet::new();
            for phase in &template.phases {
                if !keys.insert(phase.key) {
                    return Err(DataError::InvalidTable(format!(
                        "template '{}' repeats phase key {}",
                        template.name, phase.key
                    )));
                }
            }
            if !template.phases.is_empty() && !keys.contains(&0) {
                return Err(DataError::InvalidTable(format!(
                    "template '{}' has no opening phase (key 0)",
                    template.name
                )));
            }
        }
        Ok(())
    }
}
