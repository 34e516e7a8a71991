//! Scenario definitions: hardcoded demo arenas.
//!
//! Each scenario bundles a tile map, the action and battler tables, and the
//! opening spawn list.

use serde::{Deserialize, Serialize};

use jabs_core::data::GameData;
use jabs_core::error::{DataError, JabsError};
use jabs_core::types::{BattlerId, TilePos};
use jabs_map::TileMap;

use crate::engine::{EngineConfig, JabsEngine};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioId {
    /// Open field with a handful of weak enemies.
    #[default]
    TrainingGrounds,
    /// Walled room with a three-phase boss.
    BossChamber,
}

/// One battler placed at scenario start.
#[derive(Debug, Clone, PartialEq)]
pub struct Spawn {
    pub id: BattlerId,
    pub template: String,
    pub position: TilePos,
}

impl Spawn {
    fn new(id: u32, template: &str, x: i32, y: i32) -> Self {
        Self {
            id: BattlerId(id),
            template: template.into(),
            position: TilePos::new(x, y),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scenario {
    pub id: ScenarioId,
    pub map: TileMap,
    pub data: GameData,
    pub spawns: Vec<Spawn>,
}

impl Scenario {
    pub fn load(id: ScenarioId) -> Result<Self, DataError> {
        let data = GameData::from_json(ARENA_DATA)?;
        match id {
            ScenarioId::TrainingGrounds => Ok(Self {
                id,
                map: TileMap::from_ascii(TRAINING_MAP)?,
                data,
                spawns: vec![
                    Spawn::new(1, "hero", 2, 6),
                    Spawn::new(2, "squire", 2, 8),
                    Spawn::new(10, "slime", 11, 4),
                    Spawn::new(11, "slime", 12, 9),
                    Spawn::new(12, "archer", 15, 6),
                ],
            }),
            ScenarioId::BossChamber => Ok(Self {
                id,
                map: TileMap::from_ascii(CHAMBER_MAP)?,
                data,
                spawns: vec![
                    Spawn::new(1, "hero", 7, 10),
                    Spawn::new(20, "warden", 7, 3),
                ],
            }),
        }
    }

    /// Build an engine with every opening spawn placed.
    pub fn into_engine(self, config: EngineConfig) -> Result<JabsEngine, JabsError> {
        let mut engine = JabsEngine::new(config, self.map, self.data);
        for spawn in &self.spawns {
            engine.spawn_battler(spawn.id, &spawn.template, spawn.position)?;
        }
        Ok(engine)
    }
}

const TRAINING_MAP: &str = "
##################
#................#
#................#
#.......##.......#
#.......##.......#
#................#
#................#
#....#...........#
#....#...........#
#................#
#................#
##################
";

const CHAMBER_MAP: &str = "
###############
#.............#
#.............#
#.............#
#...#.....#...#
#.............#
#.............#
#.............#
#...#.....#...#
#.............#
#.............#
#.............#
###############
";

const ARENA_DATA: &str = r#"{
    "actions": [
        { "id": 1, "name": "Slash", "power": 12, "range": 1.0,
          "hitbox": { "kind": "Adjacent" }, "cooldown": 20, "tp_gain": 5 },
        { "id": 2, "name": "Sweep", "power": 8, "range": 1.0,
          "hitbox": { "kind": "Arc" }, "cooldown": 45, "knockback": 1, "tp_gain": 3 },
        { "id": 3, "name": "Tackle", "power": 6, "range": 1.0,
          "hitbox": { "kind": "Adjacent" }, "cooldown": 60 },
        { "id": 4, "name": "Arrow", "power": 9, "range": 6.0, "min_distance": 2.0,
          "hitbox": { "kind": "Line", "length": 6 }, "cooldown": 90, "priority": 2 },
        { "id": 5, "name": "Crush", "power": 16, "range": 1.0,
          "hitbox": { "kind": "Arc" }, "cooldown": 50, "knockback": 2 },
        { "id": 6, "name": "Shockwave", "power": 14, "range": 2.0,
          "hitbox": { "kind": "Burst", "radius": 2 }, "cooldown": 120, "priority": 5,
          "phases": [1, 2] },
        { "id": 7, "name": "Last Stand", "power": 24, "range": 1.5,
          "hitbox": { "kind": "Burst", "radius": 1 }, "cooldown": 150, "priority": 9,
          "hp_condition": { "when": "Below", "percent": 20 }, "phases": [2] },
        { "id": 8, "name": "Mend Strike", "power": 10, "range": 1.0,
          "hitbox": { "kind": "Adjacent" }, "cooldown": 40, "mp_cost": 5, "priority": 1 }
    ],
    "templates": [
        { "name": "hero", "faction": "Player",
          "stats": { "hp": 120, "max_hp": 120, "mp": 30, "max_mp": 30, "max_tp": 100,
                     "attack": 6, "defense": 4, "level": 5, "speed_boost": 2 },
          "actions": [1, 2] },
        { "name": "squire", "faction": "Ally",
          "stats": { "hp": 80, "max_hp": 80, "mp": 20, "max_mp": 20,
                     "attack": 4, "defense": 3, "level": 4 },
          "actions": [1, 8],
          "aggro_radius": 5.0, "disengage_radius": 8.0 },
        { "name": "slime", "faction": "Enemy",
          "stats": { "hp": 30, "max_hp": 30, "attack": 2, "defense": 1, "level": 2 },
          "actions": [3],
          "aggro_radius": 3.0, "disengage_radius": 5.0,
          "loot": [ { "item": 101, "chance": 60 } ] },
        { "name": "archer", "faction": "Enemy",
          "stats": { "hp": 40, "max_hp": 40, "attack": 4, "defense": 2, "level": 6 },
          "actions": [4, 3],
          "aggro_radius": 6.0, "disengage_radius": 9.0, "requires_sight": true,
          "loot": [ { "item": 102, "chance": 40 }, { "item": 103, "chance": 10 } ] },
        { "name": "warden", "faction": "Enemy",
          "stats": { "hp": 400, "max_hp": 400, "attack": 8, "defense": 6, "level": 12 },
          "actions": [5, 6, 7],
          "aggro_radius": 8.0, "disengage_radius": 12.0, "move_interval": 20,
          "phases": [
              { "name": "Composed", "key": 0, "hp_threshold": 100 },
              { "name": "Pressured", "key": 1, "hp_threshold": 50 },
              { "name": "Desperate", "key": 2, "hp_threshold": 20 }
          ],
          "loot": [ { "item": 900, "chance": 100 } ] }
    ]
}"#;
