//! Tests for core types, components and data tables.

use crate::components::{Cooldown, Phase, PhaseState, Stats};
use crate::data::{GameData, HpCondition};
use crate::enums::*;
use crate::error::{DataError, JabsError};
use crate::types::{ActionId, Facing, SimTime, TilePos};

fn phase(name: &str, key: u8, hp_threshold: u32) -> Phase {
    Phase {
        name: name.into(),
        key,
        hp_threshold,
    }
}

// ---- Faction policy ----

#[test]
fn test_danger_indicator_only_for_enemies() {
    assert!(Faction::Enemy.shows_danger_indicator());
    assert!(!Faction::Player.shows_danger_indicator());
    assert!(!Faction::Ally.shows_danger_indicator());
}

#[test]
fn test_faction_opposition() {
    assert!(Faction::Player.opposes(Faction::Enemy));
    assert!(Faction::Enemy.opposes(Faction::Ally));
    assert!(!Faction::Player.opposes(Faction::Ally));
    assert!(!Faction::Enemy.opposes(Faction::Enemy));
}

#[test]
fn test_paused_engine_counts_as_engaged_mode() {
    assert!(EnginePhase::Active.is_engaged_mode());
    assert!(EnginePhase::Paused.is_engaged_mode());
    assert!(!EnginePhase::Inactive.is_engaged_mode());
}

// ---- Geometry ----

#[test]
fn test_tile_distance() {
    let a = TilePos::new(0, 0);
    assert_eq!(a.distance_to(&TilePos::new(4, 0)), 4.0);
    assert!((a.distance_to(&TilePos::new(3, 4)) - 5.0).abs() < 1e-9);
    assert_eq!(a.chebyshev_to(&TilePos::new(3, -4)), 4);
}

#[test]
fn test_facing_toward_prefers_horizontal_on_tie() {
    let a = TilePos::new(5, 5);
    assert_eq!(a.facing_toward(&TilePos::new(7, 7)), Some(Facing::Right));
    assert_eq!(a.facing_toward(&TilePos::new(5, 2)), Some(Facing::Up));
    assert_eq!(a.facing_toward(&TilePos::new(4, 5)), Some(Facing::Left));
    assert_eq!(a.facing_toward(&a), None);
}

#[test]
fn test_step_follows_screen_axes() {
    let a = TilePos::new(2, 2);
    assert_eq!(a.step(Facing::Up), TilePos::new(2, 1));
    assert_eq!(a.step(Facing::Down), TilePos::new(2, 3));
    assert_eq!(a.step(Facing::Left), TilePos::new(1, 2));
    assert_eq!(a.step(Facing::Right), TilePos::new(3, 2));
}

#[test]
fn test_sim_time_advance() {
    let mut t = SimTime::default();
    for _ in 0..60 {
        t.advance();
    }
    assert_eq!(t.tick, 60);
    assert!((t.elapsed_secs - 1.0).abs() < 1e-9);
}

// ---- Stats & cooldowns ----

#[test]
fn test_hp_percent_floors_and_clamps() {
    let mut stats = Stats {
        hp: 59,
        max_hp: 100,
        ..Default::default()
    };
    assert_eq!(stats.hp_percent(), 59);
    stats.hp = -20;
    assert_eq!(stats.hp_percent(), 0);
    assert!(stats.is_dead());
    stats.max_hp = 0;
    assert_eq!(stats.hp_percent(), 0);
}

#[test]
fn test_new_cooldown_is_ready() {
    let cd = Cooldown::new(ActionId(1), 30);
    assert!(cd.is_ready());
    assert_eq!(cd.duration, 30);
}

// ---- Phases ----

#[test]
fn test_phase_order_is_by_key() {
    let opening = phase("Opening", 0, 100);
    let desperate = phase("Desperate", 2, 20);
    assert!(opening < desperate);
    assert_eq!(phase("A", 1, 50), phase("B", 1, 10));
}

#[test]
fn test_phase_state_sorts_and_starts_at_lowest_key() {
    let state = PhaseState::new(vec![
        phase("Desperate", 2, 20),
        phase("Opening", 0, 100),
        phase("Pressured", 1, 50),
    ])
    .unwrap();
    assert_eq!(state.current_key(), 0);
    assert_eq!(state.current_phase().name, "Opening");
    assert_eq!(state.terminal_key(), 2);
    assert!(!state.is_terminal());
}

#[test]
fn test_phase_state_rejects_empty_and_duplicates() {
    assert!(matches!(
        PhaseState::new(vec![]),
        Err(JabsError::MissingConfiguration { .. })
    ));
    assert!(matches!(
        PhaseState::new(vec![phase("A", 0, 100), phase("B", 0, 50)]),
        Err(JabsError::InvariantViolation { .. })
    ));
}

#[test]
fn test_phase_state_forward_only_until_reset() {
    let mut state =
        PhaseState::new(vec![phase("Opening", 0, 100), phase("Pressured", 1, 50)]).unwrap();
    assert_eq!(state.advance_to(1), Ok(true));
    assert_eq!(state.advance_to(0), Ok(false));
    assert_eq!(state.current_key(), 1);
    assert!(state.is_terminal());
    assert!(state.advance_to(7).is_err());
    state.reset();
    assert_eq!(state.current_key(), 0);
}

// ---- Danger level ----

#[test]
fn test_danger_level_bands() {
    assert_eq!(DangerLevel::from_level_gap(-10), DangerLevel::Worthless);
    assert_eq!(DangerLevel::from_level_gap(-4), DangerLevel::Simple);
    assert_eq!(DangerLevel::from_level_gap(0), DangerLevel::Moderate);
    assert_eq!(DangerLevel::from_level_gap(3), DangerLevel::Challenging);
    assert_eq!(DangerLevel::from_level_gap(6), DangerLevel::Dangerous);
    assert_eq!(DangerLevel::from_level_gap(12), DangerLevel::Deadly);
}

// ---- Data tables ----

const SAMPLE_DATA: &str = r#"{
    "actions": [
        { "id": 1, "name": "Slash", "power": 10, "range": 1.5,
          "hitbox": { "kind": "Adjacent" }, "cooldown": 30 },
        { "id": 2, "name": "Fire Bolt", "power": 18, "range": 6.0, "min_distance": 2.0,
          "hitbox": { "kind": "Line", "length": 6 }, "cooldown": 90, "priority": 5,
          "hp_condition": { "when": "Below", "percent": 50 }, "phases": [1, 2], "mp_cost": 4 }
    ],
    "templates": [
        { "name": "slime", "faction": "Enemy",
          "stats": { "hp": 30, "max_hp": 30, "attack": 3, "defense": 1 },
          "actions": [1],
          "loot": [ { "item": 7, "chance": 50 } ] }
    ]
}"#;

#[test]
fn test_game_data_parses_with_defaults() {
    let data = GameData::from_json(SAMPLE_DATA).unwrap();

    let bolt = data.action(ActionId(2)).unwrap();
    assert_eq!(bolt.hitbox, HitboxShape::Line { length: 6 });
    assert_eq!(bolt.hp_condition, Some(HpCondition::Below { percent: 50 }));
    assert!(bolt.allowed_in_phase(2));
    assert!(!bolt.allowed_in_phase(0));
    assert!(data.action(ActionId(1)).unwrap().allowed_in_phase(0));

    let slime = data.template("slime").unwrap();
    assert_eq!(slime.stats.level, 1);
    assert_eq!(slime.aggro_radius, crate::constants::DEFAULT_AGGRO_RADIUS);
    assert_eq!(slime.move_interval, crate::constants::DEFAULT_MOVE_INTERVAL);
    assert!(data.template("dragon").is_none());
}

#[test]
fn test_game_data_rejects_duplicate_action_ids() {
    let json = r#"{
        "actions": [
            { "id": 1, "name": "A", "power": 1, "range": 1.0, "hitbox": { "kind": "Adjacent" }, "cooldown": 1 },
            { "id": 1, "name": "B", "power": 1, "range": 1.0, "hitbox": { "kind": "Adjacent" }, "cooldown": 1 }
        ],
        "templates": []
    }"#;
    assert!(matches!(
        GameData::from_json(json),
        Err(DataError::InvalidTable(_))
    ));
}

#[test]
fn test_game_data_requires_opening_phase() {
    let json = r#"{
        "actions": [],
        "templates": [
            { "name": "boss", "faction": "Enemy",
              "stats": { "hp": 1, "max_hp": 1, "attack": 1, "defense": 1 },
              "actions": [],
              "phases": [ { "name": "Late", "key": 1, "hp_threshold": 50 } ] }
        ]
    }"#;
    assert!(matches!(
        GameData::from_json(json),
        Err(DataError::InvalidTable(_))
    ));
}

#[test]
fn test_malformed_json_is_reported() {
    assert!(matches!(
        GameData::from_json("{ not json"),
        Err(DataError::Json(_))
    ));
}

#[test]
fn test_hp_condition() {
    assert!(HpCondition::Below { percent: 50 }.holds(50));
    assert!(!HpCondition::Below { percent: 50 }.holds(51));
    assert!(HpCondition::Above { percent: 80 }.holds(100));
    assert!(!HpCondition::Above { percent: 80 }.holds(79));
}
