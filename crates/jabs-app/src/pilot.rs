//! Autopilot for the party leader in the headless demo.
//!
//! Walks toward the nearest living enemy, turns to face it once
//! orthogonally adjacent, then swings with the first ready slot.

use jabs_core::commands::EngineCommand;
use jabs_core::enums::Faction;
use jabs_core::state::{BattlerView, EngineSnapshot};

/// How a demo battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    Defeat,
}

fn leader(snapshot: &EngineSnapshot) -> Option<&BattlerView> {
    snapshot
        .battlers
        .iter()
        .find(|b| b.faction == Faction::Player && !b.dead)
}

fn nearest_enemy<'a>(snapshot: &'a EngineSnapshot, from: &BattlerView) -> Option<&'a BattlerView> {
    snapshot
        .battlers
        .iter()
        .filter(|b| b.faction == Faction::Enemy && !b.dead)
        .min_by(|a, b| {
            let da = from.position.distance_to(&a.position);
            let db = from.position.distance_to(&b.position);
            da.total_cmp(&db).then(a.id.cmp(&b.id))
        })
}

/// Commands for the leader this decision window.
pub fn next_commands(snapshot: &EngineSnapshot) -> Vec<EngineCommand> {
    let Some(hero) = leader(snapshot) else {
        return Vec::new();
    };
    let Some(enemy) = nearest_enemy(snapshot, hero) else {
        return Vec::new();
    };
    let Some(direction) = hero.position.facing_toward(&enemy.position) else {
        return Vec::new();
    };

    let adjacent = hero.position.distance_to(&enemy.position) <= 1.0;
    if !adjacent || hero.facing != direction {
        // Blocked by the enemy when adjacent, so this only turns.
        return vec![EngineCommand::MovePlayer {
            id: hero.id,
            direction,
        }];
    }
    match hero.ready_slots.first() {
        Some(&slot) => vec![EngineCommand::PlayerAction { id: hero.id, slot }],
        None => Vec::new(),
    }
}

/// `Some` once either side has no one left standing.
pub fn outcome(snapshot: &EngineSnapshot) -> Option<Outcome> {
    let standing = |faction: Faction| {
        snapshot
            .battlers
            .iter()
            .any(|b| b.faction == faction && !b.dead)
    };
    if !standing(Faction::Player) {
        Some(Outcome::Defeat)
    } else if !standing(Faction::Enemy) {
        Some(Outcome::Victory)
    } else {
        None
    }
}
