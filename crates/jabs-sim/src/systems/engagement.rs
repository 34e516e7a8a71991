//! Engagement update: feed current positions to the tracker and mirror the
//! result into each battler's `Aggro` flags.

use hecs::World;

use jabs_core::components::{Aggro, Battler, Dead, Stats};
use jabs_core::events::EngineEvent;
use jabs_core::types::TilePos;
use jabs_map::TileMap;

use crate::engagement::{EngagementCandidate, EngagementTracker};
use crate::refresh::RefreshLatch;
use crate::roster::Roster;

pub fn run(
    world: &mut World,
    roster: &Roster,
    map: &TileMap,
    tracker: &mut EngagementTracker,
    refresh: &mut RefreshLatch,
    events: &mut Vec<EngineEvent>,
    tick: u64,
) {
    let candidates = candidates(world, roster);
    let changes = tracker.update_engagement(&candidates, map, tick);
    for change in &changes {
        if change.engaged {
            tracing::debug!("{} engaged {}", change.attacker, change.target);
        } else {
            tracing::debug!("{} disengaged from {}", change.attacker, change.target);
        }
        events.push(change.to_event());
    }
    if sync_flags(world, roster, tracker) || !changes.is_empty() {
        refresh.request();
    }
}

/// Set `engaged` and `danger_indicator_visible` from the tracker. Returns
/// whether any flag changed.
pub fn sync_flags(world: &mut World, roster: &Roster, tracker: &EngagementTracker) -> bool {
    let mut changed = false;
    for (id, entity) in roster.iter() {
        let shows_indicator = world
            .get::<&Battler>(entity)
            .is_ok_and(|b| b.show_danger_indicator());
        let Ok(mut aggro) = world.get::<&mut Aggro>(entity) else {
            continue;
        };
        let engaged = tracker.is_engaged(id);
        let visible = shows_indicator && engaged;
        if aggro.engaged != engaged || aggro.danger_indicator_visible != visible {
            aggro.engaged = engaged;
            aggro.danger_indicator_visible = visible;
            changed = true;
        }
    }
    changed
}

fn candidates(world: &World, roster: &Roster) -> Vec<EngagementCandidate> {
    roster
        .iter()
        .filter_map(|(id, entity)| {
            let faction = world.get::<&Battler>(entity).ok()?.faction;
            let position = *world.get::<&TilePos>(entity).ok()?;
            let aggro = *world.get::<&Aggro>(entity).ok()?;
            let alive = world.get::<&Dead>(entity).is_err()
                && world.get::<&Stats>(entity).is_ok_and(|s| !s.is_dead());
            Some(EngagementCandidate {
                id,
                faction,
                position,
                alive,
                aggro_radius: aggro.aggro_radius,
                disengage_radius: aggro.disengage_radius,
                requires_sight: aggro.requires_sight,
            })
        })
        .collect()
}
