//! Tile movement for battlers that did not commit an action this tick.
//!
//! Player steps are applied as soon as they arrive (the input layer owns the
//! repeat rate). AI battlers step at their mobility cadence: toward their
//! destination when they have one, otherwise an optional random wander while
//! unengaged. A step into a wall, off the map, or onto an occupied tile turns
//! the battler without moving it.

use std::collections::{BTreeMap, BTreeSet};

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use jabs_core::components::{Aggro, Battler, Dead, Mobility};
use jabs_core::constants::IDLE_WANDER_CHANCE;
use jabs_core::types::{BattlerId, Facing, TilePos};
use jabs_map::TileMap;

use crate::roster::Roster;
use crate::systems::ai::DecisionOutcome;

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    roster: &Roster,
    map: &TileMap,
    player_moves: &mut BTreeMap<BattlerId, Facing>,
    decisions: &DecisionOutcome,
    rng: &mut ChaCha8Rng,
    idle_wander: bool,
    tick: u64,
) {
    let mut occupied = occupied_tiles(world, roster);
    let player_moves = std::mem::take(player_moves);

    for (id, entity) in roster.iter() {
        if decisions.committed.contains(&id) || world.get::<&Dead>(entity).is_ok() {
            continue;
        }
        let Ok(position) = world.get::<&TilePos>(entity).map(|p| *p) else {
            continue;
        };
        let ai = world
            .get::<&Battler>(entity)
            .is_ok_and(|b| b.faction.is_ai_controlled());

        if !ai {
            if let Some(&direction) = player_moves.get(&id) {
                try_step(world, map, &mut occupied, entity, position, &[direction]);
            }
            continue;
        }

        let due = world
            .get::<&Mobility>(entity)
            .is_ok_and(|m| tick >= m.next_step_tick);
        if !due {
            continue;
        }

        if let Some(destination) = decisions.moves.get(&id) {
            let choices = approach_directions(position, *destination);
            try_step(world, map, &mut occupied, entity, position, &choices);
        } else if idle_wander && !is_engaged(world, entity) {
            if rng.gen_range(0..100) < IDLE_WANDER_CHANCE {
                let direction = Facing::ALL[rng.gen_range(0..Facing::ALL.len())];
                try_step(world, map, &mut occupied, entity, position, &[direction]);
            }
        } else {
            continue;
        }

        // One step attempt or wander roll per interval.
        if let Ok(mut mobility) = world.get::<&mut Mobility>(entity) {
            mobility.next_step_tick = tick + mobility.interval as u64;
        }
    }
}

/// Tiles held by living battlers.
pub fn occupied_tiles(world: &World, roster: &Roster) -> BTreeSet<TilePos> {
    roster
        .iter()
        .filter(|(_, e)| world.get::<&Dead>(*e).is_err())
        .filter_map(|(_, e)| world.get::<&TilePos>(e).ok().map(|p| *p))
        .collect()
}

/// Dominant axis first, then the other axis if it also closes distance.
fn approach_directions(from: TilePos, to: TilePos) -> Vec<Facing> {
    let Some(primary) = from.facing_toward(&to) else {
        return Vec::new();
    };
    let d = to.as_ivec2() - from.as_ivec2();
    let secondary = match primary {
        Facing::Left | Facing::Right if d.y > 0 => Some(Facing::Down),
        Facing::Left | Facing::Right if d.y < 0 => Some(Facing::Up),
        Facing::Up | Facing::Down if d.x > 0 => Some(Facing::Right),
        Facing::Up | Facing::Down if d.x < 0 => Some(Facing::Left),
        _ => None,
    };
    std::iter::once(primary).chain(secondary).collect()
}

/// Step along the first open direction. The battler turns toward the first
/// choice even when every choice is blocked.
fn try_step(
    world: &mut World,
    map: &TileMap,
    occupied: &mut BTreeSet<TilePos>,
    entity: Entity,
    from: TilePos,
    choices: &[Facing],
) -> bool {
    let Some(&first) = choices.first() else {
        return false;
    };
    let open = choices.iter().copied().find(|&dir| {
        let next = from.step(dir);
        map.is_passable(&next) && !occupied.contains(&next)
    });

    let facing = open.unwrap_or(first);
    if let Ok(mut current) = world.get::<&mut Facing>(entity) {
        *current = facing;
    }
    let Some(dir) = open else {
        return false;
    };
    let next = from.step(dir);
    if let Ok(mut pos) = world.get::<&mut TilePos>(entity) {
        *pos = next;
    }
    occupied.remove(&from);
    occupied.insert(next);
    true
}

fn is_engaged(world: &World, entity: Entity) -> bool {
    world.get::<&Aggro>(entity).is_ok_and(|a| a.engaged)
}
