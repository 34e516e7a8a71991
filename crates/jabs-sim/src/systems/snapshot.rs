//! Snapshot system: queries the world and builds the HUD-facing snapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::{Entity, World};

use jabs_core::components::*;
use jabs_core::enums::{DangerLevel, EnginePhase, Faction};
use jabs_core::events::EngineEvent;
use jabs_core::state::{BattlerView, EngineSnapshot};
use jabs_core::types::{Facing, SimTime, TilePos};

use crate::combo::ComboTracker;
use crate::roster::Roster;

/// Engine-level values copied into the snapshot as-is.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotHeader {
    pub time: SimTime,
    pub phase: EnginePhase,
    pub party_in_battle: bool,
    pub refresh_menu: bool,
}

pub fn build_snapshot(
    world: &World,
    roster: &Roster,
    combo: &ComboTracker,
    combo_window: u64,
    header: SnapshotHeader,
    events: Vec<EngineEvent>,
) -> EngineSnapshot {
    let leader_level = find_leader_level(world, roster);
    let battlers = roster
        .iter()
        .filter_map(|(_, entity)| {
            build_battler(world, entity, leader_level, combo, combo_window, header.time.tick)
        })
        .collect();

    EngineSnapshot {
        time: header.time,
        phase: header.phase,
        party_in_battle: header.party_in_battle,
        refresh_menu: header.refresh_menu,
        battlers,
        events,
    }
}

/// Level of the lowest-id player battler, the party leader.
fn find_leader_level(world: &World, roster: &Roster) -> Option<u32> {
    roster.iter().find_map(|(_, entity)| {
        let is_player = world
            .get::<&Battler>(entity)
            .is_ok_and(|b| b.faction == Faction::Player);
        if !is_player {
            return None;
        }
        world.get::<&Stats>(entity).ok().map(|s| s.level)
    })
}

fn build_battler(
    world: &World,
    entity: Entity,
    leader_level: Option<u32>,
    combo: &ComboTracker,
    combo_window: u64,
    now: u64,
) -> Option<BattlerView> {
    let battler = world.get::<&Battler>(entity).ok()?;
    let stats = world.get::<&Stats>(entity).ok()?;
    let position = *world.get::<&TilePos>(entity).ok()?;
    let facing = world.get::<&Facing>(entity).map(|f| *f).unwrap_or_default();
    let aggro = world.get::<&Aggro>(entity).ok().map(|a| *a);
    let danger_indicator = aggro.is_some_and(|a| a.danger_indicator_visible);

    let danger_level = if danger_indicator {
        leader_level.map(|leader| DangerLevel::from_level_gap(stats.level as i32 - leader as i32))
    } else {
        None
    };
    let phase = world
        .get::<&PhaseState>(entity)
        .ok()
        .map(|state| state.current_phase().name.clone());
    let ready_slots = world
        .get::<&Loadout>(entity)
        .map(|loadout| {
            loadout
                .slots
                .iter()
                .enumerate()
                .filter(|(_, c)| c.is_ready())
                .map(|(slot, _)| slot)
                .collect()
        })
        .unwrap_or_default();

    Some(BattlerView {
        id: battler.id,
        faction: battler.faction,
        template: battler.template.clone(),
        position,
        facing,
        hp: stats.hp,
        max_hp: stats.max_hp,
        mp: stats.mp,
        tp: stats.tp,
        dead: world.get::<&Dead>(entity).is_ok(),
        engaged: aggro.is_some_and(|a| a.engaged),
        danger_indicator,
        danger_level,
        phase,
        combo: combo.count(battler.id, now, combo_window),
        ready_slots,
    })
}
