//! Decision and commit step.
//!
//! Player actions queued since the last tick are validated and committed
//! first, then every living AI battler gets one decision from
//! `jabs_ai::decision::evaluate`. The commit list is handed on in ascending
//! battler id order. A committed action resets its cooldown here; its hitbox
//! is resolved in the hit step later in the same tick. Battlers that commit
//! do not move this tick.

use std::collections::{BTreeMap, BTreeSet};

use hecs::{Entity, World};

use jabs_ai::decision::{self, Decision, DecisionContext, SlotInfo, TargetInfo};
use jabs_core::components::{Battler, Dead, Loadout, PhaseState, Stats};
use jabs_core::data::GameData;
use jabs_core::enums::DiscardReason;
use jabs_core::events::EngineEvent;
use jabs_core::types::{ActionId, BattlerId, Facing, TilePos};
use jabs_map::{can_reach, TileMap};

use crate::engagement::EngagementTracker;
use crate::roster::Roster;
use crate::systems::cooldown;

/// An action committed this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit {
    pub battler: BattlerId,
    pub slot: usize,
    pub action: ActionId,
    pub target: Option<BattlerId>,
}

/// Everything the later steps of the tick need from this one.
#[derive(Debug, Default)]
pub struct DecisionOutcome {
    /// In ascending battler order.
    pub commits: Vec<Commit>,
    /// AI battlers that want to close in on a tile.
    pub moves: BTreeMap<BattlerId, TilePos>,
    /// Battlers that committed an action and stay put.
    pub committed: BTreeSet<BattlerId>,
}

pub fn run(
    world: &mut World,
    roster: &Roster,
    map: &TileMap,
    data: &GameData,
    tracker: &EngagementTracker,
    player_actions: &mut BTreeMap<BattlerId, usize>,
    events: &mut Vec<EngineEvent>,
) -> DecisionOutcome {
    let mut outcome = DecisionOutcome::default();

    for (id, slot) in std::mem::take(player_actions) {
        if let Some(commit) = commit_player_action(world, roster, data, tracker, id, slot, events) {
            outcome.committed.insert(id);
            outcome.commits.push(commit);
        }
    }

    for (id, entity) in roster.iter() {
        if outcome.committed.contains(&id) || !is_ai_battler(world, entity) {
            continue;
        }
        match decide(world, roster, map, data, tracker, id, entity) {
            Decision::Commit { slot, action, target } => {
                face_target(world, roster, entity, target);
                let commit = Commit {
                    battler: id,
                    slot,
                    action,
                    target: Some(target),
                };
                apply_commit(world, roster, data, commit, events);
                outcome.committed.insert(id);
                outcome.commits.push(commit);
            }
            Decision::StaleTarget { target } => {
                tracing::debug!("{id}: {target} went stale before commit, discarding");
                events.push(EngineEvent::ActionDiscarded {
                    battler: id,
                    slot: None,
                    reason: DiscardReason::StaleTarget,
                });
            }
            Decision::MoveToward { destination, .. } => {
                outcome.moves.insert(id, destination);
            }
            Decision::Idle => {}
        }
    }

    outcome.commits.sort_by_key(|c| c.battler);
    outcome
}

fn is_ai_battler(world: &World, entity: Entity) -> bool {
    let ai = world
        .get::<&Battler>(entity)
        .is_ok_and(|b| b.faction.is_ai_controlled());
    ai && world.get::<&Dead>(entity).is_err()
}

/// Build the decision context for one AI battler and evaluate it.
fn decide(
    world: &World,
    roster: &Roster,
    map: &TileMap,
    data: &GameData,
    tracker: &EngagementTracker,
    id: BattlerId,
    entity: Entity,
) -> Decision {
    let (Ok(position), Ok(stats), Ok(loadout)) = (
        world.get::<&TilePos>(entity).map(|p| *p),
        world.get::<&Stats>(entity),
        world.get::<&Loadout>(entity),
    ) else {
        tracing::debug!("{id}: incomplete battler record, skipping decision");
        return Decision::Idle;
    };
    let phase_key = world
        .get::<&PhaseState>(entity)
        .ok()
        .map(|state| state.current_key());

    let target = tracker
        .primary_target(id)
        .and_then(|target| target_info(world, roster, target));

    let slots: Vec<SlotInfo<'_>> = loadout
        .slots
        .iter()
        .enumerate()
        .map(|(slot, cooldown)| {
            let action = data.action(cooldown.action);
            let reaches = match (action, target) {
                (Some(action), Some(target)) => {
                    can_reach(position, target.position, action.hitbox, map)
                }
                _ => false,
            };
            SlotInfo {
                slot,
                ready: cooldown.is_ready(),
                action,
                reaches,
            }
        })
        .collect();

    decision::evaluate(&DecisionContext {
        battler: id,
        position,
        hp_percent: stats.hp_percent(),
        mp: stats.mp,
        phase_key,
        target,
        slots: &slots,
    })
}

fn target_info(world: &World, roster: &Roster, target: BattlerId) -> Option<TargetInfo> {
    let entity = roster.get(target)?;
    let position = *world.get::<&TilePos>(entity).ok()?;
    Some(TargetInfo {
        id: target,
        position,
        alive: target_alive(world, roster, target),
    })
}

/// Present in the roster, not marked dead, hp above zero.
pub fn target_alive(world: &World, roster: &Roster, target: BattlerId) -> bool {
    let Some(entity) = roster.get(target) else {
        return false;
    };
    world.get::<&Dead>(entity).is_err()
        && world.get::<&Stats>(entity).is_ok_and(|s| !s.is_dead())
}

fn face_target(world: &mut World, roster: &Roster, entity: Entity, target: BattlerId) {
    let Some(target_pos) = roster
        .get(target)
        .and_then(|e| world.get::<&TilePos>(e).ok().map(|p| *p))
    else {
        return;
    };
    let Ok(position) = world.get::<&TilePos>(entity).map(|p| *p) else {
        return;
    };
    if let (Some(facing), Ok(mut current)) = (
        position.facing_toward(&target_pos),
        world.get::<&mut Facing>(entity),
    ) {
        *current = facing;
    }
}

/// Validate and commit a queued player action. Discards are reported as
/// events and never interrupt the tick.
fn commit_player_action(
    world: &mut World,
    roster: &Roster,
    data: &GameData,
    tracker: &EngagementTracker,
    id: BattlerId,
    slot: usize,
    events: &mut Vec<EngineEvent>,
) -> Option<Commit> {
    let mut discard = |reason: DiscardReason| -> Option<Commit> {
        tracing::debug!("{id}: player action in slot {slot} discarded ({reason:?})");
        events.push(EngineEvent::ActionDiscarded {
            battler: id,
            slot: Some(slot),
            reason,
        });
        None
    };

    let Some(entity) = roster.get(id) else {
        return discard(DiscardReason::StaleActor);
    };
    if world.get::<&Dead>(entity).is_ok() {
        return discard(DiscardReason::StaleActor);
    }
    let Some(cooldown) = world
        .get::<&Loadout>(entity)
        .ok()
        .and_then(|l| l.get(slot).copied())
    else {
        return discard(DiscardReason::MissingAction);
    };
    let Some(action) = data.action(cooldown.action) else {
        return discard(DiscardReason::MissingAction);
    };
    if !cooldown.is_ready() {
        return discard(DiscardReason::NotReady);
    }
    let mp = world.get::<&Stats>(entity).map(|s| s.mp).unwrap_or(0);
    if !jabs_ai::conditions::affordable(action, mp) {
        return discard(DiscardReason::Unaffordable);
    }

    let commit = Commit {
        battler: id,
        slot,
        action: action.id,
        target: tracker.primary_target(id),
    };
    apply_commit(world, roster, data, commit, events);
    Some(commit)
}

/// Reset the cooldown, pay the mp cost and announce the commit.
fn apply_commit(
    world: &mut World,
    roster: &Roster,
    data: &GameData,
    commit: Commit,
    events: &mut Vec<EngineEvent>,
) {
    cooldown::commit(world, roster, commit.battler, commit.slot);
    let cost = data.action(commit.action).map_or(0, |a| a.mp_cost);
    if let Some(mut stats) = roster
        .get(commit.battler)
        .and_then(|e| world.get::<&mut Stats>(e).ok())
    {
        stats.mp = (stats.mp - cost).max(0);
    }
    tracing::debug!(
        "{} commits {} (slot {}) on {:?}",
        commit.battler,
        commit.action,
        commit.slot,
        commit.target
    );
    events.push(EngineEvent::ActionCommitted {
        battler: commit.battler,
        action: commit.action,
        slot: commit.slot,
        target: commit.target,
    });
}
