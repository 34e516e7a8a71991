//! Apply pending hits: hp, tp, combo chains, engagement contact, knockback,
//! death and loot. Hits are applied in the order the hit step produced them.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use jabs_core::components::{Battler, Dead, Stats};
use jabs_core::data::GameData;
use jabs_core::enums::Faction;
use jabs_core::events::EngineEvent;
use jabs_core::types::{BattlerId, TilePos};
use jabs_map::TileMap;

use crate::combo::ComboTracker;
use crate::engagement::EngagementTracker;
use crate::refresh::RefreshLatch;
use crate::roster::Roster;
use crate::systems::hit::PendingHit;
use crate::systems::movement::occupied_tiles;

/// Engine state the damage step mutates besides the world.
pub struct DamageContext<'a> {
    pub combo: &'a mut ComboTracker,
    pub engagement: &'a mut EngagementTracker,
    pub refresh: &'a mut RefreshLatch,
    pub rng: &'a mut ChaCha8Rng,
    pub events: &'a mut Vec<EngineEvent>,
    pub combo_window: u64,
}

pub fn run(
    world: &mut World,
    roster: &Roster,
    map: &TileMap,
    data: &GameData,
    pending: Vec<PendingHit>,
    ctx: DamageContext<'_>,
) {
    if pending.is_empty() {
        return;
    }
    let DamageContext {
        combo,
        engagement,
        refresh,
        rng,
        events,
        combo_window,
    } = ctx;

    for pending_hit in pending {
        let hit = pending_hit.hit;
        let Some(target) = roster.get(hit.target) else {
            tracing::debug!("{} left before {}'s hit landed", hit.target, hit.attacker);
            continue;
        };
        if world.get::<&Dead>(target).is_ok() {
            continue;
        }

        let remaining = match world.get::<&mut Stats>(target) {
            Ok(mut stats) => {
                stats.hp = (stats.hp - hit.damage).max(0);
                stats.hp
            }
            Err(_) => continue,
        };

        let chain = combo.record(hit.attacker, hit.target, hit.tick, combo_window);
        debug_assert_eq!(chain, hit.combo);
        tracing::debug!(
            "{} hits {} for {} (combo {chain}, {} hp left)",
            hit.attacker,
            hit.target,
            hit.damage,
            remaining
        );
        events.push(EngineEvent::Hit(hit));
        refresh.request();

        let attacker = roster.get(hit.attacker);
        if let Some(mut stats) = attacker.and_then(|e| world.get::<&mut Stats>(e).ok()) {
            stats.tp = (stats.tp + pending_hit.tp_gain).clamp(0, stats.max_tp.max(0));
        }

        if let Some(attacker) = attacker {
            note_contact(world, engagement, events, attacker, target, hit.tick);
        }

        if remaining > 0 {
            if pending_hit.knockback > 0 {
                knock_back(world, roster, map, target, hit.target, pending_hit, events);
            }
            continue;
        }

        // Defeated.
        let _ = world.insert_one(target, Dead { tick: hit.tick });
        tracing::info!("{} defeated by {}", hit.target, hit.attacker);
        events.push(EngineEvent::Defeated {
            battler: hit.target,
            by: Some(hit.attacker),
        });
        events.extend(engagement.detach(hit.target).into_iter().map(|c| c.to_event()));
        combo.forget(hit.target);
        drop_loot(world, data, target, hit.target, rng, events);
    }
}

/// Record contact between a player-aligned battler and an enemy, whichever
/// side struck.
fn note_contact(
    world: &World,
    engagement: &mut EngagementTracker,
    events: &mut Vec<EngineEvent>,
    attacker: Entity,
    target: Entity,
    tick: u64,
) {
    let side = |e: Entity| {
        let battler = world.get::<&Battler>(e).ok()?;
        let position = *world.get::<&TilePos>(e).ok()?;
        Some((battler.id, battler.faction, position))
    };
    let (Some(a), Some(t)) = (side(attacker), side(target)) else {
        return;
    };
    let (player, enemy) = match (a.1, t.1) {
        (Faction::Player, f) if f.opposes(Faction::Player) => (a, t),
        (f, Faction::Player) if f.opposes(Faction::Player) => (t, a),
        _ => return,
    };
    let distance = player.2.distance_to(&enemy.2);
    if let Some(change) = engagement.note_contact(player.0, enemy.0, distance, tick) {
        tracing::debug!("{} engaged {} on contact", player.0, enemy.0);
        events.push(change.to_event());
    }
}

fn knock_back(
    world: &mut World,
    roster: &Roster,
    map: &TileMap,
    entity: Entity,
    id: BattlerId,
    pending_hit: PendingHit,
    events: &mut Vec<EngineEvent>,
) {
    let Ok(start) = world.get::<&TilePos>(entity).map(|p| *p) else {
        return;
    };
    let occupied = occupied_tiles(world, roster);
    let mut end = start;
    for _ in 0..pending_hit.knockback {
        let next = end.step(pending_hit.direction);
        if !map.is_passable(&next) || occupied.contains(&next) {
            break;
        }
        end = next;
    }
    if end == start {
        return;
    }
    if let Ok(mut pos) = world.get::<&mut TilePos>(entity) {
        *pos = end;
    }
    events.push(EngineEvent::Knockback { battler: id, to: end });
}

/// Roll the defeated battler's loot table. Player-aligned battlers drop
/// nothing.
fn drop_loot(
    world: &World,
    data: &GameData,
    entity: Entity,
    id: BattlerId,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<EngineEvent>,
) {
    let Ok(battler) = world.get::<&Battler>(entity) else {
        return;
    };
    if battler.faction.is_player_aligned() {
        return;
    }
    let Some(template) = data.template(&battler.template) else {
        tracing::warn!("{id}: template '{}' vanished, no loot", battler.template);
        return;
    };
    let at = world.get::<&TilePos>(entity).map(|p| *p).unwrap_or_default();
    for entry in &template.loot {
        if rng.gen_range(0..100) < entry.chance {
            tracing::info!("{id} dropped item {} at {at}", entry.item);
            events.push(EngineEvent::LootDropped {
                from: id,
                item: entry.item,
                at,
            });
        }
    }
}
