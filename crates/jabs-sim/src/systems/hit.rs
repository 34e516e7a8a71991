//! Hit resolution: enumerate the targets inside each committed action's
//! hitbox and produce one pending hit per target.
//!
//! Nothing is applied here. Damage is tracked provisionally so a target that
//! would fall to an earlier commit is left out of later hitboxes in the same
//! tick; the damage step applies the hits in order.

use std::collections::{BTreeMap, BTreeSet};

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use jabs_core::components::{Battler, Dead, PhaseState, Stats};
use jabs_core::constants::*;
use jabs_core::data::GameData;
use jabs_core::enums::DiscardReason;
use jabs_core::events::{EngineEvent, HitEvent};
use jabs_core::types::{BattlerId, Facing, TilePos};
use jabs_map::{hitbox_tiles, TileMap};

use crate::combo::ComboTracker;
use crate::roster::Roster;
use crate::systems::ai::Commit;

/// A hit waiting to be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingHit {
    pub hit: HitEvent,
    /// Tiles to push the target back.
    pub knockback: u32,
    /// Attacker facing at commit time; the knockback direction.
    pub direction: Facing,
    pub tp_gain: i32,
}

/// Tuning shared by every hit this tick.
#[derive(Debug, Clone, Copy)]
pub struct HitParams {
    pub combo_window: u64,
    pub damage_variance_pct: u32,
    pub tick: u64,
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &World,
    roster: &Roster,
    map: &TileMap,
    data: &GameData,
    commits: &[Commit],
    combo: &ComboTracker,
    rng: &mut ChaCha8Rng,
    params: HitParams,
    events: &mut Vec<EngineEvent>,
) -> Vec<PendingHit> {
    let mut pending = Vec::new();
    let mut provisional_hp: BTreeMap<BattlerId, i32> = BTreeMap::new();
    let mut fallen: BTreeSet<BattlerId> = BTreeSet::new();

    for commit in commits {
        let actor = commit.battler;
        let Some(entity) = roster.get(actor) else {
            events.push(EngineEvent::ActionDiscarded {
                battler: actor,
                slot: Some(commit.slot),
                reason: DiscardReason::StaleActor,
            });
            continue;
        };
        if world.get::<&Dead>(entity).is_ok() || fallen.contains(&actor) {
            tracing::debug!("{actor} fell before its action resolved");
            events.push(EngineEvent::ActionDiscarded {
                battler: actor,
                slot: Some(commit.slot),
                reason: DiscardReason::StaleActor,
            });
            continue;
        }
        let Some(action) = data.action(commit.action) else {
            continue;
        };
        let (Ok(origin), Ok(facing), Ok(attacker), Ok(stats)) = (
            world.get::<&TilePos>(entity).map(|p| *p),
            world.get::<&Facing>(entity).map(|f| *f),
            world.get::<&Battler>(entity).map(|b| b.faction),
            world.get::<&Stats>(entity).map(|s| (*s).clone()),
        ) else {
            continue;
        };
        let phase_key = world
            .get::<&PhaseState>(entity)
            .map_or(0, |state| state.current_key());

        let tiles = hitbox_tiles(origin, facing, action.hitbox, map);

        for (target, target_entity) in roster.iter() {
            if target == actor || fallen.contains(&target) {
                continue;
            }
            if world.get::<&Dead>(target_entity).is_ok() {
                continue;
            }
            let Ok(faction) = world.get::<&Battler>(target_entity).map(|b| b.faction) else {
                continue;
            };
            if !attacker.opposes(faction) {
                continue;
            }
            let Ok(position) = world.get::<&TilePos>(target_entity).map(|p| *p) else {
                continue;
            };
            if !tiles.contains(&position) {
                continue;
            }
            let Ok(defender) = world.get::<&Stats>(target_entity).map(|s| (*s).clone()) else {
                continue;
            };

            let damage = roll_damage(
                action.power,
                &stats,
                phase_key,
                &defender,
                params.damage_variance_pct,
                rng,
            );
            let hp = provisional_hp.entry(target).or_insert(defender.hp);
            *hp -= damage;
            if *hp <= 0 {
                fallen.insert(target);
            }

            pending.push(PendingHit {
                hit: HitEvent {
                    attacker: actor,
                    target,
                    action: action.id,
                    damage,
                    combo: combo.next_index(actor, target, params.tick, params.combo_window),
                    tick: params.tick,
                },
                knockback: action.knockback,
                direction: facing,
                tp_gain: action.tp_gain,
            });
        }
    }

    pending
}

/// Damage before variance.
pub fn base_damage(power: i32, attacker: &Stats, phase_key: u8, defender: &Stats) -> i32 {
    let raw = power + attacker.attack * ATTACK_FACTOR - defender.defense * DEFENSE_FACTOR;
    let scale = 100 + attacker.speed_boost * SPEED_BOOST_DAMAGE_PCT
        + phase_key as i32 * PHASE_DAMAGE_BONUS_PCT;
    (raw * scale.max(0) / 100).max(MIN_DAMAGE)
}

/// Damage with a symmetric random spread of `variance_pct` percent.
pub fn roll_damage(
    power: i32,
    attacker: &Stats,
    phase_key: u8,
    defender: &Stats,
    variance_pct: u32,
    rng: &mut ChaCha8Rng,
) -> i32 {
    let base = base_damage(power, attacker, phase_key, defender);
    let spread = base * variance_pct as i32 / 100;
    if spread <= 0 {
        return base;
    }
    (base + rng.gen_range(-spread..=spread)).max(MIN_DAMAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(attack: i32, defense: i32) -> Stats {
        Stats {
            hp: 100,
            max_hp: 100,
            attack,
            defense,
            level: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_base_damage_formula() {
        // 10 + 5*4 - 3*2 = 24
        assert_eq!(base_damage(10, &stats(5, 0), 0, &stats(0, 3)), 24);
        // Phase 2 adds 20%.
        assert_eq!(base_damage(10, &stats(5, 0), 2, &stats(0, 3)), 28);
        // Never below the floor.
        assert_eq!(base_damage(1, &stats(0, 0), 0, &stats(0, 50)), MIN_DAMAGE);
    }
}
