//! Engagement tracker.
//!
//! Engagement is tracked per (attacker, target) pair:
//!
//! - Enemy side: an enemy engages a player-aligned battler once the distance
//!   drops to its aggro radius (and it can see the target, when it requires
//!   sight). It only lets go once the distance exceeds its disengage radius.
//!   The gap between the two radii is the hysteresis band that keeps a target
//!   sitting on the edge from flickering in and out.
//! - Player side: the player engages an enemy on hit contact, in either
//!   direction, and drops it past that enemy's disengage radius.
//!
//! AI allies follow the enemy-side rules with their own radii, and take
//! enemies as their targets.
//!
//! Sight is only needed to enter. Pairs are also dropped when either party
//! dies or leaves the roster.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use jabs_core::enums::Faction;
use jabs_core::events::EngineEvent;
use jabs_core::types::{BattlerId, TilePos};
use jabs_map::TileMap;

/// One live engagement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EngagementPair {
    pub attacker: BattlerId,
    pub target: BattlerId,
    /// Distance at the last update.
    pub distance: f64,
    /// Last tick the pair was inside aggro range or traded a hit.
    pub last_contact_tick: u64,
}

/// A battler as seen by the tracker for one update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngagementCandidate {
    pub id: BattlerId,
    pub faction: Faction,
    pub position: TilePos,
    pub alive: bool,
    pub aggro_radius: f64,
    pub disengage_radius: f64,
    pub requires_sight: bool,
}

/// Entry into or exit from a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngagementChange {
    pub attacker: BattlerId,
    pub target: BattlerId,
    pub engaged: bool,
}

impl EngagementChange {
    pub fn to_event(self) -> EngineEvent {
        if self.engaged {
            EngineEvent::Engaged {
                attacker: self.attacker,
                target: self.target,
            }
        } else {
            EngineEvent::Disengaged {
                attacker: self.attacker,
                target: self.target,
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EngagementTracker {
    pairs: BTreeMap<(BattlerId, BattlerId), EngagementPair>,
}

impl EngagementTracker {
    /// Re-evaluate every pair against the current positions.
    ///
    /// Candidates may be passed in any order; changes come out ordered by
    /// (attacker, target).
    pub fn update_engagement(
        &mut self,
        battlers: &[EngagementCandidate],
        map: &TileMap,
        tick: u64,
    ) -> Vec<EngagementChange> {
        let by_id: BTreeMap<BattlerId, &EngagementCandidate> =
            battlers.iter().map(|b| (b.id, b)).collect();
        let mut changes = Vec::new();

        // Parties that are gone or dead.
        let mut dropped = BTreeSet::new();
        for (&(attacker, target), _) in &self.pairs {
            let alive = |id: BattlerId| by_id.get(&id).is_some_and(|b| b.alive);
            if !alive(attacker) || !alive(target) {
                dropped.insert((attacker, target));
            }
        }

        // AI side: aggro radius to enter, disengage radius to leave.
        for seeker in by_id.values().filter(|b| b.alive && b.faction.is_ai_controlled()) {
            for quarry in by_id
                .values()
                .filter(|b| b.alive && b.faction.opposes(seeker.faction))
            {
                let key = (seeker.id, quarry.id);
                let distance = seeker.position.distance_to(&quarry.position);
                match self.pairs.get_mut(&key) {
                    Some(pair) => {
                        if distance > seeker.disengage_radius {
                            dropped.insert(key);
                        } else {
                            pair.distance = distance;
                            if distance <= seeker.aggro_radius {
                                pair.last_contact_tick = tick;
                            }
                        }
                    }
                    None => {
                        if distance <= seeker.aggro_radius
                            && (!seeker.requires_sight
                                || jabs_map::has_line_of_sight(
                                    map,
                                    &seeker.position,
                                    &quarry.position,
                                ))
                        {
                            self.pairs.insert(
                                key,
                                EngagementPair {
                                    attacker: seeker.id,
                                    target: quarry.id,
                                    distance,
                                    last_contact_tick: tick,
                                },
                            );
                            changes.push(EngagementChange {
                                attacker: seeker.id,
                                target: quarry.id,
                                engaged: true,
                            });
                        }
                    }
                }
            }
        }

        // Player side: released past the enemy's disengage radius.
        for (&key, pair) in self.pairs.iter_mut() {
            if dropped.contains(&key) {
                continue;
            }
            let (Some(attacker), Some(target)) = (by_id.get(&key.0), by_id.get(&key.1)) else {
                continue;
            };
            if attacker.faction.is_ai_controlled() {
                continue;
            }
            let distance = attacker.position.distance_to(&target.position);
            if distance > target.disengage_radius {
                dropped.insert(key);
            } else {
                pair.distance = distance;
            }
        }

        for key in dropped {
            if self.pairs.remove(&key).is_some() {
                changes.push(EngagementChange {
                    attacker: key.0,
                    target: key.1,
                    engaged: false,
                });
            }
        }

        changes.sort_by_key(|c| (c.attacker, c.target));
        changes
    }

    /// A hit landed between a player-aligned battler and an enemy, in either
    /// direction. Enters or refreshes the player-side pair.
    pub fn note_contact(
        &mut self,
        player_side: BattlerId,
        enemy: BattlerId,
        distance: f64,
        tick: u64,
    ) -> Option<EngagementChange> {
        let key = (player_side, enemy);
        if let Some(pair) = self.pairs.get_mut(&key) {
            pair.distance = distance;
            pair.last_contact_tick = tick;
            return None;
        }
        self.pairs.insert(
            key,
            EngagementPair {
                attacker: player_side,
                target: enemy,
                distance,
                last_contact_tick: tick,
            },
        );
        Some(EngagementChange {
            attacker: player_side,
            target: enemy,
            engaged: true,
        })
    }

    /// Drop every pair the battler takes part in.
    pub fn detach(&mut self, battler: BattlerId) -> Vec<EngagementChange> {
        let keys: Vec<_> = self
            .pairs
            .keys()
            .filter(|(a, t)| *a == battler || *t == battler)
            .copied()
            .collect();
        keys.into_iter()
            .filter_map(|key| self.pairs.remove(&key))
            .map(|pair| EngagementChange {
                attacker: pair.attacker,
                target: pair.target,
                engaged: false,
            })
            .collect()
    }

    /// Drop everything (engine deactivated).
    pub fn clear(&mut self) -> Vec<EngagementChange> {
        std::mem::take(&mut self.pairs)
            .into_values()
            .map(|pair| EngagementChange {
                attacker: pair.attacker,
                target: pair.target,
                engaged: false,
            })
            .collect()
    }

    /// True when the battler is the attacker of at least one pair.
    pub fn is_engaged(&self, battler: BattlerId) -> bool {
        self.pairs_of(battler).next().is_some()
    }

    /// Nearest engaged target, ties to the lowest id.
    pub fn primary_target(&self, battler: BattlerId) -> Option<BattlerId> {
        self.pairs_of(battler)
            .min_by(|a, b| {
                a.distance
                    .total_cmp(&b.distance)
                    .then(a.target.cmp(&b.target))
            })
            .map(|pair| pair.target)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn pairs_of(&self, battler: BattlerId) -> impl Iterator<Item = &EngagementPair> {
        self.pairs
            .range((battler, BattlerId(0))..=(battler, BattlerId(u32::MAX)))
            .map(|(_, pair)| pair)
    }
}
