//! Battle engine: the core of JABS.
//!
//! `JabsEngine` owns the hecs ECS world plus all engine-level state, applies
//! queued commands at the tick boundary, runs the systems in a fixed order
//! and produces `EngineSnapshot`s. Completely headless, enabling
//! deterministic testing.

use std::collections::{BTreeMap, VecDeque};

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use jabs_core::commands::EngineCommand;
use jabs_core::components::{Dead, Phase, PhaseState, Stats};
use jabs_core::constants::{COMBO_WINDOW_TICKS, DEFAULT_DAMAGE_VARIANCE_PCT};
use jabs_core::data::GameData;
use jabs_core::enums::EnginePhase;
use jabs_core::error::JabsError;
use jabs_core::events::EngineEvent;
use jabs_core::state::EngineSnapshot;
use jabs_core::types::{BattlerId, Facing, SimTime, TilePos};
use jabs_map::TileMap;

use crate::combo::ComboTracker;
use crate::engagement::EngagementTracker;
use crate::membership::{CombatMembership, EngineMembership, TurnBasedMembership};
use crate::refresh::RefreshLatch;
use crate::roster::Roster;
use crate::switches::SwitchStore;
use crate::systems;
use crate::systems::damage::DamageContext;
use crate::systems::hit::HitParams;
use crate::systems::snapshot::SnapshotHeader;
use crate::world_setup;

/// Engine tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// RNG seed for determinism. Same seed = same battle.
    pub seed: u64,
    /// Max ticks between two hits for the second to extend the combo.
    pub combo_window_ticks: u64,
    /// Symmetric damage spread in percent. 0 disables the roll.
    pub damage_variance_pct: u32,
    /// Unengaged AI battlers take random steps.
    pub idle_wander: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            combo_window_ticks: COMBO_WINDOW_TICKS,
            damage_variance_pct: DEFAULT_DAMAGE_VARIANCE_PCT,
            idle_wander: true,
        }
    }
}

/// The battle engine. Owns the ECS world and all engine state.
pub struct JabsEngine {
    world: World,
    roster: Roster,
    map: TileMap,
    data: GameData,
    config: EngineConfig,
    time: SimTime,
    phase: EnginePhase,
    rng: ChaCha8Rng,
    membership: EngineMembership<TurnBasedMembership>,
    engagement: EngagementTracker,
    combo: ComboTracker,
    refresh: RefreshLatch,
    switches: SwitchStore,
    command_queue: VecDeque<EngineCommand>,
    player_moves: BTreeMap<BattlerId, Facing>,
    player_actions: BTreeMap<BattlerId, usize>,
    events: Vec<EngineEvent>,
    despawn_buffer: Vec<(BattlerId, Entity)>,
}

impl JabsEngine {
    pub fn new(config: EngineConfig, map: TileMap, data: GameData) -> Self {
        Self {
            world: World::new(),
            roster: Roster::default(),
            map,
            data,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            time: SimTime::default(),
            phase: EnginePhase::default(),
            membership: EngineMembership::new(TurnBasedMembership::default()),
            engagement: EngagementTracker::default(),
            combo: ComboTracker::default(),
            refresh: RefreshLatch::default(),
            switches: SwitchStore::default(),
            command_queue: VecDeque::new(),
            player_moves: BTreeMap::new(),
            player_actions: BTreeMap::new(),
            events: Vec::new(),
            despawn_buffer: Vec::new(),
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: EngineCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = EngineCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the engine by one tick and return the resulting snapshot.
    ///
    /// Commands are applied first. Systems only run while the engine is
    /// active; a paused or inactive engine still reports a snapshot.
    pub fn tick(&mut self) -> EngineSnapshot {
        self.process_commands();

        let mut refresh_menu = false;
        if self.phase == EnginePhase::Active {
            refresh_menu = self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        self.build_snapshot(refresh_menu, events)
    }

    /// Read-only view of the current state. Carries no events and does not
    /// consume the refresh request.
    pub fn snapshot(&self) -> EngineSnapshot {
        self.build_snapshot(self.refresh.is_set(), Vec::new())
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn data(&self) -> &GameData {
        &self.data
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn engagement(&self) -> &EngagementTracker {
        &self.engagement
    }

    pub fn battler_ids(&self) -> Vec<BattlerId> {
        self.roster.ids()
    }

    // --- Collaborator queries ---

    /// Read-and-clear the refresh request. Many requests since the last
    /// consumption yield one `true`.
    pub fn request_menu_refresh(&mut self) -> bool {
        self.refresh.consume()
    }

    pub fn is_battler_engaged(&self, id: BattlerId) -> bool {
        self.engagement.is_engaged(id)
    }

    pub fn primary_target(&self, id: BattlerId) -> Option<BattlerId> {
        self.engagement.primary_target(id)
    }

    pub fn current_phase(&self, id: BattlerId) -> Option<Phase> {
        let entity = self.roster.get(id)?;
        let state = self.world.get::<&PhaseState>(entity).ok()?;
        Some(state.current_phase().clone())
    }

    /// Chain count of the attacker's latest hit, 0 once the window lapsed.
    pub fn combo_count(&self, attacker: BattlerId) -> u32 {
        self.combo
            .count(attacker, self.time.tick, self.config.combo_window_ticks)
    }

    /// Host predicate, forced true while the engine is active or paused.
    pub fn party_in_battle(&self) -> bool {
        self.membership.in_battle()
    }

    pub fn is_ready(&self, id: BattlerId, slot: usize) -> bool {
        systems::cooldown::is_ready(&self.world, &self.roster, id, slot)
    }

    /// Reset a slot's cooldown outside the tick (host-triggered skill use).
    /// Returns false for unknown battlers or slots.
    pub fn commit(&mut self, id: BattlerId, slot: usize) -> bool {
        systems::cooldown::commit(&mut self.world, &self.roster, id, slot).is_some()
    }

    pub fn stats(&self, id: BattlerId) -> Option<Stats> {
        let entity = self.roster.get(id)?;
        self.world.get::<&Stats>(entity).ok().map(|s| (*s).clone())
    }

    pub fn position(&self, id: BattlerId) -> Option<TilePos> {
        let entity = self.roster.get(id)?;
        self.world.get::<&TilePos>(entity).ok().map(|p| *p)
    }

    pub fn is_dead(&self, id: BattlerId) -> bool {
        self.roster
            .get(id)
            .is_some_and(|e| self.world.get::<&Dead>(e).is_ok())
    }

    // --- Host mutations ---

    pub fn switch(&self, switch: u32) -> bool {
        self.switches.get(switch)
    }

    /// Every write is a change notification and raises the refresh request.
    pub fn set_switch(&mut self, switch: u32, value: bool) {
        self.switches.set(switch, value);
        self.events.push(EngineEvent::SwitchChanged { switch, value });
        self.refresh.request();
    }

    pub fn set_turn_battle(&mut self, active: bool) {
        self.membership.inner_mut().set_turn_battle_active(active);
    }

    pub fn spawn_battler(
        &mut self,
        id: BattlerId,
        template: &str,
        position: TilePos,
    ) -> Result<(), JabsError> {
        world_setup::spawn_battler(
            &mut self.world,
            &mut self.roster,
            &self.data,
            id,
            template,
            position,
            self.time.tick,
        )?;
        self.refresh.request();
        Ok(())
    }

    /// Remove a battler without loot. Returns false if it was not present.
    pub fn remove_battler(&mut self, id: BattlerId) -> bool {
        let Some(entity) = self.roster.remove(id) else {
            return false;
        };
        let changes = self.engagement.detach(id);
        self.events.extend(changes.into_iter().map(|c| c.to_event()));
        self.combo.forget(id);
        self.player_moves.remove(&id);
        self.player_actions.remove(&id);
        let _ = self.world.despawn(entity);
        self.refresh.request();
        tracing::debug!("{id} removed");
        true
    }

    pub fn revive_battler(&mut self, id: BattlerId) -> Result<(), JabsError> {
        let entity = self
            .roster
            .get(id)
            .ok_or(JabsError::StaleReference { battler: id })?;
        world_setup::revive(&mut self.world, entity)?;
        self.combo.forget(id);
        self.events.push(EngineEvent::Revived { battler: id });
        self.refresh.request();
        Ok(())
    }

    /// Move a battler to a tile directly (host transfer or scripted event).
    pub fn place_battler(&mut self, id: BattlerId, position: TilePos) -> bool {
        let Some(entity) = self.roster.get(id) else {
            return false;
        };
        match self.world.get::<&mut TilePos>(entity) {
            Ok(mut pos) => {
                *pos = position;
                true
            }
            Err(_) => false,
        }
    }

    /// Set hp from outside combat (items, scripted events). Clamped to
    /// `1..=max_hp`; defeat only happens through hits. Dead battlers are
    /// left alone.
    pub fn set_hp(&mut self, id: BattlerId, hp: i32) -> bool {
        if self.is_dead(id) {
            return false;
        }
        let Some(entity) = self.roster.get(id) else {
            return false;
        };
        let Ok(mut stats) = self.world.get::<&mut Stats>(entity) else {
            return false;
        };
        stats.hp = hp.clamp(1, stats.max_hp.max(1));
        self.refresh.request();
        true
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::Activate => {
                if self.phase == EnginePhase::Inactive {
                    self.phase = EnginePhase::Active;
                    self.membership.set_engine_active(true);
                    self.refresh.request();
                    tracing::info!("engine activated at tick {}", self.time.tick);
                }
            }
            EngineCommand::Deactivate => {
                if self.phase != EnginePhase::Inactive {
                    self.phase = EnginePhase::Inactive;
                    self.membership.set_engine_active(false);
                    let changes = self.engagement.clear();
                    self.events.extend(changes.into_iter().map(|c| c.to_event()));
                    systems::engagement::sync_flags(&mut self.world, &self.roster, &self.engagement);
                    self.player_moves.clear();
                    self.player_actions.clear();
                    self.refresh.request();
                    tracing::info!("engine deactivated at tick {}", self.time.tick);
                }
            }
            EngineCommand::Pause => {
                if self.phase == EnginePhase::Active {
                    self.phase = EnginePhase::Paused;
                }
            }
            EngineCommand::Resume => {
                if self.phase == EnginePhase::Paused {
                    self.phase = EnginePhase::Active;
                }
            }
            EngineCommand::SpawnBattler {
                id,
                template,
                position,
            } => {
                if let Err(err) = self.spawn_battler(id, &template, position) {
                    tracing::warn!("spawn of {id} failed: {err}");
                }
            }
            EngineCommand::RemoveBattler { id } => {
                if !self.remove_battler(id) {
                    tracing::debug!("remove: {id} not present");
                }
            }
            EngineCommand::ReviveBattler { id } => {
                if let Err(err) = self.revive_battler(id) {
                    tracing::warn!("revive of {id} failed: {err}");
                }
            }
            EngineCommand::MovePlayer { id, direction } => {
                self.player_moves.insert(id, direction);
            }
            EngineCommand::PlayerAction { id, slot } => {
                self.player_actions.insert(id, slot);
            }
            EngineCommand::SetSwitch { switch, value } => {
                self.set_switch(switch, value);
            }
            EngineCommand::SetTurnBattle { active } => {
                self.set_turn_battle(active);
            }
        }
    }

    /// Run all systems in order. Returns the consumed refresh request.
    fn run_systems(&mut self) -> bool {
        let tick = self.time.tick;

        // 1. Cooldown scheduler
        systems::cooldown::run(&mut self.world);
        // 2. Phase thresholds
        systems::phase::run(
            &mut self.world,
            &self.roster,
            &mut self.refresh,
            &mut self.events,
        );
        // 3. Decisions and commits, resolved in battler id order
        let decisions = systems::ai::run(
            &mut self.world,
            &self.roster,
            &self.map,
            &self.data,
            &self.engagement,
            &mut self.player_actions,
            &mut self.events,
        );
        // 4. Movement for battlers that did not commit
        systems::movement::run(
            &mut self.world,
            &self.roster,
            &self.map,
            &mut self.player_moves,
            &decisions,
            &mut self.rng,
            self.config.idle_wander,
            tick,
        );
        // 5. Hit resolution
        let hits = systems::hit::run(
            &self.world,
            &self.roster,
            &self.map,
            &self.data,
            &decisions.commits,
            &self.combo,
            &mut self.rng,
            HitParams {
                combo_window: self.config.combo_window_ticks,
                damage_variance_pct: self.config.damage_variance_pct,
                tick,
            },
            &mut self.events,
        );
        // 6. Apply hits (damage, combo, knockback, death, loot), then despawn
        systems::damage::run(
            &mut self.world,
            &self.roster,
            &self.map,
            &self.data,
            hits,
            DamageContext {
                combo: &mut self.combo,
                engagement: &mut self.engagement,
                refresh: &mut self.refresh,
                rng: &mut self.rng,
                events: &mut self.events,
                combo_window: self.config.combo_window_ticks,
            },
        );
        systems::cleanup::run(&mut self.world, &mut self.roster, &mut self.despawn_buffer);
        // 7. Engagement update
        systems::engagement::run(
            &mut self.world,
            &self.roster,
            &self.map,
            &mut self.engagement,
            &mut self.refresh,
            &mut self.events,
            tick,
        );
        // 8. Refresh request
        self.refresh.consume()
    }

    fn build_snapshot(&self, refresh_menu: bool, events: Vec<EngineEvent>) -> EngineSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.roster,
            &self.combo,
            self.config.combo_window_ticks,
            SnapshotHeader {
                time: self.time,
                phase: self.phase,
                party_in_battle: self.party_in_battle(),
                refresh_menu,
            },
            events,
        )
    }
}
