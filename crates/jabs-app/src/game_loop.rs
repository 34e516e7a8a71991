//! Game loop thread: runs the engine at the tick rate and logs what happens.
//!
//! The engine is moved into this thread. Commands arrive via an `mpsc`
//! channel and are queued for the next tick. After each tick the snapshot
//! is stored in shared state and, when enabled, the autopilot queues the
//! leader's next commands.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use jabs_core::constants::TICK_RATE;
use jabs_core::enums::EnginePhase;
use jabs_core::events::EngineEvent;
use jabs_core::state::EngineSnapshot;
use jabs_sim::JabsEngine;

use crate::pilot::{self, Outcome};
use crate::state::{GameLoopCommand, LoopState};

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    pub realtime: bool,
    /// Stop once engine time reaches this tick.
    pub max_ticks: Option<u64>,
    /// Ticks between autopilot decisions. `None` disables the autopilot.
    pub pilot_interval: Option<u64>,
}

/// How the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    pub ticks: u64,
    pub outcome: Option<Outcome>,
}

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(
    engine: JabsEngine,
    options: LoopOptions,
) -> std::io::Result<(LoopState, JoinHandle<LoopSummary>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let handle = std::thread::Builder::new()
        .name("jabs-game-loop".into())
        .spawn(move || run_game_loop(engine, cmd_rx, &shared, options))?;

    Ok((
        LoopState {
            command_tx: cmd_tx,
            latest_snapshot,
        },
        handle,
    ))
}

/// The game loop. Runs until Shutdown, channel disconnect, tick limit or a
/// decided battle.
fn run_game_loop(
    mut engine: JabsEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<EngineSnapshot>>,
    options: LoopOptions,
) -> LoopSummary {
    let mut next_tick_time = Instant::now();
    let mut outcome = None;

    'run: loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Engine(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => break 'run,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => break 'run,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();
        log_events(&snapshot.events);

        // 3. Autopilot and end conditions
        if snapshot.phase == EnginePhase::Active {
            if let Some(interval) = options.pilot_interval.filter(|i| *i > 0) {
                if snapshot.time.tick % interval == 0 {
                    engine.queue_commands(pilot::next_commands(&snapshot));
                }
            }
            outcome = pilot::outcome(&snapshot);
        }
        let tick = snapshot.time.tick;

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if outcome.is_some() || options.max_ticks.is_some_and(|max| tick >= max) {
            break;
        }

        // 5. Sleep until next tick
        if options.realtime {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind, reset to avoid a catch-up spiral
                next_tick_time = now;
            }
        }
    }

    let summary = LoopSummary {
        ticks: engine.time().tick,
        outcome,
    };
    tracing::info!("game loop stopped after {} ticks ({:?})", summary.ticks, summary.outcome);
    summary
}

/// Log the noteworthy events of one tick.
pub fn log_events(events: &[EngineEvent]) {
    for event in events {
        match event {
            EngineEvent::Hit(hit) => tracing::info!(
                "{} hit {} for {} (combo {})",
                hit.attacker,
                hit.target,
                hit.damage,
                hit.combo
            ),
            EngineEvent::Defeated { battler, by } => {
                tracing::info!("{battler} defeated (by {by:?})")
            }
            EngineEvent::PhaseChanged { battler, name, .. } => {
                tracing::info!("{battler} enters phase '{name}'")
            }
            EngineEvent::LootDropped { from, item, at } => {
                tracing::info!("{from} dropped item {item} at {at}")
            }
            EngineEvent::Engaged { attacker, target } => {
                tracing::debug!("{attacker} engaged {target}")
            }
            EngineEvent::Disengaged { attacker, target } => {
                tracing::debug!("{attacker} disengaged from {target}")
            }
            EngineEvent::ActionDiscarded {
                battler, reason, ..
            } => tracing::debug!("{battler}: action discarded ({reason:?})"),
            other => tracing::trace!("{other:?}"),
        }
    }
}
