//! Headless JABS demo.
//!
//! Usage: `jabs [config.json]`. Logging follows `RUST_LOG` (default `info`).

use std::path::PathBuf;

use anyhow::{Context, Result};

use jabs_app::config::AppConfig;
use jabs_app::game_loop::{self, LoopOptions};
use jabs_core::commands::EngineCommand;
use jabs_sim::scenario::Scenario;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;
    tracing::info!("starting {:?} (seed {})", config.scenario, config.engine.seed);

    let scenario = Scenario::load(config.scenario).context("loading scenario data")?;
    let mut engine = scenario
        .into_engine(config.engine.clone())
        .context("placing scenario battlers")?;
    engine.queue_command(EngineCommand::Activate);

    let options = LoopOptions {
        realtime: config.realtime,
        max_ticks: config.max_ticks,
        pilot_interval: Some(config.pilot_interval),
    };
    let (state, handle) =
        game_loop::spawn_game_loop(engine, options).context("spawning game loop thread")?;

    let summary = handle
        .join()
        .map_err(|_| anyhow::anyhow!("game loop thread panicked"))?;

    if let Some(snapshot) = state.latest() {
        for battler in &snapshot.battlers {
            tracing::info!(
                "{} ({}) hp {}/{}{}",
                battler.id,
                battler.template,
                battler.hp,
                battler.max_hp,
                if battler.dead { " [down]" } else { "" }
            );
        }
    }
    match summary.outcome {
        Some(outcome) => tracing::info!("battle over after {} ticks: {outcome:?}", summary.ticks),
        None => tracing::info!("stopped after {} ticks", summary.ticks),
    }
    Ok(())
}
