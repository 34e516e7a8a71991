//! State shared between the driver and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use jabs_core::commands::EngineCommand;
use jabs_core::state::EngineSnapshot;

/// Commands sent from the driver to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// An engine command to queue for the next tick.
    Engine(EngineCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handle held by the driver while the loop runs.
pub struct LoopState {
    pub command_tx: mpsc::Sender<GameLoopCommand>,
    /// Latest snapshot, updated by the loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<EngineSnapshot>>>,
}

impl LoopState {
    /// Forward an engine command. Returns false once the loop has exited.
    pub fn send(&self, command: EngineCommand) -> bool {
        self.command_tx.send(GameLoopCommand::Engine(command)).is_ok()
    }

    pub fn latest(&self) -> Option<EngineSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.clone())
    }
}
