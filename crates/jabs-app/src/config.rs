//! Runner configuration, loaded from an optional JSON file.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use jabs_sim::scenario::ScenarioId;
use jabs_sim::EngineConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scenario: ScenarioId,
    pub engine: EngineConfig,
    /// Stop after this many ticks. `None` runs until the party falls or
    /// every enemy is gone.
    pub max_ticks: Option<u64>,
    /// Sleep between ticks to hold the tick rate. Off runs flat out.
    pub realtime: bool,
    /// Ticks between autopilot decisions.
    pub pilot_interval: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scenario: ScenarioId::default(),
            engine: EngineConfig::default(),
            max_ticks: Some(3_600),
            realtime: true,
            pilot_interval: 6,
        }
    }
}

impl AppConfig {
    /// Defaults when no path is given; missing fields fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }
}
