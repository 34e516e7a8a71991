//! Error taxonomy for the engine.
//!
//! Nothing here crosses the tick boundary: systems catch these per battler,
//! log them and carry on with the rest of the roster.
//!
//! - `StaleReference`: a decision or hit names a battler that is dead or gone.
//!   Recovered by discarding the action.
//! - `MissingConfiguration`: an action, template or phase is absent from the
//!   static tables. Recovered by skipping the offending entry.
//! - `InvariantViolation`: a programming error (negative cooldown, phase key
//!   outside the configured list). Asserted in debug, clamped in release.

use crate::types::BattlerId;

/// Errors raised while running the engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum JabsError {
    #[error("stale reference to {battler}")]
    StaleReference { battler: BattlerId },

    #[error("missing configuration: {what}")]
    MissingConfiguration { what: String },

    #[error("invariant violated: {what}")]
    InvariantViolation { what: String },

    #[error("battler id {0} is already in use")]
    DuplicateBattler(BattlerId),
}

impl JabsError {
    pub fn missing_template(name: &str) -> Self {
        JabsError::MissingConfiguration {
            what: format!("battler template '{name}' is not defined"),
        }
    }
}

/// Errors raised while loading static data or maps.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to read data file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid map: {0}")]
    InvalidMap(String),

    #[error("invalid data table: {0}")]
    InvalidTable(String),
}
