//! Phase state machine for multi-stage battlers.
//!
//! The engine feeds the remaining hp percent each tick. The battler moves
//! to the highest-key phase whose threshold currently holds, skipping any
//! phases in between, and never to a key below the current one. Only a reset
//! returns to the opening phase. The highest key is terminal.

use jabs_core::components::PhaseState;

/// Output of one phase evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseUpdate {
    pub from: u8,
    pub to: u8,
    pub changed: bool,
}

/// Highest eligible key for `hp_percent`, floored at the current key.
pub fn target_key(state: &PhaseState, hp_percent: u32) -> u8 {
    let current = state.current_key();
    state
        .phases()
        .iter()
        .filter(|p| hp_percent <= p.hp_threshold)
        .map(|p| p.key)
        .max()
        .map_or(current, |key| key.max(current))
}

/// Evaluate the state machine without mutating it.
pub fn evaluate(state: &PhaseState, hp_percent: u32) -> PhaseUpdate {
    let from = state.current_key();
    if state.is_terminal() {
        return PhaseUpdate {
            from,
            to: from,
            changed: false,
        };
    }
    let to = target_key(state, hp_percent);
    PhaseUpdate {
        from,
        to,
        changed: to != from,
    }
}
