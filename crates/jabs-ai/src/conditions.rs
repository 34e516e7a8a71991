//! Action viability predicates.
//!
//! An action is viable when its hp gate holds, the target sits inside its
//! distance band, the actor can pay its mp cost and the current phase
//! allows it.

use jabs_core::data::ActionConfig;

/// Distance band check: `min_distance <= distance <= range`.
pub fn in_range(action: &ActionConfig, distance: f64) -> bool {
    distance >= action.min_distance && distance <= action.range
}

pub fn hp_gate_holds(action: &ActionConfig, hp_percent: u32) -> bool {
    action
        .hp_condition
        .map_or(true, |cond| cond.holds(hp_percent))
}

pub fn affordable(action: &ActionConfig, mp: i32) -> bool {
    action.mp_cost <= mp
}

/// Battlers without a phase state accept every action.
pub fn phase_allows(action: &ActionConfig, phase_key: Option<u8>) -> bool {
    phase_key.map_or(true, |key| action.allowed_in_phase(key))
}
