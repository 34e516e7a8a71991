//! Per-tick action decision for AI-controlled battlers.
//!
//! There is no persisted plan: the decision is recomputed from scratch every
//! tick from the battler, its primary target and its slot readiness.
//!
//! Selection: ready slots → hitbox reaches the target → conditions hold (hp
//! gate, distance band, mp) → allowed in the current phase → highest
//! priority, ties to the lowest slot.
//! With nothing viable the battler closes distance to its target, or idles.

use jabs_core::data::ActionConfig;
use jabs_core::types::{ActionId, BattlerId, TilePos};

use crate::conditions;

/// What the actor knows about its primary target at lookup time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetInfo {
    pub id: BattlerId,
    pub position: TilePos,
    pub alive: bool,
}

/// One action slot as seen by the decision engine.
#[derive(Debug, Clone, Copy)]
pub struct SlotInfo<'a> {
    pub slot: usize,
    pub ready: bool,
    /// `None` when the slot references an action missing from the table.
    pub action: Option<&'a ActionConfig>,
    /// The action's hitbox, turned toward the primary target, covers it.
    pub reaches: bool,
}

/// Input to the decision engine for a single battler.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub battler: BattlerId,
    pub position: TilePos,
    pub hp_percent: u32,
    pub mp: i32,
    /// Current phase key, if the battler has a phase state.
    pub phase_key: Option<u8>,
    pub target: Option<TargetInfo>,
    pub slots: &'a [SlotInfo<'a>],
}

/// Output of the decision engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Commit the action in `slot` against `target`.
    Commit {
        slot: usize,
        action: ActionId,
        target: BattlerId,
    },
    /// The primary target died after it was looked up; the decision is
    /// dropped and re-evaluated next tick.
    StaleTarget { target: BattlerId },
    /// Nothing viable; step toward the target.
    MoveToward {
        target: BattlerId,
        destination: TilePos,
    },
    Idle,
}

/// Evaluate the decision for one battler.
pub fn evaluate(ctx: &DecisionContext<'_>) -> Decision {
    let target = match ctx.target {
        Some(t) if t.alive => t,
        Some(t) => return Decision::StaleTarget { target: t.id },
        None => return Decision::Idle,
    };

    let distance = ctx.position.distance_to(&target.position);

    let mut best: Option<(&SlotInfo<'_>, &ActionConfig)> = None;
    for slot in ctx.slots {
        if !slot.ready {
            continue;
        }
        let Some(action) = slot.action else {
            tracing::debug!(
                "{}: slot {} has no configured action, skipping",
                ctx.battler,
                slot.slot
            );
            continue;
        };
        if !slot.reaches || !viable(ctx, action, distance) {
            continue;
        }
        // Equal priority falls back to the lower slot number.
        let better = match best {
            None => true,
            Some((best_slot, best_action)) => {
                action.priority > best_action.priority
                    || (action.priority == best_action.priority && slot.slot < best_slot.slot)
            }
        };
        if better {
            best = Some((slot, action));
        }
    }

    if let Some((slot, action)) = best {
        return Decision::Commit {
            slot: slot.slot,
            action: action.id,
            target: target.id,
        };
    }

    // Hitboxes face along an axis, so a diagonal neighbour is still out of reach.
    if distance > 1.0 {
        Decision::MoveToward {
            target: target.id,
            destination: target.position,
        }
    } else {
        Decision::Idle
    }
}

fn viable(ctx: &DecisionContext<'_>, action: &ActionConfig, distance: f64) -> bool {
    conditions::hp_gate_holds(action, ctx.hp_percent)
        && conditions::in_range(action, distance)
        && conditions::affordable(action, ctx.mp)
        && conditions::phase_allows(action, ctx.phase_key)
}
