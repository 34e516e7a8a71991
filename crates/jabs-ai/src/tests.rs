//! Tests for the decision engine and the phase state machine.

use jabs_core::components::{Phase, PhaseState};
use jabs_core::data::{ActionConfig, HpCondition};
use jabs_core::enums::HitboxShape;
use jabs_core::types::{ActionId, BattlerId, TilePos};

use crate::decision::{evaluate, Decision, DecisionContext, SlotInfo, TargetInfo};
use crate::phase;

fn action(id: u32, priority: i32, range: f64) -> ActionConfig {
    ActionConfig {
        id: ActionId(id),
        name: format!("action-{id}"),
        power: 10,
        range,
        min_distance: 0.0,
        hitbox: HitboxShape::Adjacent,
        cooldown: 30,
        priority,
        hp_condition: None,
        phases: None,
        knockback: 0,
        mp_cost: 0,
        tp_gain: 0,
    }
}

fn target_at(x: i32, y: i32) -> Option<TargetInfo> {
    Some(TargetInfo {
        id: BattlerId(1),
        position: TilePos::new(x, y),
        alive: true,
    })
}

fn context<'a>(slots: &'a [SlotInfo<'a>], target: Option<TargetInfo>) -> DecisionContext<'a> {
    DecisionContext {
        battler: BattlerId(10),
        position: TilePos::new(0, 0),
        hp_percent: 100,
        mp: 20,
        phase_key: None,
        target,
        slots,
    }
}

fn ready(slot: usize, action: &ActionConfig) -> SlotInfo<'_> {
    SlotInfo {
        slot,
        ready: true,
        action: Some(action),
        reaches: true,
    }
}

// ---- Decision engine ----

#[test]
fn test_highest_priority_wins() {
    let weak = action(1, 1, 2.0);
    let strong = action(2, 5, 2.0);
    let slots = [ready(0, &weak), ready(1, &strong)];
    let decision = evaluate(&context(&slots, target_at(1, 0)));
    assert_eq!(
        decision,
        Decision::Commit {
            slot: 1,
            action: ActionId(2),
            target: BattlerId(1)
        }
    );
}

#[test]
fn test_priority_tie_goes_to_lowest_slot() {
    let a = action(1, 3, 2.0);
    let b = action(2, 3, 2.0);
    // Listed out of order on purpose.
    let slots = [ready(4, &b), ready(2, &a)];
    let decision = evaluate(&context(&slots, target_at(1, 0)));
    assert!(matches!(decision, Decision::Commit { slot: 2, .. }));
}

#[test]
fn test_cooling_slot_is_ignored() {
    let strong = action(2, 9, 2.0);
    let weak = action(1, 1, 2.0);
    let slots = [
        SlotInfo {
            slot: 0,
            ready: false,
            action: Some(&strong),
            reaches: true,
        },
        ready(1, &weak),
    ];
    let decision = evaluate(&context(&slots, target_at(1, 0)));
    assert!(matches!(decision, Decision::Commit { slot: 1, .. }));
}

#[test]
fn test_hp_gated_action_only_when_low() {
    let mut desperate = action(1, 9, 2.0);
    desperate.hp_condition = Some(HpCondition::Below { percent: 30 });
    let basic = action(2, 1, 2.0);
    let slots = [ready(0, &desperate), ready(1, &basic)];

    let healthy = context(&slots, target_at(1, 0));
    assert!(matches!(evaluate(&healthy), Decision::Commit { slot: 1, .. }));

    let hurt = DecisionContext {
        hp_percent: 25,
        ..healthy
    };
    assert!(matches!(evaluate(&hurt), Decision::Commit { slot: 0, .. }));
}

#[test]
fn test_min_distance_band() {
    let mut bolt = action(1, 5, 6.0);
    bolt.min_distance = 2.0;
    let slots = [ready(0, &bolt)];

    // Too close for the bolt: nothing viable, already adjacent.
    assert_eq!(evaluate(&context(&slots, target_at(1, 0))), Decision::Idle);
    assert!(matches!(
        evaluate(&context(&slots, target_at(4, 0))),
        Decision::Commit { slot: 0, .. }
    ));
    // Beyond range: close the distance.
    assert_eq!(
        evaluate(&context(&slots, target_at(9, 0))),
        Decision::MoveToward {
            target: BattlerId(1),
            destination: TilePos::new(9, 0)
        }
    );
}

#[test]
fn test_unaffordable_action_is_not_viable() {
    let mut spell = action(1, 5, 3.0);
    spell.mp_cost = 50;
    let slots = [ready(0, &spell)];
    assert_eq!(evaluate(&context(&slots, target_at(1, 0))), Decision::Idle);
}

#[test]
fn test_phase_filter() {
    let mut finisher = action(1, 9, 2.0);
    finisher.phases = Some(vec![2]);
    let basic = action(2, 1, 2.0);
    let slots = [ready(0, &finisher), ready(1, &basic)];

    let opening = DecisionContext {
        phase_key: Some(0),
        ..context(&slots, target_at(1, 0))
    };
    assert!(matches!(evaluate(&opening), Decision::Commit { slot: 1, .. }));

    let desperate = DecisionContext {
        phase_key: Some(2),
        ..opening
    };
    assert!(matches!(evaluate(&desperate), Decision::Commit { slot: 0, .. }));

    // No phase state: restrictions do not apply.
    let unphased = DecisionContext {
        phase_key: None,
        ..opening
    };
    assert!(matches!(evaluate(&unphased), Decision::Commit { slot: 0, .. }));
}

#[test]
fn test_missing_action_skipped_not_stalled() {
    let basic = action(2, 1, 2.0);
    let slots = [
        SlotInfo {
            slot: 0,
            ready: true,
            action: None,
            reaches: true,
        },
        ready(1, &basic),
    ];
    assert!(matches!(
        evaluate(&context(&slots, target_at(1, 0))),
        Decision::Commit { slot: 1, .. }
    ));
}

#[test]
fn test_out_of_line_action_closes_in_instead() {
    let mut arrow = action(1, 5, 6.0);
    arrow.min_distance = 2.0;
    arrow.hitbox = HitboxShape::Line { length: 6 };
    let slots = [SlotInfo {
        reaches: false,
        ..ready(0, &arrow)
    }];

    // In range by distance, but the line would miss an off-axis target.
    assert_eq!(
        evaluate(&context(&slots, target_at(3, 2))),
        Decision::MoveToward {
            target: BattlerId(1),
            destination: TilePos::new(3, 2)
        }
    );

    let lined_up = [ready(0, &arrow)];
    assert!(matches!(
        evaluate(&context(&lined_up, target_at(3, 0))),
        Decision::Commit { slot: 0, .. }
    ));
}

#[test]
fn test_missing_target_idles() {
    let basic = action(1, 1, 2.0);
    let slots = [ready(0, &basic)];
    assert_eq!(evaluate(&context(&slots, None)), Decision::Idle);
}

#[test]
fn test_dead_target_is_stale() {
    let basic = action(1, 1, 2.0);
    let slots = [ready(0, &basic)];
    let corpse = Some(TargetInfo {
        id: BattlerId(1),
        position: TilePos::new(1, 0),
        alive: false,
    });
    assert_eq!(
        evaluate(&context(&slots, corpse)),
        Decision::StaleTarget {
            target: BattlerId(1)
        }
    );
}

#[test]
fn test_decision_is_deterministic() {
    let a = action(1, 2, 3.0);
    let b = action(2, 2, 3.0);
    let slots = [ready(0, &a), ready(1, &b)];
    let ctx = context(&slots, target_at(2, 1));
    let first = evaluate(&ctx);
    for _ in 0..100 {
        assert_eq!(evaluate(&ctx), first);
    }
}

// ---- Phase state machine ----

fn boss_phases() -> PhaseState {
    PhaseState::new(vec![
        Phase {
            name: "Opening".into(),
            key: 0,
            hp_threshold: 100,
        },
        Phase {
            name: "Pressured".into(),
            key: 1,
            hp_threshold: 50,
        },
        Phase {
            name: "Desperate".into(),
            key: 2,
            hp_threshold: 20,
        },
    ])
    .unwrap()
}

fn apply(state: &mut PhaseState, hp_percent: u32) -> phase::PhaseUpdate {
    let update = phase::evaluate(state, hp_percent);
    if update.changed {
        state.advance_to(update.to).unwrap();
    }
    update
}

#[test]
fn test_phase_stays_in_opening_above_threshold() {
    let mut state = boss_phases();
    let update = apply(&mut state, 80);
    assert!(!update.changed);
    assert_eq!(state.current_key(), 0);
}

#[test]
fn test_phase_jumps_pressured_to_desperate() {
    let mut state = boss_phases();
    apply(&mut state, 45);
    assert_eq!(state.current_key(), 1);

    // Healed back to 60%: forward-only, stays Pressured.
    apply(&mut state, 60);
    assert_eq!(state.current_key(), 1);

    let update = apply(&mut state, 15);
    assert_eq!(update.from, 1);
    assert_eq!(update.to, 2);
    assert_eq!(state.current_phase().name, "Desperate");
}

#[test]
fn test_phase_skips_to_highest_satisfied() {
    let mut state = boss_phases();
    let update = apply(&mut state, 15);
    assert_eq!((update.from, update.to), (0, 2));
}

#[test]
fn test_terminal_phase_holds_until_reset() {
    let mut state = boss_phases();
    apply(&mut state, 10);
    assert!(state.is_terminal());
    assert!(!apply(&mut state, 100).changed);
    assert_eq!(state.current_key(), 2);

    state.reset();
    assert_eq!(state.current_key(), 0);
    assert!(!apply(&mut state, 100).changed);
}

#[test]
fn test_phase_key_never_decreases() {
    let mut state = boss_phases();
    let mut last = state.current_key();
    for hp in [100, 70, 49, 80, 55, 30, 19, 90, 5, 100] {
        apply(&mut state, hp);
        assert!(state.current_key() >= last);
        last = state.current_key();
    }
}
