//! Phase thresholds: advance phased battlers from their current hp.

use hecs::World;

use jabs_core::components::{Dead, PhaseState, Stats};
use jabs_core::events::EngineEvent;

use crate::refresh::RefreshLatch;
use crate::roster::Roster;

pub fn run(
    world: &mut World,
    roster: &Roster,
    refresh: &mut RefreshLatch,
    events: &mut Vec<EngineEvent>,
) {
    for (id, entity) in roster.iter() {
        if world.get::<&Dead>(entity).is_ok() {
            continue;
        }
        let Ok(hp_percent) = world.get::<&Stats>(entity).map(|s| s.hp_percent()) else {
            continue;
        };
        let Ok(mut state) = world.get::<&mut PhaseState>(entity) else {
            continue;
        };

        let update = jabs_ai::phase::evaluate(&state, hp_percent);
        if !update.changed {
            continue;
        }
        match state.advance_to(update.to) {
            Ok(true) => {
                let name = state.current_phase().name.clone();
                tracing::info!("{id}: phase {} -> {} ({name}) at {hp_percent}% hp", update.from, update.to);
                events.push(EngineEvent::PhaseChanged {
                    battler: id,
                    from: update.from,
                    to: update.to,
                    name,
                });
                refresh.request();
            }
            Ok(false) => {}
            Err(err) => {
                debug_assert!(false, "{id}: {err}");
                tracing::warn!("{id}: phase transition refused: {err}");
            }
        }
    }
}
