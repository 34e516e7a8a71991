//! Cleanup: despawn defeated enemies once their loot has been dispatched.
//!
//! Player-aligned battlers keep their entity (with the `Dead` marker) so they
//! can be revived.

use hecs::{Entity, World};

use jabs_core::components::{Battler, Dead};
use jabs_core::types::BattlerId;

use crate::roster::Roster;

/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, roster: &mut Roster, despawn_buffer: &mut Vec<(BattlerId, Entity)>) {
    despawn_buffer.clear();

    for (entity, (battler, _dead)) in world.query_mut::<(&Battler, &Dead)>() {
        if !battler.faction.is_player_aligned() {
            despawn_buffer.push((battler.id, entity));
        }
    }

    for (id, entity) in despawn_buffer.drain(..) {
        roster.remove(id);
        let _ = world.despawn(entity);
        tracing::debug!("{id} despawned");
    }
}
