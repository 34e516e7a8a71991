//! Cooldown scheduler.
//!
//! `run` ticks every non-ready cooldown of every living battler down by one,
//! floored at zero. `commit` is the only way a cooldown becomes non-ready.

use hecs::World;

use jabs_core::components::{Dead, Loadout};
use jabs_core::types::{ActionId, BattlerId};

use crate::roster::Roster;

pub fn run(world: &mut World) {
    for (_entity, (loadout, dead)) in world.query_mut::<(&mut Loadout, Option<&Dead>)>() {
        if dead.is_some() {
            continue;
        }
        for cooldown in loadout.slots.iter_mut().filter(|c| !c.is_ready()) {
            cooldown.remaining = cooldown.remaining.saturating_sub(1);
        }
    }
}

/// Whether `slot` of `battler` is at zero. Unknown battlers and slots are
/// never ready.
pub fn is_ready(world: &World, roster: &Roster, battler: BattlerId, slot: usize) -> bool {
    roster
        .get(battler)
        .and_then(|entity| world.get::<&Loadout>(entity).ok())
        .and_then(|loadout| loadout.get(slot).map(|c| c.is_ready()))
        .unwrap_or(false)
}

/// Reset `slot` to its full duration. No-op on unknown battlers or slots.
pub fn commit(world: &mut World, roster: &Roster, battler: BattlerId, slot: usize) -> Option<ActionId> {
    let entity = roster.get(battler)?;
    let mut loadout = world.get::<&mut Loadout>(entity).ok()?;
    let Some(cooldown) = loadout.get_mut(slot) else {
        tracing::debug!("{battler}: commit on missing slot {slot}");
        return None;
    };
    cooldown.remaining = cooldown.duration;
    Some(cooldown.action)
}
