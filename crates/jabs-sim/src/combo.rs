//! Combo chains.
//!
//! Each (attacker, target) pair carries its own chain, so one swing that
//! catches several targets advances several independent chains. A hit
//! extends the chain when the previous hit on the same target landed
//! within the combo window, otherwise the chain restarts at 1.

use std::collections::BTreeMap;

use jabs_core::types::BattlerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ComboChain {
    count: u32,
    last_tick: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ComboTracker {
    chains: BTreeMap<(BattlerId, BattlerId), ComboChain>,
    /// Attacker → (chain count, tick) of its most recent hit.
    latest: BTreeMap<BattlerId, (u32, u64)>,
}

impl ComboTracker {
    /// Chain index a hit at `tick` would get, without recording it.
    pub fn next_index(&self, attacker: BattlerId, target: BattlerId, tick: u64, window: u64) -> u32 {
        match self.chains.get(&(attacker, target)) {
            Some(chain) if tick.saturating_sub(chain.last_tick) <= window => chain.count + 1,
            _ => 1,
        }
    }

    /// Record a hit and return its chain index.
    pub fn record(&mut self, attacker: BattlerId, target: BattlerId, tick: u64, window: u64) -> u32 {
        let count = self.next_index(attacker, target, tick, window);
        self.chains.insert(
            (attacker, target),
            ComboChain {
                count,
                last_tick: tick,
            },
        );
        self.latest.insert(attacker, (count, tick));
        count
    }

    /// Chain count of the attacker's most recent hit, or 0 once the window
    /// has lapsed.
    pub fn count(&self, attacker: BattlerId, now: u64, window: u64) -> u32 {
        match self.latest.get(&attacker) {
            Some(&(count, tick)) if now.saturating_sub(tick) <= window => count,
            _ => 0,
        }
    }

    /// Drop every chain the battler takes part in (death, removal, revive).
    pub fn forget(&mut self, battler: BattlerId) {
        self.chains
            .retain(|(attacker, target), _| *attacker != battler && *target != battler);
        self.latest.remove(&battler);
    }
}
