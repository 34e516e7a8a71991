//! Party combat membership.
//!
//! The host decides "is the party in battle" with its turn-based rules.
//! While the engine is active that answer is forced to `true`, whatever the
//! engagement state of individual battlers, because downstream systems
//! branch on it. The engine-aware wrapper always calls through to the host
//! predicate and only then applies the override.

/// Anything that can answer whether the party is in combat.
pub trait CombatMembership {
    fn in_battle(&self) -> bool;
}

/// The host's turn-based predicate: in battle only while a turn-based
/// battle scene is running.
#[derive(Debug, Clone, Copy, Default)]
pub struct TurnBasedMembership {
    turn_battle_active: bool,
}

impl TurnBasedMembership {
    pub fn set_turn_battle_active(&mut self, active: bool) {
        self.turn_battle_active = active;
    }
}

impl CombatMembership for TurnBasedMembership {
    fn in_battle(&self) -> bool {
        self.turn_battle_active
    }
}

/// Wraps a host predicate with the engine override.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineMembership<M> {
    inner: M,
    engine_active: bool,
}

impl<M: CombatMembership> EngineMembership<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            engine_active: false,
        }
    }

    pub fn set_engine_active(&mut self, active: bool) {
        self.engine_active = active;
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut M {
        &mut self.inner
    }
}

impl<M: CombatMembership> CombatMembership for EngineMembership<M> {
    fn in_battle(&self) -> bool {
        let host = self.inner.in_battle();
        self.engine_active || host
    }
}
