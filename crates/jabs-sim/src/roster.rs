//! Battler id → ECS entity index.
//!
//! Iteration is always in ascending `BattlerId` order so that every system
//! visits battlers in the same order regardless of ECS storage layout.

use std::collections::BTreeMap;

use hecs::Entity;

use jabs_core::error::JabsError;
use jabs_core::types::BattlerId;

#[derive(Debug, Clone, Default)]
pub struct Roster {
    entities: BTreeMap<BattlerId, Entity>,
}

impl Roster {
    pub fn insert(&mut self, id: BattlerId, entity: Entity) -> Result<(), JabsError> {
        if self.entities.contains_key(&id) {
            return Err(JabsError::DuplicateBattler(id));
        }
        self.entities.insert(id, entity);
        Ok(())
    }

    pub fn get(&self, id: BattlerId) -> Option<Entity> {
        self.entities.get(&id).copied()
    }

    pub fn contains(&self, id: BattlerId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn remove(&mut self, id: BattlerId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    /// (id, entity) pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (BattlerId, Entity)> + '_ {
        self.entities.iter().map(|(id, e)| (*id, *e))
    }

    pub fn ids(&self) -> Vec<BattlerId> {
        self.entities.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
