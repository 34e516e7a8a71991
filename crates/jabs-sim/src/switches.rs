//! Global boolean switch store.
//!
//! The engine owns the store and is its only subscriber: every write goes
//! through `JabsEngine::set_switch`, which raises the refresh request. A
//! write counts as a change notification even if the value is unchanged.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct SwitchStore {
    values: BTreeMap<u32, bool>,
}

impl SwitchStore {
    /// Unset switches read as `false`.
    pub fn get(&self, switch: u32) -> bool {
        self.values.get(&switch).copied().unwrap_or(false)
    }

    /// Returns the previous value.
    pub fn set(&mut self, switch: u32, value: bool) -> bool {
        self.values.insert(switch, value).unwrap_or(false)
    }
}
