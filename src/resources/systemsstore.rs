//! Registry for state hook systems.
//!
//! Enter hooks (`"setup"`, `"enter_play"`, `"quit_game"`) are registered as
//! one-shot systems and stored under string keys, so the game state observer
//! can run them without depending on their concrete types.

use bevy_ecs::prelude::Resource;
use bevy_ecs::system::SystemId;
use rustc_hash::FxHashMap;

/// Map of hook names to system IDs.
#[derive(Resource, Default)]
pub struct SystemsStore {
    pub map: FxHashMap<String, SystemId>,
}

impl SystemsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a hook under `name`, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, id: SystemId) {
        self.map.insert(name.into(), id);
    }

    /// Look up a hook by name.
    pub fn get(&self, name: impl AsRef<str>) -> Option<&SystemId> {
        self.map.get(name.as_ref())
    }
}
