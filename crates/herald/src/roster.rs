//! In-memory [`NameplateHost`] for sessions without a game engine.

use std::collections::BTreeMap;

use herald_shared::EntityId;
use herald_ui::NameplateHost;

/// Base display names of the entities present in a session.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    names: BTreeMap<EntityId, String>,
}

impl Roster {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or renames `entity`.
    pub fn join(&mut self, entity: EntityId, name: impl Into<String>) {
        self.names.insert(entity, name.into());
    }

    /// Removes `entity`.
    pub fn leave(&mut self, entity: EntityId) {
        self.names.remove(&entity);
    }
}

impl NameplateHost for Roster {
    fn base_name(&self, entity: EntityId) -> Option<&str> {
        self.names.get(&entity).map(String::as_str)
    }

    fn entities(&self) -> Vec<EntityId> {
        self.names.keys().copied().collect()
    }

    fn is_present(&self, entity: EntityId) -> bool {
        self.names.contains_key(&entity)
    }
}
