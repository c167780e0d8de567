//! Authoritative profile store.
//!
//! Only the host owns one. Blank profiles are never stored: applying one
//! clears the entry.

use std::collections::BTreeMap;

use herald_shared::{EntityId, Profile};
use tracing::debug;

/// What an [`ReplicationStore::apply`] call did.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreChange {
    /// The entity now has this profile.
    Set(Profile),
    /// The entity no longer has a profile.
    Cleared,
}

impl StoreChange {
    /// The profile to broadcast, `None` for a clear.
    #[must_use]
    pub fn profile(&self) -> Option<&Profile> {
        match self {
            Self::Set(profile) => Some(profile),
            Self::Cleared => None,
        }
    }
}

/// Host-owned map of entity → profile.
#[derive(Debug, Default)]
pub struct ReplicationStore {
    profiles: BTreeMap<EntityId, Profile>,
}

impl ReplicationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or clears `entity`'s profile. Last write wins.
    pub fn apply(&mut self, entity: EntityId, profile: Option<Profile>) -> StoreChange {
        match profile.filter(|p| !p.is_blank()) {
            Some(profile) => {
                debug!(%entity, text = %profile.text, "store set");
                self.profiles.insert(entity, profile.clone());
                StoreChange::Set(profile)
            }
            None => {
                if self.profiles.remove(&entity).is_some() {
                    debug!(%entity, "store cleared");
                }
                StoreChange::Cleared
            }
        }
    }

    /// Drops `entity` without producing a broadcast (disconnect path).
    pub fn remove(&mut self, entity: EntityId) -> Option<Profile> {
        self.profiles.remove(&entity)
    }

    /// Keeps only the entries for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(EntityId) -> bool) {
        self.profiles.retain(|entity, _| keep(*entity));
    }

    /// Returns `entity`'s profile.
    #[must_use]
    pub fn get(&self, entity: EntityId) -> Option<&Profile> {
        self.profiles.get(&entity)
    }

    /// Every stored profile, in entity order, for a full sync.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(EntityId, Profile)> {
        self.profiles.iter().map(|(entity, profile)| (*entity, profile.clone())).collect()
    }

    /// Number of stored profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
