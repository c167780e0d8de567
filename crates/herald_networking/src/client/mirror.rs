//! Broadcast-fed profile mirror.
//!
//! While connected, local edits go to the host first and only land here
//! when they come back as broadcasts.

use std::collections::BTreeMap;

use herald_shared::{EntityId, Profile};
use tracing::debug;

/// Effect of applying one assignment to the mirror.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MirrorChange {
    /// A profile was inserted or replaced.
    Updated,
    /// An existing profile was removed.
    Removed,
    /// The assignment matched what was already there.
    Unchanged,
}

/// Peer-local copy of the host's profiles.
#[derive(Debug, Default)]
pub struct ProfileMirror {
    profiles: BTreeMap<EntityId, Profile>,
}

impl ProfileMirror {
    /// Creates an empty mirror.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one authoritative assignment. Blank profiles clear.
    pub fn apply(&mut self, entity: EntityId, profile: Option<Profile>) -> MirrorChange {
        match profile.filter(|p| !p.is_blank()) {
            Some(profile) => {
                if self.profiles.get(&entity) == Some(&profile) {
                    return MirrorChange::Unchanged;
                }
                debug!(%entity, text = %profile.text, "mirror updated");
                self.profiles.insert(entity, profile);
                MirrorChange::Updated
            }
            None => {
                if self.profiles.remove(&entity).is_some() {
                    debug!(%entity, "mirror cleared");
                    MirrorChange::Removed
                } else {
                    MirrorChange::Unchanged
                }
            }
        }
    }

    /// Applies every entry of a full sync as if it were a broadcast.
    ///
    /// Entries missing from the snapshot are left alone. Returns the
    /// entities whose profile changed.
    pub fn apply_snapshot(&mut self, entries: Vec<(EntityId, Profile)>) -> Vec<EntityId> {
        entries
            .into_iter()
            .filter_map(|(entity, profile)| {
                (self.apply(entity, Some(profile)) != MirrorChange::Unchanged).then_some(entity)
            })
            .collect()
    }

    /// Drops `entity` (disconnect or cleanup).
    pub fn remove(&mut self, entity: EntityId) -> Option<Profile> {
        self.profiles.remove(&entity)
    }

    /// Keeps only the entries for which `keep` returns true, returning the
    /// dropped entities.
    pub fn retain(&mut self, mut keep: impl FnMut(EntityId) -> bool) -> Vec<EntityId> {
        let dropped: Vec<EntityId> =
            self.profiles.keys().copied().filter(|entity| !keep(*entity)).collect();
        for entity in &dropped {
            self.profiles.remove(entity);
        }
        dropped
    }

    /// Returns `entity`'s profile.
    #[must_use]
    pub fn get(&self, entity: EntityId) -> Option<&Profile> {
        self.profiles.get(&entity)
    }

    /// Iterates in entity order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Profile)> {
        self.profiles.iter().map(|(entity, profile)| (*entity, profile))
    }

    /// Number of mirrored profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns true if nothing is mirrored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
