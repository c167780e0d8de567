//! # Label Engine
//!
//! One peer's view of a session.
//!
//! ## Tick Order
//!
//! ```text
//! ┌────────────┐   ┌────────────┐   ┌────────────┐   ┌────────────┐
//! │   drain    │──>│  cleanup   │──>│  animate   │──>│   render   │
//! │  inbound   │   │ (periodic) │   │   (dt)     │   │ every label│
//! └────────────┘   └────────────┘   └────────────┘   └────────────┘
//! ```
//!
//! ## Authority
//!
//! - Host: `UpdateRequest` → store → `UpdateBroadcast` to everyone
//! - Everyone: `UpdateBroadcast` / `SyncAll` from the host → mirror → animators
//! - Local edits on a client go to the host and come back as broadcasts
//!
//! With no transport or role, edits apply straight to the local mirror so
//! a lone peer still sees its own label.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use herald_networking::{
    Inbound, Message, MirrorChange, PeerId, ProfileMirror, ReplicationStore, Role, SyncProtocol,
    Transport,
};
use herald_shared::{EntityId, Profile};
use herald_ui::{AnimatorSet, Nameplate, NameplateHost};
use tracing::{debug, info, trace, warn};

use crate::config::EngineConfig;

/// Replicated, animated labels for every entity one peer knows about.
pub struct LabelEngine {
    local: EntityId,
    config: EngineConfig,
    sync: SyncProtocol,
    store: ReplicationStore,
    mirror: ProfileMirror,
    animators: AnimatorSet,
    labels: BTreeMap<EntityId, Nameplate>,
    cleanup_timer: f32,
    sync_requested: bool,
}

impl LabelEngine {
    /// Creates a detached engine for the peer that owns `local`.
    #[must_use]
    pub fn new(local: EntityId, config: EngineConfig) -> Self {
        Self {
            local,
            sync: SyncProtocol::new(config.inbound_capacity),
            store: ReplicationStore::new(),
            mirror: ProfileMirror::new(),
            animators: AnimatorSet::new(config.timing()),
            labels: BTreeMap::new(),
            cleanup_timer: 0.0,
            sync_requested: false,
            config,
        }
    }

    /// Connects to a session.
    pub fn attach(&mut self, transport: Arc<dyn Transport>, role: Option<Role>) {
        info!(local = %self.local, ?role, "joined session transport");
        self.sync.attach(transport, role);
    }

    /// Leaves the session transport; rendering keeps working.
    pub fn detach(&mut self) {
        self.sync.detach();
        self.sync_requested = false;
    }

    /// Sets the role once the session layer has resolved it.
    pub fn set_role(&mut self, role: Option<Role>) {
        self.sync.set_role(role);
    }

    /// Current role, `None` while unresolved.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.sync.role()
    }

    /// The entity this peer owns.
    #[must_use]
    pub fn local(&self) -> EntityId {
        self.local
    }

    /// Asks the host for a full sync. Only clients ask, and only once per
    /// attachment.
    ///
    /// Returns true if a request was sent.
    pub fn join(&mut self) -> bool {
        if self.sync_requested || self.sync.role() != Some(Role::Client) || !self.sync.is_connected()
        {
            return false;
        }
        self.sync.request_sync();
        self.sync_requested = true;
        true
    }

    /// Publishes a new profile for the local entity. A blank profile clears.
    ///
    /// A profile that fails validation is dropped with a warning; peers
    /// would refuse it on the wire anyway.
    pub fn edit_local(&mut self, profile: Profile) {
        if let Err(error) = profile.validate() {
            warn!(local = %self.local, %error, "invalid local profile ignored");
            return;
        }
        let profile = Some(profile).filter(|p| !p.is_blank());
        self.publish_local(profile);
    }

    /// Clears the local entity's profile.
    pub fn clear_local(&mut self) {
        self.publish_local(None);
    }

    fn publish_local(&mut self, profile: Option<Profile>) {
        let local = self.local;
        match (self.sync.is_connected(), self.sync.role()) {
            (true, Some(Role::Host)) => {
                let change = self.store.apply(local, profile);
                self.sync.broadcast(local, change.profile());
            }
            (true, _) => self.sync.request_update(profile.as_ref()),
            (false, role) => {
                trace!(%local, "offline edit applied locally");
                if role == Some(Role::Host) {
                    self.store.apply(local, profile.clone());
                }
                self.assign(local, profile);
            }
        }
    }

    /// A peer disconnected. The host forgets its stored profile without
    /// broadcasting; every peer drops its label state.
    pub fn peer_left(&mut self, peer: PeerId) {
        if self.sync.is_host() && self.store.remove(peer).is_some() {
            debug!(%peer, "stored profile dropped on disconnect");
        }
        self.mirror.remove(peer);
        self.animators.remove(peer);
        self.labels.remove(&peer);
    }

    /// Runs one tick: apply inbound messages, sweep departed entities when
    /// due, advance animators by `dt`, then re-render every label.
    pub fn tick(&mut self, dt: f32, host: &dyn NameplateHost) {
        for inbound in self.sync.drain() {
            self.handle(inbound);
        }

        self.cleanup_timer += dt;
        if self.cleanup_timer >= self.config.cleanup_interval_seconds {
            self.cleanup_timer = 0.0;
            self.sweep(host);
        }

        self.animators.tick(dt);
        self.render(host);
    }

    fn handle(&mut self, Inbound { from, message }: Inbound) {
        let kind = message.kind();
        match message {
            Message::UpdateRequest(profile) => {
                if !self.sync.is_host() {
                    trace!(%from, "update request ignored, not host");
                    return;
                }
                let change = self.store.apply(from, profile);
                self.sync.broadcast(from, change.profile());
            }
            Message::SyncRequest => {
                if !self.sync.is_host() {
                    trace!(%from, "sync request ignored, not host");
                    return;
                }
                self.sync.send_snapshot(from, self.store.snapshot());
            }
            Message::UpdateBroadcast { .. } | Message::SyncAll(_)
                if !self.sync.accepts_authority_from(from) =>
            {
                warn!(%from, ?kind, "authoritative message from non-host dropped");
            }
            Message::UpdateBroadcast { entity, profile } => self.assign(entity, profile),
            Message::SyncAll(entries) => {
                debug!(%from, entries = entries.len(), "full sync applied");
                for entity in self.mirror.apply_snapshot(entries) {
                    self.animators.observe(entity, self.mirror.get(entity));
                }
            }
        }
    }

    /// Applies one authoritative assignment to the mirror and animators.
    fn assign(&mut self, entity: EntityId, profile: Option<Profile>) {
        if self.mirror.apply(entity, profile) != MirrorChange::Unchanged {
            self.animators.observe(entity, self.mirror.get(entity));
        }
    }

    /// Drops label state for entities the host no longer reports.
    pub fn sweep(&mut self, host: &dyn NameplateHost) {
        let present: BTreeSet<EntityId> = host.entities().into_iter().collect();

        for entity in self.mirror.retain(|e| present.contains(&e)) {
            debug!(%entity, "departed entity swept");
        }
        self.animators.retain(|e| present.contains(&e));
        self.labels.retain(|e, _| present.contains(e));
        if self.sync.is_host() {
            self.store.retain(|e| present.contains(&e));
        }
    }

    fn render(&mut self, host: &dyn NameplateHost) {
        let mut entities: BTreeSet<EntityId> = host.entities().into_iter().collect();
        entities.extend(self.mirror.iter().map(|(entity, _)| entity));

        self.labels = entities
            .into_iter()
            .map(|entity| {
                let plate = Nameplate::render(
                    entity,
                    host.base_name(entity).unwrap_or_default(),
                    self.mirror.get(entity),
                    self.animators.get(entity),
                );
                (entity, plate)
            })
            .collect();
    }

    /// The rendered label for `entity` as of the last tick.
    #[must_use]
    pub fn label(&self, entity: EntityId) -> Option<&Nameplate> {
        self.labels.get(&entity)
    }

    /// Every rendered label, in entity order.
    pub fn labels(&self) -> impl Iterator<Item = &Nameplate> {
        self.labels.values()
    }

    /// The broadcast-fed mirror.
    #[must_use]
    pub fn mirror(&self) -> &ProfileMirror {
        &self.mirror
    }

    /// The authoritative store (empty unless this peer is or was host).
    #[must_use]
    pub fn store(&self) -> &ReplicationStore {
        &self.store
    }

    /// Live animators.
    #[must_use]
    pub fn animators(&self) -> &AnimatorSet {
        &self.animators
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
