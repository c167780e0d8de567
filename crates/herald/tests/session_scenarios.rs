//! # Session Scenarios
//!
//! Host and clients wired through a loopback hub, ticking in lockstep.
//!
//! Run with: cargo test -p herald --test session_scenarios

use std::collections::BTreeMap;
use std::sync::Arc;

use herald::networking::{encode, LoopbackHub, Message, Recipient, Role, Transport};
use herald::shared::{Coloring, EntityId, Profile, SecondaryField, TextAnimation};
use herald::{EngineConfig, LabelEngine, Roster};

const DT: f32 = 1.0 / 60.0;

struct Session {
    hub: LoopbackHub,
    roster: Roster,
    engines: BTreeMap<EntityId, LabelEngine>,
}

impl Session {
    fn new() -> Self {
        Self { hub: LoopbackHub::new(), roster: Roster::new(), engines: BTreeMap::new() }
    }

    fn connect(&mut self, id: u64, name: &str, role: Role) -> EntityId {
        let entity = EntityId(id);
        let mut engine = LabelEngine::new(entity, EngineConfig::default());
        engine.attach(Arc::new(self.hub.connect(entity)), Some(role));
        if role == Role::Host {
            self.hub.set_host(entity);
        }
        self.roster.join(entity, name);
        self.engines.insert(entity, engine);
        entity
    }

    fn engine(&mut self, entity: EntityId) -> &mut LabelEngine {
        self.engines.get_mut(&entity).unwrap()
    }

    fn step(&mut self) {
        self.hub.pump();
        for engine in self.engines.values_mut() {
            engine.tick(DT, &self.roster);
        }
    }

    /// Request, rebroadcast, apply.
    fn settle(&mut self) {
        for _ in 0..3 {
            self.step();
        }
    }

    fn label(&self, viewer: EntityId, entity: EntityId) -> Option<String> {
        self.engines[&viewer].label(entity).map(|p| p.text.clone())
    }
}

// ============================================================================
// REPLICATION
// ============================================================================

#[test]
fn client_title_reaches_every_peer() {
    let mut session = Session::new();
    let host = session.connect(1, "Warden", Role::Host);
    let a = session.connect(2, "A", Role::Client);
    let other = session.connect(3, "C", Role::Client);

    session.engine(a).edit_local(Profile::new("Explorer"));
    session.settle();

    for viewer in [host, a, other] {
        assert_eq!(session.label(viewer, a).as_deref(), Some("@A (Explorer)"));
    }
    assert_eq!(session.engines[&host].store().get(a), Some(&Profile::new("Explorer")));
}

#[test]
fn client_edit_waits_for_host() {
    let mut session = Session::new();
    session.connect(1, "Warden", Role::Host);
    let a = session.connect(2, "A", Role::Client);

    session.engine(a).edit_local(Profile::new("Explorer"));
    assert!(session.engines[&a].mirror().is_empty());

    session.settle();
    assert_eq!(session.engines[&a].mirror().get(a), Some(&Profile::new("Explorer")));
}

#[test]
fn host_edit_applies_immediately_and_broadcasts() {
    let mut session = Session::new();
    let host = session.connect(1, "Warden", Role::Host);
    let a = session.connect(2, "A", Role::Client);

    session.engine(host).edit_local(Profile::new("Keeper"));
    assert_eq!(session.engines[&host].store().len(), 1);

    session.settle();
    assert_eq!(session.label(a, host).as_deref(), Some("@Warden (Keeper)"));
    assert_eq!(session.label(host, host).as_deref(), Some("@Warden (Keeper)"));
}

#[test]
fn last_write_wins() {
    let mut session = Session::new();
    let host = session.connect(1, "Warden", Role::Host);
    let a = session.connect(2, "A", Role::Client);

    session.engine(a).edit_local(Profile::new("First"));
    session.engine(a).edit_local(Profile::new("Second"));
    session.settle();

    assert_eq!(session.engines[&host].store().get(a), Some(&Profile::new("Second")));
    assert_eq!(session.label(a, a).as_deref(), Some("@A (Second)"));
}

#[test]
fn secondary_field_renders_after_primary() {
    let mut session = Session::new();
    let host = session.connect(1, "Warden", Role::Host);
    let a = session.connect(2, "A", Role::Client);

    session
        .engine(a)
        .edit_local(Profile::new("Explorer").with_secondary(SecondaryField::new("Lv. 3")));
    session.settle();

    assert_eq!(session.label(host, a).as_deref(), Some("@A (Explorer) (Lv. 3)"));
}

// ============================================================================
// LATE JOIN
// ============================================================================

#[test]
fn late_joiner_receives_full_sync() {
    let mut session = Session::new();
    let host = session.connect(1, "Warden", Role::Host);
    let a = session.connect(2, "A", Role::Client);

    session.engine(host).edit_local(
        Profile::new("Keeper").with_animation(TextAnimation::scroll()).with_coloring(Coloring::Rainbow),
    );
    session.engine(a).edit_local(Profile::new("Explorer"));
    session.settle();

    let late = session.connect(3, "Late", Role::Client);
    assert!(session.engine(late).join());
    assert!(!session.engine(late).join());
    session.settle();

    let mirrored: Vec<(EntityId, Profile)> =
        session.engines[&late].mirror().iter().map(|(e, p)| (e, p.clone())).collect();
    assert_eq!(mirrored, session.engines[&host].store().snapshot());
    assert!(session.engines[&late].animators().contains(host));
    assert_eq!(session.label(late, a).as_deref(), Some("@A (Explorer)"));
    assert_eq!(session.label(late, late).as_deref(), Some("@Late"));
}

#[test]
fn host_never_requests_sync() {
    let mut session = Session::new();
    let host = session.connect(1, "Warden", Role::Host);
    assert!(!session.engine(host).join());
    assert_eq!(session.hub.stats().messages_sent, 0);
}

// ============================================================================
// CLEARING
// ============================================================================

#[test]
fn clear_removes_title_and_animator() {
    let mut session = Session::new();
    let host = session.connect(1, "Warden", Role::Host);
    let a = session.connect(2, "A", Role::Client);

    session.engine(a).edit_local(Profile::new("Explorer").with_animation(TextAnimation::typewriter()));
    session.settle();
    assert!(session.engines[&host].animators().contains(a));

    session.engine(a).clear_local();
    session.settle();

    for viewer in [host, a] {
        assert!(!session.engines[&viewer].animators().contains(a));
        assert!(session.engines[&viewer].mirror().get(a).is_none());
        assert_eq!(session.label(viewer, a).as_deref(), Some("@A"));
    }
    assert!(session.engines[&host].store().get(a).is_none());
}

#[test]
fn blank_edit_clears() {
    let mut session = Session::new();
    let host = session.connect(1, "Warden", Role::Host);
    let a = session.connect(2, "A", Role::Client);

    session.engine(a).edit_local(Profile::new("Explorer"));
    session.settle();
    session.engine(a).edit_local(Profile::new(""));
    session.settle();

    assert!(session.engines[&host].store().is_empty());
    assert_eq!(session.label(host, a).as_deref(), Some("@A"));
}

// ============================================================================
// AUTHORITY
// ============================================================================

#[test]
fn client_ignores_update_requests() {
    let mut session = Session::new();
    session.connect(1, "Warden", Role::Host);
    let a = session.connect(2, "A", Role::Client);
    let rogue = session.hub.connect(EntityId(9));

    let bytes = encode(&Message::UpdateRequest(Some(Profile::new("Usurper")))).unwrap();
    rogue.send(Recipient::Peer(a), &bytes);
    let bytes = encode(&Message::SyncRequest).unwrap();
    rogue.send(Recipient::Peer(a), &bytes);
    session.settle();

    assert!(session.engines[&a].store().is_empty());
    assert!(session.engines[&a].mirror().is_empty());
}

#[test]
fn non_host_broadcasts_are_dropped() {
    let mut session = Session::new();
    let host = session.connect(1, "Warden", Role::Host);
    let a = session.connect(2, "A", Role::Client);
    let other = session.connect(3, "C", Role::Client);

    session.engine(a).edit_local(Profile::new("Explorer"));
    session.settle();

    let rogue = session.hub.connect(EntityId(9));
    let hijack =
        Message::UpdateBroadcast { entity: a, profile: Some(Profile::new("Hijacked")) };
    rogue.send(Recipient::Everyone, &encode(&hijack).unwrap());
    let wipe = Message::UpdateBroadcast { entity: a, profile: None };
    rogue.send(Recipient::Everyone, &encode(&wipe).unwrap());
    let forged = Message::SyncAll(vec![(other, Profile::new("Forged"))]);
    rogue.send(Recipient::Everyone, &encode(&forged).unwrap());
    session.settle();

    assert_eq!(session.engines[&host].store().get(a), Some(&Profile::new("Explorer")));
    assert_eq!(session.engines[&host].mirror().get(a), session.engines[&host].store().get(a));
    for viewer in [host, a, other] {
        assert_eq!(session.label(viewer, a).as_deref(), Some("@A (Explorer)"));
        assert!(session.engines[&viewer].mirror().get(other).is_none());
    }
}

#[test]
fn unresolved_role_stays_local() {
    let mut session = Session::new();
    session.connect(1, "Warden", Role::Host);
    let pending = EntityId(2);
    let mut engine = LabelEngine::new(pending, EngineConfig::default());
    engine.attach(Arc::new(session.hub.connect(pending)), None);
    session.roster.join(pending, "Pending");
    session.engines.insert(pending, engine);

    session.engine(pending).edit_local(Profile::new("Waiting"));
    session.settle();

    assert_eq!(session.hub.stats().messages_sent, 0);
    assert_eq!(session.label(pending, pending).as_deref(), Some("@Pending (Waiting)"));
}

// ============================================================================
// DEPARTURE
// ============================================================================

#[test]
fn peer_left_drops_state_without_broadcast() {
    let mut session = Session::new();
    let host = session.connect(1, "Warden", Role::Host);
    let a = session.connect(2, "A", Role::Client);
    let other = session.connect(3, "C", Role::Client);

    session.engine(a).edit_local(Profile::new("Explorer").with_animation(TextAnimation::scroll()));
    session.settle();

    session.hub.disconnect(a);
    session.engines.remove(&a);
    let sent_before = session.hub.stats().messages_sent;
    session.engine(host).peer_left(a);
    session.settle();

    assert_eq!(session.hub.stats().messages_sent, sent_before);
    assert!(session.engines[&host].store().get(a).is_none());
    assert!(session.engines[&host].label(a).is_some_and(|p| p.text == "@A"));
    assert!(session.engines[&other].mirror().get(a).is_some());
}

#[test]
fn cleanup_sweep_catches_silent_departures() {
    let mut session = Session::new();
    let host = session.connect(1, "Warden", Role::Host);
    let a = session.connect(2, "A", Role::Client);
    let other = session.connect(3, "C", Role::Client);

    session.engine(a).edit_local(Profile::new("Explorer").with_animation(TextAnimation::scroll()));
    session.settle();

    session.hub.disconnect(a);
    session.engines.remove(&a);
    session.roster.leave(a);

    let interval = EngineConfig::default().cleanup_interval_seconds;
    let ticks = (interval / DT).ceil() as usize + 1;
    for _ in 0..ticks {
        session.step();
    }

    for viewer in [host, other] {
        let engine = &session.engines[&viewer];
        assert!(engine.mirror().get(a).is_none());
        assert!(!engine.animators().contains(a));
        assert!(engine.label(a).is_none());
    }
    assert!(session.engines[&host].store().is_empty());
}
