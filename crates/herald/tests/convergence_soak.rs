//! # Convergence Soak
//!
//! Seeded random edits, clears and a late join across four peers. Once the
//! traffic stops, every mirror must equal the host store.
//!
//! Run with: cargo test -p herald --test convergence_soak -- --nocapture

use std::collections::BTreeMap;
use std::sync::Arc;

use herald::networking::{LoopbackHub, Role};
use herald::shared::{
    BracketStyle, Coloring, EntityId, Profile, SecondaryField, TextAnimation, DEFAULT_SPREAD,
};
use herald::{EngineConfig, LabelEngine, Roster};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const DT: f32 = 1.0 / 60.0;
const STEPS: usize = 2_000;
const TITLES: [&str; 6] = ["Explorer", "Keeper", "Warden of the North", "", "Lv. 9", "Δ-sigma"];

fn random_profile(rng: &mut ChaCha8Rng) -> Profile {
    let text = TITLES[rng.gen_range(0..TITLES.len())];
    let animation = match rng.gen_range(0..4) {
        0 => TextAnimation::Static,
        1 => TextAnimation::scroll(),
        2 => TextAnimation::Marquee { speed: 0.1, width: rng.gen_range(-2..12) },
        _ => TextAnimation::typewriter(),
    };
    let coloring = match rng.gen_range(0..6) {
        0 => Coloring::None,
        1 => Coloring::SingleColor { hex: "#33CC99".into() },
        2 => Coloring::Rainbow,
        3 => Coloring::Gradient {
            start_hex: "#FF0000".into(),
            end_hex: "#0000FF".into(),
            animate: rng.gen_bool(0.5),
            spread: DEFAULT_SPREAD,
        },
        4 => Coloring::Wave { spread: rng.gen_range(1.0..20.0) },
        _ => Coloring::StaticRainbow { spread: DEFAULT_SPREAD },
    };
    let bracket = BracketStyle::ALL[rng.gen_range(0..BracketStyle::ALL.len())];

    let mut profile = Profile::new(text)
        .with_bracket(bracket)
        .with_animation(animation)
        .with_coloring(coloring);
    profile.title_on_new_line = rng.gen_bool(0.3);
    profile.gap_above_title = rng.gen_bool(0.3);
    if rng.gen_bool(0.4) {
        let mut secondary = SecondaryField::new("she/her");
        secondary.share_coloring = rng.gen_bool(0.5);
        secondary.coloring = Coloring::Rainbow;
        profile = profile.with_secondary(secondary);
    }
    profile
}

fn connect(hub: &LoopbackHub, entity: EntityId, role: Role) -> LabelEngine {
    let mut engine = LabelEngine::new(entity, EngineConfig::default());
    engine.attach(Arc::new(hub.connect(entity)), Some(role));
    engine
}

#[test]
fn mirrors_converge_to_host_store() {
    for seed in [7u64, 42, 1337] {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let hub = LoopbackHub::new();
        let mut roster = Roster::new();
        let mut engines: BTreeMap<EntityId, LabelEngine> = BTreeMap::new();

        let host = EntityId(1);
        engines.insert(host, connect(&hub, host, Role::Host));
        hub.set_host(host);
        for id in 1..=3 {
            let entity = EntityId(id);
            if id > 1 {
                engines.insert(entity, connect(&hub, entity, Role::Client));
            }
            roster.join(entity, format!("Peer{id}"));
        }

        let late = EntityId(4);
        for step in 0..STEPS {
            if step == STEPS / 2 {
                let mut engine = connect(&hub, late, Role::Client);
                roster.join(late, "Late");
                assert!(engine.join());
                engines.insert(late, engine);
            }

            let ids: Vec<EntityId> = engines.keys().copied().collect();
            if rng.gen_bool(0.2) {
                let actor = ids[rng.gen_range(0..ids.len())];
                let engine = engines.get_mut(&actor).unwrap();
                if rng.gen_bool(0.15) {
                    engine.clear_local();
                } else {
                    engine.edit_local(random_profile(&mut rng));
                }
            }

            // Deliveries lag a random number of ticks behind.
            if rng.gen_bool(0.6) {
                hub.pump();
            }
            for engine in engines.values_mut() {
                engine.tick(DT, &roster);
            }
        }

        for _ in 0..4 {
            hub.pump();
            for engine in engines.values_mut() {
                engine.tick(DT, &roster);
            }
        }

        let authoritative = engines[&host].store().snapshot();
        for (entity, engine) in &engines {
            let mirrored: Vec<(EntityId, Profile)> =
                engine.mirror().iter().map(|(e, p)| (e, p.clone())).collect();
            assert_eq!(mirrored, authoritative, "seed {seed}: peer {entity} diverged");

            for (owner, profile) in &authoritative {
                assert_eq!(
                    engine.animators().contains(*owner),
                    profile.should_animate(),
                    "seed {seed}: peer {entity} animator for {owner}"
                );
                let label = engine.label(*owner).map(|p| p.text.as_str()).unwrap_or_default();
                assert!(label.starts_with('@'), "seed {seed}: label {label:?}");
            }
        }
        println!("seed {seed}: {} profiles converged on {} peers", authoritative.len(), engines.len());
    }
}
