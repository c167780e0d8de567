//! # Herald Session
//!
//! Runs a loopback session: one host and two clients, the second joining
//! halfway through, then prints every peer's labels.
//!
//! ## Usage
//!
//! ```bash
//! herald_session --seconds 4 --config herald.toml
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use herald::networking::{LoopbackHub, Role};
use herald::shared::{
    BracketStyle, Coloring, EntityId, Profile, SecondaryField, TextAnimation, DEFAULT_SPREAD,
};
use herald::{EngineConfig, LabelEngine, Roster, TickClock};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const HOST: EntityId = EntityId(1);
const EARLY: EntityId = EntityId(2);
const LATE: EntityId = EntityId(3);

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut seconds = 4.0f32;
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seconds" | "-s" => {
                if i + 1 < args.len() {
                    seconds = args[i + 1].parse().unwrap_or(seconds);
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Usage: herald_session [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -s, --seconds <SECS>   Session length (default: 4)");
                println!("  -c, --config <PATH>    Engine config TOML");
                println!("  -h, --help             Show this help");
                return ExitCode::SUCCESS;
            }
            _ => {}
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => match EngineConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                error!(%err, "config rejected");
                return ExitCode::FAILURE;
            }
        },
        None => EngineConfig::default(),
    };

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         HERALD LOOPBACK SESSION                                  ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!("│ Tick Rate:          {} Hz", config.tick_rate);
    println!("│ Duration:           {seconds:.1}s");
    println!();

    let hub = LoopbackHub::new();
    let mut roster = Roster::new();

    let mut host = LabelEngine::new(HOST, config.clone());
    host.attach(Arc::new(hub.connect(HOST)), Some(Role::Host));
    hub.set_host(HOST);
    roster.join(HOST, "Warden");
    host.edit_local(
        Profile::new("Explorer")
            .with_animation(TextAnimation::scroll())
            .with_coloring(Coloring::Rainbow),
    );

    let mut early = LabelEngine::new(EARLY, config.clone());
    early.attach(Arc::new(hub.connect(EARLY)), Some(Role::Client));
    roster.join(EARLY, "Scribe");
    early.edit_local(
        Profile::new("Keeper of Words")
            .with_bracket(BracketStyle::SquareBrackets)
            .with_animation(TextAnimation::typewriter())
            .with_coloring(Coloring::Gradient {
                start_hex: "#FF8800".into(),
                end_hex: "#0088FF".into(),
                animate: true,
                spread: DEFAULT_SPREAD,
            }),
    );

    let mut late: Option<LabelEngine> = None;
    let total_ticks = (seconds.max(0.0) * config.tick_rate as f32).ceil() as u64;
    let start = Instant::now();
    let mut clock = TickClock::new(config.tick_rate, start);
    let dt = clock.dt();
    let mut ticked = 0u64;

    while ticked < total_ticks {
        std::thread::sleep(clock.until_next(Instant::now()));

        for _ in 0..clock.poll(Instant::now()) {
            if ticked == total_ticks {
                break;
            }
            ticked += 1;
            let tick_start = Instant::now();

            if late.is_none() && ticked >= total_ticks / 2 {
                let mut engine = LabelEngine::new(LATE, config.clone());
                engine.attach(Arc::new(hub.connect(LATE)), Some(Role::Client));
                roster.join(LATE, "Drifter");
                engine.join();
                engine.edit_local(
                    Profile::new("Wanderer")
                        .with_animation(TextAnimation::marquee())
                        .with_coloring(Coloring::Wave { spread: DEFAULT_SPREAD })
                        .with_secondary(SecondaryField::new("Lv. 12")),
                );
                info!(entity = %LATE, "late peer joined");
                late = Some(engine);
            }

            hub.pump();
            host.tick(dt, &roster);
            early.tick(dt, &roster);
            if let Some(engine) = late.as_mut() {
                engine.tick(dt, &roster);
            }

            clock.record(tick_start.elapsed());
        }
    }

    let transport = hub.stats();
    println!("┌─ SESSION ───────────────────────────────────────────────────────");
    println!("│ Elapsed:            {:.2}s", start.elapsed().as_secs_f64());
    println!("│ Ticks:              {ticked}");
    println!("│ Late Ticks:         {}", clock.late_ticks());
    println!("│ Messages Sent:      {}", transport.messages_sent);
    println!("│ Messages Dropped:   {}", transport.messages_dropped);
    println!("└─────────────────────────────────────────────────────────────────");

    for engine in std::iter::once(&host).chain(Some(&early)).chain(late.as_ref()) {
        println!();
        println!("Peer {} ({:?})", engine.local(), engine.role());
        for plate in engine.labels().filter(|p| p.is_visible()) {
            println!("  {}: {}", plate.entity, plate.text.escape_debug());
        }
    }

    ExitCode::SUCCESS
}
