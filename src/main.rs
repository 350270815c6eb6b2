//! Controller Arcade headless runner
//!
//! Drives a session with the demo pilot at the host frame rate and reports
//! what happened. Useful for balancing tuning files without a renderer.
//!
//! Usage: `controller-arcade [--seed N] [--seconds S] [--size WxH] [--tuning FILE] [--json]`

use std::path::PathBuf;

use controller_arcade::consts::FRAME_INTERVAL_MS;
use controller_arcade::demo::Autopilot;
use controller_arcade::sim::{GameEvent, Playfield, World};
use controller_arcade::Tuning;

struct Options {
    seed: u64,
    seconds: f32,
    width: f32,
    height: f32,
    tuning: Option<PathBuf>,
    json: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            seed: 1,
            seconds: 30.0,
            width: 1280.0,
            height: 720.0,
            tuning: None,
            json: false,
        }
    }
}

impl Options {
    /// Unknown flags and unparsable values are logged and skipped
    fn parse(mut args: impl Iterator<Item = String>) -> Self {
        let mut opts = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => match args.next().and_then(|v| v.parse().ok()) {
                    Some(seed) => opts.seed = seed,
                    None => log::warn!("--seed expects an integer"),
                },
                "--seconds" => match args.next().and_then(|v| v.parse().ok()) {
                    Some(s) if s > 0.0 => opts.seconds = s,
                    _ => log::warn!("--seconds expects a positive number"),
                },
                "--size" => match args.next().as_deref().and_then(parse_size) {
                    Some((w, h)) => {
                        opts.width = w;
                        opts.height = h;
                    }
                    None => log::warn!("--size expects WIDTHxHEIGHT"),
                },
                "--tuning" => opts.tuning = args.next().map(PathBuf::from),
                "--json" => opts.json = true,
                other => log::warn!("Ignoring unknown argument: {}", other),
            }
        }
        opts
    }
}

fn parse_size(s: &str) -> Option<(f32, f32)> {
    let (w, h) = s.split_once('x')?;
    let (w, h) = (w.parse::<f32>().ok()?, h.parse::<f32>().ok()?);
    (w > 0.0 && h > 0.0).then_some((w, h))
}

#[derive(Debug, Default)]
struct Tally {
    shots: u32,
    kills: u32,
    deaths: u32,
    spawns: u32,
}

impl Tally {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::BulletFired { .. } => self.shots += 1,
            GameEvent::ObstacleDestroyed { by_ship: false, .. } => self.kills += 1,
            GameEvent::ShipDestroyed { .. } => self.deaths += 1,
            GameEvent::ObstacleSpawned { .. } => self.spawns += 1,
            _ => {}
        }
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    let opts = Options::parse(std::env::args().skip(1));

    let tuning = match &opts.tuning {
        Some(path) => Tuning::load_or_default(path),
        None => Tuning::default(),
    };

    log::info!(
        "Controller Arcade starting (seed {}, {}x{}, {}s)",
        opts.seed,
        opts.width,
        opts.height,
        opts.seconds
    );

    let mut world = World::new(Playfield::new(opts.width, opts.height), tuning, opts.seed);
    let mut pilot = Autopilot::default();
    let mut tally = Tally::default();

    let end_ms = (opts.seconds * 1000.0) as u64;
    let mut now_ms = 0;
    world.step(now_ms);
    while now_ms < end_ms {
        now_ms += FRAME_INTERVAL_MS;
        pilot.drive(&mut world, now_ms);
        world.step(now_ms);
        for event in world.drain_events() {
            if let GameEvent::ShipDestroyed { pos } = event {
                log::info!("Ship destroyed at ({:.0}, {:.0}) t={}ms", pos.x, pos.y, now_ms);
            }
            tally.record(&event);
        }
    }

    log::info!(
        "Finished: {} shots, {} obstacles destroyed, {} ships lost, {} spawns",
        tally.shots,
        tally.kills,
        tally.deaths,
        tally.spawns
    );

    if opts.json {
        match serde_json::to_string_pretty(&world.snapshot()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize final frame: {}", e),
        }
    } else {
        println!(
            "shots={} kills={} deaths={} spawns={}",
            tally.shots, tally.kills, tally.deaths, tally.spawns
        );
    }
}
