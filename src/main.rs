//! Impact FX headless runner.
//!
//! Builds a small arena (ground slab, player, enemy), fires volleys of
//! projectiles from a launcher and runs the simulation at a fixed frame rate.
//! Every bus broadcast can be written as JSON lines for inspection.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --frames 600 --volleys 8 --trace trace.jsonl
//! ```

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use clap::Parser;
use glam::Vec3;
use log::{debug, error, info, warn};

use impactfx::components::group::{ENEMY, Group, PLAYER, WORLD};
use impactfx::components::projectile::{LaunchParams, TerminalKind};
use impactfx::components::target::Target;
use impactfx::events::animation::AnimationCmd;
use impactfx::events::projectile::{ProjectileTerminated, SpawnProjectile};
use impactfx::resources::animationclips::AnimationClips;
use impactfx::resources::eventbus::{BusEvent, BusEventKind, EventBus};
use impactfx::resources::playervitals::PlayerVitals;
use impactfx::resources::simconfig::SimConfig;
use impactfx::simulation::{frame_schedule, run_frame, setup_world};

const LAUNCHER: Vec3 = Vec3::new(0.0, 1.5, 0.0);
const PLAYER_CENTER: Vec3 = Vec3::new(0.0, 1.0, -20.0);
const ENEMY_CENTER: Vec3 = Vec3::new(8.0, 1.0, -15.0);
const BODY_RADIUS: f32 = 0.6;

/// Impact FX headless simulation
#[derive(Parser)]
#[command(version, about = "Runs the projectile and concussion pipeline without a renderer.")]
struct Cli {
    /// INI configuration file (default: ./impactfx.ini, optional).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Override the RNG seed from the configuration.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of volleys to fire.
    #[arg(long, default_value_t = 6)]
    volleys: u32,

    /// Frames between volleys.
    #[arg(long, default_value_t = 45)]
    volley_interval: u32,

    /// Write every bus broadcast to this file as JSON lines.
    #[arg(long, value_name = "PATH")]
    trace: Option<PathBuf>,
}

#[derive(Debug, Default)]
struct RunStats {
    player_hits: u32,
    other_hits: u32,
    expired: u32,
    hit_broadcasts: u32,
    updates: u32,
    peak_disturbance: f32,
}

/// Direction that lands a shot from `from` on `to` under `gravity`, to first order.
fn aim(from: Vec3, to: Vec3, speed: f32, gravity: f32) -> Vec3 {
    let delta = to - from;
    let flight = delta.length() / speed;
    delta - Vec3::Y * (0.5 * gravity * flight * flight)
}

fn spawn_arena(world: &mut World) -> Entity {
    world.spawn((
        Group::new(WORLD),
        Target::aabb(Vec3::new(-100.0, -1.0, -100.0), Vec3::new(100.0, 0.0, 100.0)),
    ));
    world.spawn((Group::new(ENEMY), Target::sphere(ENEMY_CENTER, BODY_RADIUS)));
    world
        .spawn((Group::new(PLAYER), Target::sphere(PLAYER_CENTER, BODY_RADIUS)))
        .id()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimConfig::with_path(path),
        None => SimConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        if cli.config.is_some() {
            error!("{}", e);
            std::process::exit(1);
        }
        debug!("{}, using defaults", e);
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    let dt = config.fixed_dt();
    let speed = config.projectile_speed;
    let gravity = config.gravity;
    let hit_clip = config.hit_clip.clone();
    info!(
        "Starting headless run: {} frames at {} fps, seed {}",
        cli.frames, config.fps, config.seed
    );

    let mut world = setup_world(config);
    let player = spawn_arena(&mut world);
    world.resource_mut::<AnimationClips>().insert(hit_clip, 0.4);

    let stats = Arc::new(Mutex::new(RunStats::default()));
    let trace = Arc::new(Mutex::new(Vec::<String>::new()));
    {
        let mut bus = world.resource_mut::<EventBus>();
        for kind in [BusEventKind::PlayerHit, BusEventKind::ConcussionUpdate] {
            let stats = stats.clone();
            let trace = trace.clone();
            let tracing = cli.trace.is_some();
            bus.subscribe(kind, move |event| {
                let mut stats = stats.lock().unwrap();
                match event {
                    BusEvent::PlayerHit { .. } => stats.hit_broadcasts += 1,
                    BusEvent::ConcussionUpdate {
                        rotation_x,
                        rotation_y,
                        ..
                    } => {
                        stats.updates += 1;
                        let magnitude = rotation_x.hypot(*rotation_y);
                        stats.peak_disturbance = stats.peak_disturbance.max(magnitude);
                    }
                }
                if tracing {
                    match serde_json::to_string(event) {
                        Ok(line) => trace.lock().unwrap().push(line),
                        Err(e) => warn!("Could not serialize {}: {}", event.kind().as_str(), e),
                    }
                }
            });
        }
    }
    {
        let stats = stats.clone();
        world.add_observer(move |trigger: On<ProjectileTerminated>| {
            let mut stats = stats.lock().unwrap();
            match &trigger.event().kind {
                TerminalKind::Hit { category } if category.is_player() => stats.player_hits += 1,
                TerminalKind::Hit { .. } => stats.other_hits += 1,
                TerminalKind::Expired => stats.expired += 1,
            }
        });
    }
    world.flush();

    let mut schedule = frame_schedule();
    let interval = cli.volley_interval.max(1);
    let mut fired = 0;
    for frame in 0..cli.frames {
        if frame % interval == 0 && fired < cli.volleys {
            let direction = match fired % 3 {
                0 => aim(LAUNCHER, PLAYER_CENTER, speed, gravity),
                1 => aim(LAUNCHER, ENEMY_CENTER, speed, gravity),
                // Steep lob that outlives its lifetime before landing.
                _ => Vec3::new(0.2, 1.0, -0.3),
            };
            world.write_message(SpawnProjectile {
                params: LaunchParams::new(LAUNCHER, direction),
            });
            fired += 1;
        }

        run_frame(&mut world, &mut schedule, dt);

        for cmd in world.resource_mut::<Messages<AnimationCmd>>().drain() {
            match cmd {
                AnimationCmd::Play {
                    entity,
                    clip,
                    fade_seconds,
                } => debug!(
                    "Animation: play '{}' on {:?} (fade {}s){}",
                    clip,
                    entity,
                    fade_seconds,
                    if entity == player { " [player]" } else { "" }
                ),
            }
        }
    }

    let vitals = world.resource::<PlayerVitals>().clone();
    let stats = stats.lock().unwrap();
    info!(
        "Run complete: {} volleys, {} player hits, {} other hits, {} expired",
        fired, stats.player_hits, stats.other_hits, stats.expired
    );
    info!(
        "Player health {}/{} after {} hit(s); {} player-hit broadcasts, {} concussion updates, peak disturbance {:.3}",
        vitals.health,
        vitals.max_health,
        vitals.hits_taken,
        stats.hit_broadcasts,
        stats.updates,
        stats.peak_disturbance
    );

    if let Some(path) = cli.trace {
        let lines = trace.lock().unwrap();
        let mut contents = lines.join("\n");
        contents.push('\n');
        if let Err(e) = std::fs::write(&path, contents) {
            error!("Failed to write trace to {:?}: {}", path, e);
            std::process::exit(1);
        }
        info!("Wrote {} broadcast(s) to {:?}", lines.len(), path);
    }
}
