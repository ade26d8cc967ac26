//! Projectile pipeline integration tests.
//!
//! Spawning, collision dispatch, expiry and body ownership, driven through a
//! real `World` with the same observers and schedule as the runner.
//!
//! # Usage
//!
//! ```sh
//! cargo test --test projectile_pipeline
//! ```

use std::sync::{Arc, Mutex};

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;
use glam::Vec3;

use impactfx::components::concussion::ConcussionRun;
use impactfx::components::group::{ENEMY, Group, PLAYER, WORLD};
use impactfx::components::position::WorldPosition;
use impactfx::components::projectile::{LaunchParams, Projectile, ProjectileError, TerminalKind};
use impactfx::components::target::Target;
use impactfx::events::animation::AnimationCmd;
use impactfx::events::collision::CollisionEvent;
use impactfx::events::projectile::{ProjectileTerminated, SpawnProjectile};
use impactfx::resources::animationclips::AnimationClips;
use impactfx::resources::eventbus::{BusEvent, BusEventKind, EventBus};
use impactfx::resources::physics::{
    BodyHandle, BodyState, ColliderDesc, ColliderHandle, Contact, KinematicPhysics,
    PhysicsBackend, PhysicsError, PhysicsWorld,
};
use impactfx::resources::playervitals::PlayerVitals;
use impactfx::resources::simconfig::SimConfig;
use impactfx::resources::simrng::SimRng;
use impactfx::resources::worldtime::WorldTime;
use impactfx::simulation::{frame_schedule, run_frame, setup_world, setup_world_with_backend};
use impactfx::systems::projectile::spawn_projectile;

const DT: f32 = 1.0 / 60.0;

// =============================================================================
// Helpers
// =============================================================================

/// Backend that forwards to [`KinematicPhysics`] and journals every call.
struct RecordingPhysics {
    inner: KinematicPhysics,
    journal: Arc<Mutex<Vec<String>>>,
}

impl PhysicsBackend for RecordingPhysics {
    fn spawn_body(&mut self, position: Vec3, velocity: Vec3, angular_velocity: Vec3) -> BodyHandle {
        let handle = self.inner.spawn_body(position, velocity, angular_velocity);
        self.journal.lock().unwrap().push(format!("spawn {}", handle.0));
        handle
    }

    fn release_body(&mut self, handle: BodyHandle) -> Result<(), PhysicsError> {
        self.journal.lock().unwrap().push(format!("release {}", handle.0));
        self.inner.release_body(handle)
    }

    fn body(&self, handle: BodyHandle) -> Option<BodyState> {
        self.inner.body(handle)
    }

    fn body_count(&self) -> usize {
        self.inner.body_count()
    }

    fn insert_collider(&mut self, desc: ColliderDesc) -> ColliderHandle {
        self.inner.insert_collider(desc)
    }

    fn remove_collider(&mut self, handle: ColliderHandle) -> bool {
        self.inner.remove_collider(handle)
    }

    fn step(&mut self, dt: f32) -> Vec<Contact> {
        self.inner.step(dt)
    }
}

fn config() -> SimConfig {
    let mut config = SimConfig::new();
    config.gravity = 0.0;
    config
}

/// World whose backend calls land in the returned journal. `player-hit`
/// broadcasts are journaled too, so ordering across both can be checked.
fn make_recording_world() -> (World, Arc<Mutex<Vec<String>>>) {
    let journal = Arc::new(Mutex::new(Vec::new()));
    let backend = RecordingPhysics {
        inner: KinematicPhysics::default(),
        journal: journal.clone(),
    };
    let mut world = setup_world_with_backend(config(), backend);
    let bus_journal = journal.clone();
    world
        .resource_mut::<EventBus>()
        .subscribe(BusEventKind::PlayerHit, move |_| {
            bus_journal.lock().unwrap().push("player-hit".to_string())
        });
    (world, journal)
}

fn record_bus(world: &mut World) -> Arc<Mutex<Vec<BusEvent>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut bus = world.resource_mut::<EventBus>();
    for kind in [BusEventKind::PlayerHit, BusEventKind::ConcussionUpdate] {
        let log = log.clone();
        bus.subscribe(kind, move |event| log.lock().unwrap().push(event.clone()));
    }
    log
}

fn record_terminals(world: &mut World) -> Arc<Mutex<Vec<ProjectileTerminated>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let log_clone = log.clone();
    world.add_observer(move |trigger: On<ProjectileTerminated>| {
        log_clone.lock().unwrap().push(trigger.event().clone());
    });
    world.flush();
    log
}

fn launch(world: &mut World, params: LaunchParams) -> Result<Entity, ProjectileError> {
    let mut state: SystemState<(
        Commands,
        ResMut<PhysicsWorld>,
        ResMut<SimRng>,
        Res<WorldTime>,
        Res<SimConfig>,
    )> = SystemState::new(world);
    let result = {
        let (mut commands, mut physics, mut rng, time, config) = state.get_mut(world);
        spawn_projectile(
            &mut commands,
            physics.backend_mut(),
            &mut rng.rng,
            time.elapsed,
            &config.projectile_tuning(),
            &params,
        )
    };
    state.apply(world);
    result
}

fn collide(world: &mut World, projectile: Entity, category: &str, target: Option<Entity>) {
    world.trigger(CollisionEvent {
        projectile,
        category: Group::new(category),
        target,
    });
    world.flush();
}

fn concussion_runs(world: &mut World) -> usize {
    world.query::<&ConcussionRun>().iter(world).count()
}

fn forward_shot() -> LaunchParams {
    LaunchParams::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0))
}

// =============================================================================
// Player hits
// =============================================================================

#[test]
fn player_hit_applies_damage_once_and_broadcasts_player_hit() {
    let mut world = setup_world(config());
    let bus = record_bus(&mut world);
    let terminals = record_terminals(&mut world);
    let player = world.spawn(Group::new(PLAYER)).id();

    let projectile = launch(&mut world, forward_shot().with_speed(30.0).with_damage(20.0)).unwrap();
    collide(&mut world, projectile, PLAYER, Some(player));

    let vitals = world.resource::<PlayerVitals>();
    assert_eq!(vitals.hits_taken, 1);
    assert_eq!(vitals.damage_taken, 20.0);
    assert_eq!(vitals.health, 80.0);

    assert_eq!(
        bus.lock().unwrap().first(),
        Some(&BusEvent::PlayerHit { duration_ms: 800 })
    );
    assert_eq!(concussion_runs(&mut world), 1);

    let terminals = terminals.lock().unwrap();
    assert_eq!(terminals.len(), 1);
    assert_eq!(terminals[0].projectile, projectile);
    assert_eq!(
        terminals[0].kind,
        TerminalKind::Hit {
            category: Group::new(PLAYER)
        }
    );
    assert!(world.get_entity(projectile).is_err());
    assert_eq!(world.resource::<PhysicsWorld>().backend().body_count(), 0);
}

#[test]
fn concussion_starts_before_the_body_is_released() {
    let (mut world, journal) = make_recording_world();
    let projectile = launch(&mut world, forward_shot()).unwrap();

    collide(&mut world, projectile, PLAYER, None);

    assert_eq!(
        *journal.lock().unwrap(),
        vec!["spawn 1".to_string(), "player-hit".to_string(), "release 1".to_string()]
    );
}

#[test]
fn repeated_collisions_are_ignored() {
    let (mut world, journal) = make_recording_world();
    let terminals = record_terminals(&mut world);
    let projectile = launch(&mut world, forward_shot()).unwrap();

    collide(&mut world, projectile, PLAYER, None);
    collide(&mut world, projectile, PLAYER, None);
    collide(&mut world, projectile, WORLD, None);

    assert_eq!(world.resource::<PlayerVitals>().hits_taken, 1);
    assert_eq!(terminals.lock().unwrap().len(), 1);
    assert_eq!(concussion_runs(&mut world), 1);
    let releases = journal
        .lock()
        .unwrap()
        .iter()
        .filter(|line| line.starts_with("release"))
        .count();
    assert_eq!(releases, 1);
}

#[test]
fn every_player_hit_starts_its_own_run() {
    let mut world = setup_world(config());
    let bus = record_bus(&mut world);

    let first = launch(&mut world, forward_shot()).unwrap();
    let second = launch(&mut world, forward_shot()).unwrap();
    collide(&mut world, first, PLAYER, None);
    collide(&mut world, second, PLAYER, None);

    assert_eq!(concussion_runs(&mut world), 2);
    assert_eq!(world.resource::<PlayerVitals>().hits_taken, 2);
    let hits = bus
        .lock()
        .unwrap()
        .iter()
        .filter(|e| matches!(e, BusEvent::PlayerHit { .. }))
        .count();
    assert_eq!(hits, 2);
}

// =============================================================================
// Non-player hits
// =============================================================================

#[test]
fn non_player_collisions_only_consume_the_projectile() {
    for category in [WORLD, ENEMY, "crate"] {
        let mut world = setup_world(config());
        let bus = record_bus(&mut world);
        let terminals = record_terminals(&mut world);
        let projectile = launch(&mut world, forward_shot()).unwrap();

        collide(&mut world, projectile, category, None);

        assert_eq!(world.resource::<PlayerVitals>().hits_taken, 0);
        assert!(bus.lock().unwrap().is_empty());
        assert_eq!(concussion_runs(&mut world), 0);
        assert_eq!(
            terminals.lock().unwrap().as_slice(),
            &[ProjectileTerminated {
                projectile,
                kind: TerminalKind::Hit {
                    category: Group::new(category)
                },
            }]
        );
        assert_eq!(world.resource::<PhysicsWorld>().backend().body_count(), 0);
    }
}

// =============================================================================
// Expiry
// =============================================================================

#[test]
fn unhit_projectile_expires_exactly_once() {
    let mut world = setup_world(config());
    let terminals = record_terminals(&mut world);
    let mut schedule = frame_schedule();
    let projectile = launch(&mut world, forward_shot()).unwrap();

    // 2.1 simulated seconds
    for _ in 0..126 {
        run_frame(&mut world, &mut schedule, DT);
    }

    let terminals = terminals.lock().unwrap();
    assert_eq!(terminals.len(), 1);
    assert_eq!(terminals[0].kind, TerminalKind::Expired);
    assert_eq!(world.resource::<PlayerVitals>().hits_taken, 0);
    assert!(world.get_entity(projectile).is_err());
    assert_eq!(world.resource::<PhysicsWorld>().backend().body_count(), 0);
}

#[test]
fn projectile_survives_until_its_lifetime() {
    let mut world = setup_world(config());
    let terminals = record_terminals(&mut world);
    let mut schedule = frame_schedule();
    let projectile = launch(&mut world, forward_shot()).unwrap();

    // 1.9 simulated seconds
    for _ in 0..114 {
        run_frame(&mut world, &mut schedule, DT);
    }

    assert!(terminals.lock().unwrap().is_empty());
    let position = world.get::<WorldPosition>(projectile).unwrap();
    assert!(position.pos.z < -50.0);
}

#[test]
fn expired_projectile_ignores_late_collision() {
    let mut world = setup_world(config());
    let terminals = record_terminals(&mut world);
    let mut schedule = frame_schedule();
    let projectile = launch(&mut world, forward_shot()).unwrap();
    for _ in 0..126 {
        run_frame(&mut world, &mut schedule, DT);
    }

    collide(&mut world, projectile, PLAYER, None);

    assert_eq!(terminals.lock().unwrap().len(), 1);
    assert_eq!(world.resource::<PlayerVitals>().hits_taken, 0);
}

// =============================================================================
// Spawning
// =============================================================================

#[test]
fn zero_direction_is_rejected_without_a_body() {
    let (mut world, journal) = make_recording_world();

    let result = launch(&mut world, LaunchParams::new(Vec3::ZERO, Vec3::ZERO));

    assert!(matches!(result, Err(ProjectileError::InvalidDirection(_))));
    assert!(journal.lock().unwrap().is_empty());
    assert_eq!(world.query::<&Projectile>().iter(&world).count(), 0);
}

#[test]
fn spawn_messages_launch_valid_requests_only() {
    let mut world = setup_world(config());
    let mut schedule = frame_schedule();

    world.write_message(SpawnProjectile {
        params: forward_shot(),
    });
    world.write_message(SpawnProjectile {
        params: LaunchParams::new(Vec3::ZERO, Vec3::ZERO),
    });
    run_frame(&mut world, &mut schedule, DT);

    assert_eq!(world.query::<&Projectile>().iter(&world).count(), 1);
    assert_eq!(world.resource::<PhysicsWorld>().backend().body_count(), 1);

    // Requests are consumed once.
    run_frame(&mut world, &mut schedule, DT);
    assert_eq!(world.query::<&Projectile>().iter(&world).count(), 1);
}

// =============================================================================
// Full pipeline through the physics backend
// =============================================================================

#[test]
fn shot_at_player_target_hits_through_physics() {
    let mut world = setup_world(config());
    let bus = record_bus(&mut world);
    let terminals = record_terminals(&mut world);
    let mut schedule = frame_schedule();
    let player = world
        .spawn((
            Group::new(PLAYER),
            Target::sphere(Vec3::new(0.0, 0.0, -10.0), 0.6),
        ))
        .id();
    world.resource_mut::<AnimationClips>().insert("hit_reaction", 0.4);

    world.write_message(SpawnProjectile {
        params: forward_shot(),
    });
    // 10 units at 30 u/s is about 20 frames.
    let mut animation_cmds = Vec::new();
    for _ in 0..30 {
        run_frame(&mut world, &mut schedule, DT);
        animation_cmds.extend(world.resource_mut::<Messages<AnimationCmd>>().drain());
    }

    assert_eq!(world.resource::<PlayerVitals>().health, 80.0);
    assert_eq!(
        terminals.lock().unwrap()[0].kind,
        TerminalKind::Hit {
            category: Group::new(PLAYER)
        }
    );
    assert_eq!(
        animation_cmds,
        vec![AnimationCmd::Play {
            entity: player,
            clip: "hit_reaction".to_string(),
            fade_seconds: 0.1,
        }]
    );
    assert!(matches!(
        bus.lock().unwrap().first(),
        Some(BusEvent::PlayerHit { duration_ms: 800 })
    ));

    // Let the concussion play out.
    for _ in 0..60 {
        run_frame(&mut world, &mut schedule, DT);
    }
    assert_eq!(concussion_runs(&mut world), 0);
    let events = bus.lock().unwrap();
    assert_eq!(
        events.last(),
        Some(&BusEvent::ConcussionUpdate {
            run: match events[1] {
                BusEvent::ConcussionUpdate { run, .. } => run,
                _ => panic!("expected a concussion update after player-hit"),
            },
            rotation_x: 0.0,
            rotation_y: 0.0,
        })
    );
}

#[test]
fn configured_speed_and_damage_reach_spawned_projectiles() {
    let mut config = config();
    config
        .load_from_str("[projectile]\ndamage = 35\nspeed = 10\n")
        .unwrap();
    let mut world = setup_world(config);
    let mut schedule = frame_schedule();
    world.spawn((
        Group::new(PLAYER),
        Target::sphere(Vec3::new(0.0, 0.0, -10.0), 0.6),
    ));

    world.write_message(SpawnProjectile {
        params: LaunchParams::new(Vec3::ZERO, Vec3::NEG_Z),
    });
    run_frame(&mut world, &mut schedule, DT);
    let projectile = world.query::<&Projectile>().single(&world).unwrap().clone();
    assert_eq!(projectile.speed, 10.0);
    assert_eq!(projectile.damage, 35.0);

    // 10 units at 10 u/s; 60 frames would fall short.
    for _ in 0..90 {
        run_frame(&mut world, &mut schedule, DT);
    }

    let vitals = world.resource::<PlayerVitals>();
    assert_eq!(vitals.hits_taken, 1);
    assert_eq!(vitals.damage_taken, 35.0);
    assert_eq!(vitals.health, 65.0);
}

#[test]
fn missing_hit_clip_does_not_block_damage_or_effect() {
    let mut world = setup_world(config());
    let bus = record_bus(&mut world);
    let player = world.spawn(Group::new(PLAYER)).id();
    let projectile = launch(&mut world, forward_shot()).unwrap();

    collide(&mut world, projectile, PLAYER, Some(player));

    assert_eq!(world.resource::<PlayerVitals>().hits_taken, 1);
    assert_eq!(bus.lock().unwrap().len(), 1);
    assert_eq!(world.resource_mut::<Messages<AnimationCmd>>().drain().count(), 0);
}

#[test]
fn ground_consumes_projectile_without_damage() {
    let mut config = SimConfig::new();
    config.gravity = -9.81;
    let mut world = setup_world(config);
    let terminals = record_terminals(&mut world);
    let mut schedule = frame_schedule();
    world.spawn((
        Group::new(WORLD),
        Target::aabb(Vec3::new(-100.0, -1.0, -100.0), Vec3::new(100.0, 0.0, 100.0)),
    ));
    launch(
        &mut world,
        LaunchParams::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, -1.0)),
    )
    .unwrap();

    for _ in 0..30 {
        run_frame(&mut world, &mut schedule, DT);
    }

    let terminals = terminals.lock().unwrap();
    assert_eq!(terminals.len(), 1);
    assert_eq!(
        terminals[0].kind,
        TerminalKind::Hit {
            category: Group::new(WORLD)
        }
    );
    assert_eq!(world.resource::<PlayerVitals>().hits_taken, 0);
}

#[test]
fn despawned_targets_are_unregistered() {
    let mut world = setup_world(config());
    let mut schedule = frame_schedule();
    let target = world
        .spawn((Group::new(ENEMY), Target::sphere(Vec3::new(0.0, 0.0, -5.0), 1.0)))
        .id();

    run_frame(&mut world, &mut schedule, DT);
    assert_eq!(world.resource::<PhysicsWorld>().target_count(), 1);
    assert!(world.get::<Target>(target).unwrap().collider.is_some());

    world.despawn(target);
    run_frame(&mut world, &mut schedule, DT);
    assert_eq!(world.resource::<PhysicsWorld>().target_count(), 0);
}
