//! World setup and the per-frame schedule.
//!
//! [`setup_world`] inserts every resource and observer the pipeline needs;
//! [`frame_schedule`] orders the systems of one frame; [`run_frame`] advances
//! the clock and runs the schedule. The headless runner and the integration
//! tests use the same three functions.

use bevy_ecs::prelude::*;
use glam::Vec3;

use crate::events::animation::AnimationCmd;
use crate::events::projectile::SpawnProjectile;
use crate::resources::animationclips::AnimationClips;
use crate::resources::eventbus::EventBus;
use crate::resources::physics::{KinematicPhysics, PhysicsBackend, PhysicsWorld};
use crate::resources::playervitals::PlayerVitals;
use crate::resources::simconfig::SimConfig;
use crate::resources::simrng::SimRng;
use crate::resources::worldtime::WorldTime;
use crate::systems::concussion::{
    cancel_concussion_observer, concussion_system, concussion_watchdog_observer,
};
use crate::systems::dispatch::collision_dispatch_observer;
use crate::systems::messages::update_sim_messages;
use crate::systems::physics::{physics_step_system, sync_target_colliders};
use crate::systems::projectile::{projectile_lifetime_system, projectile_spawn_system};
use crate::systems::time::update_world_time;
use crate::systems::timer::update_timers;

/// Build a world using the in-crate [`KinematicPhysics`] backend.
pub fn setup_world(config: SimConfig) -> World {
    let physics = KinematicPhysics::new(Vec3::new(0.0, config.gravity, 0.0), config.body_radius);
    setup_world_with_backend(config, physics)
}

/// Build a world around any physics backend.
pub fn setup_world_with_backend(config: SimConfig, backend: impl PhysicsBackend + 'static) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(SimRng::new(config.seed));
    world.insert_resource(PhysicsWorld::new(backend));
    world.insert_resource(EventBus::default());
    world.insert_resource(PlayerVitals::new(config.player_health));
    world.insert_resource(AnimationClips::default());
    world.init_resource::<Messages<SpawnProjectile>>();
    world.init_resource::<Messages<AnimationCmd>>();
    world.insert_resource(config);

    world.add_observer(collision_dispatch_observer);
    world.add_observer(cancel_concussion_observer);
    world.add_observer(concussion_watchdog_observer);
    // Observers must exist before the first frame can trigger anything.
    world.flush();
    world
}

/// Systems of one simulation frame, in order.
pub fn frame_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            projectile_spawn_system,
            sync_target_colliders,
            physics_step_system,
            projectile_lifetime_system,
            concussion_system,
            update_timers,
            update_sim_messages,
        )
            .chain(),
    );
    schedule
}

/// Advance the clock by `dt` seconds and run one frame.
pub fn run_frame(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
    world.clear_trackers();
}
