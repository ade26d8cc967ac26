//! Projectile spawn and lifetime systems.
//!
//! # System Flow
//!
//! Each frame:
//!
//! 1. [`projectile_spawn_system`] drains [`SpawnProjectile`] requests and
//!    launches a body for each valid one
//! 2. the physics step moves bodies and may end projectiles through the
//!    collision dispatcher
//! 3. [`projectile_lifetime_system`] expires projectiles that have been in
//!    flight for their whole lifetime
//!
//! Both the dispatcher and the lifetime system end a projectile through
//! [`finish_projectile`], so each projectile sees one terminal event and its
//! body is released once.

use bevy_ecs::prelude::*;
use fastrand::Rng;
use log::{debug, warn};

use crate::components::position::{Orientation, WorldPosition};
use crate::components::projectile::{
    LaunchParams, Projectile, ProjectileError, ProjectileTuning, TerminalKind,
};
use crate::events::projectile::{ProjectileTerminated, SpawnProjectile};
use crate::resources::physics::{PhysicsBackend, PhysicsWorld};
use crate::resources::simconfig::SimConfig;
use crate::resources::simrng::SimRng;
use crate::resources::worldtime::WorldTime;

/// Launch a projectile and spawn its entity.
///
/// Returns the new entity, or the validation error without creating a body.
pub fn spawn_projectile(
    commands: &mut Commands,
    physics: &mut dyn PhysicsBackend,
    rng: &mut Rng,
    now: f32,
    tuning: &ProjectileTuning,
    params: &LaunchParams,
) -> Result<Entity, ProjectileError> {
    let projectile = Projectile::launch(params, tuning, now, rng, physics)?;
    let position = WorldPosition {
        pos: projectile.spawn_position,
    };
    let entity = commands
        .spawn((projectile, position, Orientation::default()))
        .id();
    debug!("Spawned projectile {:?} at {}", entity, params.position);
    Ok(entity)
}

/// Move a projectile to its terminal state, notify observers and despawn it.
///
/// Does nothing and returns `false` if the projectile already terminated.
pub fn finish_projectile(
    commands: &mut Commands,
    entity: Entity,
    projectile: &mut Projectile,
    kind: TerminalKind,
    physics: &mut dyn PhysicsBackend,
) -> bool {
    if !projectile.terminate(kind.clone(), physics) {
        return false;
    }
    debug!("Projectile {:?} terminated: {:?}", entity, kind);
    commands.trigger(ProjectileTerminated {
        projectile: entity,
        kind,
    });
    commands.entity(entity).try_despawn();
    true
}

/// Launch every queued [`SpawnProjectile`] request.
///
/// Invalid requests are logged and dropped; they never reach the backend.
pub fn projectile_spawn_system(
    mut requests: MessageReader<SpawnProjectile>,
    mut physics: ResMut<PhysicsWorld>,
    mut rng: ResMut<SimRng>,
    time: Res<WorldTime>,
    config: Res<SimConfig>,
    mut commands: Commands,
) {
    let tuning = config.projectile_tuning();
    for request in requests.read() {
        if let Err(err) = spawn_projectile(
            &mut commands,
            physics.backend_mut(),
            &mut rng.rng,
            time.elapsed,
            &tuning,
            &request.params,
        ) {
            warn!("Rejected projectile spawn: {}", err);
        }
    }
}

/// Expire projectiles whose lifetime ran out without a collision.
pub fn projectile_lifetime_system(
    time: Res<WorldTime>,
    mut physics: ResMut<PhysicsWorld>,
    mut query: Query<(Entity, &mut Projectile)>,
    mut commands: Commands,
) {
    for (entity, mut projectile) in query.iter_mut() {
        if projectile.is_expired(time.elapsed) {
            finish_projectile(
                &mut commands,
                entity,
                &mut projectile,
                TerminalKind::Expired,
                physics.backend_mut(),
            );
        }
    }
}
