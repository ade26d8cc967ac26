//! Physics bridge systems.
//!
//! - [`sync_target_colliders`] keeps the backend's static colliders in step
//!   with [`Target`] entities
//! - [`physics_step_system`] advances the backend, mirrors body poses onto
//!   projectile entities and turns contacts into [`CollisionEvent`]s
//!
//! # Ordering
//!
//! Runs after spawning (so bodies launched this frame move immediately) and
//! before the lifetime system (so a hit on the last frame of a projectile's
//! life wins over its expiry).

use bevy_ecs::prelude::*;
use log::{debug, warn};
use rustc_hash::FxHashMap;

use crate::components::group::Group;
use crate::components::position::{Orientation, WorldPosition};
use crate::components::projectile::Projectile;
use crate::components::target::Target;
use crate::events::collision::CollisionEvent;
use crate::resources::physics::{BodyHandle, ColliderDesc, PhysicsWorld};
use crate::resources::worldtime::WorldTime;

/// Register new targets with the backend and drop removed ones.
pub fn sync_target_colliders(
    mut added: Query<(Entity, &Group, &mut Target), Added<Target>>,
    mut removed: RemovedComponents<Target>,
    mut physics: ResMut<PhysicsWorld>,
) {
    for entity in removed.read() {
        if physics.unregister_target(entity) {
            debug!("Unregistered target {:?}", entity);
        }
    }
    for (entity, group, mut target) in added.iter_mut() {
        let handle = physics.register_target(
            entity,
            ColliderDesc {
                shape: target.shape,
                category: group.clone(),
                entity: Some(entity),
            },
        );
        target.collider = Some(handle);
        debug!("Registered {} target {:?}", group.name(), entity);
    }
}

/// Step the physics backend by the frame delta.
///
/// Live projectiles get their pose copied from the backend; every contact
/// becomes a [`CollisionEvent`] for the collision dispatcher.
pub fn physics_step_system(
    time: Res<WorldTime>,
    mut physics: ResMut<PhysicsWorld>,
    mut projectiles: Query<(Entity, &Projectile, &mut WorldPosition, &mut Orientation)>,
    mut commands: Commands,
) {
    let contacts = physics.backend_mut().step(time.delta);

    let mut by_body: FxHashMap<BodyHandle, Entity> = FxHashMap::default();
    for (entity, projectile, mut position, mut orientation) in projectiles.iter_mut() {
        let Some(body) = projectile.body() else {
            continue;
        };
        by_body.insert(body, entity);
        if let Some(state) = physics.backend().body(body) {
            position.pos = state.position;
            orientation.rot = state.orientation;
        }
    }

    for contact in contacts {
        match by_body.get(&contact.body) {
            Some(&projectile) => commands.trigger(CollisionEvent {
                projectile,
                category: contact.category,
                target: contact.target,
            }),
            None => warn!("Contact for body {} with no projectile", contact.body.0),
        }
    }
}
