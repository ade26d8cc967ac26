//! Collision notification forwarded from the physics backend.
//!
//! [`physics_step_system`](crate::systems::physics::physics_step_system)
//! triggers one [`CollisionEvent`] per contact the backend reports. The
//! [`collision_dispatch_observer`](crate::systems::dispatch::collision_dispatch_observer)
//! consumes it synchronously and does not keep it.
use bevy_ecs::prelude::*;

use crate::components::group::Group;

/// A projectile's body touched a collider.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct CollisionEvent {
    /// The projectile entity whose body collided.
    pub projectile: Entity,
    /// Category of the struck collider.
    pub category: Group,
    /// Entity the collider belongs to, when it has one.
    pub target: Option<Entity>,
}
