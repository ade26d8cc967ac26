//! Static collision targets.
//!
//! An entity with [`Target`] and a [`Group`](super::group::Group) is
//! registered with the physics backend by
//! [`sync_target_colliders`](crate::systems::physics::sync_target_colliders)
//! the frame it is spawned, and unregistered when the component goes away.

use bevy_ecs::prelude::Component;
use glam::Vec3;

use crate::resources::physics::{ColliderHandle, ColliderShape};

#[derive(Component, Clone, Debug)]
pub struct Target {
    pub shape: ColliderShape,
    /// Set once the backend has accepted the collider.
    pub collider: Option<ColliderHandle>,
}

impl Target {
    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Self {
            shape: ColliderShape::Sphere { center, radius },
            collider: None,
        }
    }

    pub fn aabb(min: Vec3, max: Vec3) -> Self {
        Self {
            shape: ColliderShape::Aabb { min, max },
            collider: None,
        }
    }
}
