//! World-space pose mirrored from the physics backend.
//!
//! [`WorldPosition`] and [`Orientation`] are written by
//! [`physics_step_system`](crate::systems::physics::physics_step_system)
//! after each step; nothing else in the crate writes them.

use bevy_ecs::prelude::Component;
use glam::{Quat, Vec3};

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct WorldPosition {
    pub pos: Vec3,
}

impl WorldPosition {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            pos: Vec3::new(x, y, z),
        }
    }
}

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Orientation {
    pub rot: Quat,
}

impl Default for Orientation {
    fn default() -> Self {
        Self {
            rot: Quat::IDENTITY,
        }
    }
}
