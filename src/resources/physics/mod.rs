//! Physics engine seam.
//!
//! The simulation never integrates rigid bodies itself. It talks to a
//! [`PhysicsBackend`] through the [`PhysicsWorld`] resource: bodies are
//! requested with an initial linear and angular velocity, stepped once per
//! frame, and released when their projectile reaches its terminal event.
//! Each step returns the [`Contact`]s the engine detected, which the
//! [`physics_step_system`](crate::systems::physics::physics_step_system)
//! forwards as [`CollisionEvent`](crate::events::collision::CollisionEvent)s.
//!
//! [`KinematicPhysics`] is the in-crate backend used by the headless runner
//! and the tests. Any other engine can be plugged in by implementing the trait.

mod kinematic;

pub use kinematic::KinematicPhysics;

use std::fmt;

use bevy_ecs::prelude::{Entity, Resource};
use glam::{Quat, Vec3};
use rustc_hash::FxHashMap;

use crate::components::group::Group;

/// Opaque handle to a body owned by the physics backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub u64);

/// Opaque handle to a static collider registered with the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderHandle(pub u64);

/// Snapshot of a body's integrated state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyState {
    pub position: Vec3,
    pub orientation: Quat,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
}

/// Static collision volume in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColliderShape {
    Sphere { center: Vec3, radius: f32 },
    Aabb { min: Vec3, max: Vec3 },
}

impl ColliderShape {
    /// Whether a sphere of `radius` centred at `point` touches this shape.
    pub fn overlaps_sphere(&self, point: Vec3, radius: f32) -> bool {
        match *self {
            ColliderShape::Sphere {
                center,
                radius: shape_radius,
            } => {
                let reach = shape_radius + radius;
                point.distance_squared(center) <= reach * reach
            }
            ColliderShape::Aabb { min, max } => {
                let closest = point.clamp(min, max);
                point.distance_squared(closest) <= radius * radius
            }
        }
    }
}

/// Description of a collider to register with the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct ColliderDesc {
    pub shape: ColliderShape,
    /// Category reported in contacts against this collider.
    pub category: Group,
    /// ECS entity the collider stands for, if any.
    pub entity: Option<Entity>,
}

/// A collision reported by [`PhysicsBackend::step`].
#[derive(Clone, Debug, PartialEq)]
pub struct Contact {
    pub body: BodyHandle,
    pub category: Group,
    pub target: Option<Entity>,
}

/// Errors reported by a physics backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicsError {
    /// The body was already released.
    DoubleRelease(BodyHandle),
    /// The handle was never issued by this backend.
    UnknownBody(BodyHandle),
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::DoubleRelease(handle) => {
                write!(f, "body {} was already released", handle.0)
            }
            PhysicsError::UnknownBody(handle) => write!(f, "unknown body {}", handle.0),
        }
    }
}

impl std::error::Error for PhysicsError {}

/// Contract the simulation expects from a rigid-body engine.
pub trait PhysicsBackend: Send + Sync {
    /// Create a dynamic body and hand back its handle.
    fn spawn_body(&mut self, position: Vec3, velocity: Vec3, angular_velocity: Vec3)
    -> BodyHandle;

    /// Destroy a body. Releasing the same handle twice is an error.
    fn release_body(&mut self, handle: BodyHandle) -> Result<(), PhysicsError>;

    /// Current state of a live body.
    fn body(&self, handle: BodyHandle) -> Option<BodyState>;

    /// Number of live bodies.
    fn body_count(&self) -> usize;

    fn insert_collider(&mut self, desc: ColliderDesc) -> ColliderHandle;

    fn remove_collider(&mut self, handle: ColliderHandle) -> bool;

    /// Advance the world by `dt` seconds and report new contacts.
    ///
    /// A body reports at most one contact per step, and released bodies
    /// never report contacts.
    fn step(&mut self, dt: f32) -> Vec<Contact>;
}

/// Resource owning the active physics backend and the target colliders it knows.
#[derive(Resource)]
pub struct PhysicsWorld {
    backend: Box<dyn PhysicsBackend>,
    targets: FxHashMap<Entity, ColliderHandle>,
}

impl PhysicsWorld {
    pub fn new(backend: impl PhysicsBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            targets: FxHashMap::default(),
        }
    }

    pub fn backend(&self) -> &dyn PhysicsBackend {
        self.backend.as_ref()
    }

    pub fn backend_mut(&mut self) -> &mut dyn PhysicsBackend {
        self.backend.as_mut()
    }

    /// Register the collider of a target entity.
    ///
    /// Re-registering an entity replaces its previous collider.
    pub fn register_target(&mut self, entity: Entity, desc: ColliderDesc) -> ColliderHandle {
        let handle = self.backend.insert_collider(desc);
        if let Some(previous) = self.targets.insert(entity, handle) {
            self.backend.remove_collider(previous);
        }
        handle
    }

    /// Drop the collider of a target entity. Returns false if it had none.
    pub fn unregister_target(&mut self, entity: Entity) -> bool {
        match self.targets.remove(&entity) {
            Some(handle) => self.backend.remove_collider(handle),
            None => false,
        }
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }
}
