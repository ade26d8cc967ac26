use glam::{Quat, Vec3};
use log::debug;
use rustc_hash::FxHashMap;

use super::{
    BodyHandle, BodyState, ColliderDesc, ColliderHandle, Contact, PhysicsBackend, PhysicsError,
};

/// Minimal in-process physics engine.
///
/// Bodies are spheres of a shared radius integrated with explicit Euler under
/// a constant gravity; orientation follows the angular velocity. Colliders are
/// static. Contacts are evaluated in handle order so a given sequence of calls
/// always yields the same contacts.
///
/// Handles are allocated in increasing order and never reused, so a handle
/// below `next_body` that is no longer live was released before.
pub struct KinematicPhysics {
    gravity: Vec3,
    body_radius: f32,
    bodies: FxHashMap<BodyHandle, BodyState>,
    colliders: FxHashMap<ColliderHandle, ColliderDesc>,
    next_body: u64,
    next_collider: u64,
}

impl Default for KinematicPhysics {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 0.25)
    }
}

impl KinematicPhysics {
    pub fn new(gravity: Vec3, body_radius: f32) -> Self {
        Self {
            gravity,
            body_radius,
            bodies: FxHashMap::default(),
            colliders: FxHashMap::default(),
            next_body: 1,
            next_collider: 1,
        }
    }

    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    pub fn body_radius(&self) -> f32 {
        self.body_radius
    }

    fn was_issued(&self, handle: BodyHandle) -> bool {
        handle.0 >= 1 && handle.0 < self.next_body
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    fn integrate(state: &mut BodyState, gravity: Vec3, dt: f32) {
        state.velocity += gravity * dt;
        state.position += state.velocity * dt;

        let spin = state.angular_velocity.length();
        if spin > f32::EPSILON {
            let turn = Quat::from_axis_angle(state.angular_velocity / spin, spin * dt);
            state.orientation = (turn * state.orientation).normalize();
        }
    }
}

impl PhysicsBackend for KinematicPhysics {
    fn spawn_body(
        &mut self,
        position: Vec3,
        velocity: Vec3,
        angular_velocity: Vec3,
    ) -> BodyHandle {
        let handle = BodyHandle(self.next_body);
        self.next_body += 1;
        self.bodies.insert(
            handle,
            BodyState {
                position,
                orientation: Quat::IDENTITY,
                velocity,
                angular_velocity,
            },
        );
        debug!("physics: spawned body {} at {:?}", handle.0, position);
        handle
    }

    fn release_body(&mut self, handle: BodyHandle) -> Result<(), PhysicsError> {
        if self.bodies.remove(&handle).is_some() {
            debug!("physics: released body {}", handle.0);
            Ok(())
        } else if self.was_issued(handle) {
            Err(PhysicsError::DoubleRelease(handle))
        } else {
            Err(PhysicsError::UnknownBody(handle))
        }
    }

    fn body(&self, handle: BodyHandle) -> Option<BodyState> {
        self.bodies.get(&handle).copied()
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn insert_collider(&mut self, desc: ColliderDesc) -> ColliderHandle {
        let handle = ColliderHandle(self.next_collider);
        self.next_collider += 1;
        self.colliders.insert(handle, desc);
        handle
    }

    fn remove_collider(&mut self, handle: ColliderHandle) -> bool {
        self.colliders.remove(&handle).is_some()
    }

    fn step(&mut self, dt: f32) -> Vec<Contact> {
        if dt <= 0.0 {
            return Vec::new();
        }

        let mut collider_order: Vec<ColliderHandle> = self.colliders.keys().copied().collect();
        collider_order.sort_unstable();
        let mut body_order: Vec<BodyHandle> = self.bodies.keys().copied().collect();
        body_order.sort_unstable();

        let mut contacts = Vec::new();
        for handle in body_order {
            let Some(state) = self.bodies.get_mut(&handle) else {
                continue;
            };
            Self::integrate(state, self.gravity, dt);

            let position = state.position;
            let hit = collider_order
                .iter()
                .filter_map(|c| self.colliders.get(c))
                .find(|desc| desc.shape.overlaps_sphere(position, self.body_radius));
            if let Some(desc) = hit {
                contacts.push(Contact {
                    body: handle,
                    category: desc.category.clone(),
                    target: desc.entity,
                });
            }
        }
        contacts
    }
}
