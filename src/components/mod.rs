//! ECS components for entities.
//!
//! Submodules overview:
//! - [`concussion`] – state of one running concussion effect and its tuning
//! - [`group`] – category tag of collision targets
//! - [`position`] – world-space pose mirrored from the physics backend
//! - [`projectile`] – ballistic projectile owning a physics body
//! - [`target`] – static collider registered with the physics backend
//! - [`timer`] – one-shot timer that emits an event when due

pub mod concussion;
pub mod group;
pub mod position;
pub mod projectile;
pub mod target;
pub mod timer;
