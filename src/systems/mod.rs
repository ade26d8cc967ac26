//! Simulation systems and observers.
//!
//! Submodules overview
//! - [`concussion`] – sample, broadcast and cancel concussion runs
//! - [`dispatch`] – route collisions to damage and effects
//! - [`messages`] – per-frame message queue maintenance
//! - [`physics`] – step the physics backend and sync target colliders
//! - [`projectile`] – spawn projectiles and expire them
//! - [`time`] – update simulation time and delta
//! - [`timer`] – fire watchdog timers

pub mod concussion;
pub mod dispatch;
pub mod messages;
pub mod physics;
pub mod projectile;
pub mod time;
pub mod timer;
