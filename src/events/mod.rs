//! Event and message types exchanged across systems.
//!
//! Observer events are handled synchronously when triggered; messages are
//! queued and read by systems later in the frame.
//!
//! Submodules:
//! - [`animation`] – commands for the external animation player
//! - [`collision`] – contacts reported by the physics backend
//! - [`concussion`] – cancellation of a running concussion effect
//! - [`projectile`] – spawn requests and terminal notifications
//! - [`timer`] – expiry of watchdog timers
pub mod animation;
pub mod collision;
pub mod concussion;
pub mod projectile;
pub mod timer;
