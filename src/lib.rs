//! Impact FX library.
//!
//! Headless simulation of ballistic projectiles and the concussion effect a
//! player hit triggers, built on `bevy_ecs`:
//!
//! - projectiles are launched into an external physics backend, which
//!   integrates them and reports contacts
//! - contacts are dispatched by target category; a player hit applies damage
//!   and starts a concussion run
//! - concussion runs broadcast a decaying camera disturbance on the
//!   [`EventBus`](resources::eventbus::EventBus) every frame and always end
//!   with a `{0, 0}` sample
//!
//! See [`simulation`] for world setup and the frame schedule.

pub mod components;
pub mod events;
pub mod resources;
pub mod simulation;
pub mod systems;
