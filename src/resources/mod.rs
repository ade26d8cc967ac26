//! ECS resources made available to systems.
//!
//! Overview
//! - `animationclips` – clips the external animation player knows about
//! - `eventbus` – publish/subscribe bus for `player-hit` and `concussion-update`
//! - `physics` – physics engine seam and the in-crate kinematic backend
//! - `playervitals` – player health pool damaged by projectile hits
//! - `simconfig` – tunables loaded from an INI file
//! - `simrng` – seeded random source
//! - `worldtime` – simulation time and delta
pub mod animationclips;
pub mod eventbus;
pub mod physics;
pub mod playervitals;
pub mod simconfig;
pub mod simrng;
pub mod worldtime;
