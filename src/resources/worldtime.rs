//! Simulation clock resource.
//!
//! Every time-dependent system in the crate (projectile lifetime, physics
//! stepping, concussion sampling, watchdog timers) reads the same
//! [`WorldTime`], so a frame is observed identically by all of them.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Scaled seconds since the simulation started.
    pub elapsed: f32,
    /// Scaled seconds covered by the current frame.
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Scaled milliseconds elapsed since `since` (a value of [`WorldTime::elapsed`]).
    pub fn millis_since(&self, since: f32) -> f32 {
        (self.elapsed - since) * 1000.0
    }
}
