//! Concussion run state.
//!
//! Each player hit spawns one entity carrying a [`ConcussionRun`]. The run is
//! advanced once per frame by
//! [`concussion_system`](crate::systems::concussion::concussion_system) and
//! despawned after its final zero sample. Runs share nothing: two overlapping
//! hits produce two independent entities, each with its own start time.

use bevy_ecs::prelude::{Component, Entity};

/// Angular frequency of one channel's primary oscillation plus the ratio of
/// its harmonic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OscillatorPair {
    /// Primary angular frequency in rad/ms.
    pub freq: f32,
    /// Harmonic frequency as a multiple of `freq`.
    pub harmonic: f32,
}

/// Shape of a concussion run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConcussionParams {
    pub duration_ms: u32,
    pub intensity: f32,
    pub base_wobble: f32,
    pub x: OscillatorPair,
    pub y: OscillatorPair,
}

impl Default for ConcussionParams {
    fn default() -> Self {
        Self {
            duration_ms: 800,
            intensity: 6.0,
            base_wobble: 0.3,
            x: OscillatorPair {
                freq: 0.15,
                harmonic: 2.1,
            },
            y: OscillatorPair {
                freq: 0.12,
                harmonic: 1.8,
            },
        }
    }
}

impl ConcussionParams {
    pub fn duration_secs(&self) -> f32 {
        self.duration_ms as f32 / 1000.0
    }
}

/// One broadcast value of the disturbance.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ConcussionSample {
    pub rotation_x: f32,
    pub rotation_y: f32,
}

impl ConcussionSample {
    pub const ZERO: ConcussionSample = ConcussionSample {
        rotation_x: 0.0,
        rotation_y: 0.0,
    };

    pub fn is_zero(&self) -> bool {
        self.rotation_x == 0.0 && self.rotation_y == 0.0
    }
}

#[derive(Component, Debug, Clone)]
pub struct ConcussionRun {
    pub params: ConcussionParams,
    /// [`WorldTime::elapsed`](crate::resources::worldtime::WorldTime) at start.
    pub started_at: f32,
    /// Samples broadcast so far, not counting the final zero.
    pub frames: u32,
    cancelled: bool,
    finished: bool,
}

impl ConcussionRun {
    pub fn new(params: ConcussionParams, started_at: f32) -> Self {
        Self {
            params,
            started_at,
            frames: 0,
            cancelled: false,
            finished: false,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Request the run to stop. Returns false when it was already stopping or done.
    pub fn cancel(&mut self) -> bool {
        if self.cancelled || self.finished {
            return false;
        }
        self.cancelled = true;
        true
    }

    /// Mark the final zero sample as sent. Returns false if it already was.
    pub fn finish(&mut self) -> bool {
        !std::mem::replace(&mut self.finished, true)
    }

    /// Whether the run must stop at `elapsed_ms`.
    pub fn should_stop(&self, elapsed_ms: f32) -> bool {
        self.cancelled || elapsed_ms >= self.params.duration_ms as f32
    }
}

/// Handle returned by [`start_concussion`](crate::systems::concussion::start_concussion).
///
/// Cancelling through it is always safe, including after the run completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConcussionHandle(pub Entity);

impl ConcussionHandle {
    pub fn entity(&self) -> Entity {
        self.0
    }
}
