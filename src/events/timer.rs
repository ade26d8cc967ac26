//! Deadline events.
//!
//! [`update_timers`](crate::systems::timer::update_timers) triggers a
//! [`TimerEvent`] when a [`Timer`](crate::components::timer::Timer) comes due
//! and removes the timer. Observers filter on `signal`; the concussion
//! watchdog is the only producer today.

use bevy_ecs::prelude::*;

#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct TimerEvent {
    /// Entity that carried the timer.
    pub entity: Entity,
    pub signal: String,
}

impl TimerEvent {
    pub fn is(&self, signal: &str) -> bool {
        self.signal == signal
    }
}
