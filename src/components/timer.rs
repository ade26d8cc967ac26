// Fires a TimerEvent once the world clock passes started_at + duration.
use bevy_ecs::prelude::Component;

#[derive(Component, Debug, Clone)]
pub struct Timer {
    pub started_at: f32,
    pub duration: f32,
    pub signal: String,
}
impl Timer {
    pub fn new(started_at: f32, duration: f32, signal: impl Into<String>) -> Self {
        Timer {
            started_at,
            duration,
            signal: signal.into(),
        }
    }
    pub fn is_due(&self, now: f32) -> bool {
        now - self.started_at >= self.duration
    }
}
