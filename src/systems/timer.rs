//! Watchdog timer system.
//!
//! [`update_timers`] checks every [`Timer`](crate::components::timer::Timer)
//! against the world clock and triggers a
//! [`TimerEvent`](crate::events::timer::TimerEvent) once it comes due. Timers
//! are one-shot: the component is removed when it fires.
use bevy_ecs::prelude::*;

use crate::components::timer::Timer;
use crate::events::timer::TimerEvent;
use crate::resources::worldtime::WorldTime;

pub fn update_timers(
    world_time: Res<WorldTime>,
    query: Query<(Entity, &Timer)>,
    mut commands: Commands,
) {
    for (entity, timer) in query.iter() {
        if timer.is_due(world_time.elapsed) {
            commands.trigger(TimerEvent {
                entity,
                signal: timer.signal.clone(),
            });
            commands.entity(entity).remove::<Timer>();
        }
    }
}
