//! Concussion effect controller.
//!
//! A concussion run is a short camera disturbance started by every player
//! hit. It is driven by plain ECS state rather than self-scheduling
//! callbacks:
//!
//! - [`start_concussion`] broadcasts `player-hit` and spawns a
//!   [`ConcussionRun`] entity with a watchdog [`Timer`] of the same duration
//! - [`concussion_system`] samples every live run once per frame and
//!   broadcasts `concussion-update`
//! - once a run is past its duration or cancelled, the system broadcasts one
//!   `{0, 0}` sample and despawns it
//! - [`CancelConcussion`] can be triggered any number of times by anyone,
//!   including the watchdog through [`concussion_watchdog_observer`]
//!
//! # Sampling
//!
//! With `p = elapsed / duration`:
//!
//! ```text
//! envelope = intensity  * (1 - p^0.2)
//! wobble   = base_wobble * (1 - p^0.3)
//! x = (wobble + 0.7 * sin(t * fx) + 0.3 * sin(t * hx * fx)) * envelope
//! y = (wobble + 0.7 * cos(t * fy) + 0.3 * cos(t * hy * fy)) * envelope
//! ```
//!
//! The small exponents keep the envelope near full strength for most of the
//! run and collapse it quickly as `p` approaches 1.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::concussion::{
    ConcussionHandle, ConcussionParams, ConcussionRun, ConcussionSample,
};
use crate::components::timer::Timer;
use crate::events::concussion::CancelConcussion;
use crate::events::timer::TimerEvent;
use crate::resources::eventbus::{BusEvent, EventBus};
use crate::resources::worldtime::WorldTime;

/// Timer signal of the upper-bound watchdog attached to every run.
pub const CONCUSSION_WATCHDOG: &str = "concussion_watchdog";

const INTENSITY_EXPONENT: f32 = 0.2;
const WOBBLE_EXPONENT: f32 = 0.3;
const PRIMARY_WEIGHT: f32 = 0.7;
const HARMONIC_WEIGHT: f32 = 0.3;

/// Sample the disturbance `elapsed_ms` into a run.
///
/// Pure function of its inputs. Returns exactly [`ConcussionSample::ZERO`]
/// once `elapsed_ms >= duration_ms`.
pub fn concussion_sample(params: &ConcussionParams, elapsed_ms: f32) -> ConcussionSample {
    let duration = params.duration_ms as f32;
    if duration <= 0.0 || elapsed_ms >= duration {
        return ConcussionSample::ZERO;
    }
    let t = elapsed_ms.max(0.0);
    let progress = t / duration;

    let envelope = params.intensity * (1.0 - progress.powf(INTENSITY_EXPONENT));
    let wobble = params.base_wobble * (1.0 - progress.powf(WOBBLE_EXPONENT));

    let fx = params.x.freq;
    let fy = params.y.freq;
    let x = wobble
        + PRIMARY_WEIGHT * (t * fx).sin()
        + HARMONIC_WEIGHT * (t * params.x.harmonic * fx).sin();
    let y = wobble
        + PRIMARY_WEIGHT * (t * fy).cos()
        + HARMONIC_WEIGHT * (t * params.y.harmonic * fy).cos();

    ConcussionSample {
        rotation_x: x * envelope,
        rotation_y: y * envelope,
    }
}

fn update_event(run: Entity, sample: ConcussionSample) -> BusEvent {
    BusEvent::ConcussionUpdate {
        run: run.to_bits(),
        rotation_x: sample.rotation_x,
        rotation_y: sample.rotation_y,
    }
}

/// Start a new run at `now`.
///
/// Broadcasts `player-hit` immediately. The returned handle stays valid for
/// cancellation even after the run ends.
pub fn start_concussion(
    commands: &mut Commands,
    bus: &mut EventBus,
    now: f32,
    params: ConcussionParams,
) -> ConcussionHandle {
    bus.publish(&BusEvent::PlayerHit {
        duration_ms: params.duration_ms,
    });
    let entity = commands
        .spawn((
            ConcussionRun::new(params, now),
            Timer::new(now, params.duration_secs(), CONCUSSION_WATCHDOG),
        ))
        .id();
    info!(
        "Concussion {:?} started ({}ms, intensity {})",
        entity, params.duration_ms, params.intensity
    );
    ConcussionHandle(entity)
}

/// Advance every live run by one frame.
pub fn concussion_system(
    time: Res<WorldTime>,
    mut bus: ResMut<EventBus>,
    mut runs: Query<(Entity, &mut ConcussionRun)>,
    mut commands: Commands,
) {
    for (entity, mut run) in runs.iter_mut() {
        let elapsed_ms = time.millis_since(run.started_at);
        if run.should_stop(elapsed_ms) {
            // The only place a terminal zero is sent.
            if run.finish() {
                bus.publish(&update_event(entity, ConcussionSample::ZERO));
                commands.entity(entity).try_despawn();
                debug!(
                    "Concussion {:?} ended after {} frame(s){}",
                    entity,
                    run.frames,
                    if run.is_cancelled() { " (cancelled)" } else { "" }
                );
            }
            continue;
        }
        let sample = concussion_sample(&run.params, elapsed_ms);
        run.frames += 1;
        bus.publish(&update_event(entity, sample));
    }
}

/// Stop a run at its next frame. No-op for finished or unknown runs.
pub fn cancel_concussion_observer(
    trigger: On<CancelConcussion>,
    mut runs: Query<&mut ConcussionRun>,
) {
    let run = trigger.event().run.entity();
    if let Ok(mut state) = runs.get_mut(run) {
        if state.cancel() {
            debug!("Concussion {:?} cancelled", run);
        }
    }
}

/// Forward an expired watchdog timer to [`CancelConcussion`].
pub fn concussion_watchdog_observer(trigger: On<TimerEvent>, mut commands: Commands) {
    let event = trigger.event();
    if !event.is(CONCUSSION_WATCHDOG) {
        return;
    }
    commands.trigger(CancelConcussion {
        run: ConcussionHandle(event.entity),
    });
}
