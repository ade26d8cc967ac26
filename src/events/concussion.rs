//! Cancellation request for a concussion run.
//!
//! Handled by [`cancel_concussion_observer`](crate::systems::concussion::cancel_concussion_observer).
//! Cancelling a run that already finished, or cancelling twice, does nothing.
use bevy_ecs::prelude::*;

use crate::components::concussion::ConcussionHandle;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelConcussion {
    pub run: ConcussionHandle,
}
