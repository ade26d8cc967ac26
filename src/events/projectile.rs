//! Projectile requests and notifications.
//!
//! - [`SpawnProjectile`] is a queued request, read by
//!   [`projectile_spawn_system`](crate::systems::projectile::projectile_spawn_system)
//! - [`ProjectileTerminated`] is triggered exactly once per projectile, when
//!   it hits something or expires
use bevy_ecs::message::Message;
use bevy_ecs::prelude::*;

use crate::components::projectile::{LaunchParams, TerminalKind};

#[derive(Message, Debug, Clone, Copy)]
pub struct SpawnProjectile {
    pub params: LaunchParams,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct ProjectileTerminated {
    pub projectile: Entity,
    pub kind: TerminalKind,
}
