//! Message queue maintenance.
use bevy_ecs::prelude::*;

use crate::events::animation::AnimationCmd;
use crate::events::projectile::SpawnProjectile;

/// Advance the message queues owned by the simulation.
///
/// Bevy ECS' [`Messages`] API requires calling `update()` once per frame so
/// old messages are dropped. Run this last in the frame.
pub fn update_sim_messages(
    mut spawns: ResMut<Messages<SpawnProjectile>>,
    mut animations: ResMut<Messages<AnimationCmd>>,
) {
    spawns.update();
    animations.update();
}
