//! Collision dispatcher.
//!
//! Routes each [`CollisionEvent`] by the category of the struck collider:
//!
//! - `player`: apply the projectile's damage, start a concussion run, ask the
//!   animation player for the hit reaction, then end the projectile
//! - anything else: end the projectile
//!
//! All of it happens inside one observer call, in that order. Events for a
//! projectile that already ended (or was despawned) are ignored, so a
//! projectile damages the player at most once.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::components::projectile::{Projectile, TerminalKind};
use crate::events::animation::AnimationCmd;
use crate::events::collision::CollisionEvent;
use crate::resources::animationclips::AnimationClips;
use crate::resources::eventbus::EventBus;
use crate::resources::physics::PhysicsWorld;
use crate::resources::playervitals::PlayerVitals;
use crate::resources::simconfig::SimConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::concussion::start_concussion;
use crate::systems::projectile::finish_projectile;

#[allow(clippy::too_many_arguments)]
pub fn collision_dispatch_observer(
    trigger: On<CollisionEvent>,
    mut projectiles: Query<&mut Projectile>,
    mut physics: ResMut<PhysicsWorld>,
    mut vitals: ResMut<PlayerVitals>,
    mut bus: ResMut<EventBus>,
    time: Res<WorldTime>,
    config: Res<SimConfig>,
    clips: Res<AnimationClips>,
    mut animations: MessageWriter<AnimationCmd>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let Ok(mut projectile) = projectiles.get_mut(event.projectile) else {
        debug!("Collision for missing projectile {:?}", event.projectile);
        return;
    };
    if projectile.is_terminated() {
        return;
    }

    if event.category.is_player() {
        vitals.apply_damage(projectile.damage);
        start_concussion(&mut commands, &mut bus, time.elapsed, config.concussion);
        request_hit_reaction(event.target, &config, &clips, &mut animations);
    }

    finish_projectile(
        &mut commands,
        event.projectile,
        &mut projectile,
        TerminalKind::Hit {
            category: event.category.clone(),
        },
        physics.backend_mut(),
    );
}

/// Queue the hit-reaction clip on the struck entity.
///
/// Skipped with a warning when the entity or the clip is unknown.
fn request_hit_reaction(
    target: Option<Entity>,
    config: &SimConfig,
    clips: &AnimationClips,
    animations: &mut MessageWriter<AnimationCmd>,
) {
    let Some(entity) = target else {
        warn!("Player hit without a target entity, skipping hit reaction");
        return;
    };
    if !clips.contains(&config.hit_clip) {
        warn!(
            "Animation clip '{}' not found, skipping hit reaction",
            config.hit_clip
        );
        return;
    }
    animations.write(AnimationCmd::Play {
        entity,
        clip: config.hit_clip.clone(),
        fade_seconds: config.hit_fade,
    });
}
