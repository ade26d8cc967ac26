use bevy_ecs::message::Message;
use bevy_ecs::prelude::Entity;

/// Commands sent *to* the external animation blending manager.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AnimationCmd {
    Play {
        entity: Entity,
        clip: String,
        fade_seconds: f32,
    },
}
