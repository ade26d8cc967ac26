//! Registry of animation clips the animation collaborator can play.
//!
//! Owned by the world instead of living in a global cache. The collision
//! dispatcher looks the hit-reaction clip up here before requesting it; a
//! missing clip only skips the cue.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

/// Metadata of a loaded clip.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    /// Clip length in seconds.
    pub duration: f32,
}

#[derive(Resource, Debug, Default)]
pub struct AnimationClips {
    pub clips: FxHashMap<String, AnimationClip>,
}

impl AnimationClips {
    pub fn insert(&mut self, name: impl Into<String>, duration: f32) {
        let name = name.into();
        self.clips.insert(
            name.clone(),
            AnimationClip { name, duration },
        );
    }

    pub fn get(&self, name: &str) -> Option<&AnimationClip> {
        self.clips.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }
}
