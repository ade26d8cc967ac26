//! Category tag shared by collision targets and contacts.
//!
//! The collision dispatcher only cares whether a contact hit the
//! [`PLAYER`] category; every other category is treated as solid geometry
//! that consumes the projectile.

use bevy_ecs::prelude::Component;

pub const PLAYER: &str = "player";
pub const WORLD: &str = "world";
pub const ENEMY: &str = "enemy";

#[derive(Component, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Group(String);

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Group(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_player(&self) -> bool {
        self.0 == PLAYER
    }
}
