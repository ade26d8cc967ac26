//! Player health pool.
//!
//! Stands in for the game-state collaborator: the collision dispatcher calls
//! [`PlayerVitals::apply_damage`] once per player hit and never reads health
//! back to decide anything.

use bevy_ecs::prelude::Resource;
use log::info;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PlayerVitals {
    pub health: f32,
    pub max_health: f32,
    /// Number of damage applications so far.
    pub hits_taken: u32,
    /// Sum of all damage applied, including overkill.
    pub damage_taken: f32,
}

impl Default for PlayerVitals {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl PlayerVitals {
    pub fn new(max_health: f32) -> Self {
        Self {
            health: max_health,
            max_health,
            hits_taken: 0,
            damage_taken: 0.0,
        }
    }

    /// Subtract `amount` from health, clamping at zero. Returns the remaining health.
    pub fn apply_damage(&mut self, amount: f32) -> f32 {
        let amount = amount.max(0.0);
        self.health = (self.health - amount).max(0.0);
        self.hits_taken += 1;
        self.damage_taken += amount;
        info!(
            "Player took {} damage ({}/{} left)",
            amount, self.health, self.max_health
        );
        self.health
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}
