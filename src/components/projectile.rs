//! Ballistic projectile component.
//!
//! A [`Projectile`] owns the physics body it was launched with. The body is
//! created by [`Projectile::launch`], integrated by the physics backend, and
//! released by [`Projectile::terminate`], which is the only way a projectile
//! reaches its terminal state.
//!
//! # Lifecycle
//!
//! 1. [`Projectile::launch`] validates the request, draws a random tumble and
//!    asks the backend for a body with `direction * speed` linear velocity
//! 2. The backend moves the body every frame; the projectile itself never
//!    touches game state
//! 3. Either the collision dispatcher (hit) or the lifetime system (expiry)
//!    calls [`Projectile::terminate`]; the first call wins and releases the
//!    body, later calls do nothing
//!
//! # Related
//!
//! - [`crate::systems::projectile`] – spawn and lifetime systems
//! - [`crate::systems::dispatch`] – the collision dispatcher

use std::fmt;

use bevy_ecs::prelude::Component;
use fastrand::Rng;
use glam::Vec3;
use log::error;

use crate::components::group::Group;
use crate::resources::physics::{BodyHandle, PhysicsBackend};

pub const DEFAULT_SPEED: f32 = 30.0;
pub const DEFAULT_DAMAGE: f32 = 20.0;
/// Seconds a projectile may fly without hitting anything.
pub const PROJECTILE_LIFETIME: f32 = 2.0;
/// Bound of the per-axis tumble, in rad/s.
pub const MAX_SPIN: f32 = 7.5;

/// Caller-facing spawn request.
///
/// `speed` and `damage` left unset are taken from [`ProjectileTuning`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaunchParams {
    pub position: Vec3,
    /// Flight direction. Does not need to be normalized, must not be zero.
    pub direction: Vec3,
    pub speed: Option<f32>,
    pub damage: Option<f32>,
}

impl LaunchParams {
    pub fn new(position: Vec3, direction: Vec3) -> Self {
        Self {
            position,
            direction,
            speed: None,
            damage: None,
        }
    }
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }
    pub fn with_damage(mut self, damage: f32) -> Self {
        self.damage = Some(damage);
        self
    }
}

/// Tuning shared by every projectile, taken from [`SimConfig`](crate::resources::simconfig::SimConfig).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileTuning {
    pub speed: f32,
    pub damage: f32,
    pub lifetime: f32,
    pub max_spin: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            damage: DEFAULT_DAMAGE,
            lifetime: PROJECTILE_LIFETIME,
            max_spin: MAX_SPIN,
        }
    }
}

/// Why a spawn request was rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileError {
    /// The direction has zero length or is not finite.
    InvalidDirection(Vec3),
    /// The speed is not a positive finite number.
    InvalidSpeed(f32),
}

impl fmt::Display for ProjectileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectileError::InvalidDirection(dir) => {
                write!(f, "invalid projectile direction {dir}")
            }
            ProjectileError::InvalidSpeed(speed) => write!(f, "invalid projectile speed {speed}"),
        }
    }
}

impl std::error::Error for ProjectileError {}

/// How a projectile's flight ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TerminalKind {
    /// Struck a collider of the given category.
    Hit { category: Group },
    /// Outlived its lifetime without touching anything.
    Expired,
}

#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub spawn_position: Vec3,
    /// Normalized flight direction.
    pub direction: Vec3,
    pub speed: f32,
    pub damage: f32,
    /// [`WorldTime::elapsed`](crate::resources::worldtime::WorldTime) at launch.
    pub spawned_at: f32,
    pub lifetime: f32,
    body: Option<BodyHandle>,
    terminal: Option<TerminalKind>,
}

impl Projectile {
    /// Validate `params` and create the physics body for a new projectile.
    ///
    /// On error the backend is not touched.
    pub fn launch(
        params: &LaunchParams,
        tuning: &ProjectileTuning,
        now: f32,
        rng: &mut Rng,
        physics: &mut dyn PhysicsBackend,
    ) -> Result<Self, ProjectileError> {
        let direction = params
            .direction
            .try_normalize()
            .ok_or(ProjectileError::InvalidDirection(params.direction))?;
        let speed = params.speed.unwrap_or(tuning.speed);
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ProjectileError::InvalidSpeed(speed));
        }

        let velocity = direction * speed;
        let angular_velocity = random_spin(rng, tuning.max_spin);
        let body = physics.spawn_body(params.position, velocity, angular_velocity);

        Ok(Self {
            spawn_position: params.position,
            direction,
            speed,
            damage: params.damage.unwrap_or(tuning.damage),
            spawned_at: now,
            lifetime: tuning.lifetime,
            body: Some(body),
            terminal: None,
        })
    }

    pub fn body(&self) -> Option<BodyHandle> {
        self.body
    }

    pub fn terminal(&self) -> Option<&TerminalKind> {
        self.terminal.as_ref()
    }

    pub fn is_terminated(&self) -> bool {
        self.terminal.is_some()
    }

    /// Whether the lifetime ran out at `now` while still in flight.
    pub fn is_expired(&self, now: f32) -> bool {
        !self.is_terminated() && now - self.spawned_at >= self.lifetime
    }

    /// Enter the terminal state and release the body.
    ///
    /// Returns `true` only for the call that performed the transition.
    pub fn terminate(&mut self, kind: TerminalKind, physics: &mut dyn PhysicsBackend) -> bool {
        if self.terminal.is_some() {
            return false;
        }
        self.terminal = Some(kind);
        if let Some(body) = self.body.take() {
            if let Err(err) = physics.release_body(body) {
                error!("Projectile body release failed: {}", err);
                debug_assert!(false, "projectile body released twice: {err}");
            }
        }
        true
    }
}

/// Uniform tumble in `[-max_spin, max_spin]`, drawn independently per axis.
fn random_spin(rng: &mut Rng, max_spin: f32) -> Vec3 {
    let mut axis = || (rng.f32() * 2.0 - 1.0) * max_spin;
    Vec3::new(axis(), axis(), axis())
}
