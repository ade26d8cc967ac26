//! Simulation configuration resource.
//!
//! Holds the tunables of the projectile and concussion pipeline, loaded from
//! an INI configuration file. Every value has a safe default so the
//! simulation runs without a file.
//!
//! # Configuration File Format
//!
//! ```ini
//! [projectile]
//! speed = 30
//! damage = 20
//! lifetime = 2.0
//! spin = 7.5
//!
//! [concussion]
//! duration_ms = 800
//! intensity = 6.0
//! base_wobble = 0.3
//!
//! [physics]
//! gravity = -9.81
//! body_radius = 0.25
//!
//! [player]
//! health = 100
//! hit_clip = hit_reaction
//! hit_fade = 0.1
//!
//! [simulation]
//! fps = 60
//! seed = 42
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::concussion::ConcussionParams;
use crate::components::projectile::{
    DEFAULT_DAMAGE, DEFAULT_SPEED, MAX_SPIN, PROJECTILE_LIFETIME, ProjectileTuning,
};

const DEFAULT_GRAVITY: f32 = -9.81;
const DEFAULT_BODY_RADIUS: f32 = 0.25;
const DEFAULT_PLAYER_HEALTH: f32 = 100.0;
const DEFAULT_HIT_CLIP: &str = "hit_reaction";
const DEFAULT_HIT_FADE: f32 = 0.1;
const DEFAULT_FPS: u32 = 60;
const DEFAULT_SEED: u64 = 42;
const DEFAULT_CONFIG_PATH: &str = "./impactfx.ini";

#[derive(Resource, Debug, Clone)]
pub struct SimConfig {
    pub projectile_speed: f32,
    pub projectile_damage: f32,
    /// Seconds before an unhit projectile expires.
    pub projectile_lifetime: f32,
    /// Per-axis tumble bound in rad/s.
    pub projectile_spin: f32,
    pub concussion: ConcussionParams,
    /// Vertical acceleration applied by the physics backend.
    pub gravity: f32,
    pub body_radius: f32,
    pub player_health: f32,
    /// Animation clip played on the player when hit.
    pub hit_clip: String,
    pub hit_fade: f32,
    /// Fixed simulation rate of the headless runner.
    pub fps: u32,
    pub seed: u64,
    pub config_path: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SimConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            projectile_speed: DEFAULT_SPEED,
            projectile_damage: DEFAULT_DAMAGE,
            projectile_lifetime: PROJECTILE_LIFETIME,
            projectile_spin: MAX_SPIN,
            concussion: ConcussionParams::default(),
            gravity: DEFAULT_GRAVITY,
            body_radius: DEFAULT_BODY_RADIUS,
            player_health: DEFAULT_PLAYER_HEALTH,
            hit_clip: DEFAULT_HIT_CLIP.to_string(),
            hit_fade: DEFAULT_HIT_FADE,
            fps: DEFAULT_FPS,
            seed: DEFAULT_SEED,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);
        info!(
            "Loaded config from {:?}: speed={}, damage={}, lifetime={}s, concussion={}ms x{}",
            self.config_path,
            self.projectile_speed,
            self.projectile_damage,
            self.projectile_lifetime,
            self.concussion.duration_ms,
            self.concussion.intensity
        );
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, contents: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(contents.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        let float = |section: &str, key: &str| {
            config
                .getfloat(section, key)
                .ok()
                .flatten()
                .map(|v| v as f32)
        };
        let uint = |section: &str, key: &str| config.getuint(section, key).ok().flatten();

        // [projectile] section
        if let Some(speed) = float("projectile", "speed") {
            self.projectile_speed = speed;
        }
        if let Some(damage) = float("projectile", "damage") {
            self.projectile_damage = damage;
        }
        if let Some(lifetime) = float("projectile", "lifetime") {
            self.projectile_lifetime = lifetime;
        }
        if let Some(spin) = float("projectile", "spin") {
            self.projectile_spin = spin.abs();
        }

        // [concussion] section
        if let Some(duration) = uint("concussion", "duration_ms") {
            self.concussion.duration_ms = duration.min(u32::MAX as u64) as u32;
        }
        if let Some(intensity) = float("concussion", "intensity") {
            self.concussion.intensity = intensity;
        }
        if let Some(wobble) = float("concussion", "base_wobble") {
            self.concussion.base_wobble = wobble;
        }

        // [physics] section
        if let Some(gravity) = float("physics", "gravity") {
            self.gravity = gravity;
        }
        if let Some(radius) = float("physics", "body_radius") {
            self.body_radius = radius;
        }

        // [player] section
        if let Some(health) = float("player", "health") {
            self.player_health = health;
        }
        if let Some(clip) = config.get("player", "hit_clip") {
            self.hit_clip = clip;
        }
        if let Some(fade) = float("player", "hit_fade") {
            self.hit_fade = fade;
        }

        // [simulation] section
        if let Some(fps) = uint("simulation", "fps") {
            self.fps = u32::try_from(fps).unwrap_or(u32::MAX).max(1);
        }
        if let Some(seed) = uint("simulation", "seed") {
            self.seed = seed;
        }
    }

    /// Save configuration to the INI file.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("projectile", "speed", Some(self.projectile_speed.to_string()));
        config.set("projectile", "damage", Some(self.projectile_damage.to_string()));
        config.set("projectile", "lifetime", Some(self.projectile_lifetime.to_string()));
        config.set("projectile", "spin", Some(self.projectile_spin.to_string()));

        config.set(
            "concussion",
            "duration_ms",
            Some(self.concussion.duration_ms.to_string()),
        );
        config.set("concussion", "intensity", Some(self.concussion.intensity.to_string()));
        config.set(
            "concussion",
            "base_wobble",
            Some(self.concussion.base_wobble.to_string()),
        );

        config.set("physics", "gravity", Some(self.gravity.to_string()));
        config.set("physics", "body_radius", Some(self.body_radius.to_string()));

        config.set("player", "health", Some(self.player_health.to_string()));
        config.set("player", "hit_clip", Some(self.hit_clip.clone()));
        config.set("player", "hit_fade", Some(self.hit_fade.to_string()));

        config.set("simulation", "fps", Some(self.fps.to_string()));
        config.set("simulation", "seed", Some(self.seed.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    pub fn projectile_tuning(&self) -> ProjectileTuning {
        ProjectileTuning {
            speed: self.projectile_speed,
            damage: self.projectile_damage,
            lifetime: self.projectile_lifetime,
            max_spin: self.projectile_spin,
        }
    }

    /// Fixed frame delta of the headless runner, in seconds.
    pub fn fixed_dt(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }
}
