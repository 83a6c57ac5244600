//! # Game Configuration
//!
//! Tuning for the world bounds, the projectile engine, the collision layer
//! and the player. Defaults reproduce the shipped game.

use serde::{Serialize, Deserialize};

use super::{Config, ConfigError};
use crate::physics::VolumeKind;

/// World extents used for projectile clipping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Bullets with `|x|` beyond this value are clipped
    pub clip_x: f32,
    /// Bullets with `|z|` beyond this value are clipped
    pub clip_z: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            clip_x: 250.0,
            clip_z: 250.0,
        }
    }
}

/// Projectile engine tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    /// Travel speed in world units per second
    pub velocity: f32,
    /// Seconds between re-validation raycasts for bullets tracking a target
    pub raycast_threshold: f32,
    /// Seconds between sweeps removing clipped bullets
    pub cleanup_threshold: f32,
    /// Uniform scale applied to the bullet model when drawn
    pub render_scale: f32,
    /// Initial capacity of the live bullet list
    pub capacity: usize,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            velocity: 20.0,
            raycast_threshold: 0.05,
            cleanup_threshold: 2.0,
            render_scale: 0.01,
            capacity: 100,
        }
    }
}

/// Collision layer tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Bounding volume built for each model placement
    pub volume: VolumeKind,
    /// Refresh world bounds before the simulation step instead of relying
    /// on the previous frame's render pass
    pub refresh_before_simulation: bool,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            volume: VolumeKind::Sphere,
            refresh_before_simulation: false,
        }
    }
}

/// Player tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Starting and maximum health
    pub max_health: u32,
    /// Rounds per magazine
    pub max_ammo: u32,
    /// Seconds to refill an empty magazine
    pub reload_time: f32,
    /// Radius of the player's hit sphere
    pub body_radius: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 5,
            max_ammo: 5,
            reload_time: 2.0,
            body_radius: 0.5,
        }
    }
}

/// Top-level configuration of the runtime core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Default log filter for the binary
    pub log_level: String,
    /// World extents
    pub world: WorldConfig,
    /// Projectile engine
    pub bullets: BulletConfig,
    /// Collision layer
    pub collision: CollisionConfig,
    /// Player
    pub player: PlayerConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            world: WorldConfig::default(),
            bullets: BulletConfig::default(),
            collision: CollisionConfig::default(),
            player: PlayerConfig::default(),
        }
    }
}

impl GameConfig {
    /// Set the world clipping extents
    pub fn with_clip_extents(mut self, clip_x: f32, clip_z: f32) -> Self {
        self.world.clip_x = clip_x;
        self.world.clip_z = clip_z;
        self
    }

    /// Set the bullet velocity
    pub fn with_bullet_velocity(mut self, velocity: f32) -> Self {
        self.bullets.velocity = velocity;
        self
    }

    /// Select the bounding volume kind
    pub fn with_volume(mut self, volume: VolumeKind) -> Self {
        self.collision.volume = volume;
        self
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.clip_x <= 0.0 || self.world.clip_z <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "clip extents must be positive, got ({}, {})",
                self.world.clip_x, self.world.clip_z
            )));
        }
        if self.bullets.velocity <= 0.0 {
            return Err(ConfigError::Invalid("bullet velocity must be positive".to_string()));
        }
        if self.bullets.raycast_threshold < 0.0 || self.bullets.cleanup_threshold < 0.0 {
            return Err(ConfigError::Invalid("bullet thresholds cannot be negative".to_string()));
        }
        if self.player.max_health == 0 {
            return Err(ConfigError::Invalid("player health must be at least 1".to_string()));
        }
        if self.player.max_ammo == 0 {
            return Err(ConfigError::Invalid("player ammo must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Config for GameConfig {}
