//! Gameplay systems
//!
//! Damage, projectiles, the player's weapon and the frame driver tying them to
//! the scene graph.

pub mod bullets;
pub mod damage;
pub mod player;
pub mod world;

#[cfg(test)]
mod tests;

pub use bullets::{Bullet, BulletEngine, ShotReport};
pub use damage::{Damageable, Health, HealthState};
pub use player::Player;
pub use world::{FrameInput, GameState, ShootRequest, World, WorldError};
