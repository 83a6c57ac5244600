//! Player weapon state
//!
//! The player carries a magazine that refills after a reload delay once it is
//! empty. Health is not tracked here: it lives on the player's scene leaf so
//! damage reaches the player the same way it reaches any other leaf.

use crate::config::PlayerConfig;
use crate::foundation::math::Vec3;
use crate::foundation::time::Accumulator;
use crate::scene::{NodeId, SceneGraph};
use super::bullets::{BulletEngine, ShotReport};

/// The local player
#[derive(Debug, Clone)]
pub struct Player {
    node: NodeId,
    ammo: u32,
    max_ammo: u32,
    reload: Accumulator,
}

impl Player {
    /// Create a player with a full magazine, bound to its scene leaf
    pub fn new(config: &PlayerConfig, node: NodeId) -> Self {
        Self {
            node,
            ammo: config.max_ammo,
            max_ammo: config.max_ammo,
            reload: Accumulator::new(config.reload_time),
        }
    }

    /// The player's scene leaf
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Rounds left in the magazine
    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    /// Magazine size
    pub fn max_ammo(&self) -> u32 {
        self.max_ammo
    }

    /// Whether the magazine is empty and refilling
    pub fn is_reloading(&self) -> bool {
        self.ammo == 0
    }

    /// Spend one round and fire it through `engine`
    ///
    /// Returns `None` without firing while the magazine is empty.
    pub fn shoot(
        &mut self,
        engine: &mut BulletEngine,
        scene: &mut SceneGraph,
        origin: Vec3,
        direction: Vec3,
        yaw: f32,
        pitch: f32,
    ) -> Option<ShotReport> {
        if self.is_reloading() {
            log::trace!("Shot refused, reloading");
            return None;
        }

        let report = engine.shoot(scene, origin, direction, yaw, pitch);
        self.ammo -= 1;
        Some(report)
    }

    /// Advance the reload timer by `delta` seconds
    pub fn reload_tick(&mut self, delta: f32) {
        if self.is_reloading() {
            self.reload.advance(delta);
        }

        if self.reload.is_due() {
            self.reload.reset();
            self.ammo = self.max_ammo;
            log::debug!("Reloaded {} rounds", self.max_ammo);
        }
    }
}
