//! Frame driver
//!
//! [`World`] owns the scene graph, the projectile engine and the player, and
//! runs one frame at a time: simulation and collision first, then the render
//! pass. A depleted player ends the game with [`GameState::Over`] instead of
//! stopping the process.

use std::sync::Arc;

use thiserror::Error;

use crate::config::{ConfigError, GameConfig};
use crate::foundation::math::{MatrixExt, Vec3};
use crate::physics::{BoundingSphere, Bounds};
use crate::render::RenderBackend;
use crate::scene::{ModelAsset, ModelNode, NodeId, SceneError, SceneGraph};
use super::bullets::{BulletEngine, ShotReport};
use super::damage::{Health, HealthState};
use super::player::Player;

/// World construction and update errors
#[derive(Debug, Error)]
pub enum WorldError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Structural scene error
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// The player node must be a model leaf placed under a transform
    #[error("Node {0:?} is not a model leaf under a transform")]
    InvalidPlayerNode(NodeId),
}

/// Whether the game is still being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    /// Frames simulate and render
    #[default]
    Running,
    /// The player is depleted; frames only render
    Over,
}

/// A shot fired this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShootRequest {
    /// World-space origin
    pub origin: Vec3,
    /// World-space direction
    pub direction: Vec3,
    /// Yaw in degrees for rendering the bullet
    pub yaw: f32,
    /// Pitch in degrees for rendering the bullet
    pub pitch: f32,
}

/// Per-frame input
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    /// New player position, if the player moved
    pub player_position: Option<Vec3>,
    /// Shot requested by the player
    pub shoot: Option<ShootRequest>,
}

/// The running game
#[derive(Debug)]
pub struct World {
    config: GameConfig,
    scene: SceneGraph,
    bullets: BulletEngine,
    player: Player,
    player_transform: NodeId,
    state: GameState,
    frame: u64,
}

impl World {
    /// Assemble a world around an existing scene
    ///
    /// `player_node` must be a model leaf directly under a transform node. It
    /// receives a health pool and a body sphere from the player configuration.
    pub fn new(
        config: GameConfig,
        mut scene: SceneGraph,
        player_node: NodeId,
        bullet_asset: Arc<ModelAsset>,
    ) -> Result<Self, WorldError> {
        config.validate()?;

        let player_transform = scene
            .parent(player_node)
            .filter(|&parent| scene.get(parent).and_then(|n| n.as_transform()).is_some())
            .ok_or(WorldError::InvalidPlayerNode(player_node))?;
        let leaf = scene
            .model_mut(player_node)
            .ok_or(WorldError::InvalidPlayerNode(player_node))?;
        leaf.set_damageable(Health::new(config.player.max_health));
        leaf.set_bounds(Some(Bounds::Sphere(BoundingSphere::new(
            Vec3::zeros(),
            config.player.body_radius,
        ))));
        let placement = scene
            .world_matrix(player_node)
            .ok_or(WorldError::InvalidPlayerNode(player_node))?;
        if let Some(leaf) = scene.model_mut(player_node) {
            leaf.refresh_bounds(&placement);
        }

        let bullets = BulletEngine::new(config.bullets, &config.world, bullet_asset);
        let player = Player::new(&config.player, player_node);
        log::info!(
            "World ready: {} scene nodes, clip extents {} x {}",
            scene.node_count(),
            config.world.clip_x,
            config.world.clip_z
        );

        Ok(Self {
            config,
            scene,
            bullets,
            player,
            player_transform,
            state: GameState::Running,
            frame: 0,
        })
    }

    /// Run one frame of `delta` seconds and render it
    pub fn frame(
        &mut self,
        delta: f32,
        input: &FrameInput,
        backend: &mut dyn RenderBackend,
    ) -> Result<GameState, WorldError> {
        if self.state == GameState::Running {
            if self.config.collision.refresh_before_simulation {
                self.scene.refresh_bounds();
            }
            if let Some(position) = input.player_position {
                self.set_player_position(position)?;
            }
            if let Some(request) = input.shoot {
                self.shoot(&request);
            }
            self.bullets.update(delta, &self.scene);
            self.player.reload_tick(delta);
        }

        self.scene.visualize(backend);
        self.bullets.visualize(backend);
        self.frame += 1;
        Ok(self.state)
    }

    /// Fire a player shot, refused while reloading
    pub fn shoot(&mut self, request: &ShootRequest) -> Option<ShotReport> {
        let report = self.player.shoot(
            &mut self.bullets,
            &mut self.scene,
            request.origin,
            request.direction,
            request.yaw,
            request.pitch,
        )?;
        if let Some(hit) = &report.hit {
            if report.damage == Some(HealthState::Depleted) {
                self.on_depleted(hit.node);
            }
        }
        Some(report)
    }

    /// Apply one unit of damage to a damageable leaf
    ///
    /// Returns `None` when the leaf has no damage capability.
    pub fn damage_node(&mut self, id: NodeId) -> Result<Option<HealthState>, WorldError> {
        let leaf = self.scene.model_mut(id).ok_or(SceneError::NodeNotFound(id))?;
        let outcome = leaf.as_damageable_mut().map(|d| d.decrease_health());
        if outcome == Some(HealthState::Depleted) {
            self.on_depleted(id);
        }
        Ok(outcome)
    }

    /// Move the player's placement and its body sphere
    pub fn set_player_position(&mut self, position: Vec3) -> Result<(), WorldError> {
        let transform = self
            .scene
            .transform_mut(self.player_transform)
            .ok_or(SceneError::NodeNotFound(self.player_transform))?;
        transform.translation = position;

        let node = self.player.node();
        let placement = self.scene.world_matrix(node).ok_or(SceneError::NodeNotFound(node))?;
        let center = placement.transform_point3(&Vec3::zeros());
        if let Some(body) = self
            .scene
            .model_mut(node)
            .and_then(ModelNode::bounds_mut)
            .and_then(Bounds::as_sphere_mut)
        {
            body.set_world_center(center);
        }
        Ok(())
    }

    fn on_depleted(&mut self, id: NodeId) {
        if id == self.player.node() {
            log::warn!("Player health depleted, game over");
            self.state = GameState::Over;
        } else {
            let name = self.scene.get(id).map_or("<removed>", |node| node.name());
            log::info!("Node '{name}' destroyed");
        }
    }

    /// Current game state
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Frames run so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// The scene graph
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// The scene graph
    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    /// The projectile engine
    pub fn bullets(&self) -> &BulletEngine {
        &self.bullets
    }

    /// The player
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Active configuration
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
