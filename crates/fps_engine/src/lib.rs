//! # FPS Engine
//!
//! Runtime core of a small first-person shooter: a scene graph of transform
//! and model nodes, bounding volumes for ray tests, and a projectile engine
//! that fires, tracks and retires bullets against the scene.
//!
//! ## Features
//!
//! - **Scene Graph**: arena-backed groups, transforms and shared-asset placements
//! - **Bounding Volumes**: sphere and slab-tested box ray intersection
//! - **Projectiles**: hit-on-fire with periodic re-validation and batched cleanup
//! - **Rendering Seam**: draw requests emitted to any backend
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fps_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let crate_asset = ModelAsset::new("crate", vec![cube_mesh(1.0)], Material::default()).shared();
//!     let mut scene = SceneGraph::new("root");
//!     let player_transform = scene.add_transform(scene.root(), TransformNode::new("player_transf"))?;
//!     let player = scene.add_model(player_transform, ModelNode::new("player", crate_asset.clone()))?;
//!
//!     let mut world = World::new(GameConfig::default(), scene, player, crate_asset)?;
//!     let mut backend = LoggingBackend::new();
//!     world.frame(1.0 / 60.0, &FrameInput::default(), &mut backend)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod gameplay;
pub mod input;
pub mod physics;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, GameConfig},
        foundation::math::{Mat4, Vec3},
        gameplay::{
            BulletEngine, Damageable, FrameInput, GameState, Health, HealthState,
            ShootRequest, ShotReport, World, WorldError,
        },
        input::{look_at_view, look_direction, screen_center_ray},
        physics::{Bounds, Ray, VolumeKind},
        render::{LoggingBackend, RecordingBackend, RenderBackend},
        scene::{
            cube_mesh, Material, ModelAsset, ModelNode, NodeId, SceneError, SceneGraph,
            TransformNode,
        },
    };
}
