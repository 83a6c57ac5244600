//! Whole-frame behaviour of the world driver

use std::sync::Arc;

use crate::config::GameConfig;
use crate::foundation::math::Vec3;
use crate::gameplay::{FrameInput, GameState, HealthState, ShootRequest, World, WorldError};
use crate::render::RecordingBackend;
use crate::scene::{cube_mesh, Material, ModelAsset, ModelNode, NodeId, SceneGraph, TransformNode};
use approx::assert_relative_eq;

const FORWARD: Vec3 = Vec3::new(0.0, 0.0, -1.0);

struct Fixture {
    world: World,
    player: NodeId,
    target: NodeId,
}

fn asset(name: &str) -> Arc<ModelAsset> {
    ModelAsset::new(name, vec![cube_mesh(1.0)], Material::default()).shared()
}

fn fixture(config: GameConfig) -> Fixture {
    let mut scene = SceneGraph::new("root");
    let player_transform = scene
        .add_transform(scene.root(), TransformNode::new("player_transf"))
        .unwrap();
    let player = scene
        .add_model(player_transform, ModelNode::new("player", asset("player")))
        .unwrap();
    let target_transform = scene
        .add_transform(
            scene.root(),
            TransformNode::new("target_transf").with_translation(Vec3::new(0.0, 0.0, -20.0)),
        )
        .unwrap();
    let target = scene
        .add_model(target_transform, ModelNode::new("target", asset("crate")).with_health(3))
        .unwrap();

    let world = World::new(config, scene, player, asset("bullet")).unwrap();
    Fixture { world, player, target }
}

fn shot(direction: Vec3) -> FrameInput {
    FrameInput {
        shoot: Some(ShootRequest {
            origin: Vec3::zeros(),
            direction,
            yaw: 0.0,
            pitch: 0.0,
        }),
        ..FrameInput::default()
    }
}

#[test]
fn test_first_frame_renders_scene() {
    let mut fx = fixture(GameConfig::default());
    let mut backend = RecordingBackend::new();

    let state = fx.world.frame(0.016, &FrameInput::default(), &mut backend).unwrap();

    assert_eq!(state, GameState::Running);
    assert_eq!(backend.records().len(), 2);
    assert_eq!(fx.world.frame_count(), 1);
}

#[test]
fn test_render_coupled_bounds_lag_one_frame() {
    let mut fx = fixture(GameConfig::default());
    let mut backend = RecordingBackend::new();

    // Nothing has been drawn yet, so the target has no world placement
    fx.world.frame(0.016, &shot(FORWARD), &mut backend).unwrap();
    assert_eq!(fx.world.bullets().bullets()[0].struck_node(), None);

    fx.world.frame(0.016, &shot(FORWARD), &mut backend).unwrap();
    assert_eq!(fx.world.bullets().bullets()[1].struck_node(), Some(fx.target));
}

#[test]
fn test_refresh_before_simulation_removes_lag() {
    let mut config = GameConfig::default();
    config.collision.refresh_before_simulation = true;
    let mut fx = fixture(config);
    let mut backend = RecordingBackend::new();

    fx.world.frame(0.016, &shot(FORWARD), &mut backend).unwrap();
    assert_eq!(fx.world.bullets().bullets()[0].struck_node(), Some(fx.target));
}

#[test]
fn test_bullet_travels_velocity_times_time() {
    let mut fx = fixture(GameConfig::default().with_bullet_velocity(20.0));
    let mut backend = RecordingBackend::new();
    let direction = Vec3::new(1.0, 0.0, 0.0);

    fx.world.frame(0.0, &shot(direction), &mut backend).unwrap();
    let mut elapsed = 0.0;
    for _ in 0..50 {
        fx.world.frame(0.1, &FrameInput::default(), &mut backend).unwrap();
        elapsed += 0.1;
    }

    let bullet = &fx.world.bullets().bullets()[0];
    assert!(bullet.is_active());
    assert_relative_eq!(bullet.position, direction * 20.0 * elapsed, epsilon = 1e-3);
}

#[test]
fn test_escaped_bullets_are_cleaned_up() {
    let mut fx = fixture(GameConfig::default().with_clip_extents(5.0, 5.0));
    let mut backend = RecordingBackend::new();

    fx.world.frame(0.0, &shot(Vec3::new(1.0, 0.0, 0.0)), &mut backend).unwrap();
    fx.world.frame(0.5, &FrameInput::default(), &mut backend).unwrap();
    assert_eq!(fx.world.bullets().active_count(), 0);
    assert_eq!(fx.world.bullets().bullets().len(), 1);

    for _ in 0..5 {
        fx.world.frame(0.5, &FrameInput::default(), &mut backend).unwrap();
    }
    assert!(fx.world.bullets().bullets().is_empty());
}

#[test]
fn test_player_depletion_ends_game() {
    let mut fx = fixture(GameConfig::default());
    let mut backend = RecordingBackend::new();
    let max_health = fx.world.config().player.max_health;

    for _ in 1..max_health {
        assert!(matches!(fx.world.damage_node(fx.player).unwrap(), Some(HealthState::Alive(_))));
    }
    assert_eq!(fx.world.damage_node(fx.player).unwrap(), Some(HealthState::Depleted));
    assert_eq!(fx.world.state(), GameState::Over);

    // A finished game still renders but no longer simulates
    let state = fx.world.frame(0.016, &shot(FORWARD), &mut backend).unwrap();
    assert_eq!(state, GameState::Over);
    assert!(fx.world.bullets().bullets().is_empty());
    assert_eq!(backend.records().len(), 2);
}

#[test]
fn test_destroyed_target_keeps_game_running() {
    let mut config = GameConfig::default();
    config.collision.refresh_before_simulation = true;
    let mut fx = fixture(config);
    let mut backend = RecordingBackend::new();

    for _ in 0..3 {
        fx.world.frame(0.016, &shot(FORWARD), &mut backend).unwrap();
    }
    assert_eq!(fx.world.player().ammo(), 2);
    assert_eq!(fx.world.state(), GameState::Running);
    let health = fx.world.scene().model(fx.target).and_then(|m| m.as_damageable()).map(|d| d.health());
    assert_eq!(health, Some(0));
}

#[test]
fn test_player_move_refreshes_body() {
    let mut fx = fixture(GameConfig::default());
    fx.world.set_player_position(Vec3::new(4.0, 0.0, 2.0)).unwrap();

    let sphere = fx
        .world
        .scene()
        .model(fx.player)
        .and_then(|m| m.bounds())
        .and_then(|b| b.as_sphere())
        .copied()
        .unwrap();
    assert_relative_eq!(sphere.world_center().unwrap(), Vec3::new(4.0, 0.0, 2.0));
    assert_relative_eq!(sphere.world_radius().unwrap(), fx.world.config().player.body_radius);
}

#[test]
fn test_player_node_must_be_placed() {
    let mut scene = SceneGraph::new("root");
    let loose = scene.add_model(scene.root(), ModelNode::new("player", asset("player"))).unwrap();
    let err = World::new(GameConfig::default(), scene, loose, asset("bullet")).unwrap_err();
    assert!(matches!(err, WorldError::InvalidPlayerNode(id) if id == loose));
}

#[test]
fn test_invalid_config_rejected() {
    let mut scene = SceneGraph::new("root");
    let transform = scene.add_transform(scene.root(), TransformNode::new("t")).unwrap();
    let player = scene.add_model(transform, ModelNode::new("player", asset("player"))).unwrap();
    let config = GameConfig::default().with_bullet_velocity(0.0);
    assert!(matches!(
        World::new(config, scene, player, asset("bullet")),
        Err(WorldError::Config(_))
    ));
}
