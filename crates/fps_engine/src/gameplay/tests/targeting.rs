//! Shot targeting and damage across a populated scene

use std::sync::Arc;

use crate::config::{BulletConfig, WorldConfig};
use crate::foundation::math::Vec3;
use crate::gameplay::{BulletEngine, HealthState};
use crate::physics::{BoundingSphere, Bounds};
use crate::scene::{cube_mesh, Material, ModelAsset, ModelNode, NodeId, SceneGraph, TransformNode};
use approx::assert_relative_eq;

fn asset(name: &str) -> Arc<ModelAsset> {
    ModelAsset::new(name, vec![cube_mesh(1.0)], Material::default()).shared()
}

fn place(scene: &mut SceneGraph, node: ModelNode, center: Vec3, radius: f32) -> NodeId {
    let transform = scene
        .add_transform(scene.root(), TransformNode::new(format!("{}_transf", node.name())).with_translation(center))
        .unwrap();
    let node = node.with_bounds(Some(Bounds::Sphere(BoundingSphere::new(Vec3::zeros(), radius))));
    scene.add_model(transform, node).unwrap()
}

fn engine() -> BulletEngine {
    BulletEngine::new(BulletConfig::default(), &WorldConfig::default(), asset("bullet"))
}

#[test]
fn test_shot_selects_nearest_of_two_hits() {
    let mut scene = SceneGraph::new("root");
    // Unit spheres whose surfaces sit 5.0 and 8.0 along the ray
    let far = place(&mut scene, ModelNode::new("far", asset("crate")), Vec3::new(0.0, 0.0, -9.0), 1.0);
    let near = place(&mut scene, ModelNode::new("near", asset("crate")), Vec3::new(0.0, 0.0, -6.0), 1.0);
    scene.refresh_bounds();

    let mut engine = engine();
    let report = engine.shoot(&mut scene, Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0), 0.0, 0.0);

    let hit = report.hit.unwrap();
    assert_eq!(hit.node, near);
    assert_ne!(hit.node, far);
    assert_relative_eq!(hit.distance, 5.0, epsilon = 1e-5);
    assert_eq!(engine.bullets()[0].struck_node(), Some(near));
}

#[test]
fn test_damageable_leaf_loses_health() {
    let mut scene = SceneGraph::new("root");
    let zombie = place(
        &mut scene,
        ModelNode::new("zombie", asset("zombie")).with_health(2),
        Vec3::new(0.0, 0.0, -10.0),
        1.0,
    );
    scene.refresh_bounds();

    let mut engine = engine();
    let forward = Vec3::new(0.0, 0.0, -1.0);
    let first = engine.shoot(&mut scene, Vec3::zeros(), forward, 0.0, 0.0);
    assert_eq!(first.damage, Some(HealthState::Alive(1)));
    let second = engine.shoot(&mut scene, Vec3::zeros(), forward, 0.0, 0.0);
    assert_eq!(second.damage, Some(HealthState::Depleted));

    let health = scene.model(zombie).and_then(|m| m.as_damageable()).map(|d| d.health());
    assert_eq!(health, Some(0));
}

#[test]
fn test_non_damageable_leaf_is_skipped() {
    let mut scene = SceneGraph::new("root");
    let crate_node = place(&mut scene, ModelNode::new("crate", asset("crate")), Vec3::new(0.0, 0.0, -10.0), 1.0);
    scene.refresh_bounds();

    let mut engine = engine();
    let report = engine.shoot(&mut scene, Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0), 0.0, 0.0);

    assert_eq!(report.hit.map(|hit| hit.node), Some(crate_node));
    assert!(report.damage.is_none());
    assert_eq!(engine.bullets().len(), 1);
}

#[test]
fn test_shooter_inside_own_body_is_not_hit() {
    let mut scene = SceneGraph::new("root");
    place(&mut scene, ModelNode::new("player", asset("player")).with_health(5), Vec3::zeros(), 0.5);
    let target = place(&mut scene, ModelNode::new("crate", asset("crate")), Vec3::new(0.0, 0.0, -10.0), 1.0);
    scene.refresh_bounds();

    let mut engine = engine();
    let report = engine.shoot(&mut scene, Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0), 0.0, 0.0);
    assert_eq!(report.hit.map(|hit| hit.node), Some(target));
}

#[test]
fn test_shot_before_first_placement_hits_nothing() {
    let mut scene = SceneGraph::new("root");
    let transform = scene
        .add_transform(scene.root(), TransformNode::new("crate_transf").with_translation(Vec3::new(100.0, 0.0, 0.0)))
        .unwrap();
    let crate_node = scene
        .add_model(transform, ModelNode::new("crate", asset("crate")).with_health(3))
        .unwrap();

    let mut engine = engine();
    let report = engine.shoot(&mut scene, Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0), 0.0, 0.0);

    assert!(report.hit.is_none());
    assert!(report.damage.is_none());
    let health = scene.model(crate_node).and_then(|m| m.as_damageable()).map(|d| d.health());
    assert_eq!(health, Some(3));
}
