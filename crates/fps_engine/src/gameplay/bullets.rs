//! Projectile engine
//!
//! Bullets are fired with an immediate hit query against the scene graph and
//! then travel in a straight line. A bullet is clipped once it leaves the
//! world extents on the horizontal plane, or when a periodic re-check from its
//! current position no longer reports the node it originally struck. Clipped
//! bullets are purged in batches on a separate timer.

use std::sync::Arc;

use crate::config::{BulletConfig, WorldConfig};
use crate::foundation::math::{utils::deg_to_rad, Mat4, MatrixExt, Vec3};
use crate::foundation::time::Accumulator;
use crate::render::{DrawRequest, RenderBackend};
use crate::scene::{Intersection, ModelAsset, NodeId, SceneGraph};
use super::damage::HealthState;

/// Tint applied to every bullet draw
const BULLET_TINT: Vec3 = Vec3::new(1.0, 0.0, 0.0);

/// A fired projectile
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    /// Current world position
    pub position: Vec3,
    /// Unit travel direction
    pub direction: Vec3,
    /// Yaw in degrees, only used for rendering
    pub yaw: f32,
    /// Pitch in degrees, only used for rendering
    pub pitch: f32,
    clipped: bool,
    struck: Option<NodeId>,
}

impl Bullet {
    /// Whether the bullet is still simulated and drawn
    pub fn is_active(&self) -> bool {
        !self.clipped
    }

    /// Whether the bullet reached its terminal state
    pub fn is_clipped(&self) -> bool {
        self.clipped
    }

    /// Node struck when the bullet was fired
    pub fn struck_node(&self) -> Option<NodeId> {
        self.struck
    }

    fn render_matrix(&self, scale: f32) -> Mat4 {
        Mat4::translate(&self.position)
            * Mat4::axis_angle(&Vec3::y(), deg_to_rad(-self.yaw))
            * Mat4::axis_angle(&Vec3::x(), deg_to_rad(self.pitch))
            * Mat4::new_scaling(scale)
    }
}

/// What a shot struck
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShotReport {
    /// Nearest hit at the moment of firing
    pub hit: Option<Intersection>,
    /// Health outcome when the struck leaf is damageable
    pub damage: Option<HealthState>,
}

/// Owns every live bullet and steps them each frame
#[derive(Debug)]
pub struct BulletEngine {
    config: BulletConfig,
    clip_x: f32,
    clip_z: f32,
    asset: Arc<ModelAsset>,
    bullets: Vec<Bullet>,
    since_raycast: Accumulator,
    since_cleanup: Accumulator,
}

impl BulletEngine {
    /// Create an engine clipping bullets at the given world extents
    pub fn new(config: BulletConfig, world: &WorldConfig, asset: Arc<ModelAsset>) -> Self {
        Self {
            bullets: Vec::with_capacity(config.capacity),
            since_raycast: Accumulator::new(config.raycast_threshold),
            since_cleanup: Accumulator::new(config.cleanup_threshold),
            clip_x: world.clip_x,
            clip_z: world.clip_z,
            config,
            asset,
        }
    }

    /// Fire a bullet from `origin` along `direction`
    ///
    /// The nearest leaf on the ray becomes the bullet's struck node and takes
    /// one unit of damage if it exposes the capability. The bullet is added
    /// whether or not anything was hit.
    pub fn shoot(
        &mut self,
        scene: &mut SceneGraph,
        origin: Vec3,
        direction: Vec3,
        yaw: f32,
        pitch: f32,
    ) -> ShotReport {
        let mut report = ShotReport::default();

        let direction = match direction.try_normalize(f32::EPSILON) {
            Some(unit) => {
                report.hit = scene.nearest_intersection(&origin, &unit);
                unit
            }
            None => {
                log::warn!("Bullet fired with a degenerate direction, skipping hit query");
                Vec3::zeros()
            }
        };

        if let Some(hit) = &report.hit {
            report.damage = scene
                .model_mut(hit.node)
                .and_then(|model| model.as_damageable_mut())
                .map(|damageable| damageable.decrease_health());
            log::debug!(
                "Shot struck node {:?} at distance {:.3} (damage: {:?})",
                hit.node,
                hit.distance,
                report.damage
            );
        }

        self.bullets.push(Bullet {
            position: origin,
            direction,
            yaw,
            pitch,
            clipped: false,
            struck: report.hit.as_ref().map(|hit| hit.node),
        });
        report
    }

    /// Advance every active bullet by `delta` seconds
    pub fn update(&mut self, delta: f32, scene: &SceneGraph) {
        let revalidate = self.since_raycast.is_due();
        let step = self.config.velocity * delta;

        for bullet in self.bullets.iter_mut().filter(|b| b.is_active()) {
            bullet.position += bullet.direction * step;

            if bullet.position.x.abs() > self.clip_x || bullet.position.z.abs() > self.clip_z {
                bullet.clipped = true;
                continue;
            }

            let Some(struck) = bullet.struck else {
                continue;
            };
            if revalidate {
                let nearest = scene.nearest_intersection(&bullet.position, &bullet.direction);
                if nearest.map(|hit| hit.node) != Some(struck) {
                    bullet.clipped = true;
                }
            }
        }

        if revalidate {
            self.since_raycast.reset();
        }
        if self.since_cleanup.is_due() {
            self.free_clipped();
            self.since_cleanup.reset();
        }

        self.since_raycast.advance(delta);
        self.since_cleanup.advance(delta);
    }

    /// Drop every clipped bullet, keeping the order of the rest
    ///
    /// Returns the number of bullets removed.
    pub fn free_clipped(&mut self) -> usize {
        let before = self.bullets.len();
        self.bullets.retain(Bullet::is_active);
        let freed = before - self.bullets.len();
        if freed > 0 {
            log::trace!("Freed {freed} clipped bullet(s), {} live", self.bullets.len());
        }
        freed
    }

    /// Draw every active bullet
    pub fn visualize(&self, backend: &mut dyn RenderBackend) {
        for bullet in self.bullets.iter().filter(|b| b.is_active()) {
            let model = bullet.render_matrix(self.config.render_scale);
            backend.draw(&DrawRequest {
                node: None,
                asset: &self.asset,
                model,
                normal: model.normal_matrix(),
                tint: Some(BULLET_TINT),
            });
        }
    }

    /// Every live bullet, clipped ones included until the next cleanup
    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    /// Number of active bullets
    pub fn active_count(&self) -> usize {
        self.bullets.iter().filter(|b| b.is_active()).count()
    }

    /// Bullet travel speed in units per second
    pub fn velocity(&self) -> f32 {
        self.config.velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{BoundingSphere, Bounds};
    use crate::render::RecordingBackend;
    use crate::scene::{cube_mesh, Material, ModelNode, TransformNode};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-4;

    fn bullet_asset() -> Arc<ModelAsset> {
        ModelAsset::new("bullet", vec![cube_mesh(0.5)], Material::with_shader("bullet")).shared()
    }

    fn engine() -> BulletEngine {
        BulletEngine::new(BulletConfig::default(), &WorldConfig::default(), bullet_asset())
    }

    fn sphere_leaf(scene: &mut SceneGraph, name: &str, center: Vec3, radius: f32) -> NodeId {
        let model = ModelNode::new(name, bullet_asset())
            .with_bounds(Some(Bounds::Sphere(BoundingSphere::new(Vec3::zeros(), radius))));
        let transform = scene
            .add_transform(scene.root(), TransformNode::new(format!("{name}_transf")).with_translation(center))
            .unwrap();
        scene.add_model(transform, model).unwrap()
    }

    #[test]
    fn test_shot_without_hit_still_spawns_bullet() {
        let mut scene = SceneGraph::new("root");
        let mut engine = engine();

        let report = engine.shoot(&mut scene, Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0), 0.0, 0.0);

        assert!(report.hit.is_none());
        assert!(report.damage.is_none());
        assert_eq!(engine.bullets().len(), 1);
        assert_eq!(engine.bullets()[0].struck_node(), None);
    }

    #[test]
    fn test_shot_normalizes_direction() {
        let mut scene = SceneGraph::new("root");
        let mut engine = engine();
        engine.shoot(&mut scene, Vec3::zeros(), Vec3::new(0.0, 0.0, -4.0), 0.0, 0.0);
        assert_relative_eq!(engine.bullets()[0].direction, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_degenerate_direction_never_hits() {
        let mut scene = SceneGraph::new("root");
        sphere_leaf(&mut scene, "target", Vec3::new(0.0, 0.0, -5.0), 1.0);
        scene.refresh_bounds();
        let mut engine = engine();

        let report = engine.shoot(&mut scene, Vec3::zeros(), Vec3::zeros(), 0.0, 0.0);
        assert!(report.hit.is_none());
        assert_eq!(engine.bullets().len(), 1);
    }

    #[test]
    fn test_out_of_bounds_is_terminal() {
        let mut scene = SceneGraph::new("root");
        let mut engine = BulletEngine::new(
            BulletConfig::default(),
            &WorldConfig { clip_x: 10.0, clip_z: 10.0 },
            bullet_asset(),
        );
        engine.shoot(&mut scene, Vec3::new(9.5, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), 0.0, 0.0);

        engine.update(0.1, &scene);
        assert!(engine.bullets()[0].is_clipped());
        let frozen = engine.bullets()[0].position;

        engine.update(0.01, &scene);
        assert!(engine.bullets()[0].is_clipped());
        assert_eq!(engine.bullets()[0].position, frozen);
    }

    #[test]
    fn test_bullet_render_matrix() {
        let mut scene = SceneGraph::new("root");
        let mut engine = engine();
        engine.shoot(&mut scene, Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.0, -1.0), 90.0, 0.0);

        let mut backend = RecordingBackend::new();
        engine.visualize(&mut backend);

        let records = backend.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].node, None);
        assert_eq!(records[0].tint, Some(BULLET_TINT));

        // -90 degrees about Y maps local +X onto +Z
        let tip = records[0].model.transform_point3(&Vec3::new(100.0, 0.0, 0.0));
        assert_relative_eq!(tip, Vec3::new(1.0, 2.0, 4.0), epsilon = EPSILON);
    }

    #[test]
    fn test_clipped_bullets_are_not_drawn() {
        let mut scene = SceneGraph::new("root");
        let mut engine = BulletEngine::new(
            BulletConfig::default(),
            &WorldConfig { clip_x: 1.0, clip_z: 1.0 },
            bullet_asset(),
        );
        engine.shoot(&mut scene, Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0), 0.0, 0.0);
        engine.shoot(&mut scene, Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0), 0.0, 0.0);
        engine.update(0.5, &scene);

        assert_eq!(engine.active_count(), 1);
        let mut backend = RecordingBackend::new();
        engine.visualize(&mut backend);
        assert_eq!(backend.records().len(), 1);
    }

    #[test]
    fn test_free_clipped_is_stable_and_idempotent() {
        let mut scene = SceneGraph::new("root");
        let mut engine = BulletEngine::new(
            BulletConfig::default(),
            &WorldConfig { clip_x: 1.0, clip_z: 1.0 },
            bullet_asset(),
        );
        // Adjacent clipped bullets would be skipped by index-shifting removal
        let directions = [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, -1.0, 0.0),
        ];
        for direction in directions {
            engine.shoot(&mut scene, Vec3::zeros(), direction, 0.0, 0.0);
        }
        engine.update(0.5, &scene);

        assert_eq!(engine.free_clipped(), 3);
        let kept: Vec<Vec3> = engine.bullets().iter().map(|b| b.direction).collect();
        assert_eq!(kept, vec![Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0)]);

        assert_eq!(engine.free_clipped(), 0);
        let again: Vec<Vec3> = engine.bullets().iter().map(|b| b.direction).collect();
        assert_eq!(again, kept);
    }

    #[test]
    fn test_struck_target_moving_away_clips_bullet() {
        let mut scene = SceneGraph::new("root");
        let target = sphere_leaf(&mut scene, "target", Vec3::new(0.0, 0.0, -50.0), 1.0);
        scene.refresh_bounds();

        let mut engine = engine();
        let report = engine.shoot(&mut scene, Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0), 0.0, 0.0);
        assert_eq!(report.hit.map(|hit| hit.node), Some(target));

        // Still tracking the target on the first re-check
        engine.update(0.06, &scene);
        engine.update(0.01, &scene);
        assert!(engine.bullets()[0].is_active());

        let transform = scene.parent(target).unwrap();
        scene.transform_mut(transform).unwrap().translation = Vec3::new(30.0, 0.0, -50.0);
        scene.refresh_bounds();

        engine.update(0.06, &scene);
        engine.update(0.01, &scene);
        assert!(engine.bullets()[0].is_clipped());
    }

    #[test]
    fn test_different_nearest_node_clips_bullet() {
        let mut scene = SceneGraph::new("root");
        let target = sphere_leaf(&mut scene, "target", Vec3::new(0.0, 0.0, -50.0), 1.0);
        scene.refresh_bounds();

        let mut engine = engine();
        let report = engine.shoot(&mut scene, Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0), 0.0, 0.0);
        assert_eq!(report.hit.map(|hit| hit.node), Some(target));

        // Something steps between the bullet and its target
        sphere_leaf(&mut scene, "blocker", Vec3::new(0.0, 0.0, -20.0), 1.0);
        scene.refresh_bounds();

        engine.update(0.06, &scene);
        assert!(engine.bullets()[0].is_active());
        engine.update(0.01, &scene);
        assert!(engine.bullets()[0].is_clipped());
    }

    #[test]
    fn test_recheck_waits_for_threshold() {
        let mut scene = SceneGraph::new("root");
        let target = sphere_leaf(&mut scene, "target", Vec3::new(0.0, 0.0, -50.0), 1.0);
        scene.refresh_bounds();

        let mut engine = engine();
        engine.shoot(&mut scene, Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0), 0.0, 0.0);

        let transform = scene.parent(target).unwrap();
        scene.transform_mut(transform).unwrap().translation = Vec3::new(30.0, 0.0, -50.0);
        scene.refresh_bounds();

        // 0.05 s threshold: checks at 0.0, 0.02 and 0.04 are not due
        for _ in 0..3 {
            engine.update(0.02, &scene);
            assert!(engine.bullets()[0].is_active());
        }
        engine.update(0.02, &scene);
        assert!(engine.bullets()[0].is_clipped());
    }

    #[test]
    fn test_untracked_bullet_survives_recheck() {
        let mut scene = SceneGraph::new("root");
        let mut engine = engine();
        engine.shoot(&mut scene, Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0), 0.0, 0.0);
        for _ in 0..10 {
            engine.update(0.06, &scene);
        }
        assert!(engine.bullets()[0].is_active());
    }
}
