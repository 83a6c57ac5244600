//! Primitive collision shapes and intersection algorithms
//!
//! Provides rays, bounding spheres and bounding boxes with ray intersection
//! tests. Distances are ray parameters: a hit at distance `t` lies at
//! `origin + direction * t`, so they are world units only for unit directions.

use crate::foundation::math::{Mat4, MatrixExt, Vec3};

/// A ray for ray casting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray, not renormalized
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get a point along the ray at parameter t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Result of a ray intersection test against a single volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The point of intersection in world space
    pub point: Vec3,
    /// Ray parameter of the intersection
    pub distance: f32,
}

/// Component-wise extents of a point cloud, `None` when it is empty
fn extents<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Option<(Vec3, Vec3)> {
    let mut iter = points.into_iter();
    let first = *iter.next()?;
    Some(iter.fold((first, first), |(min, max), p| (min.inf(p), max.sup(p))))
}

/// A bounding sphere for ray collision
///
/// The sphere has no world placement until [`BoundingSphere::transform`] or
/// [`BoundingSphere::set_world_center`] runs, and an unplaced sphere is never hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    center: Vec3,
    radius: f32,
    world: Option<(Vec3, f32)>,
}

impl BoundingSphere {
    /// Creates an unplaced sphere from its local geometry
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius,
            world: None,
        }
    }

    /// Builds the cheap enclosing sphere of a vertex set
    ///
    /// The center is the middle of the axis-aligned extents and the radius is
    /// the farthest vertex from it. This is not the minimal enclosing sphere.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3> + Clone) -> Option<Self> {
        let (min, max) = extents(points.clone())?;
        let center = (min + max) * 0.5;
        let radius = points
            .into_iter()
            .map(|p| (p - center).magnitude())
            .fold(0.0_f32, f32::max);
        Some(Self::new(center, radius))
    }

    /// Local-space center
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Local-space radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// World-space center from the last placement
    pub fn world_center(&self) -> Option<Vec3> {
        self.world.map(|(center, _)| center)
    }

    /// World-space radius from the last placement
    pub fn world_radius(&self) -> Option<f32> {
        self.world.map(|(_, radius)| radius)
    }

    /// Whether the sphere has a world placement
    pub fn is_placed(&self) -> bool {
        self.world.is_some()
    }

    /// Move the sphere directly in world space
    ///
    /// Keeps the current world radius, or the local radius when unplaced.
    pub fn set_world_center(&mut self, center: Vec3) {
        let radius = self.world_radius().unwrap_or(self.radius);
        self.world = Some((center, radius));
    }

    /// Refresh the world placement from a model matrix
    ///
    /// The radius is scaled by the largest axis scale so the world sphere
    /// never under-approximates a non-uniformly scaled mesh.
    pub fn transform(&mut self, model: &Mat4) {
        self.world = Some((
            model.transform_point3(&self.center),
            self.radius * model.max_axis_scale(),
        ));
    }

    /// Test ray intersection with the world sphere
    ///
    /// Only rays approaching from outside can hit: an origin inside the
    /// sphere, or a sphere center projecting behind the origin, is a miss.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<RayHit> {
        let (world_center, world_radius) = self.world?;
        let origin_to_center = world_center - ray.origin;
        let radius_sq = world_radius * world_radius;
        let length_oc_sq = origin_to_center.magnitude_squared();

        if length_oc_sq <= radius_sq {
            return None;
        }

        // Distance from the origin to the foot of the perpendicular from the center
        let dir_len = ray.direction.magnitude();
        let dist_to_foot = origin_to_center.dot(&ray.direction) / dir_len;
        if dist_to_foot < 0.0 {
            return None;
        }

        // Squared half-chord between the foot and the surface
        let half_chord_sq = radius_sq - (length_oc_sq - dist_to_foot * dist_to_foot);
        if half_chord_sq < 0.0 {
            return None;
        }

        let t = (dist_to_foot - half_chord_sq.sqrt()) / dir_len;
        Some(RayHit {
            point: ray.point_at(t),
            distance: t,
        })
    }
}

/// A bounding box for ray collision
///
/// The world placement maps the two local corners independently and does not
/// re-derive an axis-aligned box after rotation, so it is an approximation
/// for rotated owners. An unplaced box is never hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    min: Vec3,
    max: Vec3,
    world: Option<(Vec3, Vec3)>,
}

impl BoundingBox {
    /// Creates an unplaced box from its local corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max, world: None }
    }

    /// Builds the axis-aligned extents of a vertex set
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Option<Self> {
        extents(points).map(|(min, max)| Self::new(min, max))
    }

    /// Local-space minimum corner
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Local-space maximum corner
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// World-space image of the local minimum corner
    pub fn min_world(&self) -> Option<Vec3> {
        self.world.map(|(min, _)| min)
    }

    /// World-space image of the local maximum corner
    pub fn max_world(&self) -> Option<Vec3> {
        self.world.map(|(_, max)| max)
    }

    /// Refresh the world corners from a model matrix
    pub fn transform(&mut self, model: &Mat4) {
        self.world = Some((
            model.transform_point3(&self.min),
            model.transform_point3(&self.max),
        ));
    }

    /// Test ray intersection using the slab method
    ///
    /// Reports the entry parameter `tmin` and the point at it. A box lying
    /// entirely behind the origin is a miss.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<RayHit> {
        let (min_world, max_world) = self.world?;
        let mut tmin = f32::NEG_INFINITY;
        let mut tmax = f32::INFINITY;

        for axis in 0..3 {
            let inv = 1.0 / ray.direction[axis];
            let mut t0 = (min_world[axis] - ray.origin[axis]) * inv;
            let mut t1 = (max_world[axis] - ray.origin[axis]) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            if tmin > t1 || t0 > tmax {
                return None;
            }
            tmin = tmin.max(t0);
            tmax = tmax.min(t1);
        }

        if tmax < 0.0 {
            return None;
        }

        Some(RayHit {
            point: ray.point_at(tmin),
            distance: tmin,
        })
    }
}
