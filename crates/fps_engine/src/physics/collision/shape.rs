//! Bounding volume abstraction
//!
//! Scene leaves hold a [`Bounds`] built from their asset's model-space
//! vertices and refresh it with the placement's world matrix.

use serde::{Serialize, Deserialize};

use crate::foundation::math::{Mat4, Vec3};
use super::primitives::{BoundingBox, BoundingSphere, Ray, RayHit};

/// Common interface of the bounding volume primitives
pub trait BoundingVolume {
    /// Refresh the world-space cache from a model matrix
    fn transform(&mut self, model: &Mat4);

    /// Test a world-space ray against the cached world placement
    fn intersect_ray(&self, ray: &Ray) -> Option<RayHit>;
}

impl BoundingVolume for BoundingSphere {
    fn transform(&mut self, model: &Mat4) {
        BoundingSphere::transform(self, model);
    }

    fn intersect_ray(&self, ray: &Ray) -> Option<RayHit> {
        BoundingSphere::intersect_ray(self, ray)
    }
}

impl BoundingVolume for BoundingBox {
    fn transform(&mut self, model: &Mat4) {
        BoundingBox::transform(self, model);
    }

    fn intersect_ray(&self, ray: &Ray) -> Option<RayHit> {
        BoundingBox::intersect_ray(self, ray)
    }
}

/// Which primitive to build for a model placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VolumeKind {
    /// Bounding sphere (the shipped collision path)
    #[default]
    Sphere,
    /// Bounding box
    Box,
}

/// Bounding volume stored on a model placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bounds {
    /// A bounding sphere
    Sphere(BoundingSphere),
    /// A bounding box
    Box(BoundingBox),
}

impl Bounds {
    /// Build the requested primitive around a vertex set, `None` when it is empty
    pub fn from_points<'a>(
        kind: VolumeKind,
        points: impl IntoIterator<Item = &'a Vec3> + Clone,
    ) -> Option<Self> {
        match kind {
            VolumeKind::Sphere => BoundingSphere::from_points(points).map(Self::Sphere),
            VolumeKind::Box => BoundingBox::from_points(points).map(Self::Box),
        }
    }

    /// The primitive kind
    pub fn kind(&self) -> VolumeKind {
        match self {
            Self::Sphere(_) => VolumeKind::Sphere,
            Self::Box(_) => VolumeKind::Box,
        }
    }

    /// The sphere, if this is one
    pub fn as_sphere(&self) -> Option<&BoundingSphere> {
        match self {
            Self::Sphere(sphere) => Some(sphere),
            Self::Box(_) => None,
        }
    }

    /// The sphere, if this is one
    pub fn as_sphere_mut(&mut self) -> Option<&mut BoundingSphere> {
        match self {
            Self::Sphere(sphere) => Some(sphere),
            Self::Box(_) => None,
        }
    }
}

impl BoundingVolume for Bounds {
    fn transform(&mut self, model: &Mat4) {
        match self {
            Self::Sphere(sphere) => sphere.transform(model),
            Self::Box(aabb) => aabb.transform(model),
        }
    }

    fn intersect_ray(&self, ray: &Ray) -> Option<RayHit> {
        match self {
            Self::Sphere(sphere) => sphere.intersect_ray(ray),
            Self::Box(aabb) => aabb.intersect_ray(ray),
        }
    }
}
