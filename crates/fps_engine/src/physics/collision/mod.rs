//! Ray collision against bounding volumes
//!
//! # Architecture
//!
//! - **Model Space Storage**: local center/radius or local corners are fixed at construction
//! - **Explicit Placement**: `transform(matrix)` refreshes the world-space cache
//! - **Outside-Only Spheres**: a ray starting inside a sphere never reports a hit
//!
//! # Module Organization
//!
//! - [`primitives`] - Rays, spheres and boxes with their intersection algorithms
//! - [`shape`] - The [`BoundingVolume`] seam and the [`Bounds`] enum leaves hold

pub mod primitives;
pub mod shape;

pub use primitives::{Ray, RayHit, BoundingSphere, BoundingBox};
pub use shape::{BoundingVolume, Bounds, VolumeKind};
