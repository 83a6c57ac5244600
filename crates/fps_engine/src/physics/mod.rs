//! Physics module for ray collision against bounding volumes
//!
//! Bounding volumes keep their geometry in model space and cache a
//! world-space placement refreshed by an explicit `transform` call.

pub mod collision;

pub use collision::{
    BoundingBox,
    BoundingSphere,
    BoundingVolume,
    Bounds,
    Ray,
    RayHit,
    VolumeKind,
};
