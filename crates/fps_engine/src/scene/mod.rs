//! Scene graph
//!
//! A hierarchy of groups, transform groups and model leaves. Visualizing the
//! graph draws every leaf under its accumulated transform and refreshes the
//! leaf's world bounding volume; intersection traversal then tests rays
//! against those refreshed volumes.

pub mod asset;
pub mod intersection;
pub mod node;
pub mod scene_graph;

pub use asset::{cube_mesh, Material, MeshData, ModelAsset};
pub use intersection::Intersection;
pub use node::{GroupNode, ModelNode, NodeId, SceneNode, TransformNode};
pub use scene_graph::{SceneError, SceneGraph};
