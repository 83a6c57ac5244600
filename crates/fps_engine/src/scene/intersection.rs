//! Ray intersection records produced by scene traversal

use crate::foundation::math::Vec3;
use super::node::NodeId;

/// One ray hit against a model leaf
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection {
    /// World-space hit point
    pub point: Vec3,
    /// Ray parameter of the hit
    pub distance: f32,
    /// The struck leaf
    pub node: NodeId,
    /// Nodes from the traversal start down to the struck leaf, inclusive
    pub path: Vec<NodeId>,
}

impl Intersection {
    /// Parent of the struck leaf along the traversal path
    pub fn parent(&self) -> Option<NodeId> {
        self.path.iter().rev().nth(1).copied()
    }
}

/// The hit with the smallest distance; the first one wins ties
pub fn nearest(hits: impl IntoIterator<Item = Intersection>) -> Option<Intersection> {
    hits.into_iter().fold(None, |best: Option<Intersection>, hit| match best {
        Some(best) if best.distance <= hit.distance => Some(best),
        _ => Some(hit),
    })
}
