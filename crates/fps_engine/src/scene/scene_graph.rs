//! Scene graph arena
//!
//! Nodes live in a slot map keyed by [`NodeId`]. Composites hold ordered child
//! ids, and each entry remembers its parent so subtrees can be detached.
//! Transforms are accumulated top-down as `parent * local`.

use slotmap::SlotMap;
use thiserror::Error;

use crate::foundation::math::{Mat4, MatrixExt, Vec3};
use crate::physics::{BoundingVolume, Ray};
use crate::render::{DrawRequest, RenderBackend};
use super::intersection::{nearest, Intersection};
use super::node::{GroupNode, ModelNode, NodeId, SceneNode, TransformNode};

/// Errors raised by structural scene edits
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The id does not name a live node
    #[error("Node {0:?} not found")]
    NodeNotFound(NodeId),

    /// Children can only be added to groups and transforms
    #[error("Node {0:?} cannot own children")]
    NotAComposite(NodeId),

    /// The root is owned by the graph itself
    #[error("The root node cannot be removed")]
    CannotRemoveRoot,
}

#[derive(Debug)]
struct NodeEntry {
    node: SceneNode,
    parent: Option<NodeId>,
}

/// Hierarchy of groups, transforms and model leaves under a single root group
#[derive(Debug)]
pub struct SceneGraph {
    nodes: SlotMap<NodeId, NodeEntry>,
    root: NodeId,
}

impl SceneGraph {
    /// Create a graph holding only an empty root group
    pub fn new(root_name: impl Into<String>) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(NodeEntry {
            node: GroupNode::new(root_name).into(),
            parent: None,
        });
        Self { nodes, root }
    }

    /// The root group
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether `id` names a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Append `node` as the last child of `parent`
    pub fn insert(&mut self, parent: NodeId, node: impl Into<SceneNode>) -> Result<NodeId, SceneError> {
        let entry = self.nodes.get(parent).ok_or(SceneError::NodeNotFound(parent))?;
        if !entry.node.is_composite() {
            return Err(SceneError::NotAComposite(parent));
        }

        let id = self.nodes.insert(NodeEntry {
            node: node.into(),
            parent: Some(parent),
        });
        if let Some(group) = self.nodes.get_mut(parent).and_then(|e| e.node.group_mut()) {
            group.push_child(id);
        }
        Ok(id)
    }

    /// Append an empty group
    pub fn add_group(&mut self, parent: NodeId, name: impl Into<String>) -> Result<NodeId, SceneError> {
        self.insert(parent, GroupNode::new(name))
    }

    /// Append a transform node
    pub fn add_transform(&mut self, parent: NodeId, transform: TransformNode) -> Result<NodeId, SceneError> {
        self.insert(parent, transform)
    }

    /// Append a model leaf
    pub fn add_model(&mut self, parent: NodeId, model: ModelNode) -> Result<NodeId, SceneError> {
        self.insert(parent, model)
    }

    /// Detach `id` from its parent and destroy its subtree
    ///
    /// Returns the number of nodes removed.
    pub fn remove(&mut self, id: NodeId) -> Result<usize, SceneError> {
        if id == self.root {
            return Err(SceneError::CannotRemoveRoot);
        }
        let parent = self.nodes.get(id).ok_or(SceneError::NodeNotFound(id))?.parent;

        if let Some(group) = parent
            .and_then(|p| self.nodes.get_mut(p))
            .and_then(|e| e.node.group_mut())
        {
            group.remove_child(id);
        }

        let doomed = self.descendants(id);
        for node in &doomed {
            self.nodes.remove(*node);
        }
        log::debug!("Removed {} scene node(s)", doomed.len());
        Ok(doomed.len())
    }

    /// Node by id
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id).map(|e| &e.node)
    }

    /// Node by id
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id).map(|e| &mut e.node)
    }

    /// Transform node by id
    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut TransformNode> {
        self.get_mut(id).and_then(SceneNode::as_transform_mut)
    }

    /// Model leaf by id
    pub fn model(&self, id: NodeId) -> Option<&ModelNode> {
        self.get(id).and_then(SceneNode::as_model)
    }

    /// Model leaf by id
    pub fn model_mut(&mut self, id: NodeId) -> Option<&mut ModelNode> {
        self.get_mut(id).and_then(SceneNode::as_model_mut)
    }

    /// Parent of `id`, `None` for the root or unknown ids
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|e| e.parent)
    }

    /// Children of `id`, empty for leaves or unknown ids
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(SceneNode::children).unwrap_or_default()
    }

    /// `id` followed by all its descendants in depth-first pre-order
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if !self.nodes.contains_key(next) {
                continue;
            }
            order.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        order
    }

    /// Accumulated transform of `id`, folding every transform ancestor
    ///
    /// Includes the node's own local matrix when it is a transform.
    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        let mut matrix = self.get(id)?.as_transform().map_or_else(Mat4::identity, TransformNode::local_matrix);
        let mut cursor = self.parent(id);
        while let Some(ancestor) = cursor {
            if let Some(transform) = self.get(ancestor).and_then(SceneNode::as_transform) {
                matrix = transform.local_matrix() * matrix;
            }
            cursor = self.parent(ancestor);
        }
        Some(matrix)
    }

    /// First node named `name` in depth-first order from the root
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&id| self.get(id).is_some_and(|node| node.name() == name))
    }

    /// Draw the whole scene from the root with an identity transform
    pub fn visualize(&mut self, backend: &mut dyn RenderBackend) {
        self.place(self.root, &Mat4::identity(), Some(backend));
    }

    /// Draw the subtree at `id` under an accumulated transform
    ///
    /// Each model leaf refreshes its world bounds with the transform it is
    /// drawn with before the draw is issued.
    pub fn visualize_from(
        &mut self,
        id: NodeId,
        accumulated: &Mat4,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), SceneError> {
        if !self.nodes.contains_key(id) {
            return Err(SceneError::NodeNotFound(id));
        }
        self.place(id, accumulated, Some(backend));
        Ok(())
    }

    /// Refresh every leaf's world bounds without drawing
    pub fn refresh_bounds(&mut self) {
        self.place(self.root, &Mat4::identity(), None);
    }

    fn place<'b>(
        &mut self,
        id: NodeId,
        accumulated: &Mat4,
        mut backend: Option<&mut (dyn RenderBackend + 'b)>,
    ) {
        let Some(entry) = self.nodes.get_mut(id) else {
            return;
        };

        let (children, stacked) = match &mut entry.node {
            SceneNode::Group(group) => (group.children().to_vec(), *accumulated),
            SceneNode::Transform(transform) => {
                (transform.children().to_vec(), accumulated * transform.local_matrix())
            }
            SceneNode::Model(model) => {
                model.refresh_bounds(accumulated);
                if let Some(backend) = backend {
                    backend.draw(&DrawRequest {
                        node: Some(id),
                        asset: model.asset(),
                        model: *accumulated,
                        normal: accumulated.normal_matrix(),
                        tint: None,
                    });
                }
                return;
            }
        };

        for child in children {
            self.place(child, &stacked, backend.as_deref_mut());
        }
    }

    /// Every ray hit in the scene, in traversal order
    pub fn traverse_intersection(&self, ray: &Ray) -> Vec<Intersection> {
        let mut hits = Vec::new();
        self.traverse_intersection_from(self.root, ray, &[], &mut hits);
        hits
    }

    /// Collect ray hits in the subtree at `id`
    ///
    /// `ancestors` is the path walked to reach `id`. Hits use the world bounds
    /// from the most recent placement of each leaf; leaves without bounds never
    /// report a hit.
    pub fn traverse_intersection_from(
        &self,
        id: NodeId,
        ray: &Ray,
        ancestors: &[NodeId],
        hits: &mut Vec<Intersection>,
    ) {
        let Some(node) = self.get(id) else {
            return;
        };

        let mut path = ancestors.to_vec();
        path.push(id);

        match node {
            SceneNode::Group(_) | SceneNode::Transform(_) => {
                for &child in node.children() {
                    self.traverse_intersection_from(child, ray, &path, hits);
                }
            }
            SceneNode::Model(model) => {
                if let Some(hit) = model.bounds().and_then(|b| b.intersect_ray(ray)) {
                    hits.push(Intersection {
                        point: hit.point,
                        distance: hit.distance,
                        node: id,
                        path,
                    });
                }
            }
        }
    }

    /// Closest hit along `direction` from `origin`
    pub fn nearest_intersection(&self, origin: &Vec3, direction: &Vec3) -> Option<Intersection> {
        nearest(self.traverse_intersection(&Ray::new(*origin, *direction)))
    }
}
