//! Scene node variants
//!
//! The hierarchy is a closed set of variants: plain groups, transform groups
//! and model leaves. Nodes are stored in the [`SceneGraph`](super::SceneGraph)
//! arena and refer to their children by [`NodeId`].

use std::sync::Arc;

use slotmap::new_key_type;

use crate::foundation::math::{Mat4, MatrixExt, Vec3};
use crate::gameplay::damage::{Damageable, Health};
use crate::physics::{BoundingVolume, Bounds, VolumeKind};
use super::asset::ModelAsset;

new_key_type! {
    /// Identity of a node in a scene graph
    pub struct NodeId;
}

/// A node owning an ordered list of children
#[derive(Debug, Clone, Default)]
pub struct GroupNode {
    name: String,
    children: Vec<NodeId>,
}

impl GroupNode {
    /// Create an empty group
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Node name (not guaranteed unique)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Children in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    /// Drops every occurrence of `child`
    pub(crate) fn remove_child(&mut self, child: NodeId) {
        self.children.retain(|&id| id != child);
    }
}

/// A group that folds a local transform into the accumulated transform
///
/// The local matrix is `T * R2 * R1 * S`: the second rotation is applied
/// before the first in the composed chain, and rotations with a zero angle
/// are skipped.
#[derive(Debug, Clone)]
pub struct TransformNode {
    group: GroupNode,
    /// Translation
    pub translation: Vec3,
    /// Axis of the first rotation
    pub rotation_axis: Vec3,
    /// Angle of the first rotation in radians
    pub rotation_angle: f32,
    /// Axis of the second rotation
    pub rotation2_axis: Vec3,
    /// Angle of the second rotation in radians
    pub rotation2_angle: f32,
    /// Per-axis scale
    pub scale: Vec3,
}

impl TransformNode {
    /// Create an identity transform node
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            group: GroupNode::new(name),
            translation: Vec3::zeros(),
            rotation_axis: Vec3::zeros(),
            rotation_angle: 0.0,
            rotation2_axis: Vec3::zeros(),
            rotation2_angle: 0.0,
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    /// Set the translation
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    /// Set the first rotation
    pub fn with_rotation(mut self, axis: Vec3, radians: f32) -> Self {
        self.rotation_axis = axis;
        self.rotation_angle = radians;
        self
    }

    /// Set the second rotation
    pub fn with_rotation2(mut self, axis: Vec3, radians: f32) -> Self {
        self.rotation2_axis = axis;
        self.rotation2_angle = radians;
        self
    }

    /// Set a per-axis scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Set the same scale on every axis
    pub fn with_uniform_scale(self, scale: f32) -> Self {
        self.with_scale(Vec3::new(scale, scale, scale))
    }

    /// Node name
    pub fn name(&self) -> &str {
        self.group.name()
    }

    /// Children in insertion order
    pub fn children(&self) -> &[NodeId] {
        self.group.children()
    }

    /// Local-to-parent matrix
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::translate(&self.translation)
            * Mat4::axis_angle(&self.rotation2_axis, self.rotation2_angle)
            * Mat4::axis_angle(&self.rotation_axis, self.rotation_angle)
            * Mat4::nonuniform_scale(&self.scale)
    }
}

/// A leaf placing a shared model asset
///
/// Each placement keeps its own world-space bounds, so one asset reused under
/// many transforms still yields one correctly placed volume per placement.
#[derive(Debug)]
pub struct ModelNode {
    name: String,
    asset: Arc<ModelAsset>,
    bounds: Option<Bounds>,
    damageable: Option<Box<dyn Damageable>>,
}

impl ModelNode {
    /// Place `asset` with a bounding sphere built from its vertices
    pub fn new(name: impl Into<String>, asset: Arc<ModelAsset>) -> Self {
        Self::with_volume(name, asset, VolumeKind::Sphere)
    }

    /// Place `asset` with the requested bounding volume kind
    pub fn with_volume(name: impl Into<String>, asset: Arc<ModelAsset>, kind: VolumeKind) -> Self {
        let bounds = asset.local_bounds(kind);
        Self {
            name: name.into(),
            asset,
            bounds,
            damageable: None,
        }
    }

    /// Replace the bounding volume
    pub fn with_bounds(mut self, bounds: Option<Bounds>) -> Self {
        self.bounds = bounds;
        self
    }

    /// Expose a damage capability on this leaf
    pub fn with_damageable(mut self, damageable: impl Damageable + 'static) -> Self {
        self.damageable = Some(Box::new(damageable));
        self
    }

    /// Expose a plain health pool on this leaf
    pub fn with_health(self, max: u32) -> Self {
        self.with_damageable(Health::new(max))
    }

    /// Replace the bounding volume in place
    pub fn set_bounds(&mut self, bounds: Option<Bounds>) {
        self.bounds = bounds;
    }

    /// Replace the damage capability in place
    pub fn set_damageable(&mut self, damageable: impl Damageable + 'static) {
        self.damageable = Some(Box::new(damageable));
    }

    /// Node name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The shared asset
    pub fn asset(&self) -> &Arc<ModelAsset> {
        &self.asset
    }

    /// World-space bounding volume, if the leaf has one
    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }

    /// World-space bounding volume, if the leaf has one
    pub fn bounds_mut(&mut self) -> Option<&mut Bounds> {
        self.bounds.as_mut()
    }

    /// Refresh the world placement of the bounding volume
    pub fn refresh_bounds(&mut self, model: &Mat4) {
        if let Some(bounds) = self.bounds.as_mut() {
            bounds.transform(model);
        }
    }

    /// The damage capability, if this leaf exposes one
    pub fn as_damageable(&self) -> Option<&dyn Damageable> {
        self.damageable.as_deref()
    }

    /// The damage capability, if this leaf exposes one
    pub fn as_damageable_mut(&mut self) -> Option<&mut dyn Damageable> {
        self.damageable.as_deref_mut().map(|d| d as &mut dyn Damageable)
    }
}

/// A node in the scene hierarchy
#[derive(Debug)]
pub enum SceneNode {
    /// Plain grouping node
    Group(GroupNode),
    /// Grouping node with a local transform
    Transform(TransformNode),
    /// Drawable leaf
    Model(ModelNode),
}

impl SceneNode {
    /// Node name
    pub fn name(&self) -> &str {
        match self {
            Self::Group(group) => group.name(),
            Self::Transform(transform) => transform.name(),
            Self::Model(model) => model.name(),
        }
    }

    /// Children of a composite, empty for leaves
    pub fn children(&self) -> &[NodeId] {
        match self {
            Self::Group(group) => group.children(),
            Self::Transform(transform) => transform.children(),
            Self::Model(_) => &[],
        }
    }

    /// Whether this node can own children
    pub fn is_composite(&self) -> bool {
        !matches!(self, Self::Model(_))
    }

    /// The model leaf, if this is one
    pub fn as_model(&self) -> Option<&ModelNode> {
        match self {
            Self::Model(model) => Some(model),
            _ => None,
        }
    }

    /// The model leaf, if this is one
    pub fn as_model_mut(&mut self) -> Option<&mut ModelNode> {
        match self {
            Self::Model(model) => Some(model),
            _ => None,
        }
    }

    /// The transform node, if this is one
    pub fn as_transform(&self) -> Option<&TransformNode> {
        match self {
            Self::Transform(transform) => Some(transform),
            _ => None,
        }
    }

    /// The transform node, if this is one
    pub fn as_transform_mut(&mut self) -> Option<&mut TransformNode> {
        match self {
            Self::Transform(transform) => Some(transform),
            _ => None,
        }
    }

    pub(crate) fn group_mut(&mut self) -> Option<&mut GroupNode> {
        match self {
            Self::Group(group) => Some(group),
            Self::Transform(transform) => Some(&mut transform.group),
            Self::Model(_) => None,
        }
    }
}

impl From<GroupNode> for SceneNode {
    fn from(node: GroupNode) -> Self {
        Self::Group(node)
    }
}

impl From<TransformNode> for SceneNode {
    fn from(node: TransformNode) -> Self {
        Self::Transform(node)
    }
}

impl From<ModelNode> for SceneNode {
    fn from(node: ModelNode) -> Self {
        Self::Model(node)
    }
}
