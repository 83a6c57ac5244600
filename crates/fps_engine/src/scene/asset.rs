//! Renderable assets shared across placements
//!
//! One [`ModelAsset`] can back any number of model placements. The asset owns
//! the model-space geometry; each placement owns its own world-space bounds.

use std::sync::Arc;

use crate::foundation::math::Vec3;
use crate::physics::{Bounds, VolumeKind};

/// Model-space geometry of one mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions in model space
    pub positions: Vec<Vec3>,
}

impl MeshData {
    /// Create mesh data from vertex positions
    pub fn new(positions: Vec<Vec3>) -> Self {
        Self { positions }
    }
}

/// Material description handed to the render backend
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Material {
    /// Shader program name, resolved by the backend
    pub shader: String,
    /// Diffuse texture path, if any
    pub diffuse_texture: Option<String>,
}

impl Material {
    /// Material using the named shader
    pub fn with_shader(shader: impl Into<String>) -> Self {
        Self {
            shader: shader.into(),
            diffuse_texture: None,
        }
    }

    /// Attach a diffuse texture
    pub fn with_texture(mut self, path: impl Into<String>) -> Self {
        self.diffuse_texture = Some(path.into());
        self
    }
}

/// A renderable model shared by reference
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAsset {
    name: String,
    meshes: Vec<MeshData>,
    material: Material,
}

impl ModelAsset {
    /// Create an asset from its meshes and material
    pub fn new(name: impl Into<String>, meshes: Vec<MeshData>, material: Material) -> Self {
        Self {
            name: name.into(),
            meshes,
            material,
        }
    }

    /// Wrap the asset for sharing between placements
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Asset name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Meshes making up the model
    pub fn meshes(&self) -> &[MeshData] {
        &self.meshes
    }

    /// Material description
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Iterate every vertex position across all meshes
    pub fn positions(&self) -> impl Iterator<Item = &Vec3> + Clone {
        self.meshes.iter().flat_map(|mesh| mesh.positions.iter())
    }

    /// Total vertex count across all meshes
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|mesh| mesh.positions.len()).sum()
    }

    /// Model-space bounding volume, `None` for an asset without vertices
    pub fn local_bounds(&self, kind: VolumeKind) -> Option<Bounds> {
        Bounds::from_points(kind, self.positions())
    }
}

/// Axis-aligned cube of the given half extent centered on the origin
///
/// Handy stand-in geometry for tests and headless scenes.
pub fn cube_mesh(half_extent: f32) -> MeshData {
    let h = half_extent;
    let mut positions = Vec::with_capacity(8);
    for x in [-h, h] {
        for y in [-h, h] {
            for z in [-h, h] {
                positions.push(Vec3::new(x, y, z));
            }
        }
    }
    MeshData::new(positions)
}
