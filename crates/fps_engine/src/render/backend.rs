use crate::foundation::math::{Mat3, Mat4, Vec3};
use crate::scene::{ModelAsset, NodeId};

/// A single draw of a model asset
#[derive(Debug, Clone, Copy)]
pub struct DrawRequest<'a> {
    /// Scene leaf being drawn, `None` for transient draws such as bullets
    pub node: Option<NodeId>,
    /// Asset to draw
    pub asset: &'a ModelAsset,
    /// Model matrix
    pub model: Mat4,
    /// Normal matrix derived from the model matrix
    pub normal: Mat3,
    /// Color override for the material
    pub tint: Option<Vec3>,
}

/// Receives draw requests from scene visualization and bullet rendering
pub trait RenderBackend {
    /// Issue one draw
    fn draw(&mut self, request: &DrawRequest<'_>);
}

/// Owned copy of a [`DrawRequest`]
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    /// Scene leaf being drawn
    pub node: Option<NodeId>,
    /// Name of the drawn asset
    pub asset: String,
    /// Model matrix
    pub model: Mat4,
    /// Normal matrix
    pub normal: Mat3,
    /// Color override
    pub tint: Option<Vec3>,
}

impl From<&DrawRequest<'_>> for DrawRecord {
    fn from(request: &DrawRequest<'_>) -> Self {
        Self {
            node: request.node,
            asset: request.asset.name().to_string(),
            model: request.model,
            normal: request.normal,
            tint: request.tint,
        }
    }
}

/// Backend that keeps every request it receives
#[derive(Debug, Default)]
pub struct RecordingBackend {
    records: Vec<DrawRecord>,
}

impl RecordingBackend {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws recorded so far
    pub fn records(&self) -> &[DrawRecord] {
        &self.records
    }

    /// Drain the recorded draws
    pub fn take(&mut self) -> Vec<DrawRecord> {
        std::mem::take(&mut self.records)
    }
}

impl RenderBackend for RecordingBackend {
    fn draw(&mut self, request: &DrawRequest<'_>) {
        self.records.push(request.into());
    }
}

/// Backend that traces each draw and counts them
#[derive(Debug, Default)]
pub struct LoggingBackend {
    draws: usize,
}

impl LoggingBackend {
    /// Create a backend with a zero draw count
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws issued so far
    pub fn draw_count(&self) -> usize {
        self.draws
    }
}

impl RenderBackend for LoggingBackend {
    fn draw(&mut self, request: &DrawRequest<'_>) {
        self.draws += 1;
        let model = &request.model;
        log::trace!(
            "draw {} at ({:.2}, {:.2}, {:.2})",
            request.asset.name(),
            model[(0, 3)],
            model[(1, 3)],
            model[(2, 3)]
        );
    }
}
