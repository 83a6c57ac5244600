//! Rendering seam
//!
//! The runtime never talks to a graphics API directly. Scene visualization and
//! bullet rendering emit [`DrawRequest`]s into a [`RenderBackend`].

mod backend;

pub use backend::{DrawRecord, DrawRequest, LoggingBackend, RecordingBackend, RenderBackend};
