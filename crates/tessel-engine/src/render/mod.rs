//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers) and record into a
//! [`RenderTarget`] handed out by `core::FrameCtx::render`.
//!
//! Convention: vertex positions are already in normalized device coordinates
//! before the model matrix is applied; no viewport conversion happens here.

mod ctx;
mod mesh;

pub use ctx::{RenderCtx, RenderTarget};
pub use mesh::{MeshDraw, MeshRenderer, FLOATS_PER_VERTEX};
