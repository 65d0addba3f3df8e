//! Draw-submission interface.
//!
//! The editor never touches the GPU directly. Each render request is one
//! sequence of calls on a [`DrawSurface`]:
//!
//! `clear` -> `upload` -> `set_transform` -> `draw_filled` [-> `draw_wireframe`]

use glam::Mat4;

/// Receiver for a frame's draw calls.
pub trait DrawSurface {
    /// Clears the target to an RGB color.
    fn clear(&mut self, rgb: [f32; 3]);

    /// Replaces the vertex data: interleaved `[x, y, z, r, g, b]` per vertex,
    /// three vertices per triangle.
    fn upload(&mut self, vertices: &[f32]);

    /// Model matrix applied to every uploaded vertex.
    fn set_transform(&mut self, model: Mat4);

    /// Draws the first `triangles` triangles with per-vertex colors.
    fn draw_filled(&mut self, triangles: usize);

    /// Draws the edges of the first `triangles` triangles in a single color.
    fn draw_wireframe(&mut self, triangles: usize, rgb: [f32; 3]);
}

/// One recorded [`DrawSurface`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear([f32; 3]),
    Upload(Vec<f32>),
    SetTransform(Mat4),
    DrawFilled(usize),
    DrawWireframe(usize, [f32; 3]),
}

/// A surface that records calls instead of drawing.
///
/// Useful for headless runs and tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently uploaded vertex data, if any.
    pub fn last_upload(&self) -> Option<&[f32]> {
        self.ops.iter().rev().find_map(|op| match op {
            DrawOp::Upload(v) => Some(v.as_slice()),
            _ => None,
        })
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, rgb: [f32; 3]) {
        self.ops.push(DrawOp::Clear(rgb));
    }

    fn upload(&mut self, vertices: &[f32]) {
        self.ops.push(DrawOp::Upload(vertices.to_vec()));
    }

    fn set_transform(&mut self, model: Mat4) {
        self.ops.push(DrawOp::SetTransform(model));
    }

    fn draw_filled(&mut self, triangles: usize) {
        self.ops.push(DrawOp::DrawFilled(triangles));
    }

    fn draw_wireframe(&mut self, triangles: usize, rgb: [f32; 3]) {
        self.ops.push(DrawOp::DrawWireframe(triangles, rgb));
    }
}
