use glam::Mat4;
use tessel_editor::DrawSurface;
use tessel_engine::render::MeshDraw;

/// Collects one frame of editor draw calls for the mesh renderer.
///
/// The editor issues its calls before the GPU frame is acquired; the
/// collected state is replayed inside `FrameCtx::render`.
#[derive(Debug)]
pub struct FrameSurface {
    pub clear: [f32; 3],
    vertices: Vec<f32>,
    model: Mat4,
    triangles: usize,
    wireframe: Option<[f32; 3]>,
}

impl Default for FrameSurface {
    fn default() -> Self {
        Self {
            clear: [0.0; 3],
            vertices: Vec::new(),
            model: Mat4::IDENTITY,
            triangles: 0,
            wireframe: None,
        }
    }
}

impl FrameSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mesh_draw(&self) -> MeshDraw<'_> {
        MeshDraw {
            vertices: &self.vertices,
            model: self.model.to_cols_array_2d(),
            triangles: self.triangles as u32,
            wireframe: self.wireframe,
        }
    }
}

impl DrawSurface for FrameSurface {
    fn clear(&mut self, rgb: [f32; 3]) {
        self.clear = rgb;
        self.triangles = 0;
        self.wireframe = None;
    }

    fn upload(&mut self, vertices: &[f32]) {
        self.vertices.clear();
        self.vertices.extend_from_slice(vertices);
    }

    fn set_transform(&mut self, model: Mat4) {
        self.model = model;
    }

    fn draw_filled(&mut self, triangles: usize) {
        self.triangles = triangles;
    }

    fn draw_wireframe(&mut self, triangles: usize, rgb: [f32; 3]) {
        if triangles != self.triangles {
            log::debug!("wireframe over {triangles} triangles, fill over {}", self.triangles);
        }
        self.wireframe = Some(rgb);
    }
}
