use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};

/// Interleaved `[x, y, z, r, g, b]`.
pub const FLOATS_PER_VERTEX: usize = 6;

/// One frame's worth of triangle-list geometry.
#[derive(Debug, Clone, Copy)]
pub struct MeshDraw<'a> {
    /// Three vertices per triangle, `FLOATS_PER_VERTEX` floats each.
    pub vertices: &'a [f32],

    /// Column-major model matrix applied in the vertex shader.
    pub model: [[f32; 4]; 4],

    /// Number of triangles to fill.
    pub triangles: u32,

    /// When set, triangle edges are drawn on top in this color.
    pub wireframe: Option<[f32; 3]>,
}

/// Colored triangle renderer with an optional single-color wireframe pass.
///
/// The vertex buffer is uploaded as-is; both pipelines read it. The wireframe
/// uses a line-list index buffer built from triangle edges.
#[derive(Default)]
pub struct MeshRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    fill_pipeline: Option<wgpu::RenderPipeline>,
    wire_pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    mesh_ubo: Option<wgpu::Buffer>,

    vbo: Option<wgpu::Buffer>,
    vbo_capacity: usize, // in floats

    wire_ibo: Option<wgpu::Buffer>,
    wire_triangles: u32,
}

impl MeshRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one render pass drawing `draw` into `target`.
    ///
    /// The pass loads the existing contents, so clear first.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw: &MeshDraw<'_>) {
        let needed = draw.triangles as usize * 3 * FLOATS_PER_VERTEX;
        if draw.triangles == 0 || draw.vertices.len() < needed {
            if draw.triangles > 0 {
                log::warn!(
                    "MeshRenderer: {} triangles need {needed} floats, got {}",
                    draw.triangles,
                    draw.vertices.len()
                );
            }
            return;
        }

        self.ensure_pipelines(ctx);
        self.ensure_bindings(ctx);
        self.ensure_vertex_capacity(ctx, needed);
        if draw.wireframe.is_some() {
            self.ensure_wire_indices(ctx, draw.triangles);
        }

        self.write_uniform(ctx, draw);

        let Some(vbo) = self.vbo.as_ref() else { return };
        ctx.queue
            .write_buffer(vbo, 0, bytemuck::cast_slice(&draw.vertices[..needed]));

        let Some(fill_pipeline) = self.fill_pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("tessel mesh pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));

        rpass.set_pipeline(fill_pipeline);
        rpass.draw(0..draw.triangles * 3, 0..1);

        if draw.wireframe.is_some() {
            let (Some(wire_pipeline), Some(ibo)) = (self.wire_pipeline.as_ref(), self.wire_ibo.as_ref())
            else {
                return;
            };
            rpass.set_pipeline(wire_pipeline);
            rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..draw.triangles * 6, 0, 0..1);
        }
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.fill_pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("tessel mesh shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("tessel mesh bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: wgpu::BufferSize::new(
                                std::mem::size_of::<MeshUniform>() as u64,
                            ),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("tessel mesh pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let build = |label: &str, fs_entry: &str, topology: wgpu::PrimitiveTopology| {
            ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[vertex_layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(fs_entry),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        };

        let fill = build(
            "tessel mesh fill pipeline",
            "fs_fill",
            wgpu::PrimitiveTopology::TriangleList,
        );
        let wire = build(
            "tessel mesh wire pipeline",
            "fs_wire",
            wgpu::PrimitiveTopology::LineList,
        );

        self.pipeline_format = Some(ctx.surface_format);
        self.fill_pipeline = Some(fill);
        self.wire_pipeline = Some(wire);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
        self.mesh_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.mesh_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let mesh_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tessel mesh ubo"),
            size: std::mem::size_of::<MeshUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tessel mesh bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: mesh_ubo.as_entire_binding(),
            }],
        });

        self.mesh_ubo = Some(mesh_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_vertex_capacity(&mut self, ctx: &RenderCtx<'_>, floats: usize) {
        if floats <= self.vbo_capacity && self.vbo.is_some() {
            return;
        }

        let new_cap = floats.next_power_of_two().max(64 * FLOATS_PER_VERTEX);
        self.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tessel mesh vbo"),
            size: (new_cap * std::mem::size_of::<f32>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vbo_capacity = new_cap;
    }

    fn ensure_wire_indices(&mut self, ctx: &RenderCtx<'_>, triangles: u32) {
        if self.wire_triangles == triangles && self.wire_ibo.is_some() {
            return;
        }

        let indices = wireframe_indices(triangles);
        self.wire_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("tessel mesh wire ibo"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        }));
        self.wire_triangles = triangles;
    }

    fn write_uniform(&self, ctx: &RenderCtx<'_>, draw: &MeshDraw<'_>) {
        let Some(ubo) = self.mesh_ubo.as_ref() else { return };
        let [r, g, b] = draw.wireframe.unwrap_or([0.0; 3]);
        let u = MeshUniform {
            model: draw.model,
            wire_color: [r, g, b, 1.0],
        };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct MeshUniform {
    model: [[f32; 4]; 4],
    wire_color: [f32; 4],
}

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
    0 => Float32x3, // position
    1 => Float32x3  // color
];

fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: (FLOATS_PER_VERTEX * std::mem::size_of::<f32>()) as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRS,
    }
}

/// Line-list indices for the edges of `triangles` consecutive triangles.
fn wireframe_indices(triangles: u32) -> Vec<u32> {
    (0..triangles)
        .flat_map(|t| {
            let a = t * 3;
            [a, a + 1, a + 1, a + 2, a + 2, a]
        })
        .collect()
}
