//! Point-sprite and line rendering for the procedural scenes.
//!
//! [`ScenePass`] owns both shading programs, a shared uniform buffer, vertex
//! buffers that grow to fit the largest batch seen so far, and a depth buffer
//! that follows the surface size.
//!
//! Both pipelines blend additively so overlapping glow brightens instead of
//! occluding, while the depth test keeps near geometry in front.

use glam::Mat4;

use crate::error::EngineError;
use crate::gpu::GpuContext;
use crate::scene::{GeometryBatch, LineVertex, PointVertex};

/// Screen pixels per unit of point size, before the window scale factor.
pub const POINT_PIXELS: f32 = 3.0;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniforms {
    mvp: [[f32; 4]; 4],
    resolution: [f32; 2],
    time: f32,
    point_scale: f32,
}

const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

/// A vertex buffer that is recreated at the next power of two when outgrown.
struct GrowableBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: u64,
}

impl GrowableBuffer {
    fn new(device: &wgpu::Device, label: &'static str, capacity: u64) -> Self {
        Self {
            label,
            buffer: Self::create(device, label, capacity),
            capacity,
        }
    }

    fn create(device: &wgpu::Device, label: &'static str, size: u64) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn upload(&mut self, gpu: &GpuContext, bytes: &[u8]) {
        let needed = bytes.len() as u64;
        if needed > self.capacity {
            self.capacity = needed.next_power_of_two();
            self.buffer = Self::create(&gpu.device, self.label, self.capacity);
            log::debug!("{} grown to {} bytes", self.label, self.capacity);
        }
        gpu.queue.write_buffer(&self.buffer, 0, bytes);
    }
}

pub struct ScenePass {
    point_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    points: GrowableBuffer,
    lines: GrowableBuffer,
    depth_view: wgpu::TextureView,
    depth_size: (u32, u32),
}

impl ScenePass {
    pub fn new(gpu: &GpuContext) -> Result<Self, EngineError> {
        let device = &gpu.device;

        let point_shader = gpu.validated("point shader", |device| {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Point Sprite Shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("shaders/points.wgsl").into()),
            })
        })?;
        let line_shader = gpu.validated("line shader", |device| {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Line Shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("shaders/lines.wgsl").into()),
            })
        })?;

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Scene Uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Scene Uniform Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Uniform Bind Group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&uniform_layout],
            push_constant_ranges: &[],
        });

        let pipeline = |label: &str,
                        shader: &wgpu::ShaderModule,
                        layout: wgpu::VertexBufferLayout<'static>,
                        topology: wgpu::PrimitiveTopology| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some("vs"),
                    buffers: &[layout],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: Some("fs"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: gpu.config.format,
                        blend: Some(ADDITIVE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: wgpu::TextureFormat::Depth32Float,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };

        let point_pipeline = gpu.validated("point pipeline", |_| {
            pipeline(
                "Point Sprite Pipeline",
                &point_shader,
                PointVertex::LAYOUT,
                wgpu::PrimitiveTopology::TriangleList,
            )
        })?;
        let line_pipeline = gpu.validated("line pipeline", |_| {
            pipeline(
                "Line Pipeline",
                &line_shader,
                LineVertex::LAYOUT,
                wgpu::PrimitiveTopology::LineList,
            )
        })?;

        let point_bytes = (2048 * std::mem::size_of::<PointVertex>()) as u64;
        let line_bytes = (4096 * std::mem::size_of::<LineVertex>()) as u64;

        Ok(Self {
            point_pipeline,
            line_pipeline,
            uniform_buffer,
            uniform_bind_group,
            points: GrowableBuffer::new(device, "Point Instance Buffer", point_bytes),
            lines: GrowableBuffer::new(device, "Line Vertex Buffer", line_bytes),
            depth_view: Self::create_depth_view(gpu),
            depth_size: (gpu.width(), gpu.height()),
        })
    }

    fn create_depth_view(gpu: &GpuContext) -> wgpu::TextureView {
        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Scene Depth Texture"),
            size: wgpu::Extent3d {
                width: gpu.width(),
                height: gpu.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Recreate the depth buffer if the surface changed size.
    pub fn ensure_depth_size(&mut self, gpu: &GpuContext) {
        if self.depth_size != (gpu.width(), gpu.height()) {
            self.depth_view = Self::create_depth_view(gpu);
            self.depth_size = (gpu.width(), gpu.height());
        }
    }

    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    /// Upload `batch` and record the point and line draws.
    ///
    /// The render pass must carry this pass's depth attachment.
    pub fn render(
        &mut self,
        gpu: &GpuContext,
        render_pass: &mut wgpu::RenderPass,
        batch: &GeometryBatch,
        mvp: Mat4,
        time: f32,
        scale_factor: f32,
    ) {
        let uniforms = SceneUniforms {
            mvp: mvp.to_cols_array_2d(),
            resolution: [gpu.width() as f32, gpu.height() as f32],
            time,
            point_scale: POINT_PIXELS * scale_factor,
        };
        gpu.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));

        render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);

        if !batch.points.is_empty() {
            self.points.upload(gpu, bytemuck::cast_slice(&batch.points));
            render_pass.set_pipeline(&self.point_pipeline);
            render_pass.set_vertex_buffer(0, self.points.buffer.slice(..));
            render_pass.draw(0..6, 0..batch.points.len() as u32);
        }

        // A trailing unpaired vertex would not form a segment.
        let line_vertices = batch.lines.len() & !1;
        if line_vertices > 0 {
            self.lines
                .upload(gpu, bytemuck::cast_slice(&batch.lines[..line_vertices]));
            render_pass.set_pipeline(&self.line_pipeline);
            render_pass.set_vertex_buffer(0, self.lines.buffer.slice(..));
            render_pass.draw(0..line_vertices as u32, 0..1);
        }
    }
}
