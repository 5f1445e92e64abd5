use crate::error::EngineError;
use crate::font::{FontAtlas, GlyphTable};
use crate::gpu::GpuContext;

/// Straight-alpha RGBA colour for the 2D overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same colour with its alpha scaled by `factor`.
    pub fn fade(self, factor: f32) -> Self {
        Self {
            a: self.a * factor.clamp(0.0, 1.0),
            ..self
        }
    }

    fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Vertex for 2D quads and glyphs, in pixels from the top-left corner.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex2d {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex2d {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex2d>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            },
            // uv
            wgpu::VertexAttribute {
                offset: 8,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x2,
            },
            // color
            wgpu::VertexAttribute {
                offset: 16,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x4,
            },
        ],
    };
}

fn quad(x0: f32, y0: f32, x1: f32, y1: f32, uv: [f32; 4], color: [f32; 4]) -> [Vertex2d; 6] {
    let [u0, v0, u1, v1] = uv;
    let v = |x, y, u, v| Vertex2d {
        position: [x, y],
        uv: [u, v],
        color,
    };
    [
        v(x0, y0, u0, v0),
        v(x1, y0, u1, v0),
        v(x0, y1, u0, v1),
        v(x1, y0, u1, v0),
        v(x1, y1, u1, v1),
        v(x0, y1, u0, v1),
    ]
}

/// One frame's worth of 2D geometry: flat quads and font glyphs.
#[derive(Clone, Debug, Default)]
pub struct Batch2d {
    pub(crate) colored: Vec<Vertex2d>,
    pub(crate) glyphs: Vec<Vertex2d>,
}

impl Batch2d {
    pub fn clear(&mut self) {
        self.colored.clear();
        self.glyphs.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.colored.is_empty() && self.glyphs.is_empty()
    }

    /// Axis-aligned rectangle. Fully transparent rects are dropped.
    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        if color.a <= 0.0 || w <= 0.0 || h <= 0.0 {
            return;
        }
        self.colored
            .extend_from_slice(&quad(x, y, x + w, y + h, [0.0; 4], color.to_array()));
    }

    /// Lay out `text` with its top-left corner at (`x`, `y`).
    pub fn text(&mut self, glyphs: &GlyphTable, x: f32, y: f32, text: &str, color: Color) {
        if color.a <= 0.0 {
            return;
        }
        let c = color.to_array();
        let baseline = y + glyphs.size();
        let mut pen = x;

        for ch in text.chars() {
            let Some(glyph) = glyphs.glyph(ch) else {
                pen += glyphs.size() * 0.5;
                continue;
            };

            if glyph.width > 0 && glyph.height > 0 {
                // fontdue's ymin is measured up from the baseline to the glyph's bottom edge
                let gx = pen + glyph.offset_x;
                let gy = baseline - glyph.offset_y - glyph.height as f32;
                let [u, v, uw, vh] = glyph.uv;
                self.glyphs.extend_from_slice(&quad(
                    gx,
                    gy,
                    gx + glyph.width as f32,
                    gy + glyph.height as f32,
                    [u, v, u + uw, v + vh],
                    c,
                ));
            }
            pen += glyph.advance;
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Draw2dUniforms {
    resolution: [f32; 2],
    _padding: [f32; 2],
}

const INITIAL_VERTICES: usize = 4096;

/// Draws a [`Batch2d`] over the frame with straight alpha blending.
pub struct Draw2d {
    colored_pipeline: wgpu::RenderPipeline,
    textured_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_bind_group_layout: wgpu::BindGroupLayout,
    font_bind_group: Option<wgpu::BindGroup>,
}

impl Draw2d {
    pub fn new(gpu: &GpuContext, font: Option<&FontAtlas>) -> Result<Self, EngineError> {
        let device = &gpu.device;

        let shader = gpu.validated("draw2d shader", |device| {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Draw2d Shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("shaders/draw2d.wgsl").into()),
            })
        })?;

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Draw2d Uniforms"),
            size: std::mem::size_of::<Draw2dUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Draw2d Uniform Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Draw2d Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Draw2d Texture Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let font_bind_group =
            font.map(|font| Self::create_font_bind_group(device, &texture_bind_group_layout, font));

        let colored_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Draw2d Colored Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });
        let textured_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Draw2d Textured Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout, &texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = |label: &str, layout: &wgpu::PipelineLayout, fragment: &str| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs"),
                    buffers: &[Vertex2d::LAYOUT],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(fragment),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: gpu.config.format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    ..Default::default()
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };

        let (colored_pipeline, textured_pipeline) = gpu.validated("draw2d pipelines", |_| {
            (
                pipeline("Draw2d Colored Pipeline", &colored_layout, "fs_colored"),
                pipeline("Draw2d Textured Pipeline", &textured_layout, "fs_textured"),
            )
        })?;

        Ok(Self {
            colored_pipeline,
            textured_pipeline,
            vertex_buffer: Self::create_vertex_buffer(device, INITIAL_VERTICES),
            vertex_capacity: INITIAL_VERTICES,
            uniform_buffer,
            uniform_bind_group,
            texture_bind_group_layout,
            font_bind_group,
        })
    }

    /// Swap the glyph atlas sampled by text quads. `None` stops drawing glyphs.
    pub fn set_font(&mut self, gpu: &GpuContext, font: Option<&FontAtlas>) {
        self.font_bind_group = font
            .map(|font| Self::create_font_bind_group(&gpu.device, &self.texture_bind_group_layout, font));
    }

    fn create_font_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        font: &FontAtlas,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("HUD Font Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&font.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&font.sampler),
                },
            ],
        })
    }

    fn create_vertex_buffer(device: &wgpu::Device, vertices: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Draw2d Vertex Buffer"),
            size: (vertices * std::mem::size_of::<Vertex2d>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Upload `batch` and record its draws into `render_pass`.
    pub fn render(&mut self, gpu: &GpuContext, render_pass: &mut wgpu::RenderPass, batch: &Batch2d) {
        // Glyphs are dropped, not drawn untextured, when no font was loaded.
        let glyphs: &[Vertex2d] = if self.font_bind_group.is_some() {
            &batch.glyphs
        } else {
            &[]
        };
        let total = batch.colored.len() + glyphs.len();
        if total == 0 {
            return;
        }

        if total > self.vertex_capacity {
            self.vertex_capacity = total.next_power_of_two();
            self.vertex_buffer = Self::create_vertex_buffer(&gpu.device, self.vertex_capacity);
        }

        let uniforms = Draw2dUniforms {
            resolution: [gpu.width() as f32, gpu.height() as f32],
            _padding: [0.0, 0.0],
        };
        gpu.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));
        gpu.queue
            .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&batch.colored));
        gpu.queue.write_buffer(
            &self.vertex_buffer,
            (batch.colored.len() * std::mem::size_of::<Vertex2d>()) as u64,
            bytemuck::cast_slice(glyphs),
        );

        render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));

        let colored = batch.colored.len() as u32;
        if colored > 0 {
            render_pass.set_pipeline(&self.colored_pipeline);
            render_pass.draw(0..colored, 0..1);
        }
        if let Some(font) = &self.font_bind_group
            && !glyphs.is_empty()
        {
            render_pass.set_pipeline(&self.textured_pipeline);
            render_pass.set_bind_group(1, font, &[]);
            render_pass.draw(colored..total as u32, 0..1);
        }
    }
}
