use std::path::{Path, PathBuf};
use std::sync::Arc;

use winit::window::Window;

use crate::draw2d::{Batch2d, Draw2d};
use crate::engine::Frame;
use crate::error::EngineError;
use crate::font::FontAtlas;
use crate::gpu::GpuContext;
use crate::render_loop::FrameSink;
use crate::scene_pass::ScenePass;

/// HUD label size in logical pixels.
const LABEL_SIZE: f32 = 22.0;

/// Rasterisation size of the HUD font for a display scale factor.
fn label_pixels(scale_factor: f64) -> f32 {
    LABEL_SIZE * scale_factor as f32
}

/// The wgpu frame sink: scene geometry first, then the HUD overlay on top.
pub struct Renderer {
    window: Arc<Window>,
    gpu: GpuContext,
    scene: ScenePass,
    overlay: Draw2d,
    font: Option<FontAtlas>,
    font_path: Option<PathBuf>,
    font_scale: f64,
    batch_2d: Batch2d,
}

impl Renderer {
    /// Acquire the GPU and build both passes.
    ///
    /// A missing or unreadable font only disables the HUD label.
    pub fn new(window: Arc<Window>, font_path: Option<&Path>) -> Result<Self, EngineError> {
        let gpu = GpuContext::new(window.clone())?;
        let scene = ScenePass::new(&gpu)?;

        let font_scale = window.scale_factor();
        let font = load_font(&gpu, font_path, font_scale);
        let overlay = Draw2d::new(&gpu, font.as_ref())?;

        Ok(Self {
            window,
            gpu,
            scene,
            overlay,
            font,
            font_path: font_path.map(Path::to_path_buf),
            font_scale,
            batch_2d: Batch2d::default(),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

fn load_font(gpu: &GpuContext, path: Option<&Path>, scale_factor: f64) -> Option<FontAtlas> {
    match FontAtlas::load(gpu, path, label_pixels(scale_factor)) {
        Ok(font) => Some(font),
        Err(err) => {
            log::warn!("HUD text disabled: {err}");
            None
        }
    }
}

impl FrameSink for Renderer {
    fn present(&mut self, frame: &Frame) -> Result<(), EngineError> {
        self.scene.ensure_depth_size(&self.gpu);

        let output = self.gpu.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        let [r, g, b] = frame.background;
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.scene.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.scene.render(
                &self.gpu,
                &mut pass,
                &frame.batch,
                frame.mvp,
                frame.time,
                self.window.scale_factor() as f32,
            );
        }

        self.batch_2d.clear();
        frame.hud.draw(
            &mut self.batch_2d,
            self.font.as_ref().map(FontAtlas::glyphs),
            frame.time,
            self.gpu.width() as f32,
            self.gpu.height() as f32,
        );
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("HUD Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
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
            });
            self.overlay.render(&self.gpu, &mut pass, &self.batch_2d);
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        output.present();
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
    }

    fn recover(&mut self) {
        self.gpu.reconfigure();
    }

    fn rescale(&mut self, scale_factor: f64) {
        if scale_factor == self.font_scale {
            return;
        }
        log::info!("display scale {} -> {scale_factor}; rebuilding HUD font", self.font_scale);
        self.font_scale = scale_factor;
        self.font = load_font(&self.gpu, self.font_path.as_deref(), scale_factor);
        self.overlay.set_font(&self.gpu, self.font.as_ref());
    }
}
