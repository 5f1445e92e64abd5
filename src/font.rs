//! HUD font: fontdue rasterisation into a single R8 atlas texture.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use fontdue::{Font, FontSettings};

use crate::error::EngineError;
use crate::gpu::GpuContext;

/// Searched in order when no font path is configured.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu-sans-mono-fonts/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/System/Library/Fonts/Menlo.ttc",
    "/System/Library/Fonts/Monaco.ttf",
    "C:\\Windows\\Fonts\\consola.ttf",
    "C:\\Windows\\Fonts\\cour.ttf",
];

const ATLAS_PADDING: u32 = 1;

/// Where a glyph sits in the atlas and how to place it on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphInfo {
    /// Atlas rect (x, y, width, height) normalised to [0, 1].
    pub uv: [f32; 4],
    pub width: u32,
    pub height: u32,
    /// Offset from the pen position to the glyph's bottom-left, in pixels.
    pub offset_x: f32,
    pub offset_y: f32,
    pub advance: f32,
}

/// Glyph metrics for laying out text, independent of any GPU resource.
#[derive(Clone, Debug, Default)]
pub struct GlyphTable {
    glyphs: HashMap<char, GlyphInfo>,
    size: f32,
}

impl GlyphTable {
    pub(crate) fn new(glyphs: HashMap<char, GlyphInfo>, size: f32) -> Self {
        Self { glyphs, size }
    }

    pub fn glyph(&self, c: char) -> Option<&GlyphInfo> {
        self.glyphs.get(&c)
    }

    /// Pixel size the glyphs were rasterised at.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Width of `text` in pixels. Unknown characters advance by half the size.
    pub fn measure(&self, text: &str) -> f32 {
        text.chars()
            .map(|c| self.glyph(c).map_or(self.size * 0.5, |g| g.advance))
            .sum()
    }
}

/// Shelf-pack rectangles of the given sizes, growing the atlas until they fit.
///
/// Returns the atlas dimensions and the top-left corner of every rect.
fn pack(sizes: &[(u32, u32)]) -> (u32, u32, Vec<(u32, u32)>) {
    let mut width = 256u32;
    let mut height = 256u32;

    loop {
        let mut origins = Vec::with_capacity(sizes.len());
        let (mut x, mut y, mut row) = (ATLAS_PADDING, ATLAS_PADDING, 0u32);
        let mut fits = true;

        for &(w, h) in sizes {
            if x + w + ATLAS_PADDING > width {
                x = ATLAS_PADDING;
                y += row + ATLAS_PADDING;
                row = 0;
            }
            if y + h + ATLAS_PADDING > height || w + 2 * ATLAS_PADDING > width {
                fits = false;
                break;
            }
            origins.push((x, y));
            x += w + ATLAS_PADDING;
            row = row.max(h);
        }

        if fits {
            return (width, height, origins);
        }
        if width <= height {
            width *= 2;
        } else {
            height *= 2;
        }
    }
}

/// Printable ASCII rasterised once into a GPU texture.
pub struct FontAtlas {
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    glyphs: GlyphTable,
}

impl FontAtlas {
    /// Rasterise `font_data` at `size` pixels and upload it.
    pub fn new(gpu: &GpuContext, font_data: &[u8], size: f32, origin: &Path) -> Result<Self, EngineError> {
        let font = Font::from_bytes(font_data, FontSettings::default()).map_err(|message| {
            EngineError::Font {
                path: origin.to_path_buf(),
                message: message.to_string(),
            }
        })?;

        let rasterized: Vec<(char, fontdue::Metrics, Vec<u8>)> = (32u8..=126u8)
            .map(char::from)
            .map(|c| {
                let (metrics, bitmap) = font.rasterize(c, size);
                (c, metrics, bitmap)
            })
            .collect();

        let sizes: Vec<(u32, u32)> = rasterized
            .iter()
            .map(|(_, m, _)| (m.width as u32, m.height as u32))
            .collect();
        let (atlas_width, atlas_height, origins) = pack(&sizes);

        let mut atlas = vec![0u8; (atlas_width * atlas_height) as usize];
        let mut glyphs = HashMap::new();
        for ((c, metrics, bitmap), (x, y)) in rasterized.iter().zip(origins) {
            let (w, h) = (metrics.width as u32, metrics.height as u32);
            for row in 0..h {
                let src = (row * w) as usize;
                let dst = ((y + row) * atlas_width + x) as usize;
                atlas[dst..dst + w as usize].copy_from_slice(&bitmap[src..src + w as usize]);
            }
            glyphs.insert(
                *c,
                GlyphInfo {
                    uv: [
                        x as f32 / atlas_width as f32,
                        y as f32 / atlas_height as f32,
                        w as f32 / atlas_width as f32,
                        h as f32 / atlas_height as f32,
                    ],
                    width: w,
                    height: h,
                    offset_x: metrics.xmin as f32,
                    offset_y: metrics.ymin as f32,
                    advance: metrics.advance_width,
                },
            );
        }

        let extent = wgpu::Extent3d {
            width: atlas_width,
            height: atlas_height,
            depth_or_array_layers: 1,
        };
        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("HUD Font Atlas"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        gpu.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &atlas,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(atlas_width),
                rows_per_image: Some(atlas_height),
            },
            extent,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = gpu.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("HUD Font Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        log::debug!(
            "font atlas {}x{} with {} glyphs from {}",
            atlas_width,
            atlas_height,
            glyphs.len(),
            origin.display()
        );

        Ok(Self {
            view,
            sampler,
            glyphs: GlyphTable::new(glyphs, size),
        })
    }

    /// Load the configured font, or the first system font that exists.
    pub fn load(gpu: &GpuContext, configured: Option<&Path>, size: f32) -> Result<Self, EngineError> {
        let path = match configured {
            Some(path) => path.to_path_buf(),
            None => SYSTEM_FONTS
                .iter()
                .map(PathBuf::from)
                .find(|p| p.is_file())
                .ok_or(EngineError::NoFont)?,
        };
        let data = std::fs::read(&path)?;
        Self::new(gpu, &data, size, &path)
    }

    pub fn glyphs(&self) -> &GlyphTable {
        &self.glyphs
    }
}
