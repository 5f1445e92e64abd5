//! Point and line vertex batches produced by the scene generators.

use glam::Vec3;

/// A single point sprite.
///
/// Uploaded as a per-instance attribute; the point shader expands every
/// instance into a screen-space quad.
///
/// | Attribute | Format    | Offset | Shader Location |
/// |-----------|-----------|--------|-----------------|
/// | position  | Float32x3 | 0      | 0               |
/// | size      | Float32   | 12     | 1               |
/// | color     | Float32x4 | 16     | 2               |
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

impl PointVertex {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<PointVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            // size
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32,
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

/// One end of a line segment. Segments are consecutive pairs.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<LineVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            // color
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x4,
            },
        ],
    };
}

/// The geometry drawn for one frame.
///
/// Generators build a fresh batch every frame; nothing holds on to it past
/// the draw call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometryBatch {
    pub points: Vec<PointVertex>,
    pub lines: Vec<LineVertex>,
}

impl GeometryBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(points: usize, lines: usize) -> Self {
        Self {
            points: Vec::with_capacity(points),
            lines: Vec::with_capacity(lines),
        }
    }

    /// Push a point sprite.
    pub fn point(&mut self, position: Vec3, color: [f32; 4], size: f32) {
        self.points.push(PointVertex {
            position: position.to_array(),
            size,
            color,
        });
    }

    /// Push a single-colored segment.
    pub fn line(&mut self, a: Vec3, b: Vec3, color: [f32; 4]) {
        self.gradient_line(a, b, color, color);
    }

    /// Push a segment whose color runs from `color_a` at `a` to `color_b` at `b`.
    pub fn gradient_line(&mut self, a: Vec3, b: Vec3, color_a: [f32; 4], color_b: [f32; 4]) {
        self.lines.push(LineVertex {
            position: a.to_array(),
            color: color_a,
        });
        self.lines.push(LineVertex {
            position: b.to_array(),
            color: color_b,
        });
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn line_vertex_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.lines.is_empty()
    }

    /// Flattened point positions, three floats per point.
    pub fn positions(&self) -> Vec<f32> {
        self.points.iter().flat_map(|p| p.position).collect()
    }

    /// Flattened point colors, four floats per point.
    pub fn colors(&self) -> Vec<f32> {
        self.points.iter().flat_map(|p| p.color).collect()
    }

    /// Point sizes, one float per point.
    pub fn sizes(&self) -> Vec<f32> {
        self.points.iter().map(|p| p.size).collect()
    }
}

/// Shorthand for an RGBA color from an RGB triple and an alpha.
pub(crate) fn rgba(rgb: [f32; 3], alpha: f32) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], alpha.clamp(0.0, 1.0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_sizes_match_layouts() {
        assert_eq!(std::mem::size_of::<PointVertex>(), 32);
        assert_eq!(PointVertex::LAYOUT.array_stride, 32);
        assert_eq!(std::mem::size_of::<LineVertex>(), 28);
        assert_eq!(LineVertex::LAYOUT.array_stride, 28);
    }

    #[test]
    fn lines_are_pushed_in_pairs() {
        let mut batch = GeometryBatch::new();
        batch.line(Vec3::ZERO, Vec3::X, [1.0; 4]);
        batch.gradient_line(Vec3::Y, Vec3::Z, [1.0; 4], [0.0; 4]);
        assert_eq!(batch.line_vertex_count(), 4);
        assert_eq!(batch.lines[2].position, [0.0, 1.0, 0.0]);
        assert_eq!(batch.lines[3].color, [0.0; 4]);
    }

    #[test]
    fn flattened_arrays_follow_point_order() {
        let mut batch = GeometryBatch::new();
        batch.point(Vec3::new(1.0, 2.0, 3.0), [0.1, 0.2, 0.3, 0.4], 2.0);
        batch.point(Vec3::new(4.0, 5.0, 6.0), [0.5, 0.6, 0.7, 0.8], 3.0);

        assert_eq!(batch.positions(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(batch.colors(), vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8]);
        assert_eq!(batch.sizes(), vec![2.0, 3.0]);
    }

    #[test]
    fn rgba_clamps_alpha() {
        assert_eq!(rgba([1.0, 0.5, 0.0], 1.7)[3], 1.0);
        assert_eq!(rgba([1.0, 0.5, 0.0], -0.2)[3], 0.0);
    }
}
