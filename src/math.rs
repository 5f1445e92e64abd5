//! Transform helpers used to build the per-frame model-view-projection matrix.
//!
//! Everything here is a pure function over [`glam`] types. The renderer composes
//! them in a fixed order each frame: `projection * view * model`.

use glam::{Mat4, Vec3};

use crate::scene::Easing;

/// Multiply two matrices (`a * b`, so `b` is applied first).
pub fn multiply(a: Mat4, b: Mat4) -> Mat4 {
    a * b
}

/// Rotation about the X axis by `angle` radians.
pub fn rotation_x(angle: f32) -> Mat4 {
    Mat4::from_rotation_x(angle)
}

/// Rotation about the Y axis by `angle` radians.
pub fn rotation_y(angle: f32) -> Mat4 {
    Mat4::from_rotation_y(angle)
}

/// Translation by `(x, y, z)`.
pub fn translation(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(x, y, z))
}

/// Right-handed perspective projection with a `[0, 1]` depth range.
///
/// `fov_y` is the vertical field of view in radians.
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_rh(fov_y, aspect.max(f32::EPSILON), near, far)
}

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Component-wise [`lerp`] for RGB triples.
pub fn lerp3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [lerp(a[0], b[0], t), lerp(a[1], b[1], t), lerp(a[2], b[2], t)]
}

/// Quadratic ease-in-out: `2t²` below one half, `-1 + (4 - 2t)t` above.
pub fn ease_in_out(t: f32) -> f32 {
    Easing::EaseInOut.apply(t)
}

/// Deterministic pseudo-random value in `[0, 1)` for an integer seed.
///
/// Generators use this instead of an RNG so that the same `(scene, time)`
/// always produces the same batch.
pub(crate) fn hash01(seed: u32) -> f32 {
    let s = (seed as f32 * 12.9898 + 78.233).sin() * 43758.547;
    (s - s.floor()).min(0.999_999)
}
