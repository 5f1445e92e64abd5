//! Counter-rotating double helix with bit-pattern rungs and code rain.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::fract;
use crate::math::hash01;
use crate::scene::batch::{GeometryBatch, rgba};

const SAMPLES_PER_STRAND: usize = 120;
const HELIX_TURNS: f32 = 4.0;
const HELIX_RADIUS: f32 = 1.6;
const HELIX_HEIGHT: f32 = 10.0;
const RUNG_EVERY: usize = 4;
const RAIN_PARTICLES: usize = 60;
const RAIN_TAIL: f32 = 0.45;

const STRAND_A: [f32; 3] = [0.20, 0.80, 1.00];
const STRAND_B: [f32; 3] = [0.95, 0.20, 0.30];
const BIT_ONE: [f32; 3] = [0.30, 1.00, 0.55];
const BIT_ZERO: [f32; 3] = [1.00, 0.35, 0.85];
const RAIN: [f32; 3] = [0.20, 1.00, 0.40];

pub(super) fn generate(time: f32) -> GeometryBatch {
    let mut batch = GeometryBatch::with_capacity(
        SAMPLES_PER_STRAND * 2 + SAMPLES_PER_STRAND / RUNG_EVERY + RAIN_PARTICLES,
        SAMPLES_PER_STRAND * 4 + SAMPLES_PER_STRAND + RAIN_PARTICLES * 2,
    );

    let spin = time * 0.8;
    let mut previous: Option<(Vec3, Vec3)> = None;

    for i in 0..SAMPLES_PER_STRAND {
        let u = i as f32 / (SAMPLES_PER_STRAND - 1) as f32;
        let y = (u - 0.5) * HELIX_HEIGHT;
        let sweep = u * HELIX_TURNS * TAU;

        let angle_a = sweep + spin;
        let angle_b = PI - sweep - spin;
        let a = Vec3::new(angle_a.cos() * HELIX_RADIUS, y, angle_a.sin() * HELIX_RADIUS);
        let b = Vec3::new(angle_b.cos() * HELIX_RADIUS, y, angle_b.sin() * HELIX_RADIUS);

        let pulse = (time * 2.0 + i as f32 * 0.3).sin();
        let size = 2.5 + 0.8 * pulse;
        batch.point(a, rgba(STRAND_A, 0.9), size);
        batch.point(b, rgba(STRAND_B, 0.9), size);

        if let Some((prev_a, prev_b)) = previous {
            batch.line(prev_a, a, rgba(STRAND_A, 0.35));
            batch.line(prev_b, b, rgba(STRAND_B, 0.35));
        }
        previous = Some((a, b));

        if i % RUNG_EVERY == 0 {
            let rung = i / RUNG_EVERY;
            // Bits shift along the ladder twice a second.
            let shift = (time.max(0.0) * 2.0).floor().rem_euclid(2.0) as usize;
            let bit = (rung + shift) % 2 == 0;
            let (near, far) = if bit {
                (BIT_ONE, BIT_ZERO)
            } else {
                (BIT_ZERO, BIT_ONE)
            };
            let mid = (a + b) * 0.5;
            batch.line(a, mid, rgba(near, 0.55));
            batch.line(mid, b, rgba(far, 0.55));
            batch.point(mid, rgba(near, 0.8), 1.8);
        }
    }

    for j in 0..RAIN_PARTICLES {
        let seed = j as u32;
        let radius = 2.5 + hash01(seed) * 2.5;
        let phase = hash01(seed + 1000) * TAU;
        let speed = 0.6 + hash01(seed + 2000) * 1.2;
        let offset = hash01(seed + 3000);

        // 0 at the top of the column, 1 at the bottom.
        let fall = fract(time * speed / HELIX_HEIGHT + offset);
        let y = HELIX_HEIGHT * (0.5 - fall);
        let angle = phase + time * 0.1;
        let head = Vec3::new(angle.cos() * radius, y, angle.sin() * radius);
        let tail = head + Vec3::Y * RAIN_TAIL;

        let alpha = 0.2 + 0.6 * fall;
        batch.point(head, rgba(RAIN, alpha), 1.5);
        batch.gradient_line(tail, head, rgba(RAIN, 0.0), rgba(RAIN, alpha * 0.6));
    }

    batch
}
