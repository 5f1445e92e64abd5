//! Wormhole: a twisting tunnel of rings, a spinning event horizon and inbound stars.

use std::f32::consts::TAU;

use glam::Vec3;

use super::fract;
use crate::math::{hash01, lerp3};
use crate::scene::batch::{GeometryBatch, rgba};

const RINGS: usize = 30;
const POINTS_PER_RING: usize = 32;
/// Every n-th ring is tied to the next one with lines.
const CONNECT_EVERY: usize = 3;
const TUNNEL_NEAR: f32 = 4.0;
const TUNNEL_LENGTH: f32 = 24.0;
const HORIZON_POINTS: usize = 80;
const HORIZON_DEPTH: f32 = -6.0;
const STARS: usize = 40;
const STAR_START_RADIUS: f32 = 9.0;
const STAR_START_DEPTH: f32 = -18.0;
const STREAK: f32 = 0.04;

const MOUTH: [f32; 3] = [0.80, 0.20, 1.00];
const THROAT: [f32; 3] = [0.20, 0.80, 1.00];
const HORIZON: [f32; 3] = [1.00, 0.85, 0.60];
const STAR: [f32; 3] = [1.00, 1.00, 1.00];

pub(super) fn generate(time: f32) -> GeometryBatch {
    let mut batch = GeometryBatch::with_capacity(
        RINGS * POINTS_PER_RING + HORIZON_POINTS + STARS,
        (RINGS / CONNECT_EVERY) * POINTS_PER_RING * 2 + STARS * 2,
    );

    let drift = fract(time * 0.4);
    let mut rings: Vec<Vec<(Vec3, [f32; 4])>> = Vec::with_capacity(RINGS);

    for k in 0..RINGS {
        // 0 at the mouth, approaching 1 deep in the throat.
        let depth = (k as f32 + drift) / RINGS as f32;
        let z = TUNNEL_NEAR - depth * TUNNEL_LENGTH;
        let radius = 1.0 + 3.0 * (1.0 - depth).powi(2);
        let twist = depth * 4.0 + time * 0.5;
        let pulse = 0.5 + 0.5 * (time * 3.0 - k as f32 * 0.5).sin();
        let color = rgba(lerp3(MOUTH, THROAT, depth), (1.0 - depth) * (0.3 + 0.7 * pulse));
        let size = 1.5 + (1.0 - depth) * 2.0;

        let ring: Vec<_> = (0..POINTS_PER_RING)
            .map(|j| {
                let angle = j as f32 / POINTS_PER_RING as f32 * TAU + twist;
                (Vec3::new(angle.cos() * radius, angle.sin() * radius, z), color)
            })
            .collect();
        for &(position, color) in &ring {
            batch.point(position, color, size);
        }
        rings.push(ring);
    }

    for k in (0..RINGS - 1).step_by(CONNECT_EVERY) {
        for (a, b) in rings[k].iter().zip(&rings[k + 1]) {
            let mut color = a.1;
            color[3] *= 0.4;
            batch.line(a.0, b.0, color);
        }
    }

    for i in 0..HORIZON_POINTS {
        let u = i as f32 / HORIZON_POINTS as f32;
        let angle = i as f32 * 0.45 + time * 1.5;
        let r = 0.05 + u * 0.9;
        let position = Vec3::new(angle.cos() * r, angle.sin() * r, HORIZON_DEPTH);
        batch.point(position, rgba(HORIZON, 1.0 - u * 0.7), 2.5);
    }

    for i in 0..STARS {
        let seed = i as u32;
        let angle = hash01(seed) * TAU;
        let start = Vec3::new(
            angle.cos() * STAR_START_RADIUS,
            angle.sin() * STAR_START_RADIUS,
            STAR_START_DEPTH,
        );
        let s = fract(time * 0.25 + hash01(seed + 100));
        let head = start.lerp(Vec3::ZERO, s);
        let tail = start.lerp(Vec3::ZERO, (s - STREAK).max(0.0));
        batch.point(head, rgba(STAR, s), 2.0);
        batch.gradient_line(tail, head, rgba(STAR, 0.0), rgba(STAR, 0.8 * s));
    }

    batch
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_match_layout() {
        let batch = generate(5.0);
        assert_eq!(batch.point_count(), RINGS * POINTS_PER_RING + HORIZON_POINTS + STARS);
        let connected = (0..RINGS - 1).step_by(CONNECT_EVERY).count();
        assert_eq!(
            batch.line_vertex_count(),
            (connected * POINTS_PER_RING + STARS) * 2
        );
    }

    #[test]
    fn rings_fade_with_depth() {
        let batch = generate(0.0);
        let mouth = batch.points[0].color[3];
        let throat = batch.points[(RINGS - 1) * POINTS_PER_RING].color[3];
        // Pulses never drop below 0.3, so depth dominates.
        assert!(throat < mouth);
        assert!(throat <= 1.0 / RINGS as f32 + 1e-4);
    }

    #[test]
    fn stars_move_towards_origin() {
        let early = generate(0.0);
        let later = generate(0.5);
        let first_star = RINGS * POINTS_PER_RING + HORIZON_POINTS;
        let d0 = Vec3::from_array(early.points[first_star].position).length();
        let d1 = Vec3::from_array(later.points[first_star].position).length();
        // Unless it wrapped around in between, the star got closer.
        let wrapped = fract(0.5 * 0.25 + hash01(100)) < fract(hash01(100));
        assert!(wrapped || d1 < d0);
    }
}
