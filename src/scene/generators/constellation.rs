//! Constellation: nine haloed stars, nearby-pair edges, inward beams and a spiral.

use std::f32::consts::TAU;

use glam::{Mat3, Vec3};

use super::{fibonacci_sphere, fract};
use crate::scene::batch::{GeometryBatch, rgba};

const NODES: usize = 9;
const RADIUS: f32 = 3.0;
/// Squared distance under which two stars are joined.
const EDGE_THRESHOLD_SQ: f32 = 14.0;
const BEAM_SAMPLES: usize = 10;
/// Beams stop this fraction of the way to the origin.
const BEAM_REACH: f32 = 0.85;
const SPIRAL_POINTS: usize = 120;

const STAR: [f32; 3] = [0.85, 0.90, 1.00];
const HALO: [f32; 3] = [0.40, 0.60, 1.00];
const EDGE: [f32; 3] = [0.60, 0.70, 1.00];
const BEAM: [f32; 3] = [0.50, 0.80, 1.00];
const SPIRAL: [f32; 3] = [0.70, 0.50, 1.00];

pub(super) fn generate(time: f32) -> GeometryBatch {
    let mut batch = GeometryBatch::with_capacity(NODES * 2 + SPIRAL_POINTS, 64 + NODES * BEAM_SAMPLES * 2);

    let turn = Mat3::from_rotation_y(time * 0.1);
    let stars: Vec<Vec3> = (0..NODES)
        .map(|i| turn * fibonacci_sphere(i, NODES, RADIUS))
        .collect();

    for (i, &star) in stars.iter().enumerate() {
        let pulse = 0.5 + 0.5 * (time * 1.5 + i as f32 * 1.1).sin();
        batch.point(star, rgba(STAR, 0.9), 3.0 + 1.5 * pulse);
        batch.point(star, rgba(HALO, 0.15 + 0.15 * pulse), 9.0 + 4.0 * pulse);
    }

    for (i, a) in stars.iter().enumerate() {
        for b in &stars[i + 1..] {
            if a.distance_squared(*b) < EDGE_THRESHOLD_SQ {
                batch.line(*a, *b, rgba(EDGE, 0.3));
            }
        }
    }

    for (i, &star) in stars.iter().enumerate() {
        // Bright head travelling from the star towards the centre.
        let head = fract(time * 0.6 + i as f32 * 0.13);
        let glow = |f: f32| 0.5 * (1.0 - (head - f).abs() * 4.0).max(0.0);
        for s in 0..BEAM_SAMPLES {
            let f0 = s as f32 / BEAM_SAMPLES as f32;
            let f1 = (s + 1) as f32 / BEAM_SAMPLES as f32;
            let p0 = star.lerp(Vec3::ZERO, f0 * BEAM_REACH);
            let p1 = star.lerp(Vec3::ZERO, f1 * BEAM_REACH);
            batch.gradient_line(p0, p1, rgba(BEAM, glow(f0)), rgba(BEAM, glow(f1)));
        }
    }

    for i in 0..SPIRAL_POINTS {
        let u = i as f32 / SPIRAL_POINTS as f32;
        let angle = u * TAU * 3.0 + time * 0.2;
        let radius = 4.2 + u * 0.8;
        let position = Vec3::new(angle.cos() * radius, (u - 0.5) * 0.6, angle.sin() * radius);
        batch.point(position, rgba(SPIRAL, 0.25), 1.3);
    }

    batch
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge_count(batch: &GeometryBatch) -> usize {
        batch.line_vertex_count() / 2 - NODES * BEAM_SAMPLES
    }

    #[test]
    fn each_star_is_drawn_twice() {
        let batch = generate(0.0);
        assert_eq!(batch.point_count(), NODES * 2 + SPIRAL_POINTS);
        for pair in batch.points[..NODES * 2].chunks(2) {
            assert_eq!(pair[0].position, pair[1].position);
            assert!(pair[1].size > pair[0].size);
        }
    }

    #[test]
    fn edges_respect_threshold_and_survive_rotation() {
        let still = generate(0.0);
        let turned = generate(17.0);
        assert!(edge_count(&still) > 0);
        assert!(edge_count(&still) < NODES * (NODES - 1) / 2);
        assert_eq!(edge_count(&still), edge_count(&turned));
    }

    #[test]
    fn beams_end_short_of_origin() {
        let batch = generate(3.0);
        let beams = &batch.lines[batch.lines.len() - NODES * BEAM_SAMPLES * 2..];
        for end in beams.iter().skip(1).step_by(2) {
            assert!(Vec3::from_array(end.position).length() >= RADIUS * (1.0 - BEAM_REACH) - 1e-4);
        }
    }
}
