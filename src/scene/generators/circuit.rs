//! Circuit board: sparse trace grid, counter-rotating gears and data packets.

use std::f32::consts::TAU;

use glam::Vec3;

use super::fract;
use crate::math::hash01;
use crate::scene::batch::{GeometryBatch, rgba};

const GRID: usize = 16;
const SPACING: f32 = 0.5;
/// Two kept cells are joined by a trace when closer than this.
const TRACE_TOLERANCE: f32 = SPACING * 1.5;
const GEAR_RINGS: usize = 3;
const PACKETS: usize = 20;

const PAD: [f32; 3] = [0.20, 1.00, 0.60];
const TRACE: [f32; 3] = [0.10, 0.80, 0.50];
const GEAR: [f32; 3] = [1.00, 0.70, 0.20];
const PACKET: [f32; 3] = [0.60, 1.00, 1.00];

pub(super) fn generate(time: f32) -> GeometryBatch {
    let mut batch = GeometryBatch::new();

    let half = (GRID - 1) as f32 * 0.5;
    let mut pads: Vec<Vec3> = Vec::with_capacity(GRID * GRID / 3 + 1);
    for i in 0..GRID {
        for j in 0..GRID {
            if (i + j) % 3 != 0 {
                continue;
            }
            let position = Vec3::new((i as f32 - half) * SPACING, (j as f32 - half) * SPACING, 0.0);
            let flicker = (time * 1.5 + (i * GRID + j) as f32 * 0.5).sin();
            batch.point(position, rgba(PAD, 0.5 + 0.3 * flicker), 2.0);
            pads.push(position);
        }
    }

    let traces = trace_list(&pads);
    for &(a, b) in &traces {
        batch.line(a, b, rgba(TRACE, 0.3));
    }

    for ring in 0..GEAR_RINGS {
        let radius = 1.2 + ring as f32;
        let teeth = 24 + ring * 12;
        let direction = if ring % 2 == 0 { 1.0 } else { -1.0 };
        let speed = 0.45 / (ring + 1) as f32;

        let mut first = None;
        let mut previous = None;
        for k in 0..teeth {
            let angle = direction * time * speed + k as f32 / teeth as f32 * TAU;
            // Alternate tooth tips and roots.
            let r = if k % 2 == 0 { radius * 1.06 } else { radius };
            let position = Vec3::new(angle.cos() * r, angle.sin() * r, 0.4);
            batch.point(position, rgba(GEAR, 0.8), 2.5);

            if let Some(prev) = previous {
                batch.line(prev, position, rgba(GEAR, 0.4));
            }
            first.get_or_insert(position);
            previous = Some(position);
        }
        if let (Some(a), Some(b)) = (previous, first) {
            batch.line(a, b, rgba(GEAR, 0.4));
        }
    }

    if !traces.is_empty() {
        for p in 0..PACKETS {
            let walk = time * 0.8 + hash01(p as u32) * traces.len() as f32;
            let index = (walk.floor().rem_euclid(traces.len() as f32)) as usize % traces.len();
            let (a, b) = traces[index];
            let position = a.lerp(b, fract(walk)) + Vec3::Z * 0.05;
            batch.point(position, rgba(PACKET, 0.9), 4.0);
        }
    }

    batch
}

/// Pairs of pads that sit within [`TRACE_TOLERANCE`] of each other.
fn trace_list(pads: &[Vec3]) -> Vec<(Vec3, Vec3)> {
    let mut traces = Vec::new();
    for (i, a) in pads.iter().enumerate() {
        for b in &pads[i + 1..] {
            if a.distance(*b) < TRACE_TOLERANCE {
                traces.push((*a, *b));
            }
        }
    }
    traces
}
