//! Skill orbit: an energy core circled by six tilted, trailing cards.

use std::f32::consts::TAU;

use glam::{Mat3, Vec3};

use super::fibonacci_sphere;
use crate::scene::batch::{GeometryBatch, rgba};

const CORE_POINTS: usize = 150;
const CORE_RADIUS: f32 = 0.8;
const TRAIL_POINTS: usize = 8;
const RING_POINTS: usize = 90;
const RING_RADIUS: f32 = 5.0;
const CARD_HALF_WIDTH: f32 = 0.35;
const CARD_HALF_HEIGHT: f32 = 0.22;

const CORE: [f32; 3] = [1.00, 0.50, 0.20];
const RING: [f32; 3] = [0.60, 0.60, 0.80];

/// One orbiting card per skill, each in its brand color.
const CARDS: [[f32; 3]; 6] = [
    [0.97, 0.45, 0.10],
    [0.20, 0.60, 1.00],
    [0.95, 0.80, 0.20],
    [0.30, 0.90, 0.50],
    [0.80, 0.30, 0.90],
    [1.00, 0.30, 0.35],
];

struct Card {
    radius: f32,
    speed: f32,
    tilt: f32,
    phase: f32,
}

impl Card {
    fn nth(k: usize) -> Self {
        Self {
            radius: 2.2 + k as f32 * 0.35,
            speed: 0.35 + k as f32 * 0.07,
            tilt: (k as f32 - 2.5) * 0.18,
            phase: k as f32 * TAU / CARDS.len() as f32,
        }
    }

    /// Point on this card's tilted orbit at the given angle.
    fn orbit_point(&self, angle: f32) -> Vec3 {
        let flat = Vec3::new(angle.cos() * self.radius, 0.0, angle.sin() * self.radius);
        Mat3::from_rotation_x(self.tilt) * flat
    }
}

pub(super) fn generate(time: f32) -> GeometryBatch {
    let mut batch = GeometryBatch::with_capacity(
        CORE_POINTS + CARDS.len() * (5 + TRAIL_POINTS) + RING_POINTS,
        CARDS.len() * 10,
    );

    for i in 0..CORE_POINTS {
        let swell = 1.0 + 0.05 * (time * 3.0 + i as f32 * 0.2).sin();
        let flare = 0.5 + 0.5 * (time * 4.0 + i as f32 * 0.9).sin();
        let position = fibonacci_sphere(i, CORE_POINTS, CORE_RADIUS * swell);
        batch.point(position, rgba(CORE, 0.4 + 0.3 * flare), 1.5 + flare);
    }

    for (k, color) in CARDS.iter().enumerate() {
        let card = Card::nth(k);
        let angle = card.phase + time * card.speed;
        let center = card.orbit_point(angle);

        let spin = Mat3::from_rotation_y(time * 0.6 + k as f32);
        let corners = [
            (-CARD_HALF_WIDTH, -CARD_HALF_HEIGHT),
            (CARD_HALF_WIDTH, -CARD_HALF_HEIGHT),
            (CARD_HALF_WIDTH, CARD_HALF_HEIGHT),
            (-CARD_HALF_WIDTH, CARD_HALF_HEIGHT),
        ]
        .map(|(x, y)| center + spin * Vec3::new(x, y, 0.0));

        for corner in corners {
            batch.point(corner, rgba(*color, 0.9), 2.5);
        }
        for (c, corner) in corners.iter().enumerate() {
            batch.line(*corner, corners[(c + 1) % corners.len()], rgba(*color, 0.7));
        }
        batch.gradient_line(center, Vec3::ZERO, rgba(*color, 0.3), rgba(CORE, 0.05));
        batch.point(center, rgba(*color, 1.0), 4.5);

        for t in 1..=TRAIL_POINTS {
            let fade = 1.0 - t as f32 / TRAIL_POINTS as f32;
            let trail = card.orbit_point(angle - t as f32 * 0.06);
            batch.point(trail, rgba(*color, 0.6 * fade), 0.5 + 2.0 * fade);
        }
    }

    for i in 0..RING_POINTS {
        let angle = i as f32 / RING_POINTS as f32 * TAU + time * 0.05;
        let y = 0.15 * (i as f32 * 0.5 + time).sin();
        let position = Vec3::new(angle.cos() * RING_RADIUS, y, angle.sin() * RING_RADIUS);
        batch.point(position, rgba(RING, 0.15), 1.2);
    }

    batch
}
