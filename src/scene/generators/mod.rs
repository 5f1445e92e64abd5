//! Procedural geometry for each scene.
//!
//! Every generator is a pure function of elapsed time: calling
//! [`generate`] twice with the same arguments yields identical batches.

mod brain;
mod circuit;
mod constellation;
mod dna;
mod orbit;
mod wormhole;

use glam::Vec3;

use super::batch::GeometryBatch;
use super::scene::Scene;

/// Build the geometry for `scene` at `time` seconds.
pub fn generate(scene: Scene, time: f32) -> GeometryBatch {
    match scene {
        Scene::Dna => dna::generate(time),
        Scene::Brain => brain::generate(time),
        Scene::Circuit => circuit::generate(time),
        Scene::Orbit => orbit::generate(time),
        Scene::Constellation => constellation::generate(time),
        Scene::Wormhole => wormhole::generate(time),
    }
}

/// Golden-angle spiral point `i` of `n` on a sphere of the given radius.
pub(crate) fn fibonacci_sphere(i: usize, n: usize, radius: f32) -> Vec3 {
    let golden_angle = std::f32::consts::PI * (3.0 - 5f32.sqrt());
    let y = if n > 1 {
        1.0 - (i as f32 / (n - 1) as f32) * 2.0
    } else {
        0.0
    };
    let ring = (1.0 - y * y).max(0.0).sqrt();
    let theta = golden_angle * i as f32;
    Vec3::new(theta.cos() * ring, y, theta.sin() * ring) * radius
}

/// Fractional part, always in `[0, 1)` (also for negative input).
pub(crate) fn fract(x: f32) -> f32 {
    x - x.floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMES: [f32; 7] = [0.0, 0.016, 1.0, 7.25, 123.456, 3600.0, 1e20];

    #[test]
    fn every_scene_produces_points() {
        for scene in Scene::ALL {
            for t in TIMES {
                let batch = generate(scene, t);
                assert!(batch.point_count() > 0, "{scene:?} at {t} is empty");
                assert_eq!(batch.positions().len(), batch.point_count() * 3);
                assert_eq!(batch.colors().len(), batch.point_count() * 4);
                assert_eq!(batch.sizes().len(), batch.point_count());
                assert_eq!(batch.line_vertex_count() % 2, 0);
            }
        }
    }

    #[test]
    fn generation_is_deterministic() {
        for scene in Scene::ALL {
            for t in TIMES {
                assert_eq!(generate(scene, t), generate(scene, t), "{scene:?} at {t}");
            }
        }
    }

    #[test]
    fn geometry_animates_over_time() {
        for scene in Scene::ALL {
            assert_ne!(generate(scene, 0.0), generate(scene, 0.5), "{scene:?} is static");
        }
    }

    #[test]
    fn output_is_finite_with_valid_colors() {
        for scene in Scene::ALL {
            for t in TIMES {
                let batch = generate(scene, t);
                for p in &batch.points {
                    assert!(p.position.iter().all(|v| v.is_finite()), "{scene:?}");
                    assert!(p.size.is_finite() && p.size > 0.0, "{scene:?}");
                    assert!(p.color.iter().all(|c| (0.0..=1.0).contains(c)), "{scene:?}");
                }
                for l in &batch.lines {
                    assert!(l.position.iter().all(|v| v.is_finite()), "{scene:?}");
                    assert!(l.color.iter().all(|c| (0.0..=1.0).contains(c)), "{scene:?}");
                }
            }
        }
    }

    #[test]
    fn extreme_time_does_not_panic() {
        for scene in Scene::ALL {
            for t in [1e30, f32::MAX, f32::INFINITY, f32::NAN] {
                assert!(generate(scene, t).point_count() > 0, "{scene:?} at {t}");
            }
        }
    }

    #[test]
    fn negative_time_is_tolerated() {
        for scene in Scene::ALL {
            assert!(generate(scene, -5.0).point_count() > 0);
        }
    }

    #[test]
    fn fibonacci_sphere_points_lie_on_sphere() {
        for i in 0..50 {
            let p = fibonacci_sphere(i, 50, 2.0);
            assert!((p.length() - 2.0).abs() < 1e-4);
        }
        assert!((fibonacci_sphere(0, 50, 1.0).y - 1.0).abs() < 1e-6);
        assert!((fibonacci_sphere(49, 50, 1.0).y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn fract_wraps_negative_values() {
        assert!((fract(1.25) - 0.25).abs() < 1e-6);
        assert!((fract(-0.25) - 0.75).abs() < 1e-6);
    }
}
