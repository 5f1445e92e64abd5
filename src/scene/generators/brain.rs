//! Neural network: pulsing neurons on a sphere, wired to their nearest neighbours.

use glam::Vec3;

use super::{fibonacci_sphere, fract};
use crate::math::{hash01, lerp3};
use crate::scene::batch::{GeometryBatch, rgba};

const NODES: usize = 100;
const NEIGHBOURS: usize = 2;
const SIGNALS: usize = 24;
const RADIUS: f32 = 3.0;

const NEURON_COOL: [f32; 3] = [0.30, 0.60, 1.00];
const NEURON_WARM: [f32; 3] = [0.70, 0.40, 1.00];
const SYNAPSE: [f32; 3] = [0.45, 0.55, 1.00];
const SIGNAL: [f32; 3] = [0.90, 0.95, 1.00];

pub(super) fn generate(time: f32) -> GeometryBatch {
    let mut batch = GeometryBatch::with_capacity(NODES + SIGNALS, NODES * NEIGHBOURS * 2);

    let nodes: Vec<Vec3> = (0..NODES)
        .map(|i| {
            let breathe = 1.0 + 0.04 * (time * 1.2 + i as f32 * 0.5).sin();
            fibonacci_sphere(i, NODES, RADIUS) * breathe
        })
        .collect();

    for (i, &node) in nodes.iter().enumerate() {
        let pulse = 0.5 + 0.5 * (time * 2.0 + i as f32 * 0.7).sin();
        let tint = lerp3(NEURON_COOL, NEURON_WARM, hash01(i as u32));
        batch.point(node, rgba(tint, 0.4 + 0.6 * pulse), 2.0 + 2.5 * pulse);
    }

    let edges = nearest_edges(&nodes);
    for &(a, b) in &edges {
        batch.line(nodes[a], nodes[b], rgba(SYNAPSE, 0.25));
    }

    for k in 0..SIGNALS {
        let seed = k as u32;
        let hop = (time.max(0.0) * 0.7 + hash01(seed) * 5.0)
            .floor()
            .rem_euclid(edges.len() as f32) as usize;
        let (a, b) = edges[(k * 13 + hop) % edges.len()];
        let s = fract(time * 1.3 + hash01(seed + 500));
        let position = nodes[a].lerp(nodes[b], s);
        let alpha = (s * std::f32::consts::PI).sin();
        batch.point(position, rgba(SIGNAL, alpha), 3.5);
    }

    batch
}

/// Connect every node to its [`NEIGHBOURS`] closest other nodes.
///
/// A full pairwise sort per node; cheap enough at this node count.
fn nearest_edges(nodes: &[Vec3]) -> Vec<(usize, usize)> {
    let mut edges = Vec::with_capacity(nodes.len() * NEIGHBOURS);
    let mut distances: Vec<(usize, f32)> = Vec::with_capacity(nodes.len());

    for (i, node) in nodes.iter().enumerate() {
        distances.clear();
        distances.extend(
            nodes
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(j, other)| (j, node.distance(*other))),
        );
        distances.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        edges.extend(distances.iter().take(NEIGHBOURS).map(|&(j, _)| (i, j)));
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_node_gets_two_edges() {
        let batch = generate(1.5);
        assert_eq!(batch.point_count(), NODES + SIGNALS);
        assert_eq!(batch.line_vertex_count(), NODES * NEIGHBOURS * 2);
    }

    #[test]
    fn nearest_edges_pick_closest_nodes() {
        let nodes = [
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
        ];
        let edges = nearest_edges(&nodes);
        assert_eq!(&edges[0..2], &[(0, 1), (0, 2)]);
        assert_eq!(&edges[6..8], &[(3, 1), (3, 0)]);
        assert!(edges.iter().all(|(a, b)| a != b));
    }
}
