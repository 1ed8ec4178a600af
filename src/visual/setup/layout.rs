use std::collections::HashMap;
use std::f32::consts::PI;

use bevy::prelude::*;

use crate::graph::NodeId;

/// Smallest sphere the nodes are spread over
const MIN_LAYOUT_RADIUS: f32 = 10.0;

/// Sphere radius grows with the node count
const RADIUS_PER_NODE: f32 = 1.3;

/// Flattens the sphere vertically so labels overlap less
const VERTICAL_SQUASH: f32 = 0.7;

/// World position of every node in the current scene
#[derive(Resource, Debug, Clone, Default)]
pub struct NodeLayout {
    positions: HashMap<NodeId, Vec3>,
    radius: f32,
}

impl NodeLayout {
    /// Spread `nodes` evenly over a (squashed) Fibonacci sphere, in input order
    pub fn fibonacci_sphere(nodes: &[NodeId]) -> Self {
        let count = nodes.len();
        let radius = layout_radius(count);

        let positions = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.clone(), fibonacci_point(i, count, radius)))
            .collect();

        NodeLayout { positions, radius }
    }

    pub fn position(&self, node: &NodeId) -> Option<Vec3> {
        self.positions.get(node).copied()
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }
}

pub fn layout_radius(node_count: usize) -> f32 {
    (node_count as f32 * RADIUS_PER_NODE).max(MIN_LAYOUT_RADIUS)
}

/// Point `index` of `count` on a sphere of `radius`
///
/// Walks from the top (y = +1) to the bottom (y = -1), turning by the golden
/// angle each step.
pub fn fibonacci_point(index: usize, count: usize, radius: f32) -> Vec3 {
    let golden_angle = PI * (3.0 - 5.0_f32.sqrt());

    let y = if count > 1 {
        1.0 - (index as f32 / (count - 1) as f32) * 2.0
    } else {
        0.0
    };
    let ring = (1.0 - y * y).max(0.0).sqrt();
    let theta = golden_angle * index as f32;

    Vec3::new(
        theta.cos() * ring * radius,
        y * radius * VERTICAL_SQUASH,
        theta.sin() * ring * radius,
    )
}
