pub mod animations;
pub mod components;

use crate::graph::NodeId;
use bevy::prelude::*;

pub use animations::{trigger_arrival_glow, update_node_visuals};
pub use components::NodeVisual;

#[derive(Component)]
pub struct GraphNode {
    pub node_id: NodeId,
}

/// What a node means for the current query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Start,
    Goal,
    Waypoint,
}

impl NodeRole {
    pub fn of(node: &NodeId, start: &NodeId, goal: &NodeId) -> Self {
        if node == start {
            NodeRole::Start
        } else if node == goal {
            NodeRole::Goal
        } else {
            NodeRole::Waypoint
        }
    }
}

pub fn role_color(role: NodeRole) -> Color {
    match role {
        NodeRole::Start => Color::srgb(0.204, 0.827, 0.6), // Emerald
        NodeRole::Goal => Color::srgb(0.984, 0.749, 0.141), // Amber
        NodeRole::Waypoint => Color::srgb(0.58, 0.639, 0.722), // Slate
    }
}
