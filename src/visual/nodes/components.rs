use bevy::prelude::*;

/// Visual animation state for a node
#[derive(Component, Debug)]
pub struct NodeVisual {
    /// Color the node is drawn with; also tints the glow
    pub base_color: Color,
    /// Glow intensity (0.0 = none), set on arrival and decaying
    pub glow: f32,
}

impl NodeVisual {
    pub fn new(base_color: Color) -> Self {
        NodeVisual {
            base_color,
            glow: 0.0,
        }
    }
}
