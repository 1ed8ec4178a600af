mod dijkstra;
mod edge;
mod node;
mod parser;

pub use dijkstra::{ShortestPaths, path_cost, shortest_paths};
pub use edge::{Edge, EdgeKey, VisitedEdges};
pub use node::{NodeId, NodeSetBuilder};
pub use parser::{GraphSpec, parse};
