use super::edge::Edge;
use super::node::NodeId;

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// Heap entry; ordered so that `BinaryHeap` pops the smallest distance first
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    distance: f64,
    node: usize,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of a single-source shortest-path run
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    start: NodeId,
    /// Node ids by dense index, in order of registration
    nodes: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    distances: Vec<f64>,
    predecessors: Vec<Option<usize>>,
}

/// Compute minimum-cost distances from `start`, stopping early once `goal` is settled
///
/// Costs must be non-negative. Nodes that cannot be reached keep an infinite
/// distance and no predecessor.
pub fn shortest_paths(edges: &[Edge], start: &NodeId, goal: &NodeId) -> ShortestPaths {
    let mut nodes: Vec<NodeId> = Vec::new();
    let mut index: HashMap<NodeId, usize> = HashMap::new();
    let mut adjacency: Vec<Vec<(usize, f64)>> = Vec::new();

    for edge in edges {
        let from = register(&edge.from, &mut index, &mut nodes, &mut adjacency);
        // Sinks get an empty neighbor list so they can still be targets
        let to = register(&edge.to, &mut index, &mut nodes, &mut adjacency);
        adjacency[from].push((to, edge.cost));
    }
    let start_idx = register(start, &mut index, &mut nodes, &mut adjacency);
    let goal_idx = index.get(goal).copied();

    let mut distances = vec![f64::INFINITY; nodes.len()];
    let mut predecessors: Vec<Option<usize>> = vec![None; nodes.len()];
    let mut visited = vec![false; nodes.len()];

    distances[start_idx] = 0.0;
    let mut queue = BinaryHeap::new();
    queue.push(QueueEntry {
        distance: 0.0,
        node: start_idx,
    });

    while let Some(QueueEntry { node: current, .. }) = queue.pop() {
        if visited[current] {
            continue;
        }
        visited[current] = true;

        let current_distance = distances[current];
        if current_distance.is_infinite() {
            break;
        }
        if Some(current) == goal_idx {
            break;
        }

        for &(next, cost) in &adjacency[current] {
            let alt = current_distance + cost;
            if alt < distances[next] {
                distances[next] = alt;
                predecessors[next] = Some(current);
                queue.push(QueueEntry {
                    distance: alt,
                    node: next,
                });
            }
        }
    }

    ShortestPaths {
        start: start.clone(),
        nodes,
        index,
        distances,
        predecessors,
    }
}

/// Dense index for `node`, allocating one on first sight
fn register(
    node: &NodeId,
    index: &mut HashMap<NodeId, usize>,
    nodes: &mut Vec<NodeId>,
    adjacency: &mut Vec<Vec<(usize, f64)>>,
) -> usize {
    if let Some(&idx) = index.get(node) {
        return idx;
    }
    nodes.push(node.clone());
    adjacency.push(Vec::new());
    index.insert(node.clone(), nodes.len() - 1);
    nodes.len() - 1
}

impl ShortestPaths {
    pub fn start(&self) -> &NodeId {
        &self.start
    }

    /// Minimum known cost from start; infinite if unreached or unknown
    pub fn distance(&self, node: &NodeId) -> f64 {
        self.index
            .get(node)
            .map_or(f64::INFINITY, |&idx| self.distances[idx])
    }

    pub fn is_reachable(&self, node: &NodeId) -> bool {
        self.distance(node).is_finite()
    }

    /// The node `node` was reached from on its current shortest path
    pub fn predecessor(&self, node: &NodeId) -> Option<&NodeId> {
        let idx = *self.index.get(node)?;
        self.predecessors[idx].map(|prev| &self.nodes[prev])
    }

    /// All known nodes with their distances, in registration order
    pub fn distances(&self) -> impl Iterator<Item = (&NodeId, f64)> {
        self.nodes.iter().zip(self.distances.iter().copied())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Walk predecessors back from `target`; None if unreachable
    pub fn reconstruct(&self, target: &NodeId) -> Option<Vec<NodeId>> {
        let mut current = *self.index.get(target)?;
        if self.distances[current].is_infinite() {
            return None;
        }

        let mut path = vec![self.nodes[current].clone()];
        while let Some(prev) = self.predecessors[current] {
            path.push(self.nodes[prev].clone());
            current = prev;
        }
        path.reverse();
        Some(path)
    }
}

/// Sum of edge costs along `path`, taking the cheapest edge between each pair
///
/// Returns None if some consecutive pair has no connecting edge.
pub fn path_cost(path: &[NodeId], edges: &[Edge]) -> Option<f64> {
    path.windows(2).try_fold(0.0, |total, pair| {
        edges
            .iter()
            .filter(|edge| edge.connects(&pair[0], &pair[1]))
            .map(|edge| edge.cost)
            .min_by(f64::total_cmp)
            .map(|cost| total + cost)
    })
}
