//! Line-oriented graph input.
//!
//! ```text
//! 5 6                 optional "node_count edge_count" header, never validated
//! Mansion TrustRam 1  one "from to cost" line per directed edge
//! ...
//! Mansion Final       "start goal" trailer
//! ```
//!
//! Parsing is best-effort: malformed lines are skipped and the caller decides
//! whether a graph without start/goal is usable.

use super::edge::Edge;
use super::node::{NodeId, NodeSetBuilder};

/// A parsed graph description
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphSpec {
    /// Every node mentioned, in order of first appearance
    pub nodes: Vec<NodeId>,
    pub edges: Vec<Edge>,
    pub start: Option<NodeId>,
    pub goal: Option<NodeId>,
}

impl GraphSpec {
    /// Both endpoints of the query are known
    pub fn is_runnable(&self) -> bool {
        self.start.is_some() && self.goal.is_some()
    }
}

/// Parse graph text; never fails, degrades to partial results instead
pub fn parse(text: &str) -> GraphSpec {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let Some(last_line) = lines.last() else {
        return GraphSpec::default();
    };

    let first_edge_line = if is_header(lines[0]) { 1 } else { 0 };

    // Lines between the header and the last line; empty when the header is the only line
    let body = lines.get(first_edge_line..lines.len() - 1).unwrap_or(&[]);
    let trailer: Vec<&str> = last_line.split_whitespace().collect();
    let has_trailer = trailer.len() == 2 && body.iter().all(|line| is_strict_edge_line(line));

    let edge_lines = if has_trailer {
        body
    } else {
        lines.get(first_edge_line..).unwrap_or(&[])
    };

    let mut nodes = NodeSetBuilder::new();
    let mut edges = Vec::new();

    for (offset, line) in edge_lines.iter().enumerate() {
        match parse_edge_line(line) {
            Some(edge) => {
                nodes.add(&edge.from);
                nodes.add(&edge.to);
                edges.push(edge);
            }
            None => {
                log::debug!(
                    "Skipping malformed edge line {}: {:?}",
                    first_edge_line + offset + 1,
                    line
                );
            }
        }
    }

    let (start, goal) = if has_trailer {
        let start = NodeId::from(trailer[0]);
        let goal = NodeId::from(trailer[1]);
        nodes.add(&start);
        nodes.add(&goal);
        (Some(start), Some(goal))
    } else {
        (None, None)
    };

    GraphSpec {
        nodes: nodes.build(),
        edges,
        start,
        goal,
    }
}

/// Two or more tokens, all non-negative integers
fn is_header(line: &str) -> bool {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    tokens.len() >= 2 && tokens.iter().all(|token| is_unsigned_integer(token))
}

/// Exactly three tokens with an integer cost; used only for trailer detection
fn is_strict_edge_line(line: &str) -> bool {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    tokens.len() == 3 && is_unsigned_integer(tokens[2])
}

fn is_unsigned_integer(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Parse `from to cost`; None for anything that is not a usable edge
fn parse_edge_line(line: &str) -> Option<Edge> {
    let mut tokens = line.split_whitespace();
    let (from, to, cost) = (tokens.next()?, tokens.next()?, tokens.next()?);
    if tokens.next().is_some() {
        return None;
    }

    let cost: f64 = cost.parse().ok()?;
    if !cost.is_finite() || cost < 0.0 {
        return None;
    }

    Some(Edge::new(from, to, cost))
}
