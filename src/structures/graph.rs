//! Graph state: node set plus edge list
//!
//! Adjacency is never stored. [`Graph::neighbors`] derives it from the edge
//! list on every call, treating each undirected edge as usable both ways.
//!
//! # Editing
//!
//! Besides the annotations written by the reducer (highlight, visited,
//! distance, predecessor), the graph supports the structural edits a user
//! performs between runs: adding and removing nodes and edges, toggling the
//! directed and weighted flags, clearing, and loading the sample graph.

use crate::engine::errors::EngineError;
use std::fmt;

/// Stable node identity, allocated in creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node{}", self.0)
    }
}

/// Layout coordinates in an abstract 600x400 canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

pub const CANVAS_WIDTH: i32 = 600;
pub const CANVAS_HEIGHT: i32 = 400;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: NodeId,
    pub label: String,
    pub position: Point,
    pub highlighted: bool,
    pub visited: bool,
    /// Tentative shortest distance; `None` is infinity
    pub distance: Option<i64>,
    pub predecessor: Option<NodeId>,
}

impl GraphNode {
    fn new(id: NodeId, label: &str, position: Point) -> Self {
        GraphNode {
            id,
            label: label.to_string(),
            position,
            highlighted: false,
            visited: false,
            distance: None,
            predecessor: None,
        }
    }

    fn reset_marks(&mut self) {
        self.highlighted = false;
        self.visited = false;
        self.distance = None;
        self.predecessor = None;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: i64,
    pub highlighted: bool,
}

/// (label, x, y) of the sample graph's nodes
const SAMPLE_NODES: [(&str, i32, i32); 6] = [
    ("A", 100, 100),
    ("B", 250, 50),
    ("C", 400, 100),
    ("D", 100, 250),
    ("E", 250, 300),
    ("F", 400, 250),
];

/// (source index, target index, weight) of the sample graph's edges
const SAMPLE_EDGES: [(usize, usize, i64); 7] = [
    (0, 1, 4),
    (0, 3, 2),
    (1, 2, 3),
    (1, 4, 5),
    (2, 5, 1),
    (3, 4, 6),
    (4, 5, 7),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    nodes: Vec<GraphNode>,
    edges: Vec<Edge>,
    directed: bool,
    weighted: bool,
    next_id: u32,
}

impl Graph {
    pub fn new(directed: bool, weighted: bool) -> Self {
        Graph {
            nodes: Vec::new(),
            edges: Vec::new(),
            directed,
            weighted,
            next_id: 1,
        }
    }

    /// Six nodes A..F and seven edges
    pub fn sample(directed: bool, weighted: bool) -> Self {
        let mut graph = Graph::new(directed, weighted);
        let ids: Vec<NodeId> = SAMPLE_NODES
            .iter()
            .map(|&(label, x, y)| graph.push_node(label, Point::new(x, y)))
            .collect();
        for (source, target, weight) in SAMPLE_EDGES {
            graph.edges.push(Edge {
                source: ids[source],
                target: ids[target],
                weight,
                highlighted: false,
            });
        }
        graph
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut GraphNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Label of `id`, falling back to the id itself for unknown nodes
    pub fn label(&self, id: NodeId) -> String {
        self.node(id)
            .map_or_else(|| id.to_string(), |n| n.label.clone())
    }

    /// First node carrying `label`
    pub fn find_by_label(&self, label: &str) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.label == label).map(|n| n.id)
    }

    /// Resolve a user-supplied label or `nodeN` id
    pub fn resolve(&self, name: &str) -> Result<NodeId, EngineError> {
        if let Some(id) = self.find_by_label(name) {
            return Ok(id);
        }
        name.strip_prefix("node")
            .and_then(|n| n.parse::<u32>().ok())
            .map(NodeId)
            .filter(|id| self.node(*id).is_some())
            .ok_or_else(|| EngineError::UnknownNode {
                node: name.to_string(),
            })
    }

    /// Reachable neighbours of `id` with the index of the edge leading there.
    ///
    /// Outgoing edges always count; incoming edges count only when the graph
    /// is undirected. A self-loop is reported once.
    pub fn neighbors(&self, id: NodeId) -> Vec<(NodeId, usize)> {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(index, edge)| {
                if edge.source == id {
                    Some((edge.target, index))
                } else if !self.directed && edge.target == id {
                    Some((edge.source, index))
                } else {
                    None
                }
            })
            .collect()
    }

    fn push_node(&mut self, label: &str, position: Point) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push(GraphNode::new(id, label, position));
        id
    }

    /// Next free slot on a 4-column grid inside the canvas
    fn next_position(&self) -> Point {
        let slot = self.nodes.len() as i32;
        Point::new(
            75 + (slot % 4) * 150,
            (60 + (slot / 4) * 110) % CANVAS_HEIGHT,
        )
    }

    pub fn add_node(&mut self, label: &str) -> Result<NodeId, EngineError> {
        let position = self.next_position();
        self.add_node_at(label, position)
    }

    pub fn add_node_at(&mut self, label: &str, position: Point) -> Result<NodeId, EngineError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(EngineError::EmptyInput {
                field: "Node label",
            });
        }
        Ok(self.push_node(label, position))
    }

    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        weight: i64,
    ) -> Result<usize, EngineError> {
        for id in [source, target] {
            if self.node(id).is_none() {
                return Err(EngineError::UnknownNode {
                    node: id.to_string(),
                });
            }
        }
        if self
            .edges
            .iter()
            .any(|e| e.source == source && e.target == target)
        {
            return Err(EngineError::DuplicateEdge {
                source: self.label(source),
                target: self.label(target),
            });
        }
        self.edges.push(Edge {
            source,
            target,
            weight,
            highlighted: false,
        });
        Ok(self.edges.len() - 1)
    }

    /// Remove a node and every edge touching it
    pub fn remove_node(&mut self, id: NodeId) -> Result<GraphNode, EngineError> {
        let position = self
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| EngineError::UnknownNode {
                node: id.to_string(),
            })?;
        self.edges.retain(|e| e.source != id && e.target != id);
        Ok(self.nodes.remove(position))
    }

    pub fn remove_edge(&mut self, source: NodeId, target: NodeId) -> Result<Edge, EngineError> {
        let position = self
            .edges
            .iter()
            .position(|e| e.source == source && e.target == target)
            .ok_or_else(|| EngineError::MissingEdge {
                source: self.label(source),
                target: self.label(target),
            })?;
        Ok(self.edges.remove(position))
    }

    pub fn set_directed(&mut self, directed: bool) {
        self.directed = directed;
    }

    pub fn set_weighted(&mut self, weighted: bool) {
        self.weighted = weighted;
    }

    /// Drop all nodes and edges, keep the flags, restart ids at 1
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.next_id = 1;
    }

    /// Clear every annotation left by a previous run
    pub fn reset_marks(&mut self) {
        self.nodes.iter_mut().for_each(GraphNode::reset_marks);
        self.clear_edge_highlights();
    }

    pub fn clear_highlights(&mut self) {
        for node in &mut self.nodes {
            node.highlighted = false;
        }
        self.clear_edge_highlights();
    }

    fn clear_edge_highlights(&mut self) {
        for edge in &mut self.edges {
            edge.highlighted = false;
        }
    }

    pub fn set_node_highlight(&mut self, id: NodeId, highlighted: bool) {
        if let Some(node) = self.node_mut(id) {
            node.highlighted = highlighted;
        }
    }

    pub fn set_edge_highlight(&mut self, index: usize, highlighted: bool) {
        if let Some(edge) = self.edges.get_mut(index) {
            edge.highlighted = highlighted;
        }
    }

    /// Highlight and mark visited
    pub fn visit(&mut self, id: NodeId) {
        if let Some(node) = self.node_mut(id) {
            node.highlighted = true;
            node.visited = true;
        }
    }

    pub fn set_distance(&mut self, id: NodeId, distance: i64, predecessor: Option<NodeId>) {
        if let Some(node) = self.node_mut(id) {
            node.distance = Some(distance);
            node.predecessor = predecessor;
        }
    }

    pub fn visited_ids(&self) -> Vec<NodeId> {
        self.nodes.iter().filter(|n| n.visited).map(|n| n.id).collect()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.directed { "->" } else { "--" };
        for node in &self.nodes {
            write!(f, "{}", node.label)?;
            if node.visited {
                write!(f, " (visited)")?;
            }
            if let Some(distance) = node.distance {
                write!(f, " d={}", distance)?;
            }
            writeln!(f)?;
        }
        for edge in &self.edges {
            write!(
                f,
                "{} {} {}",
                self.label(edge.source),
                arrow,
                self.label(edge.target)
            )?;
            if self.weighted {
                write!(f, " ({})", edge.weight)?;
            }
            if edge.highlighted {
                write!(f, " *")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undirected_neighbors_use_both_directions() {
        let graph = Graph::sample(false, true);
        let b = graph.find_by_label("B").unwrap();
        let labels: Vec<String> = graph
            .neighbors(b)
            .into_iter()
            .map(|(id, _)| graph.label(id))
            .collect();
        assert_eq!(labels, vec!["A", "C", "E"]);
    }

    #[test]
    fn test_directed_neighbors_only_outgoing() {
        let graph = Graph::sample(true, true);
        let b = graph.find_by_label("B").unwrap();
        let labels: Vec<String> = graph
            .neighbors(b)
            .into_iter()
            .map(|(id, _)| graph.label(id))
            .collect();
        assert_eq!(labels, vec!["C", "E"]);
    }

    #[test]
    fn test_self_loop_counted_once() {
        let mut graph = Graph::new(false, false);
        let a = graph.add_node("A").unwrap();
        graph.add_edge(a, a, 1).unwrap();
        assert_eq!(graph.neighbors(a), vec![(a, 0)]);
    }

    #[test]
    fn test_add_edge_rejects_duplicates_and_unknown_nodes() {
        let mut graph = Graph::new(true, true);
        let a = graph.add_node("A").unwrap();
        let b = graph.add_node("B").unwrap();
        graph.add_edge(a, b, 3).unwrap();
        assert!(matches!(
            graph.add_edge(a, b, 5),
            Err(EngineError::DuplicateEdge { .. })
        ));
        assert!(graph.add_edge(b, a, 5).is_ok());
        assert!(matches!(
            graph.add_edge(a, NodeId(99), 1),
            Err(EngineError::UnknownNode { .. })
        ));
    }

    #[test]
    fn test_remove_node_drops_incident_edges() {
        let mut graph = Graph::sample(false, true);
        let b = graph.find_by_label("B").unwrap();
        graph.remove_node(b).unwrap();
        assert_eq!(graph.nodes().len(), 5);
        assert!(graph.edges().iter().all(|e| e.source != b && e.target != b));
        assert_eq!(graph.edges().len(), 4);
    }

    #[test]
    fn test_empty_label_rejected() {
        let mut graph = Graph::new(false, false);
        assert!(matches!(
            graph.add_node("   "),
            Err(EngineError::EmptyInput { .. })
        ));
    }

    #[test]
    fn test_resolve_label_or_id() {
        let graph = Graph::sample(false, true);
        assert_eq!(graph.resolve("C").unwrap(), NodeId(3));
        assert_eq!(graph.resolve("node6").unwrap(), NodeId(6));
        assert!(graph.resolve("Z").is_err());
        assert!(graph.resolve("node42").is_err());
    }
}
