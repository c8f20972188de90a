//! Graph steppers: depth-first search, breadth-first search, Dijkstra
//!
//! Neighbours are taken in edge-list order, so the step sequence is fully
//! determined by the graph value.

use crate::engine::errors::EngineError;
use crate::step::{Outcome, Step, Target};
use crate::structures::graph::{Graph, NodeId};
use crate::structures::StructureKind;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

fn check_start(graph: &Graph, start: NodeId, operation: &'static str) -> Result<(), EngineError> {
    if graph.is_empty() {
        return Err(EngineError::EmptyStructure {
            operation,
            structure: StructureKind::Graph,
        });
    }
    if graph.node(start).is_none() {
        return Err(EngineError::UnknownNode {
            node: start.to_string(),
        });
    }
    Ok(())
}

pub fn dfs(graph: &Graph, start: NodeId) -> Result<Vec<Step>, EngineError> {
    check_start(graph, start, "run DFS on")?;
    let mut steps = vec![Step::Reset];
    let mut visited = FxHashSet::default();
    dfs_visit(graph, start, &mut visited, &mut steps);
    Ok(steps)
}

fn dfs_visit(graph: &Graph, node: NodeId, visited: &mut FxHashSet<NodeId>, steps: &mut Vec<Step>) {
    visited.insert(node);
    steps.push(Step::Visit(Target::GraphNode(node)));
    for (next, edge) in graph.neighbors(node) {
        if !visited.contains(&next) {
            steps.push(Step::Highlight(Target::Edge(edge)));
            dfs_visit(graph, next, visited, steps);
        }
    }
    steps.push(Step::Unhighlight(Target::GraphNode(node)));
}

/// Nodes are marked visited when enqueued, not when dequeued
pub fn bfs(graph: &Graph, start: NodeId) -> Result<Vec<Step>, EngineError> {
    check_start(graph, start, "run BFS on")?;
    let mut steps = vec![Step::Reset, Step::Visit(Target::GraphNode(start))];
    let mut visited = FxHashSet::default();
    visited.insert(start);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        for (next, edge) in graph.neighbors(current) {
            if visited.insert(next) {
                steps.push(Step::Highlight(Target::Edge(edge)));
                steps.push(Step::Visit(Target::GraphNode(next)));
                queue.push_back(next);
            }
        }
        steps.push(Step::Unhighlight(Target::GraphNode(current)));
    }
    Ok(steps)
}

/// Shortest path from `start` to `end` over non-negative weights.
///
/// Ties between equally distant candidates go to the lowest node id.
pub fn dijkstra(graph: &Graph, start: NodeId, end: NodeId) -> Result<Vec<Step>, EngineError> {
    if !graph.is_weighted() {
        return Err(EngineError::UnweightedGraph);
    }
    check_start(graph, start, "run Dijkstra on")?;
    if graph.node(end).is_none() {
        return Err(EngineError::UnknownNode {
            node: end.to_string(),
        });
    }
    if let Some(edge) = graph.edges().iter().find(|e| e.weight < 0) {
        return Err(EngineError::NegativeWeight {
            source: graph.label(edge.source),
            target: graph.label(edge.target),
            weight: edge.weight,
        });
    }

    let mut steps = vec![
        Step::Reset,
        Step::DistanceUpdate {
            node: start,
            distance: 0,
            predecessor: None,
        },
    ];
    let mut distance: FxHashMap<NodeId, i64> = FxHashMap::default();
    let mut via: FxHashMap<NodeId, (NodeId, usize)> = FxHashMap::default();
    let mut settled: FxHashSet<NodeId> = FxHashSet::default();
    distance.insert(start, 0);

    loop {
        let next = graph
            .nodes()
            .iter()
            .filter(|n| !settled.contains(&n.id))
            .filter_map(|n| distance.get(&n.id).map(|&d| (d, n.id)))
            .min();
        let Some((current_distance, current)) = next else {
            break;
        };
        settled.insert(current);
        steps.push(Step::ClearHighlights);
        steps.push(Step::Visit(Target::GraphNode(current)));
        if current == end {
            break;
        }

        for (neighbor, edge) in graph.neighbors(current) {
            if settled.contains(&neighbor) {
                continue;
            }
            steps.push(Step::Highlight(Target::Edge(edge)));
            let candidate = current_distance.saturating_add(graph.edges()[edge].weight);
            if distance.get(&neighbor).map_or(true, |&d| candidate < d) {
                distance.insert(neighbor, candidate);
                via.insert(neighbor, (current, edge));
                steps.push(Step::DistanceUpdate {
                    node: neighbor,
                    distance: candidate,
                    predecessor: Some(current),
                });
            }
        }
    }

    steps.push(Step::ClearHighlights);
    let Some(&total) = distance.get(&end) else {
        steps.push(Step::Report(Outcome::NoPath));
        return Ok(steps);
    };

    let mut path = vec![end];
    let mut path_edges = Vec::new();
    let mut cursor = end;
    while let Some(&(previous, edge)) = via.get(&cursor) {
        path.push(previous);
        path_edges.push(edge);
        cursor = previous;
    }
    path.reverse();
    path_edges.reverse();

    steps.extend(path.iter().map(|&id| Step::Highlight(Target::GraphNode(id))));
    steps.extend(path_edges.into_iter().map(|e| Step::Highlight(Target::Edge(e))));
    steps.push(Step::Report(Outcome::ShortestPath {
        distance: total,
        path,
    }));
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visits(steps: &[Step]) -> Vec<NodeId> {
        steps
            .iter()
            .filter_map(|s| match s {
                Step::Visit(Target::GraphNode(id)) => Some(*id),
                _ => None,
            })
            .collect()
    }

    fn labels(graph: &Graph, ids: &[NodeId]) -> Vec<String> {
        ids.iter().map(|&id| graph.label(id)).collect()
    }

    #[test]
    fn test_dfs_sample_order() {
        let graph = Graph::sample(false, true);
        let a = graph.find_by_label("A").unwrap();
        let steps = dfs(&graph, a).unwrap();
        assert_eq!(labels(&graph, &visits(&steps)), ["A", "B", "C", "F", "E", "D"]);
    }

    #[test]
    fn test_bfs_sample_order() {
        let graph = Graph::sample(false, true);
        let a = graph.find_by_label("A").unwrap();
        let steps = bfs(&graph, a).unwrap();
        assert_eq!(labels(&graph, &visits(&steps)), ["A", "B", "D", "C", "E", "F"]);
    }

    #[test]
    fn test_dijkstra_sample_path() {
        let graph = Graph::sample(false, true);
        let a = graph.find_by_label("A").unwrap();
        let f = graph.find_by_label("F").unwrap();
        let steps = dijkstra(&graph, a, f).unwrap();
        let Some(Step::Report(Outcome::ShortestPath { distance, path })) = steps.last() else {
            panic!("expected a shortest path report");
        };
        assert_eq!(*distance, 8);
        assert_eq!(labels(&graph, path), ["A", "B", "C", "F"]);
    }

    #[test]
    fn test_dijkstra_requires_weights() {
        let graph = Graph::sample(false, false);
        assert_eq!(
            dijkstra(&graph, NodeId(1), NodeId(2)),
            Err(EngineError::UnweightedGraph)
        );
    }

    #[test]
    fn test_dijkstra_unreachable_reports_no_path() {
        let mut graph = Graph::new(false, true);
        let a = graph.add_node("A").unwrap();
        let b = graph.add_node("B").unwrap();
        let steps = dijkstra(&graph, a, b).unwrap();
        assert_eq!(steps.last(), Some(&Step::Report(Outcome::NoPath)));
    }

    #[test]
    fn test_dijkstra_negative_weight_rejected() {
        let mut graph = Graph::new(true, true);
        let a = graph.add_node("A").unwrap();
        let b = graph.add_node("B").unwrap();
        graph.add_edge(a, b, -1).unwrap();
        assert!(matches!(
            dijkstra(&graph, a, b),
            Err(EngineError::NegativeWeight { weight: -1, .. })
        ));
    }

    #[test]
    fn test_unknown_start_rejected() {
        let graph = Graph::sample(false, true);
        assert!(matches!(
            bfs(&graph, NodeId(40)),
            Err(EngineError::UnknownNode { .. })
        ));
    }
}
