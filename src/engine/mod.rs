//! The stepping engine
//!
//! [`run`] validates an [`Operation`] against a [`State`] and hands it to the
//! stepper of its structure family, which returns the complete step sequence.
//! Nothing here mutates the state; steps take effect only when folded in by
//! the [`reducer`].

pub mod catalog;
pub mod errors;
pub mod graph_search;
pub mod hashing;
pub mod heap_ops;
pub mod linear_ops;
pub mod narrate;
pub mod reducer;
pub mod sorting;
pub mod tree;

pub use errors::{EngineError, ErrorCategory};
pub use narrate::{narrate, narrate_outcome};
pub use reducer::{apply, replay};
pub use sorting::SortAlgorithm;

use crate::step::Step;
use crate::structures::bst::TraversalOrder;
use crate::structures::graph::NodeId;
use crate::structures::State;
use std::fmt;

/// Every operation the engine can step through
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Sort(SortAlgorithm),
    TreeInsert(i64),
    Traverse(TraversalOrder),
    HashInsert { key: String, value: String },
    HashSearch { key: String },
    HashDelete { key: String },
    HashResize { size: usize },
    HeapInsert(i64),
    HeapExtract,
    HeapBuild,
    HeapSort,
    Dfs { start: NodeId },
    Bfs { start: NodeId },
    Dijkstra { start: NodeId, end: NodeId },
    Push(String),
    Pop,
    Peek,
}

impl Operation {
    /// Short name used in errors and the status bar
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Sort(_) => "sort",
            Operation::TreeInsert(_) => "insert",
            Operation::Traverse(_) => "traverse",
            Operation::HashInsert { .. } => "insert",
            Operation::HashSearch { .. } => "search",
            Operation::HashDelete { .. } => "delete",
            Operation::HashResize { .. } => "resize",
            Operation::HeapInsert(_) => "insert",
            Operation::HeapExtract => "extract",
            Operation::HeapBuild => "build",
            Operation::HeapSort => "heap sort",
            Operation::Dfs { .. } => "dfs",
            Operation::Bfs { .. } => "bfs",
            Operation::Dijkstra { .. } => "dijkstra",
            Operation::Push(_) => "push",
            Operation::Pop => "pop",
            Operation::Peek => "peek",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Sort(alg) => write!(f, "{}", alg),
            Operation::TreeInsert(v) | Operation::HeapInsert(v) => write!(f, "insert {}", v),
            Operation::Traverse(order) => write!(f, "{} traversal", order.name()),
            Operation::HashInsert { key, value } => write!(f, "insert \"{}\" = \"{}\"", key, value),
            Operation::HashSearch { key } => write!(f, "search \"{}\"", key),
            Operation::HashDelete { key } => write!(f, "delete \"{}\"", key),
            Operation::HashResize { size } => write!(f, "resize to {}", size),
            Operation::Dfs { start } => write!(f, "DFS from {}", start),
            Operation::Bfs { start } => write!(f, "BFS from {}", start),
            Operation::Dijkstra { start, end } => write!(f, "Dijkstra {} to {}", start, end),
            Operation::Push(value) => write!(f, "push \"{}\"", value),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// Parse a user-supplied integer
pub fn parse_value(input: &str) -> Result<i64, EngineError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(EngineError::EmptyInput { field: "Value" });
    }
    trimmed.parse::<i64>().map_err(|_| EngineError::NotANumber {
        input: trimmed.to_string(),
    })
}

/// Produce the full step sequence for `operation` on `state`.
///
/// Pure: the state is only read. A rejected request yields an error and no
/// steps.
pub fn run(state: &State, operation: &Operation) -> Result<Vec<Step>, EngineError> {
    let _span = tracing::debug_span!("run", structure = %state.kind(), op = operation.name()).entered();
    let steps = match (state, operation) {
        (State::Array(array), Operation::Sort(alg)) => sorting::stepify(*alg, array.values()),
        (State::Tree(tree), Operation::TreeInsert(value)) => tree::insert(tree, *value),
        (State::Tree(tree), Operation::Traverse(order)) => tree::traverse(tree, *order)?,
        (State::HashTable(table), Operation::HashInsert { key, value }) => {
            hashing::insert(table, key, value)?
        }
        (State::HashTable(table), Operation::HashSearch { key }) => hashing::search(table, key)?,
        (State::HashTable(table), Operation::HashDelete { key }) => hashing::delete(table, key)?,
        (State::HashTable(table), Operation::HashResize { size }) => {
            hashing::resize(table, *size)?
        }
        (State::Heap(heap), Operation::HeapInsert(value)) => heap_ops::insert(heap, *value),
        (State::Heap(heap), Operation::HeapExtract) => heap_ops::extract_root(heap)?,
        (State::Heap(heap), Operation::HeapBuild) => heap_ops::build(heap),
        (State::Heap(heap), Operation::HeapSort) => heap_ops::sort(heap),
        (State::Graph(graph), Operation::Dfs { start }) => graph_search::dfs(graph, *start)?,
        (State::Graph(graph), Operation::Bfs { start }) => graph_search::bfs(graph, *start)?,
        (State::Graph(graph), Operation::Dijkstra { start, end }) => {
            graph_search::dijkstra(graph, *start, *end)?
        }
        (State::Stack(linear) | State::Queue(linear), Operation::Push(value)) => {
            linear_ops::push(linear, value)?
        }
        (State::Stack(linear) | State::Queue(linear), Operation::Pop) => linear_ops::pop(linear)?,
        (State::Stack(linear) | State::Queue(linear), Operation::Peek) => {
            linear_ops::peek(linear)?
        }
        (state, operation) => {
            return Err(EngineError::OperationMismatch {
                operation: operation.name(),
                structure: state.kind(),
            })
        }
    };
    tracing::debug!(steps = steps.len(), "stepper finished");
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::{ArrayState, Bst, StructureKind};

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value(" 42 "), Ok(42));
        assert_eq!(parse_value("-7"), Ok(-7));
        assert_eq!(
            parse_value("abc"),
            Err(EngineError::NotANumber {
                input: "abc".to_string()
            })
        );
        assert_eq!(parse_value(""), Err(EngineError::EmptyInput { field: "Value" }));
    }

    #[test]
    fn test_mismatch_rejected() {
        let state = State::Tree(Bst::sample());
        assert_eq!(
            run(&state, &Operation::Sort(SortAlgorithm::Quick)),
            Err(EngineError::OperationMismatch {
                operation: "sort",
                structure: StructureKind::Tree,
            })
        );
    }

    #[test]
    fn test_run_does_not_touch_state() {
        let state = State::Array(ArrayState::new(vec![3, 2, 1]));
        let before = state.clone();
        let steps = run(&state, &Operation::Sort(SortAlgorithm::Bubble)).unwrap();
        assert!(!steps.is_empty());
        assert_eq!(state, before);
    }
}
