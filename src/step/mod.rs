//! Steps: the observable micro-events of an algorithm run
//!
//! A stepper turns an operation into a `Vec<Step>`; the reducer folds those
//! steps over a state. Each step carries just enough payload to be replayed
//! without consulting the stepper again, so a step log plus the initial state
//! fully determines every intermediate state.

use crate::structures::graph::NodeId;
use crate::structures::hash_table::WriteKind;
use std::fmt;

/// What a highlight or visit refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Array, heap or stack/queue slot
    Index(usize),
    /// Tree node, identified by its (unique) value
    TreeNode(i64),
    GraphNode(NodeId),
    /// Position in the graph's edge list
    Edge(usize),
    Bucket(usize),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Index(i) => write!(f, "index {}", i),
            Target::TreeNode(v) => write!(f, "node {}", v),
            Target::GraphNode(id) => write!(f, "{}", id),
            Target::Edge(i) => write!(f, "edge {}", i),
            Target::Bucket(b) => write!(f, "bucket {}", b),
        }
    }
}

/// Terminal result of an operation, carried by [`Step::Report`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Found { value: String },
    NotFound,
    Removed { value: String },
    Stored { bucket: usize, write: WriteKind },
    Rehashed { entries: usize, collisions: usize },
    Duplicate { value: i64 },
    Extracted { value: i64 },
    Peeked { value: String },
    Popped { value: String },
    ShortestPath { distance: i64, path: Vec<NodeId> },
    NoPath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Two slots are being compared; marks both
    Compare { a: usize, b: usize },
    Swap { a: usize, b: usize },
    Write { index: usize, value: i64 },
    Highlight(Target),
    Unhighlight(Target),
    ClearHighlights,
    /// Clear every run annotation: highlights, visited marks, distances
    Reset,
    Visit(Target),
    DistanceUpdate {
        node: NodeId,
        distance: i64,
        predecessor: Option<NodeId>,
    },
    BucketWrite {
        bucket: usize,
        key: String,
        value: String,
    },
    BucketRemove { bucket: usize, key: String },
    /// Replace the bucket array with `size` empty buckets
    Rehash { size: usize },
    /// Add a value: BST leaf or heap tail
    NodeInsert { value: i64 },
    /// Move the heap's last element into the root slot
    RootReplace { extracted: i64 },
    Push { value: String },
    Pop,
    /// Announce the outcome; never mutates the structure
    Report(Outcome),
}

/// Discriminant of a [`Step`], for counting and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Compare,
    Swap,
    Write,
    Highlight,
    Unhighlight,
    ClearHighlights,
    Reset,
    Visit,
    DistanceUpdate,
    BucketWrite,
    BucketRemove,
    Rehash,
    NodeInsert,
    RootReplace,
    Push,
    Pop,
    Report,
}

impl Step {
    pub fn kind(&self) -> StepKind {
        match self {
            Step::Compare { .. } => StepKind::Compare,
            Step::Swap { .. } => StepKind::Swap,
            Step::Write { .. } => StepKind::Write,
            Step::Highlight(_) => StepKind::Highlight,
            Step::Unhighlight(_) => StepKind::Unhighlight,
            Step::ClearHighlights => StepKind::ClearHighlights,
            Step::Reset => StepKind::Reset,
            Step::Visit(_) => StepKind::Visit,
            Step::DistanceUpdate { .. } => StepKind::DistanceUpdate,
            Step::BucketWrite { .. } => StepKind::BucketWrite,
            Step::BucketRemove { .. } => StepKind::BucketRemove,
            Step::Rehash { .. } => StepKind::Rehash,
            Step::NodeInsert { .. } => StepKind::NodeInsert,
            Step::RootReplace { .. } => StepKind::RootReplace,
            Step::Push { .. } => StepKind::Push,
            Step::Pop => StepKind::Pop,
            Step::Report(_) => StepKind::Report,
        }
    }

    /// Whether applying this step can change element data, as opposed to
    /// annotations only
    pub fn is_mutation(&self) -> bool {
        matches!(
            self.kind(),
            StepKind::Swap
                | StepKind::Write
                | StepKind::BucketWrite
                | StepKind::BucketRemove
                | StepKind::Rehash
                | StepKind::NodeInsert
                | StepKind::RootReplace
                | StepKind::Push
                | StepKind::Pop
        )
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            Step::Report(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// Number of steps of each kind in `steps`
pub fn count_kind(steps: &[Step], kind: StepKind) -> usize {
    steps.iter().filter(|s| s.kind() == kind).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_is_not_a_mutation() {
        assert!(!Step::Report(Outcome::NotFound).is_mutation());
        assert!(!Step::Compare { a: 0, b: 1 }.is_mutation());
        assert!(Step::Swap { a: 0, b: 1 }.is_mutation());
    }

    #[test]
    fn test_count_kind() {
        let steps = vec![
            Step::Compare { a: 0, b: 1 },
            Step::Swap { a: 0, b: 1 },
            Step::Compare { a: 1, b: 2 },
        ];
        assert_eq!(count_kind(&steps, StepKind::Compare), 2);
        assert_eq!(count_kind(&steps, StepKind::Write), 0);
    }
}
