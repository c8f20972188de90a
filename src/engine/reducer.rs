//! Step reducer
//!
//! [`apply`] folds one step into a state. It is total: a step that does not
//! concern the structure family (a `Visit` on an array, say) leaves the state
//! as it was, and out-of-range targets are ignored by the structures
//! themselves. `Report` never mutates anything.

use crate::step::{Step, Target};
use crate::structures::array::ArrayState;
use crate::structures::bst::Bst;
use crate::structures::graph::Graph;
use crate::structures::hash_table::HashTable;
use crate::structures::heap::HeapState;
use crate::structures::linear::Linear;
use crate::structures::State;

/// Apply one step, returning the successor state
pub fn apply(mut state: State, step: &Step) -> State {
    state.apply_mut(step);
    state
}

/// Fold `steps` over `state` in order
pub fn replay<'a, I>(state: State, steps: I) -> State
where
    I: IntoIterator<Item = &'a Step>,
{
    steps.into_iter().fold(state, apply)
}

impl State {
    /// In-place form of [`apply`]
    pub fn apply_mut(&mut self, step: &Step) {
        if let Step::Report(_) = step {
            return;
        }
        let handled = match self {
            State::Array(array) => apply_array(array, step),
            State::Tree(tree) => apply_tree(tree, step),
            State::HashTable(table) => apply_table(table, step),
            State::Heap(heap) => apply_heap(heap, step),
            State::Graph(graph) => apply_graph(graph, step),
            State::Stack(linear) | State::Queue(linear) => apply_linear(linear, step),
        };
        if !handled {
            tracing::trace!(structure = %self.kind(), ?step, "step does not apply; ignored");
        }
    }
}

fn apply_array(array: &mut ArrayState, step: &Step) -> bool {
    match *step {
        Step::Compare { a, b } => array.mark(&[a, b]),
        Step::Swap { a, b } => {
            array.swap(a, b);
            array.mark(&[a, b]);
        }
        Step::Write { index, value } => {
            array.write(index, value);
            array.mark(&[index]);
        }
        Step::Highlight(Target::Index(i)) => array.add_mark(i),
        Step::Unhighlight(Target::Index(i)) => array.remove_mark(i),
        Step::ClearHighlights | Step::Reset => array.clear_marks(),
        _ => return false,
    }
    true
}

fn apply_tree(tree: &mut Bst, step: &Step) -> bool {
    match *step {
        Step::Highlight(Target::TreeNode(v)) => tree.set_highlight(v, true),
        Step::Unhighlight(Target::TreeNode(v)) => tree.set_highlight(v, false),
        Step::ClearHighlights => tree.clear_highlights(),
        Step::Reset => tree.reset(),
        Step::Visit(Target::TreeNode(v)) => tree.record_visit(v),
        Step::NodeInsert { value } => {
            tree.insert(value);
        }
        _ => return false,
    }
    true
}

fn apply_table(table: &mut HashTable, step: &Step) -> bool {
    match step {
        Step::Highlight(Target::Bucket(b)) => table.set_highlight(Some(*b)),
        Step::Unhighlight(Target::Bucket(b)) => {
            if table.highlighted() == Some(*b) {
                table.set_highlight(None);
            }
        }
        Step::ClearHighlights | Step::Reset => table.set_highlight(None),
        Step::BucketWrite { bucket, key, value } => {
            table.write(*bucket, key, value);
        }
        Step::BucketRemove { bucket, key } => {
            table.remove(*bucket, key);
        }
        Step::Rehash { size } => table.rehash(*size),
        _ => return false,
    }
    true
}

fn apply_heap(heap: &mut HeapState, step: &Step) -> bool {
    match *step {
        Step::Compare { a, b } => heap.mark(&[a, b]),
        Step::Swap { a, b } => {
            heap.swap(a, b);
            heap.mark(&[a, b]);
        }
        Step::NodeInsert { value } => {
            heap.push(value);
            let last = heap.len() - 1;
            heap.mark(&[last]);
        }
        Step::RootReplace { .. } => {
            heap.replace_root();
            if heap.is_empty() {
                heap.clear_marks();
            } else {
                heap.mark(&[0]);
            }
        }
        Step::Highlight(Target::Index(i)) => heap.add_mark(i),
        Step::Unhighlight(Target::Index(i)) => heap.remove_mark(i),
        Step::ClearHighlights | Step::Reset => heap.clear_marks(),
        _ => return false,
    }
    true
}

fn apply_graph(graph: &mut Graph, step: &Step) -> bool {
    match *step {
        Step::Reset => graph.reset_marks(),
        Step::ClearHighlights => graph.clear_highlights(),
        Step::Highlight(Target::GraphNode(id)) => graph.set_node_highlight(id, true),
        Step::Unhighlight(Target::GraphNode(id)) => graph.set_node_highlight(id, false),
        Step::Highlight(Target::Edge(e)) => graph.set_edge_highlight(e, true),
        Step::Unhighlight(Target::Edge(e)) => graph.set_edge_highlight(e, false),
        Step::Visit(Target::GraphNode(id)) => graph.visit(id),
        Step::DistanceUpdate {
            node,
            distance,
            predecessor,
        } => graph.set_distance(node, distance, predecessor),
        _ => return false,
    }
    true
}

fn apply_linear(linear: &mut Linear, step: &Step) -> bool {
    match step {
        Step::Push { value } => linear.push(value),
        Step::Pop => {
            linear.pop();
        }
        Step::Highlight(Target::Index(i)) => linear.set_highlight(*i, true),
        Step::Unhighlight(Target::Index(i)) => linear.set_highlight(*i, false),
        Step::ClearHighlights | Step::Reset => linear.clear_highlights(),
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::Outcome;

    #[test]
    fn test_report_is_inert() {
        let state = State::Array(ArrayState::new(vec![2, 1]));
        let after = apply(state.clone(), &Step::Report(Outcome::NotFound));
        assert_eq!(after, state);
    }

    #[test]
    fn test_foreign_step_ignored() {
        let state = State::Array(ArrayState::new(vec![2, 1]));
        let after = apply(state.clone(), &Step::Rehash { size: 3 });
        assert_eq!(after, state);
    }

    #[test]
    fn test_swap_marks_both() {
        let state = apply(
            State::Array(ArrayState::new(vec![2, 1])),
            &Step::Swap { a: 0, b: 1 },
        );
        let State::Array(array) = state else {
            panic!("expected an array");
        };
        assert_eq!(array.values(), &[1, 2]);
        assert_eq!(array.marked(), &[0, 1]);
    }

    #[test]
    fn test_tree_visit_single_highlight() {
        let mut state = State::Tree(Bst::sample());
        state.apply_mut(&Step::Highlight(Target::TreeNode(20)));
        state.apply_mut(&Step::Visit(Target::TreeNode(40)));
        let State::Tree(tree) = state else {
            panic!("expected a tree");
        };
        assert_eq!(tree.highlighted_values(), vec![40]);
        assert_eq!(tree.visited(), &[40]);
    }

    #[test]
    fn test_bucket_remove_collapses() {
        let table = HashTable::new(3).unwrap();
        let state = replay(
            State::HashTable(table),
            &[
                Step::BucketWrite {
                    bucket: 1,
                    key: "k".into(),
                    value: "v".into(),
                },
                Step::BucketRemove {
                    bucket: 1,
                    key: "k".into(),
                },
            ],
        );
        let State::HashTable(table) = state else {
            panic!("expected a hash table");
        };
        assert!(table.buckets()[1].is_none());
    }
}
