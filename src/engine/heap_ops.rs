//! Binary heap steppers: insert, extract root, build, heap sort
//!
//! Sift-up records one `Compare(child, parent)` per attempt. Sift-down
//! records one `Compare(candidate, child)` per child examined, where the
//! candidate is the slot currently winning. Every sift swap therefore follows
//! a `Compare`. Heap sort clears the marks before moving the root to the end
//! of the unsorted portion, so that swap is the only one made with no marks.

use crate::engine::errors::EngineError;
use crate::step::{Outcome, Step};
use crate::structures::heap::{left_child, parent, right_child, HeapKind, HeapState};
use crate::structures::StructureKind;

struct Recorder {
    work: Vec<i64>,
    kind: HeapKind,
    steps: Vec<Step>,
}

impl Recorder {
    fn new(heap: &HeapState) -> Self {
        Recorder {
            work: heap.values().to_vec(),
            kind: heap.kind(),
            steps: Vec::new(),
        }
    }

    /// Record a comparison and return whether `a` outranks `b`
    fn outranks(&mut self, a: usize, b: usize) -> bool {
        self.steps.push(Step::Compare { a, b });
        self.kind.outranks(self.work[a], self.work[b])
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.work.swap(a, b);
        self.steps.push(Step::Swap { a, b });
    }

    fn sift_up(&mut self, mut index: usize) {
        while let Some(p) = parent(index) {
            if !self.outranks(index, p) {
                break;
            }
            self.swap(index, p);
            index = p;
        }
    }

    /// Restore heap order below `index`, considering only `[0, len)`
    fn sift_down(&mut self, mut index: usize, len: usize) {
        loop {
            let mut best = index;
            for child in [left_child(index), right_child(index)] {
                if child < len && self.outranks(child, best) {
                    best = child;
                }
            }
            if best == index {
                break;
            }
            self.swap(index, best);
            index = best;
        }
    }

    fn build(&mut self) {
        let len = self.work.len();
        for index in (0..len / 2).rev() {
            self.sift_down(index, len);
        }
    }
}

pub fn insert(heap: &HeapState, value: i64) -> Vec<Step> {
    let mut rec = Recorder::new(heap);
    rec.work.push(value);
    rec.steps.push(Step::NodeInsert { value });
    let last = rec.work.len() - 1;
    rec.sift_up(last);
    rec.steps
}

pub fn extract_root(heap: &HeapState) -> Result<Vec<Step>, EngineError> {
    let extracted = heap.peek().ok_or(EngineError::EmptyStructure {
        operation: "extract from",
        structure: StructureKind::Heap,
    })?;
    let mut rec = Recorder::new(heap);
    if let Some(last) = rec.work.pop() {
        if let Some(root) = rec.work.first_mut() {
            *root = last;
        }
    }
    rec.steps.push(Step::RootReplace { extracted });
    let len = rec.work.len();
    rec.sift_down(0, len);
    rec.steps.push(Step::Report(Outcome::Extracted { value: extracted }));
    Ok(rec.steps)
}

/// Bottom-up heapify; fewer than two elements need no steps
pub fn build(heap: &HeapState) -> Vec<Step> {
    let mut rec = Recorder::new(heap);
    rec.build();
    rec.steps
}

/// Max-heaps sort ascending, min-heaps descending
pub fn sort(heap: &HeapState) -> Vec<Step> {
    let mut rec = Recorder::new(heap);
    rec.build();
    for end in (1..rec.work.len()).rev() {
        rec.steps.push(Step::ClearHighlights);
        rec.swap(0, end);
        rec.sift_down(0, end);
    }
    rec.steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replay(heap: &HeapState, steps: &[Step]) -> Vec<i64> {
        let mut work = heap.values().to_vec();
        for step in steps {
            match *step {
                Step::Swap { a, b } => work.swap(a, b),
                Step::NodeInsert { value } => work.push(value),
                Step::RootReplace { .. } => {
                    let last = work.pop().unwrap();
                    if !work.is_empty() {
                        work[0] = last;
                    }
                }
                _ => {}
            }
        }
        work
    }

    #[test]
    fn test_insert_sifts_to_root() {
        let heap = HeapState::sample(HeapKind::Max);
        let steps = insert(&heap, 95);
        let values = replay(&heap, &steps);
        assert_eq!(values[0], 95);
        assert!(HeapState::new(HeapKind::Max, values).is_valid());
    }

    #[test]
    fn test_extract_empty_rejected() {
        let heap = HeapState::new(HeapKind::Min, Vec::new());
        assert!(matches!(
            extract_root(&heap),
            Err(EngineError::EmptyStructure { .. })
        ));
    }

    #[test]
    fn test_extract_single_element() {
        let heap = HeapState::new(HeapKind::Max, vec![4]);
        let steps = extract_root(&heap).unwrap();
        assert_eq!(
            steps,
            vec![
                Step::RootReplace { extracted: 4 },
                Step::Report(Outcome::Extracted { value: 4 }),
            ]
        );
    }

    #[test]
    fn test_build_min_heap() {
        let heap = HeapState::new(HeapKind::Min, vec![9, 4, 7, 1, 8, 2]);
        let values = replay(&heap, &build(&heap));
        assert!(HeapState::new(HeapKind::Min, values).is_valid());
    }

    #[test]
    fn test_sort_direction_per_kind() {
        let input = vec![5, 3, 9, 1, 7, 3];
        let max = HeapState::new(HeapKind::Max, input.clone());
        assert_eq!(replay(&max, &sort(&max)), vec![1, 3, 3, 5, 7, 9]);
        let min = HeapState::new(HeapKind::Min, input);
        assert_eq!(replay(&min, &sort(&min)), vec![9, 7, 5, 3, 3, 1]);
    }

    #[test]
    fn test_root_moves_follow_cleared_marks() {
        let heap = HeapState::new(HeapKind::Max, vec![4, 9, 1, 7, 3]);
        let steps = sort(&heap);
        let moves: Vec<usize> = steps
            .windows(2)
            .filter_map(|pair| match pair {
                [Step::ClearHighlights, Step::Swap { a: 0, b }] => Some(*b),
                _ => None,
            })
            .collect();
        assert_eq!(moves, vec![4, 3, 2, 1]);
        let sift_swaps_follow_compares = steps.windows(2).all(|pair| match pair {
            [prev, Step::Swap { .. }] => {
                matches!(prev, Step::Compare { .. } | Step::ClearHighlights)
            }
            _ => true,
        });
        assert!(sift_swaps_follow_compares);
    }

    #[test]
    fn test_small_heaps_produce_no_steps() {
        let heap = HeapState::new(HeapKind::Max, vec![3]);
        assert!(build(&heap).is_empty());
        assert!(sort(&heap).is_empty());
    }
}
