//! Static descriptions of the algorithms, shown in the info pane

use crate::engine::sorting::SortAlgorithm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub best: &'static str,
    pub average: &'static str,
    pub worst: &'static str,
    pub space: &'static str,
}

const BUBBLE: AlgorithmInfo = AlgorithmInfo {
    name: "Bubble Sort",
    description: "Repeatedly steps through the list, compares adjacent elements \
                  and swaps them if they are in the wrong order.",
    best: "O(n)",
    average: "O(n²)",
    worst: "O(n²)",
    space: "O(1)",
};

const SELECTION: AlgorithmInfo = AlgorithmInfo {
    name: "Selection Sort",
    description: "Splits the list into a sorted prefix and an unsorted suffix, \
                  then repeatedly moves the minimum of the suffix to the end of \
                  the prefix.",
    best: "O(n²)",
    average: "O(n²)",
    worst: "O(n²)",
    space: "O(1)",
};

const INSERTION: AlgorithmInfo = AlgorithmInfo {
    name: "Insertion Sort",
    description: "Builds the sorted list one item at a time, sinking each new \
                  item into place among the items before it.",
    best: "O(n)",
    average: "O(n²)",
    worst: "O(n²)",
    space: "O(1)",
};

const MERGE: AlgorithmInfo = AlgorithmInfo {
    name: "Merge Sort",
    description: "Divide and conquer: sorts each half recursively, then merges \
                  the two sorted halves.",
    best: "O(n log n)",
    average: "O(n log n)",
    worst: "O(n log n)",
    space: "O(n)",
};

const QUICK: AlgorithmInfo = AlgorithmInfo {
    name: "Quick Sort",
    description: "Divide and conquer: partitions the list around a pivot (the \
                  last element) and sorts both sides recursively.",
    best: "O(n log n)",
    average: "O(n log n)",
    worst: "O(n²)",
    space: "O(log n)",
};

pub const HEAP_SORT: AlgorithmInfo = AlgorithmInfo {
    name: "Heap Sort",
    description: "Builds a binary heap, then repeatedly moves the root to the \
                  end of the unsorted region and restores the heap.",
    best: "O(n log n)",
    average: "O(n log n)",
    worst: "O(n log n)",
    space: "O(1)",
};

pub fn sort_info(algorithm: SortAlgorithm) -> &'static AlgorithmInfo {
    match algorithm {
        SortAlgorithm::Bubble => &BUBBLE,
        SortAlgorithm::Selection => &SELECTION,
        SortAlgorithm::Insertion => &INSERTION,
        SortAlgorithm::Merge => &MERGE,
        SortAlgorithm::Quick => &QUICK,
    }
}
