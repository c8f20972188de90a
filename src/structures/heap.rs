//! Array-backed binary heap state
//!
//! Index `i` has children `2i + 1` and `2i + 2` and parent `(i - 1) / 2`.
//! The ordering direction is fixed per instance by [`HeapKind`].

use rand::Rng;
use std::fmt;

pub const SAMPLE_HEAP: [i64; 7] = [90, 80, 70, 50, 60, 30, 20];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeapKind {
    #[default]
    Max,
    Min,
}

impl HeapKind {
    /// Whether `a` belongs above `b` in this heap
    pub fn outranks(self, a: i64, b: i64) -> bool {
        match self {
            HeapKind::Max => a > b,
            HeapKind::Min => a < b,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            HeapKind::Max => HeapKind::Min,
            HeapKind::Min => HeapKind::Max,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HeapKind::Max => "max",
            HeapKind::Min => "min",
        }
    }
}

pub fn parent(index: usize) -> Option<usize> {
    if index == 0 {
        None
    } else {
        Some((index - 1) / 2)
    }
}

pub fn left_child(index: usize) -> usize {
    2 * index + 1
}

pub fn right_child(index: usize) -> usize {
    2 * index + 2
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeapState {
    values: Vec<i64>,
    kind: HeapKind,
    marked: Vec<usize>,
}

impl HeapState {
    /// Wraps `values` as-is; call the build operation to establish heap order
    pub fn new(kind: HeapKind, values: Vec<i64>) -> Self {
        HeapState {
            values,
            kind,
            marked: Vec::new(),
        }
    }

    pub fn sample(kind: HeapKind) -> Self {
        HeapState::new(kind, SAMPLE_HEAP.to_vec())
    }

    /// 5 to 11 values in `0..100`, in no particular order
    pub fn random<R: Rng>(kind: HeapKind, rng: &mut R) -> Self {
        let len = rng.gen_range(5..=11);
        let values = (0..len).map(|_| rng.gen_range(0..100)).collect();
        HeapState::new(kind, values)
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn kind(&self) -> HeapKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: HeapKind) {
        self.kind = kind;
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn peek(&self) -> Option<i64> {
        self.values.first().copied()
    }

    pub fn marked(&self) -> &[usize] {
        &self.marked
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.marked.contains(&index)
    }

    /// Heap order holds at every index
    pub fn is_valid(&self) -> bool {
        (1..self.values.len()).all(|i| {
            let p = (i - 1) / 2;
            !self.kind.outranks(self.values[i], self.values[p])
        })
    }

    pub fn push(&mut self, value: i64) {
        self.values.push(value);
    }

    /// Move the last element into the root slot and shrink by one.
    /// Returns the old root.
    pub fn replace_root(&mut self) -> Option<i64> {
        let root = self.peek()?;
        if let Some(last) = self.values.pop() {
            if let Some(slot) = self.values.first_mut() {
                *slot = last;
            }
        }
        Some(root)
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        if a < self.values.len() && b < self.values.len() {
            self.values.swap(a, b);
        }
    }

    pub fn mark(&mut self, indices: &[usize]) {
        self.marked.clear();
        self.marked.extend_from_slice(indices);
    }

    pub fn add_mark(&mut self, index: usize) {
        if !self.marked.contains(&index) {
            self.marked.push(index);
        }
    }

    pub fn remove_mark(&mut self, index: usize) {
        self.marked.retain(|&i| i != index);
    }

    pub fn clear_marks(&mut self) {
        self.marked.clear();
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.marked.clear();
    }
}

impl fmt::Display for HeapState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-heap [", self.kind.name())?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}
