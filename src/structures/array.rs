//! Array state for the sorting steppers
//!
//! The identity of an element is its index. The only mutations are swaps and
//! single-slot writes; the `marked` set records which indices the last step
//! touched so a renderer can colour them.

use rand::Rng;
use std::fmt;

/// Smallest value produced by [`ArrayState::random`]
pub const RANDOM_MIN: i64 = 5;
/// Largest value produced by [`ArrayState::random`]
pub const RANDOM_MAX: i64 = 104;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArrayState {
    values: Vec<i64>,
    marked: Vec<usize>,
}

impl ArrayState {
    pub fn new(values: Vec<i64>) -> Self {
        ArrayState {
            values,
            marked: Vec::new(),
        }
    }

    /// Random array in `RANDOM_MIN..=RANDOM_MAX`
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Self {
        let values = (0..len)
            .map(|_| rng.gen_range(RANDOM_MIN..=RANDOM_MAX))
            .collect();
        ArrayState::new(values)
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn marked(&self) -> &[usize] {
        &self.marked
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.marked.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Non-decreasing order check
    pub fn is_sorted(&self) -> bool {
        self.values.windows(2).all(|pair| pair[0] <= pair[1])
    }

    /// Exchange two slots; out-of-range indices are ignored
    pub fn swap(&mut self, a: usize, b: usize) {
        if a < self.values.len() && b < self.values.len() {
            self.values.swap(a, b);
        }
    }

    /// Overwrite one slot; out-of-range indices are ignored
    pub fn write(&mut self, index: usize, value: i64) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value;
        }
    }

    /// Replace the marked set
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
}

impl fmt::Display for ArrayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_swap_ignores_out_of_range() {
        let mut array = ArrayState::new(vec![3, 1, 2]);
        array.swap(0, 7);
        assert_eq!(array.values(), &[3, 1, 2]);
        array.swap(0, 1);
        assert_eq!(array.values(), &[1, 3, 2]);
    }

    #[test]
    fn test_random_respects_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let array = ArrayState::random(200, &mut rng);
        assert_eq!(array.len(), 200);
        assert!(array
            .values()
            .iter()
            .all(|v| (RANDOM_MIN..=RANDOM_MAX).contains(v)));
    }

    #[test]
    fn test_display() {
        let array = ArrayState::new(vec![5, -2, 9]);
        assert_eq!(array.to_string(), "[5, -2, 9]");
    }
}
