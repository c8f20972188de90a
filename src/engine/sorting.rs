//! Sorting steppers
//!
//! Each algorithm runs on a private working copy of the input and records a
//! step for every comparison and every exchange or placement it performs. The
//! working copy is dropped afterwards; replaying the recorded steps over the
//! original array reproduces it.

use crate::engine::errors::EngineError;
use crate::step::Step;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortAlgorithm {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 5] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Selection,
        SortAlgorithm::Insertion,
        SortAlgorithm::Merge,
        SortAlgorithm::Quick,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "bubble",
            SortAlgorithm::Selection => "selection",
            SortAlgorithm::Insertion => "insertion",
            SortAlgorithm::Merge => "merge",
            SortAlgorithm::Quick => "quick",
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::engine::catalog::sort_info(*self).name)
    }
}

impl FromStr for SortAlgorithm {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s.to_ascii_lowercase();
        let word = word.trim_end_matches("sort").trim_end_matches(|c: char| c == '-' || c == '_');
        SortAlgorithm::ALL
            .into_iter()
            .find(|alg| alg.keyword() == word)
            .ok_or_else(|| EngineError::InvalidInput {
                message: format!("Unknown sorting algorithm '{}'", s),
            })
    }
}

/// Working copy plus the steps recorded against it
struct Recorder {
    work: Vec<i64>,
    steps: Vec<Step>,
}

impl Recorder {
    fn new(values: &[i64]) -> Self {
        Recorder {
            work: values.to_vec(),
            steps: Vec::new(),
        }
    }

    /// Record a comparison and return `work[a] > work[b]`
    fn greater(&mut self, a: usize, b: usize) -> bool {
        self.steps.push(Step::Compare { a, b });
        self.work[a] > self.work[b]
    }

    /// Record a comparison and return `work[a] < work[b]`
    fn less(&mut self, a: usize, b: usize) -> bool {
        self.steps.push(Step::Compare { a, b });
        self.work[a] < self.work[b]
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.work.swap(a, b);
        self.steps.push(Step::Swap { a, b });
    }

    fn write(&mut self, index: usize, value: i64) {
        self.work[index] = value;
        self.steps.push(Step::Write { index, value });
    }
}

/// Steps that sort `values` ascending with `algorithm`
pub fn stepify(algorithm: SortAlgorithm, values: &[i64]) -> Vec<Step> {
    let mut rec = Recorder::new(values);
    match algorithm {
        SortAlgorithm::Bubble => bubble(&mut rec),
        SortAlgorithm::Selection => selection(&mut rec),
        SortAlgorithm::Insertion => insertion(&mut rec),
        SortAlgorithm::Merge => {
            if !rec.work.is_empty() {
                let last = rec.work.len() - 1;
                merge_sort(&mut rec, 0, last);
            }
        }
        SortAlgorithm::Quick => {
            if !rec.work.is_empty() {
                let last = rec.work.len() - 1;
                quick_sort(&mut rec, 0, last);
            }
        }
    }
    debug_assert!(rec.work.windows(2).all(|p| p[0] <= p[1]));
    rec.steps
}

/// Stops after the first pass without an exchange
fn bubble(rec: &mut Recorder) {
    let n = rec.work.len();
    for pass in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - 1 - pass {
            if rec.greater(j, j + 1) {
                rec.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}

fn selection(rec: &mut Recorder) {
    let n = rec.work.len();
    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        for j in i + 1..n {
            if rec.less(j, min) {
                min = j;
            }
        }
        if min != i {
            rec.swap(i, min);
        }
    }
}

/// Sinks each key into the sorted prefix by adjacent swaps
fn insertion(rec: &mut Recorder) {
    for i in 1..rec.work.len() {
        let mut j = i;
        while j > 0 && rec.greater(j - 1, j) {
            rec.swap(j - 1, j);
            j -= 1;
        }
    }
}

fn merge_sort(rec: &mut Recorder, left: usize, right: usize) {
    if left >= right {
        return;
    }
    let mid = left + (right - left) / 2;
    merge_sort(rec, left, mid);
    merge_sort(rec, mid + 1, right);
    merge(rec, left, mid, right);
}

/// Merge `[left, mid]` and `(mid, right]`; ties take from the left run
fn merge(rec: &mut Recorder, left: usize, mid: usize, right: usize) {
    let lower = rec.work[left..=mid].to_vec();
    let upper = rec.work[mid + 1..=right].to_vec();
    let (mut i, mut j) = (0, 0);
    for k in left..=right {
        let take_lower = j >= upper.len() || (i < lower.len() && lower[i] <= upper[j]);
        let value = if take_lower {
            i += 1;
            lower[i - 1]
        } else {
            j += 1;
            upper[j - 1]
        };
        rec.write(k, value);
    }
}

fn quick_sort(rec: &mut Recorder, low: usize, high: usize) {
    if low >= high {
        return;
    }
    let pivot = partition(rec, low, high);
    if pivot > low {
        quick_sort(rec, low, pivot - 1);
    }
    quick_sort(rec, pivot + 1, high);
}

/// Lomuto partition around `work[high]`; returns the pivot's final slot
fn partition(rec: &mut Recorder, low: usize, high: usize) -> usize {
    let mut store = low;
    for j in low..high {
        if rec.less(j, high) {
            if store != j {
                rec.swap(store, j);
            }
            store += 1;
        }
    }
    rec.swap(store, high);
    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{count_kind, StepKind};

    fn replay(values: &[i64], steps: &[Step]) -> Vec<i64> {
        let mut work = values.to_vec();
        for step in steps {
            match *step {
                Step::Swap { a, b } => work.swap(a, b),
                Step::Write { index, value } => work[index] = value,
                _ => {}
            }
        }
        work
    }

    #[test]
    fn test_every_algorithm_sorts() {
        let input = [64, 34, 25, 12, 22, 11, 90, 5, 77, 43, 22];
        let mut expected = input.to_vec();
        expected.sort();
        for alg in SortAlgorithm::ALL {
            let steps = stepify(alg, &input);
            assert_eq!(replay(&input, &steps), expected, "{:?}", alg);
        }
    }

    #[test]
    fn test_bubble_sorted_input_single_pass() {
        let steps = stepify(SortAlgorithm::Bubble, &[1, 2, 3, 4]);
        assert_eq!(count_kind(&steps, StepKind::Compare), 3);
        assert_eq!(count_kind(&steps, StepKind::Swap), 0);
    }

    #[test]
    fn test_merge_emits_only_writes() {
        let steps = stepify(SortAlgorithm::Merge, &[3, 1, 2]);
        assert!(steps.iter().all(|s| matches!(s, Step::Write { .. })));
        // 2 writes merging [3] and [1], then 3 writes for the top merge
        assert_eq!(steps.len(), 5);
    }

    #[test]
    fn test_quick_partition_steps() {
        // Pivot 2: 3 vs 2 no, 1 vs 2 yes (swap 0,1), then pivot to slot 1
        let steps = stepify(SortAlgorithm::Quick, &[3, 1, 2]);
        assert_eq!(
            steps,
            vec![
                Step::Compare { a: 0, b: 2 },
                Step::Compare { a: 1, b: 2 },
                Step::Swap { a: 0, b: 1 },
                Step::Swap { a: 1, b: 2 },
            ]
        );
    }

    #[test]
    fn test_trivial_inputs_produce_no_steps() {
        for alg in SortAlgorithm::ALL {
            assert!(stepify(alg, &[]).is_empty());
            assert!(stepify(alg, &[7]).is_empty());
        }
    }

    #[test]
    fn test_parse_algorithm_names() {
        assert_eq!("bubble".parse::<SortAlgorithm>().unwrap(), SortAlgorithm::Bubble);
        assert_eq!("QuickSort".parse::<SortAlgorithm>().unwrap(), SortAlgorithm::Quick);
        assert_eq!("merge-sort".parse::<SortAlgorithm>().unwrap(), SortAlgorithm::Merge);
        assert!("bogo".parse::<SortAlgorithm>().is_err());
    }
}
