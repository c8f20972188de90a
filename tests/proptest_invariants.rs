//! Property-based invariant tests for the steppers and the driver.
//!
//! 1. Every sorting stepper yields the ascending permutation of its input.
//! 2. BST inorder after any inserts is the sorted, de-duplicated input.
//! 3. Heap build leaves a valid heap; heap sort orders by the heap kind.
//! 4. Hash search returns the last value inserted under a key; resize keeps
//!    every pair.
//! 5. Dijkstra agrees with a brute-force shortest path.
//! 6. Driver navigation always lands on the state a plain replay gives.

use algoviz::driver::{Driver, DEFAULT_HISTORY_LIMIT};
use algoviz::engine::{replay, run, Operation, SortAlgorithm};
use algoviz::step::Outcome;
use algoviz::structures::bst::Bst;
use algoviz::structures::graph::Graph;
use algoviz::structures::heap::{HeapKind, HeapState};
use algoviz::structures::{ArrayState, HashTable, State};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn values_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-500i64..500, 0..40)
}

fn algorithm_strategy() -> impl Strategy<Value = SortAlgorithm> {
    prop::sample::select(SortAlgorithm::ALL.to_vec())
}

fn kind_strategy() -> impl Strategy<Value = HeapKind> {
    prop_oneof![Just(HeapKind::Max), Just(HeapKind::Min)]
}

/// Run `operation` to completion by plain replay
fn finish(state: State, operation: &Operation) -> (State, Option<Outcome>) {
    let steps = run(&state, operation).expect("operation accepted");
    let outcome = steps.iter().rev().find_map(|s| s.outcome()).cloned();
    (replay(state, &steps), outcome)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Sorting yields the ascending permutation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn sort_is_ascending_permutation(values in values_strategy(), alg in algorithm_strategy()) {
        let (state, _) = finish(
            State::Array(ArrayState::new(values.clone())),
            &Operation::Sort(alg),
        );
        let State::Array(array) = state else {
            panic!("expected an array");
        };
        let mut expected = values;
        expected.sort();
        prop_assert_eq!(array.values(), expected.as_slice(), "{} failed", alg);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. BST inorder is sorted and distinct
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn bst_inorder_sorted_distinct(values in prop::collection::vec(-100i64..100, 1..30)) {
        let mut state = State::Tree(Bst::new());
        for &value in &values {
            state = finish(state, &Operation::TreeInsert(value)).0;
        }
        let State::Tree(tree) = state else {
            panic!("expected a tree");
        };
        let mut expected = values;
        expected.sort();
        expected.dedup();
        prop_assert_eq!(tree.inorder(), expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Heap build and heap sort
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn heap_build_is_valid(values in values_strategy(), kind in kind_strategy()) {
        let (state, _) = finish(State::Heap(HeapState::new(kind, values)), &Operation::HeapBuild);
        let State::Heap(heap) = state else {
            panic!("expected a heap");
        };
        prop_assert!(heap.is_valid(), "not a {}-heap: {:?}", kind.name(), heap.values());
    }

    #[test]
    fn heap_sort_follows_kind(values in values_strategy(), kind in kind_strategy()) {
        let (state, _) = finish(
            State::Heap(HeapState::new(kind, values.clone())),
            &Operation::HeapSort,
        );
        let State::Heap(heap) = state else {
            panic!("expected a heap");
        };
        let mut expected = values;
        expected.sort();
        if kind == HeapKind::Min {
            expected.reverse();
        }
        prop_assert_eq!(heap.values(), expected.as_slice());
    }

    #[test]
    fn heap_extract_returns_root(values in prop::collection::vec(-500i64..500, 1..30), kind in kind_strategy()) {
        let (built, _) = finish(State::Heap(HeapState::new(kind, values.clone())), &Operation::HeapBuild);
        let (state, outcome) = finish(built, &Operation::HeapExtract);
        let expected = match kind {
            HeapKind::Max => values.iter().max(),
            HeapKind::Min => values.iter().min(),
        };
        prop_assert_eq!(outcome, expected.map(|&value| Outcome::Extracted { value }));
        let State::Heap(heap) = state else {
            panic!("expected a heap");
        };
        prop_assert!(heap.is_valid());
        prop_assert_eq!(heap.len(), values.len() - 1);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Hash table search and resize
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn hash_search_finds_last_value(
        pairs in prop::collection::vec(("[a-e]{1,3}", "[a-z]{1,4}"), 1..25),
        size in 1usize..12,
    ) {
        let mut state = State::HashTable(HashTable::new(size).expect("table"));
        for (key, value) in &pairs {
            state = finish(state, &Operation::HashInsert { key: key.clone(), value: value.clone() }).0;
        }
        for (key, _) in &pairs {
            let last = pairs.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v.clone());
            let (_, outcome) = finish(state.clone(), &Operation::HashSearch { key: key.clone() });
            prop_assert_eq!(outcome, last.map(|value| Outcome::Found { value }));
        }
    }

    #[test]
    fn hash_resize_keeps_pairs(
        pairs in prop::collection::vec(("[a-z]{1,6}", "[a-z]{1,4}"), 0..25),
        size in 1usize..20,
    ) {
        let mut state = State::HashTable(HashTable::new(10).expect("table"));
        for (key, value) in &pairs {
            state = finish(state, &Operation::HashInsert { key: key.clone(), value: value.clone() }).0;
        }
        let collect = |state: &State| {
            let State::HashTable(table) = state else {
                panic!("expected a hash table");
            };
            let mut pairs: Vec<(String, String)> = table
                .entries()
                .map(|e| (e.key.clone(), e.value.clone()))
                .collect();
            pairs.sort();
            pairs
        };
        let before = collect(&state);
        let (after, _) = finish(state, &Operation::HashResize { size });
        prop_assert_eq!(collect(&after), before);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Dijkstra agrees with brute force
// ═════════════════════════════════════════════════════════════════════════

fn graph_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize, i64)>)> {
    (2usize..7).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n, 0..n, 0i64..20), 0..12),
        )
    })
}

/// Bellman-Ford over the undirected edge list
fn brute_force_distance(n: usize, edges: &[(usize, usize, i64)], start: usize, end: usize) -> Option<i64> {
    let mut distance: Vec<Option<i64>> = vec![None; n];
    distance[start] = Some(0);
    for _ in 0..n {
        for &(a, b, w) in edges {
            for (from, to) in [(a, b), (b, a)] {
                if let Some(d) = distance[from] {
                    if distance[to].map_or(true, |current| d + w < current) {
                        distance[to] = Some(d + w);
                    }
                }
            }
        }
    }
    distance[end]
}

proptest! {
    #[test]
    fn dijkstra_matches_brute_force((n, raw_edges) in graph_strategy()) {
        let mut graph = Graph::new(false, true);
        let ids: Vec<_> = (0..n)
            .map(|i| graph.add_node(&format!("N{}", i)).expect("node"))
            .collect();
        let mut edges = Vec::new();
        for (a, b, w) in raw_edges {
            if a != b && graph.add_edge(ids[a], ids[b], w).is_ok() {
                edges.push((a, b, w));
            }
        }

        let (_, outcome) = finish(
            State::Graph(graph),
            &Operation::Dijkstra { start: ids[0], end: ids[n - 1] },
        );
        match brute_force_distance(n, &edges, 0, n - 1) {
            Some(expected) => {
                let Some(Outcome::ShortestPath { distance, path }) = outcome else {
                    panic!("expected a path, got {:?}", outcome);
                };
                prop_assert_eq!(distance, expected);
                prop_assert_eq!(path.first(), Some(&ids[0]));
                prop_assert_eq!(path.last(), Some(&ids[n - 1]));
            }
            None => prop_assert_eq!(outcome, Some(Outcome::NoPath)),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Driver navigation matches replay
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn driver_navigation_matches_replay(
        values in prop::collection::vec(-50i64..50, 2..15),
        alg in algorithm_strategy(),
        moves in prop::collection::vec(any::<bool>(), 0..60),
        history in 0usize..3,
    ) {
        let start = State::Array(ArrayState::new(values));
        let operation = Operation::Sort(alg);
        let steps = run(&start, &operation).expect("sort accepted");

        let limit = match history {
            0 => 0,
            1 => start.estimated_size() * 2,
            _ => DEFAULT_HISTORY_LIMIT,
        };
        let mut driver = Driver::new(start.clone(), limit);
        driver.start(operation).expect("start");

        for forward in moves {
            let _ = if forward {
                driver.step_forward().map(|_| ())
            } else {
                driver.step_backward()
            };
            let expected = replay(start.clone(), &steps[..driver.position()]);
            prop_assert_eq!(driver.state(), &expected);
            prop_assert_eq!(driver.is_running(), driver.position() < steps.len());
        }
    }
}
