//! Operation log narration
//!
//! [`narrate`] describes a step in words, given the state the step is about
//! to be applied to. Values are looked up in that state, so a `Swap` reads
//! "Swapping 70 with parent 50" rather than "Swapping index 4 with index 1".

use crate::step::{Outcome, Step, Target};
use crate::structures::graph::Graph;
use crate::structures::hash_table::{HashTable, WriteKind};
use crate::structures::heap::{parent, HeapKind, HeapState};
use crate::structures::linear::{Discipline, Linear};
use crate::structures::State;

/// One log line for `step`, applied to `state`
pub fn narrate(state: &State, step: &Step) -> String {
    if let Step::Report(outcome) = step {
        return narrate_outcome(state, outcome);
    }
    let line = match state {
        State::Array(array) => {
            let value = |i: usize| array.values().get(i).copied().unwrap_or_default();
            match *step {
                Step::Compare { a, b } => Some(format!(
                    "Comparing {} (index {}) with {} (index {})",
                    value(a),
                    a,
                    value(b),
                    b
                )),
                Step::Swap { a, b } => Some(format!("Swapping {} and {}", value(a), value(b))),
                Step::Write { index, value } => {
                    Some(format!("Writing {} to index {}", value, index))
                }
                _ => None,
            }
        }
        State::Tree(tree) => match *step {
            Step::Highlight(Target::TreeNode(v)) => Some(format!("At node {}", v)),
            Step::Visit(Target::TreeNode(v)) => Some(format!("Visiting node {}", v)),
            Step::NodeInsert { value } if tree.is_empty() => {
                Some(format!("Tree is empty. {} becomes the root.", value))
            }
            Step::NodeInsert { value } => Some(format!("Inserting {} as a new leaf", value)),
            Step::Reset => Some("Starting traversal".to_string()),
            _ => None,
        },
        State::HashTable(table) => narrate_table(table, step),
        State::Heap(heap) => narrate_heap(heap, step),
        State::Graph(graph) => narrate_graph(graph, step),
        State::Stack(linear) | State::Queue(linear) => narrate_linear(linear, step),
    };
    line.unwrap_or_else(|| fallback(step))
}

fn fallback(step: &Step) -> String {
    match step {
        Step::Highlight(target) => format!("Highlighting {}", target),
        Step::Unhighlight(target) => format!("Unhighlighting {}", target),
        Step::Visit(target) => format!("Visiting {}", target),
        Step::ClearHighlights => "Clearing highlights".to_string(),
        Step::Reset => "Clearing previous marks".to_string(),
        other => format!("{:?}", other),
    }
}

fn narrate_table(table: &HashTable, step: &Step) -> Option<String> {
    let line = match step {
        Step::Highlight(Target::Bucket(b)) => format!("Key hashes to bucket {}", b),
        Step::BucketWrite { bucket, key, .. } => match table.classify_write(*bucket, key) {
            WriteKind::Created => format!("Bucket {} was empty. Inserting entry.", bucket),
            WriteKind::Updated => format!(
                "Key \"{}\" already exists in bucket {}. Updating value.",
                key, bucket
            ),
            WriteKind::Chained => format!(
                "Collision detected at bucket {}. Adding \"{}\" to chain.",
                bucket, key
            ),
        },
        Step::BucketRemove { bucket, key } => {
            format!("Key \"{}\" found and deleted from bucket {}.", key, bucket)
        }
        Step::Rehash { size } => {
            format!("Resizing hash table from {} to {}...", table.size(), size)
        }
        _ => return None,
    };
    Some(line)
}

fn narrate_heap(heap: &HeapState, step: &Step) -> Option<String> {
    let value = |i: usize| heap.values().get(i).copied().unwrap_or_default();
    let child_word = match heap.kind() {
        HeapKind::Max => "larger",
        HeapKind::Min => "smaller",
    };
    let line = match *step {
        Step::Compare { a, b } if parent(a) == Some(b) => {
            format!("Comparing {} with parent {}", value(a), value(b))
        }
        Step::Compare { a, b } => format!("Comparing {} with {}", value(a), value(b)),
        Step::Swap { a: 0, b } if heap.marked().is_empty() => format!(
            "Moving root ({}) to the end of the sorted portion (index {})",
            value(0),
            b
        ),
        Step::Swap { a, b } if parent(a) == Some(b) => {
            format!("Swapping {} with parent {}", value(a), value(b))
        }
        Step::Swap { a, b } if parent(b) == Some(a) => format!(
            "Swapping {} with {} child {}",
            value(a),
            child_word,
            value(b)
        ),
        Step::Swap { a, b } => format!(
            "Moving root ({}) to the end of the sorted portion (index {})",
            value(a),
            b
        ),
        Step::NodeInsert { value } => format!("Inserting {} into the heap...", value),
        Step::RootReplace { extracted } => {
            let which = match heap.kind() {
                HeapKind::Max => "maximum",
                HeapKind::Min => "minimum",
            };
            match heap.values().last() {
                Some(&last) if heap.len() > 1 => format!(
                    "Extracting {} value ({}). Moving last element ({}) to the root position.",
                    which, extracted, last
                ),
                _ => format!("Extracting {} value ({}).", which, extracted),
            }
        }
        _ => return None,
    };
    Some(line)
}

fn narrate_graph(graph: &Graph, step: &Step) -> Option<String> {
    let line = match *step {
        Step::Visit(Target::GraphNode(id)) => format!("Visiting {}", graph.label(id)),
        Step::Unhighlight(Target::GraphNode(id)) => format!("Done with {}", graph.label(id)),
        Step::Highlight(Target::GraphNode(id)) => format!("Path goes through {}", graph.label(id)),
        Step::Highlight(Target::Edge(e)) => {
            let edge = graph.edges().get(e)?;
            let arrow = if graph.is_directed() { "->" } else { "--" };
            let mut line = format!(
                "Exploring edge {} {} {}",
                graph.label(edge.source),
                arrow,
                graph.label(edge.target)
            );
            if graph.is_weighted() {
                line.push_str(&format!(" (weight {})", edge.weight));
            }
            line
        }
        Step::DistanceUpdate {
            node,
            distance,
            predecessor,
        } => match predecessor {
            Some(from) => format!(
                "Distance to {} updated to {} via {}",
                graph.label(node),
                distance,
                graph.label(from)
            ),
            None => format!("Distance to {} set to {}", graph.label(node), distance),
        },
        Step::Reset => "Resetting visited marks and distances".to_string(),
        _ => return None,
    };
    Some(line)
}

fn narrate_linear(linear: &Linear, step: &Step) -> Option<String> {
    let (push_word, pop_word, end_word) = match linear.discipline() {
        Discipline::Lifo => ("Pushing", "Popping", "top"),
        Discipline::Fifo => ("Enqueuing", "Dequeuing", "front"),
    };
    let line = match step {
        Step::Push { value } => format!("{} \"{}\"", push_word, value),
        Step::Pop => format!("{} the {} item", pop_word, end_word),
        Step::Highlight(Target::Index(i)) => {
            let item = linear.items().get(*i)?;
            format!("Looking at the {} item \"{}\"", end_word, item.value)
        }
        _ => return None,
    };
    Some(line)
}

/// Sentence describing `outcome`, with graph nodes named by label
pub fn narrate_outcome(state: &State, outcome: &Outcome) -> String {
    match outcome {
        Outcome::Found { value } => format!("Key found with value \"{}\".", value),
        Outcome::NotFound => "Key not found.".to_string(),
        Outcome::Removed { value } => format!("Deleted entry with value \"{}\".", value),
        Outcome::Stored { bucket, .. } => format!("Insertion into bucket {} complete.", bucket),
        Outcome::Rehashed {
            entries,
            collisions,
        } => format!(
            "Resize complete. {} entries rehashed with {} collisions.",
            entries, collisions
        ),
        Outcome::Duplicate { value } => {
            format!("Value {} already exists in the tree. Nothing inserted.", value)
        }
        Outcome::Extracted { value } => {
            format!("Extraction complete. Extracted value: {}", value)
        }
        Outcome::Peeked { value } => format!("Next item is \"{}\"", value),
        Outcome::Popped { value } => format!("Removed \"{}\"", value),
        Outcome::ShortestPath { distance, path } => {
            let names: Vec<String> = match state {
                State::Graph(graph) => path.iter().map(|&id| graph.label(id)).collect(),
                _ => path.iter().map(|id| id.to_string()).collect(),
            };
            format!(
                "Shortest path: {} (total distance {})",
                names.join(" -> "),
                distance
            )
        }
        Outcome::NoPath => "No path exists between the selected nodes.".to_string(),
    }
}
