//! Structure state
//!
//! One value type per structure family and the [`State`] sum type that the
//! engine, the reducer and the driver pass around. States are plain owned
//! values: cloning one yields an independent snapshot.

pub mod array;
pub mod bst;
pub mod graph;
pub mod hash_table;
pub mod heap;
pub mod linear;

use crate::engine::errors::EngineError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

pub use array::ArrayState;
pub use bst::{Bst, TraversalOrder};
pub use graph::{Graph, NodeId};
pub use hash_table::{hash, HashTable};
pub use heap::{HeapKind, HeapState};
pub use linear::Linear;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureKind {
    Array,
    Tree,
    HashTable,
    Heap,
    Graph,
    Stack,
    Queue,
}

impl StructureKind {
    pub const ALL: [StructureKind; 7] = [
        StructureKind::Array,
        StructureKind::Tree,
        StructureKind::HashTable,
        StructureKind::Heap,
        StructureKind::Graph,
        StructureKind::Stack,
        StructureKind::Queue,
    ];

    /// Name accepted on the command line
    pub fn keyword(self) -> &'static str {
        match self {
            StructureKind::Array => "array",
            StructureKind::Tree => "tree",
            StructureKind::HashTable => "hash",
            StructureKind::Heap => "heap",
            StructureKind::Graph => "graph",
            StructureKind::Stack => "stack",
            StructureKind::Queue => "queue",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        let word = word.to_ascii_lowercase();
        match word.as_str() {
            "bst" => Some(StructureKind::Tree),
            "hashtable" | "hash-table" => Some(StructureKind::HashTable),
            _ => StructureKind::ALL
                .into_iter()
                .find(|kind| kind.keyword() == word),
        }
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StructureKind::Array => "array",
            StructureKind::Tree => "binary search tree",
            StructureKind::HashTable => "hash table",
            StructureKind::Heap => "heap",
            StructureKind::Graph => "graph",
            StructureKind::Stack => "stack",
            StructureKind::Queue => "queue",
        };
        write!(f, "{}", name)
    }
}

/// A structure instance of any family
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    Array(ArrayState),
    Tree(Bst),
    HashTable(HashTable),
    Heap(HeapState),
    Graph(Graph),
    Stack(Linear),
    Queue(Linear),
}

impl State {
    pub fn kind(&self) -> StructureKind {
        match self {
            State::Array(_) => StructureKind::Array,
            State::Tree(_) => StructureKind::Tree,
            State::HashTable(_) => StructureKind::HashTable,
            State::Heap(_) => StructureKind::Heap,
            State::Graph(_) => StructureKind::Graph,
            State::Stack(_) => StructureKind::Stack,
            State::Queue(_) => StructureKind::Queue,
        }
    }

    /// Whether the structure holds no elements
    pub fn is_empty(&self) -> bool {
        match self {
            State::Array(array) => array.is_empty(),
            State::Tree(tree) => tree.is_empty(),
            State::HashTable(table) => table.is_empty(),
            State::Heap(heap) => heap.is_empty(),
            State::Graph(graph) => graph.is_empty(),
            State::Stack(linear) | State::Queue(linear) => linear.is_empty(),
        }
    }

    /// Rough estimate of the memory held by this state, in bytes
    pub fn estimated_size(&self) -> usize {
        let payload = match self {
            State::Array(array) => array.len() * 16,
            // Node: value, two child boxes, flag
            State::Tree(tree) => tree.len() * 40 + tree.visited().len() * 8,
            State::HashTable(table) => {
                table.size() * 24
                    + table
                        .entries()
                        .map(|e| 48 + e.key.len() + e.value.len())
                        .sum::<usize>()
            }
            State::Heap(heap) => heap.len() * 16,
            State::Graph(graph) => {
                graph
                    .nodes()
                    .iter()
                    .map(|n| 64 + n.label.len())
                    .sum::<usize>()
                    + graph.edges().len() * 32
            }
            State::Stack(linear) | State::Queue(linear) => linear
                .items()
                .iter()
                .map(|item| 32 + item.value.len())
                .sum(),
        };
        std::mem::size_of::<State>() + payload
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Array(array) => write!(f, "{}", array),
            State::Tree(tree) => write!(f, "{}", tree),
            State::HashTable(table) => write!(f, "{}", table),
            State::Heap(heap) => write!(f, "{}", heap),
            State::Graph(graph) => write!(f, "{}", graph),
            State::Stack(linear) | State::Queue(linear) => write!(f, "{}", linear),
        }
    }
}

/// Initial contents of a fresh structure
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Seed {
    Empty,
    /// The canned sample data of the structure family
    #[default]
    Sample,
    /// Explicit values; arrays, trees and heaps only
    Values(Vec<i64>),
    Random,
}

/// Parameters for [`create_initial_state`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitParams {
    pub seed: Seed,
    pub table_size: usize,
    pub heap_kind: HeapKind,
    pub directed: bool,
    pub weighted: bool,
    /// Length of a random array
    pub random_len: usize,
    /// Fixed seed for random contents; entropy when `None`
    pub rng_seed: Option<u64>,
}

impl Default for InitParams {
    fn default() -> Self {
        InitParams {
            seed: Seed::Sample,
            table_size: hash_table::DEFAULT_TABLE_SIZE,
            heap_kind: HeapKind::Max,
            directed: false,
            weighted: true,
            random_len: DEFAULT_RANDOM_LEN,
            rng_seed: None,
        }
    }
}

pub const DEFAULT_RANDOM_LEN: usize = 15;

/// Sample array for the sorting steppers
pub const SAMPLE_ARRAY: [i64; 10] = [64, 34, 25, 12, 22, 11, 90, 5, 77, 43];

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn values_not_supported(kind: StructureKind) -> EngineError {
    EngineError::InvalidInput {
        message: format!("A {} cannot be seeded with numeric values", kind),
    }
}

/// Build a fresh structure of `kind`
pub fn create_initial_state(kind: StructureKind, params: &InitParams) -> Result<State, EngineError> {
    let state = match kind {
        StructureKind::Array => State::Array(match &params.seed {
            Seed::Empty => ArrayState::default(),
            Seed::Sample => ArrayState::new(SAMPLE_ARRAY.to_vec()),
            Seed::Values(values) => ArrayState::new(values.clone()),
            Seed::Random => ArrayState::random(params.random_len, &mut make_rng(params.rng_seed)),
        }),
        StructureKind::Tree => State::Tree(match &params.seed {
            Seed::Empty => Bst::new(),
            Seed::Sample => Bst::sample(),
            Seed::Values(values) => Bst::from_values(values.iter().copied()),
            Seed::Random => {
                let mut rng = make_rng(params.rng_seed);
                let count = rng.gen_range(5..=10);
                Bst::from_values((0..count).map(|_| rng.gen_range(1..100)))
            }
        }),
        StructureKind::HashTable => State::HashTable(match &params.seed {
            Seed::Empty => HashTable::new(params.table_size)?,
            Seed::Sample | Seed::Random => HashTable::sample(params.table_size)?,
            Seed::Values(_) => return Err(values_not_supported(kind)),
        }),
        StructureKind::Heap => State::Heap(match &params.seed {
            Seed::Empty => HeapState::new(params.heap_kind, Vec::new()),
            Seed::Sample => HeapState::sample(params.heap_kind),
            Seed::Values(values) => HeapState::new(params.heap_kind, values.clone()),
            Seed::Random => HeapState::random(params.heap_kind, &mut make_rng(params.rng_seed)),
        }),
        StructureKind::Graph => State::Graph(match &params.seed {
            Seed::Empty => Graph::new(params.directed, params.weighted),
            Seed::Sample | Seed::Random => Graph::sample(params.directed, params.weighted),
            Seed::Values(_) => return Err(values_not_supported(kind)),
        }),
        StructureKind::Stack | StructureKind::Queue => {
            let mut linear = if kind == StructureKind::Stack {
                Linear::stack()
            } else {
                Linear::queue()
            };
            match &params.seed {
                Seed::Empty => {}
                Seed::Sample | Seed::Random => {
                    for value in ["10", "20", "30"] {
                        linear.push(value);
                    }
                    linear.clear_highlights();
                }
                Seed::Values(values) => {
                    for value in values {
                        linear.push(&value.to_string());
                    }
                    linear.clear_highlights();
                }
            }
            if kind == StructureKind::Stack {
                State::Stack(linear)
            } else {
                State::Queue(linear)
            }
        }
    };
    tracing::debug!(structure = %kind, size = state.estimated_size(), "created initial state");
    Ok(state)
}
