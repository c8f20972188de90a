//! Error types for the stepping engine
//!
//! This module defines [`EngineError`], covering every way a request can be
//! turned away at the call boundary. None of them is fatal: a rejected request
//! produces no steps and leaves the structure untouched.

use crate::structures::StructureKind;
use std::fmt;

/// Broad class of an [`EngineError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed user input, rejected before any stepper runs
    InvalidInput,
    /// Input is well-formed but the structure cannot accept the operation
    Precondition,
    /// Another operation is already running on the structure
    Busy,
    /// History navigation hit a boundary
    Navigation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A value that should have been numeric was not
    NotANumber { input: String },

    /// Empty key, label or stack item
    EmptyInput { field: &'static str },

    /// Hash table sizes must be positive
    InvalidTableSize { size: usize },

    /// Anything else the command parser refused
    InvalidInput { message: String },

    /// Operation needs at least one element
    EmptyStructure {
        operation: &'static str,
        structure: StructureKind,
    },

    /// Operation does not belong to this structure family
    OperationMismatch {
        operation: &'static str,
        structure: StructureKind,
    },

    /// Shortest paths need a weighted graph
    UnweightedGraph,

    /// Shortest paths are only defined for non-negative weights
    NegativeWeight {
        source: String,
        target: String,
        weight: i64,
    },

    /// Node label or id not present in the graph
    UnknownNode { node: String },

    /// An edge with the same endpoints already exists
    DuplicateEdge { source: String, target: String },

    /// No edge with these endpoints exists
    MissingEdge { source: String, target: String },

    /// An operation is already running on this structure
    Busy { operation: &'static str },

    /// Nothing left to apply
    NoMoreSteps,

    /// Already at the first step of the run
    NothingToRewind,

    /// Caching another state would exceed the history memory limit
    HistoryLimitExceeded { current: usize, limit: usize },
}

impl EngineError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EngineError::NotANumber { .. }
            | EngineError::EmptyInput { .. }
            | EngineError::InvalidTableSize { .. }
            | EngineError::InvalidInput { .. } => ErrorCategory::InvalidInput,
            EngineError::EmptyStructure { .. }
            | EngineError::OperationMismatch { .. }
            | EngineError::UnweightedGraph
            | EngineError::NegativeWeight { .. }
            | EngineError::UnknownNode { .. }
            | EngineError::DuplicateEdge { .. }
            | EngineError::MissingEdge { .. } => ErrorCategory::Precondition,
            EngineError::Busy { .. } => ErrorCategory::Busy,
            EngineError::NoMoreSteps
            | EngineError::NothingToRewind
            | EngineError::HistoryLimitExceeded { .. } => ErrorCategory::Navigation,
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::NotANumber { input } => {
                write!(f, "'{}' is not a number", input)
            }
            EngineError::EmptyInput { field } => {
                write!(f, "{} must not be empty", field)
            }
            EngineError::InvalidTableSize { size } => {
                write!(f, "Invalid table size {} (must be positive)", size)
            }
            EngineError::InvalidInput { message } => write!(f, "{}", message),
            EngineError::EmptyStructure {
                operation,
                structure,
            } => {
                write!(f, "Cannot {} on an empty {}", operation, structure)
            }
            EngineError::OperationMismatch {
                operation,
                structure,
            } => {
                write!(f, "'{}' is not an operation of a {}", operation, structure)
            }
            EngineError::UnweightedGraph => {
                write!(f, "Dijkstra's algorithm requires a weighted graph")
            }
            EngineError::NegativeWeight {
                source,
                target,
                weight,
            } => {
                write!(
                    f,
                    "Edge {} -> {} has negative weight {}; Dijkstra needs non-negative weights",
                    source, target, weight
                )
            }
            EngineError::UnknownNode { node } => write!(f, "No node named '{}'", node),
            EngineError::DuplicateEdge { source, target } => {
                write!(f, "Edge already exists between {} and {}", source, target)
            }
            EngineError::MissingEdge { source, target } => {
                write!(f, "No edge between {} and {}", source, target)
            }
            EngineError::Busy { operation } => {
                write!(f, "Busy: {} is still running", operation)
            }
            EngineError::NoMoreSteps => write!(f, "No more steps (operation finished)"),
            EngineError::NothingToRewind => {
                write!(f, "Already at the beginning of the operation")
            }
            EngineError::HistoryLimitExceeded { current, limit } => {
                write!(
                    f,
                    "History memory limit exceeded: {} bytes used, limit is {}",
                    current, limit
                )
            }
        }
    }
}

impl std::error::Error for EngineError {}
