//! # Introduction
//!
//! algoviz turns classic data-structure algorithms into sequences of small,
//! replayable steps and walks through them in a terminal UI built with
//! [ratatui](https://docs.rs/ratatui). Sorting, binary search trees, hash
//! tables, binary heaps, graph search, stacks and queues are covered.
//!
//! ## Pipeline
//!
//! ```text
//! Structure → engine::run(Operation) → Vec<Step> → Driver (apply, history) → TUI
//! ```
//!
//! 1. [`structures`]: owned value types for each family, plus
//!    [`structures::create_initial_state`] for sample, empty, random or given
//!    contents.
//! 2. [`engine`]: pure steppers. [`engine::run`] validates an
//!    [`engine::Operation`] and returns every [`step::Step`] it will take;
//!    [`engine::apply`] folds a step into a state, and [`engine::narrate`]
//!    describes it in words.
//! 3. [`driver`]: paces a run one step at a time, rejects a second
//!    operation while one is running, and keeps a memory-bounded history of
//!    states for stepping backward.
//! 4. [`command`]: the small verb grammar shared by the CLI and the TUI
//!    prompt.
//! 5. [`config`] and [`logging`]: layered runtime settings and the optional
//!    `tracing` log file.
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Determinism
//!
//! Replaying the steps of a run over the state it started from always yields
//! the state the driver ends in:
//!
//! ```
//! use algoviz::engine::{replay, run, Operation, SortAlgorithm};
//! use algoviz::structures::{ArrayState, State};
//!
//! let start = State::Array(ArrayState::new(vec![5, 1, 4]));
//! let steps = run(&start, &Operation::Sort(SortAlgorithm::Quick)).unwrap();
//! let State::Array(sorted) = replay(start, &steps) else { unreachable!() };
//! assert_eq!(sorted.values(), &[1, 4, 5]);
//! ```

pub mod command;
pub mod config;
pub mod driver;
pub mod engine;
pub mod logging;
pub mod step;
pub mod structures;
pub mod ui;
