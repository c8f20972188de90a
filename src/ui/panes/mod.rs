//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`structure`]: Live view of the current array, tree, hash table, heap,
//!   graph, stack or queue, with the marks left by the running operation
//! - [`log`]: Narration of the steps applied so far
//! - [`info`]: Current operation, its complexity, result, history usage and
//!   the commands available for the structure
//! - [`status`]: Status bar with keybindings, step counter and command prompt
//! - `utils`: Shared block, scrolling and bar helpers
//!
//! Each pane module exports a primary `render_*` function; panes that need
//! several inputs take a `*RenderData` struct.

mod utils;

pub mod info;
pub mod log;
pub mod status;
pub mod structure;

// Re-export render functions for convenience
pub use info::{render_info_pane, InfoRenderData};
pub use log::render_log_pane;
pub use status::{render_status_bar, StatusRenderData};
pub use structure::render_structure_pane;
