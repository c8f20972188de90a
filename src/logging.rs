//! Diagnostic logging setup
//!
//! The TUI owns the terminal, so logs never go to stdout or stderr: a
//! subscriber is installed only when a log file is configured.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "algoviz=debug";

/// Route `tracing` output to `path`, truncating it.
///
/// `RUST_LOG` overrides [`DEFAULT_FILTER`].
pub fn init(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}
