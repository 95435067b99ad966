//! HTTP adapters.

pub mod shell;

pub use shell::{shell_router, ShellState};
