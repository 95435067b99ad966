//! Development shell HTTP adapter.
//!
//! Exposes the session core to a browser-side router: session snapshot,
//! guard verdicts, sign-in and sign-out.

mod dto;
mod handlers;
mod routes;

pub use dto::*;
pub use handlers::{get_session, navigate, sign_in, sign_out, ShellState};
pub use routes::{shell_router, shell_routes};
