//! Access module - route catalog and the pure guard decision.

mod guard;
mod route;

pub use guard::{decide, Verdict};
pub use route::{Route, RouteKind};
