//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, validation errors, and the listener registry
//! that every push-style interface in the crate is built on.

mod errors;
mod ids;
mod listeners;

pub use errors::ValidationError;
pub use ids::{ListenerId, UserId};
pub use listeners::{Listener, ListenerRegistry, Subscription};
