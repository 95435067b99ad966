//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, validation errors, listener registry)
//! - `session` - Identity, session state, and the auth failure taxonomy
//! - `access` - Route catalog and the pure render/redirect decision

pub mod access;
pub mod foundation;
pub mod session;
