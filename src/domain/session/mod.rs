//! Session module - who is signed in, and how sign-in can fail.
//!
//! - `Identity` - provider-issued user record
//! - `SessionState` - tagged Initializing / Anonymous / Authenticated union
//! - `AuthError` / `AuthErrorKind` - provider failure taxonomy

mod errors;
mod identity;
mod state;

pub use errors::{AuthError, AuthErrorKind};
pub use identity::Identity;
pub use state::SessionState;
