//! Application layer - the session and access-control core.
//!
//! - `SessionStore` owns the canonical session state
//! - `RouteGuard` decides what each navigation may render
//! - `SignInController` runs sign-in / sign-out attempts

mod route_guard;
mod session_store;
mod sign_in;

pub use route_guard::RouteGuard;
pub use session_store::SessionStore;
pub use sign_in::{
    SignInController, SignInFailure, SignInOutcome, SignOutOutcome, SIGN_IN_LANDING,
    SIGN_OUT_LANDING,
};
