//! Identity gateway port - the contract with the external identity provider.
//!
//! The session core depends on this trait only. Adapters translate the
//! provider's native errors into [`AuthError`] and never retry.
//!
//! # Contract
//!
//! Implementations must:
//! - Resolve `sign_in_interactive` with the signed-in identity, or an
//!   `AuthError` whose kind is one of the fixed taxonomy (`Unknown` for
//!   anything unclassified)
//! - Push every identity change (explicit action, expiry, another tab) to
//!   all subscribed listeners, passing `None` when nobody is signed in
//! - Stop invoking a listener once its `Subscription` is released

use async_trait::async_trait;

use crate::domain::foundation::Subscription;
use crate::domain::session::{AuthError, Identity};

/// Callback invoked with each provider confirmation.
pub type ProviderListener = Box<dyn Fn(Option<&Identity>) + Send + Sync>;

#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Runs the provider's interactive sign-in (popup) flow.
    async fn sign_in_interactive(&self) -> Result<Identity, AuthError>;

    /// Ends the provider session.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Registers a push listener for identity changes.
    ///
    /// Fails when the provider cannot be initialized; the caller then never
    /// receives a confirmation.
    fn subscribe(&self, listener: ProviderListener) -> Result<Subscription, AuthError>;
}
