//! In-memory identity provider.
//!
//! Implements the `IdentityGateway` port without a real provider. Tests
//! script it; the development shell runs against it with a configured dev
//! identity.
//!
//! # Example
//!
//! ```ignore
//! use student_spot::adapters::identity::MockIdentityGateway;
//! use student_spot::domain::foundation::UserId;
//! use student_spot::domain::session::{AuthError, Identity};
//!
//! let gateway = MockIdentityGateway::new()
//!     .with_identity(Identity::new(UserId::new("user-123").unwrap()))
//!     .queue_sign_in(Err(AuthError::popup_blocked("auth/popup-blocked")));
//!
//! // First attempt fails with the scripted error, the next one signs in.
//! assert!(gateway.sign_in_interactive().await.is_err());
//! assert!(gateway.sign_in_interactive().await.is_ok());
//! ```

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::foundation::{ListenerRegistry, Subscription, UserId};
use crate::domain::session::{AuthError, Identity};
use crate::ports::{IdentityGateway, ProviderListener};

/// Scriptable identity provider.
///
/// Without scripted results, `sign_in_interactive` signs in the configured
/// identity, or fails with `OperationNotAllowed` if none is configured.
#[derive(Debug)]
pub struct MockIdentityGateway {
    /// Identity the provider currently considers signed in.
    current: RwLock<Option<Identity>>,
    /// Identity used for sign-in attempts with no scripted result.
    default_identity: RwLock<Option<Identity>>,
    /// One-shot results consumed by successive sign-in attempts.
    scripted: RwLock<VecDeque<Result<Identity, AuthError>>>,
    sign_out_error: RwLock<Option<AuthError>>,
    subscribe_error: RwLock<Option<AuthError>>,
    /// Simulated popup / network latency.
    latency: Duration,
    listeners: ListenerRegistry<Option<Identity>>,
    sign_in_calls: AtomicUsize,
    sign_out_calls: AtomicUsize,
}

impl MockIdentityGateway {
    /// Creates a provider with nobody signed in and no sign-in identity.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
            default_identity: RwLock::new(None),
            scripted: RwLock::new(VecDeque::new()),
            sign_out_error: RwLock::new(None),
            subscribe_error: RwLock::new(None),
            latency: Duration::ZERO,
            listeners: ListenerRegistry::new("mock-identity-gateway"),
            sign_in_calls: AtomicUsize::new(0),
            sign_out_calls: AtomicUsize::new(0),
        }
    }

    /// Sets the identity that un-scripted sign-in attempts return.
    pub fn with_identity(self, identity: Identity) -> Self {
        *write(&self.default_identity) = Some(identity);
        self
    }

    /// Uses a generated test identity for un-scripted sign-in attempts.
    pub fn with_test_user(self, user_id: impl Into<String>) -> Self {
        let identity = test_identity(user_id);
        self.with_identity(identity)
    }

    /// Starts with `identity` already signed in, as if the provider had
    /// restored a previous session. Listeners learn about it on the next
    /// [`announce`](Self::announce).
    pub fn with_signed_in(self, identity: Identity) -> Self {
        *write(&self.current) = Some(identity.clone());
        if read(&self.default_identity).is_none() {
            *write(&self.default_identity) = Some(identity);
        }
        self
    }

    /// Queues the result of the next sign-in attempt.
    pub fn queue_sign_in(self, result: Result<Identity, AuthError>) -> Self {
        write(&self.scripted).push_back(result);
        self
    }

    /// Makes every sign-out fail with `error`.
    pub fn with_sign_out_error(self, error: AuthError) -> Self {
        *write(&self.sign_out_error) = Some(error);
        self
    }

    /// Makes `subscribe` fail, simulating a provider that never initializes.
    pub fn with_subscribe_error(self, error: AuthError) -> Self {
        *write(&self.subscribe_error) = Some(error);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Clears a forced sign-out error.
    pub fn clear_sign_out_error(&self) {
        *write(&self.sign_out_error) = None;
    }

    /// Pushes the current identity to every listener, as the provider does
    /// once it has finished initializing.
    pub fn announce(&self) {
        let current = read(&self.current).clone();
        self.notify(current);
    }

    /// Replaces the signed-in identity and pushes it, simulating a change
    /// made outside this application (another tab, an admin action).
    pub fn push(&self, identity: Option<Identity>) {
        *write(&self.current) = identity.clone();
        self.notify(identity);
    }

    /// Drops the provider session and pushes `None`, as when a credential expires.
    pub fn expire_session(&self) {
        self.push(None);
    }

    pub fn current_identity(&self) -> Option<Identity> {
        read(&self.current).clone()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn sign_in_calls(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }

    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }

    fn notify(&self, identity: Option<Identity>) {
        let delivered = self.listeners.notify(&identity);
        debug!(
            signed_in = identity.is_some(),
            delivered, "Mock provider pushed identity change"
        );
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for MockIdentityGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityGateway for MockIdentityGateway {
    async fn sign_in_interactive(&self) -> Result<Identity, AuthError> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        let scripted = write(&self.scripted).pop_front();
        let result = match scripted {
            Some(result) => result,
            None => read(&self.default_identity).clone().ok_or_else(|| {
                AuthError::operation_not_allowed("no sign-in identity configured")
            }),
        };

        if let Ok(identity) = &result {
            self.push(Some(identity.clone()));
        }
        result
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        if let Some(error) = read(&self.sign_out_error).clone() {
            return Err(error);
        }
        self.push(None);
        Ok(())
    }

    fn subscribe(&self, listener: ProviderListener) -> Result<Subscription, AuthError> {
        if let Some(error) = read(&self.subscribe_error).clone() {
            return Err(error);
        }
        Ok(self
            .listeners
            .register(move |identity: &Option<Identity>| listener(identity.as_ref())))
    }
}

/// Builds a predictable identity for `user_id`.
///
/// # Panics
///
/// Panics if `user_id` is empty.
pub fn test_identity(user_id: impl Into<String>) -> Identity {
    let user_id = user_id.into();
    Identity::new(UserId::new(&user_id).expect("test user id must not be empty"))
        .with_display_name(format!("Test User {}", user_id))
        .with_email(format!("{}@test.example.com", user_id))
}

fn read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
