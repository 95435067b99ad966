//! SessionStore - the single source of truth for [`SessionState`].
//!
//! The store starts in `Initializing`, subscribes to the identity gateway,
//! and replaces its state with every provider confirmation. Nothing else
//! writes the state: UI code and the sign-in controller only read it.
//!
//! ```text
//! IdentityGateway ──push──▶ SessionStore ──notify──▶ RouteGuard / presentation
//! ```
//!
//! Cloning a `SessionStore` yields another handle to the same instance, so
//! the application builds one at start-up and injects clones into its
//! dependents. Tests build as many isolated stores as they like.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};

use tracing::{debug, info, warn};

use crate::domain::foundation::{ListenerRegistry, Subscription};
use crate::domain::session::{Identity, SessionState};
use crate::ports::IdentityGateway;

#[derive(Clone, Debug)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
    state: RwLock<SessionState>,
    listeners: ListenerRegistry<SessionState>,
    /// Provider subscription handle. Released on teardown, or when the last
    /// store handle is dropped.
    provider: Mutex<Option<Subscription>>,
    dispatch: Mutex<Dispatch>,
}

/// Notifications waiting for delivery, in write order. At most one caller
/// drains the queue at a time.
#[derive(Debug, Default)]
struct Dispatch {
    pending: VecDeque<SessionState>,
    draining: bool,
}

impl SessionStore {
    /// Creates a store that is not connected to any provider yet.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(SessionState::Initializing),
                listeners: ListenerRegistry::new("session-store"),
                provider: Mutex::new(None),
                dispatch: Mutex::new(Dispatch::default()),
            }),
        }
    }

    /// Creates a store and connects it to `gateway`.
    ///
    /// A gateway that fails to initialize leaves the store in
    /// `Initializing`, which every guarded view treats as "still loading".
    pub fn start(gateway: &dyn IdentityGateway) -> Self {
        let store = Self::new();
        store.connect(gateway);
        store
    }

    /// Registers with the gateway. Returns false if the provider rejected the
    /// subscription. Connecting an already connected store replaces the
    /// previous provider subscription.
    pub fn connect(&self, gateway: &dyn IdentityGateway) -> bool {
        let weak: Weak<StoreInner> = Arc::downgrade(&self.inner);
        let listener = Box::new(move |identity: Option<&Identity>| {
            if let Some(inner) = weak.upgrade() {
                inner.reconcile(SessionState::confirmed(identity.cloned()));
            }
        });

        match gateway.subscribe(listener) {
            Ok(subscription) => {
                let previous = self
                    .inner
                    .provider
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .replace(subscription);
                drop(previous);
                debug!("Session store subscribed to identity provider");
                true
            }
            Err(error) => {
                warn!(
                    code = error.kind.code(),
                    detail = %error.detail,
                    "Identity provider failed to initialize; session stays unresolved"
                );
                false
            }
        }
    }

    /// Returns true while the store holds a live provider subscription.
    pub fn is_connected(&self) -> bool {
        self.inner
            .provider
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Releases the provider subscription. Returns false if it was already
    /// released (or never acquired).
    pub fn teardown(&self) -> bool {
        let subscription = self
            .inner
            .provider
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match subscription {
            Some(mut subscription) => {
                subscription.unsubscribe();
                info!("Session store detached from identity provider");
                true
            }
            None => false,
        }
    }

    /// Current state. Always a fully formed value.
    pub fn snapshot(&self) -> SessionState {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_authenticated()
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .current_identity()
            .cloned()
    }

    /// Registers a listener for state changes. Listeners run synchronously,
    /// in registration order, once per replacement and in replacement order.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&SessionState) + Send + Sync + 'static,
    {
        self.inner.listeners.register(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreInner {
    /// Replaces the stored state with a provider confirmation and notifies.
    ///
    /// The replacement and its queue slot are taken under the dispatch lock,
    /// so notifications go out in write order and the last one delivered is
    /// always the current state. Listeners run with no lock held. A push
    /// arriving while another caller is delivering (from another thread, or
    /// from inside a listener) is queued and delivered by that caller.
    fn reconcile(&self, next: SessionState) {
        let mut dispatch = self.lock_dispatch();

        let previous = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *state, next.clone())
        };
        if previous == next {
            debug!(state = %next, "Provider confirmed unchanged session");
        } else {
            info!(from = %previous, to = %next, "Session state changed");
        }

        dispatch.pending.push_back(next);
        if dispatch.draining {
            return;
        }
        dispatch.draining = true;
        let mut drain = DrainGuard { inner: self, armed: true };

        loop {
            let Some(state) = dispatch.pending.pop_front() else {
                dispatch.draining = false;
                drain.armed = false;
                return;
            };
            drop(dispatch);
            self.listeners.notify(&state);
            dispatch = self.lock_dispatch();
        }
    }

    fn lock_dispatch(&self) -> MutexGuard<'_, Dispatch> {
        self.dispatch.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Resets the dispatch queue if a listener panics mid-drain, so later
/// pushes are still delivered.
struct DrainGuard<'a> {
    inner: &'a StoreInner,
    armed: bool,
}

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let mut dispatch = self.inner.lock_dispatch();
            dispatch.pending.clear();
            dispatch.draining = false;
        }
    }
}
