//! Ordered listener registry with RAII subscription handles.
//!
//! Every push-style interface in the crate (the identity provider's state
//! notifications, the session store's change notifications) is built on
//! [`ListenerRegistry`]. Listeners are invoked synchronously, in
//! registration order, with the lock released so a listener may read
//! state, subscribe, or unsubscribe without deadlocking.
//!
//! # Example
//!
//! ```
//! use student_spot::domain::foundation::ListenerRegistry;
//!
//! let registry: ListenerRegistry<u32> = ListenerRegistry::new("example");
//! let mut subscription = registry.register(|value| println!("got {value}"));
//!
//! assert_eq!(registry.notify(&7), 1);
//! assert!(subscription.unsubscribe());
//! assert_eq!(registry.notify(&8), 0);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

use tracing::debug;

use super::ListenerId;

/// A registered callback.
pub type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Entry<T> {
    id: ListenerId,
    /// Cleared before the entry is removed, so an in-flight dispatch that
    /// already cloned the entry skips it.
    active: Arc<AtomicBool>,
    listener: Listener<T>,
}

impl<T> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            active: Arc::clone(&self.active),
            listener: Arc::clone(&self.listener),
        }
    }
}

type Entries<T> = RwLock<Vec<Entry<T>>>;

/// Ordered collection of listeners for values of type `T`.
///
/// Cloning yields another handle to the same registry.
pub struct ListenerRegistry<T> {
    entries: Arc<Entries<T>>,
    group: &'static str,
}

impl<T: 'static> ListenerRegistry<T> {
    /// Creates an empty registry. `group` only labels log lines.
    pub fn new(group: &'static str) -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            group,
        }
    }

    /// Registers a listener and returns the handle that removes it.
    pub fn register<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = ListenerId::new();
        let active = Arc::new(AtomicBool::new(true));
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Entry {
                id,
                active: Arc::clone(&active),
                listener: Arc::new(listener),
            });

        debug!(listener_id = %id, group = self.group, "Registered listener");

        let entries: Weak<Entries<T>> = Arc::downgrade(&self.entries);
        let group = self.group;
        Subscription::new(id, move || {
            active.store(false, Ordering::Release);
            let Some(entries) = entries.upgrade() else {
                return;
            };
            let mut entries = entries.write().unwrap_or_else(PoisonError::into_inner);
            let before = entries.len();
            entries.retain(|entry| entry.id != id);
            if entries.len() < before {
                debug!(listener_id = %id, group, "Unregistered listener");
            }
        })
    }

    /// Invokes every listener registered at call time, in registration order.
    /// A listener unsubscribed by an earlier one during the same dispatch is
    /// skipped.
    ///
    /// Returns the number of listeners invoked.
    pub fn notify(&self, value: &T) -> usize {
        let entries: Vec<Entry<T>> = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let mut invoked = 0;
        for entry in &entries {
            if !entry.active.load(Ordering::Acquire) {
                continue;
            }
            (entry.listener)(value);
            invoked += 1;
        }
        invoked
    }

    /// Number of currently registered listeners.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Clone for ListenerRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            group: self.group,
        }
    }
}

impl<T> fmt::Debug for ListenerRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("group", &self.group)
            .finish_non_exhaustive()
    }
}

/// Handle to a registered listener.
///
/// Unsubscribing is idempotent, and dropping the handle unsubscribes. Once
/// [`unsubscribe`](Self::unsubscribe) returns, no later notification reaches
/// the listener.
#[must_use = "dropping a Subscription unregisters its listener"]
pub struct Subscription {
    id: ListenerId,
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    fn new(id: ListenerId, release: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            id,
            release: Some(Box::new(release)),
        }
    }

    /// Id of the listener this handle controls.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Returns true while the listener is still registered through this handle.
    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    /// Removes the listener. Returns false if this handle was already released.
    pub fn unsubscribe(&mut self) -> bool {
        match self.release.take() {
            Some(release) => {
                release();
                true
            }
            None => false,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
