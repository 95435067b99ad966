//! RouteGuard - applies the pure [`decide`] rule to the live session.
//!
//! The router calls [`RouteGuard::check`] on every navigation. A mounted
//! guarded view calls [`RouteGuard::watch`] so a session that expires while
//! it is on screen produces a redirect without any user action.

use tracing::debug;

use super::SessionStore;
use crate::domain::access::{decide, Route, Verdict};
use crate::domain::foundation::Subscription;

#[derive(Clone, Debug)]
pub struct RouteGuard {
    store: SessionStore,
}

impl RouteGuard {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// Verdict for navigating to `route` right now.
    ///
    /// `ShowLoading` is left to the caller to render; the guard only promises
    /// that neither the guarded view nor a redirect happens before the
    /// provider has answered.
    pub fn check(&self, route: Route) -> Verdict {
        let verdict = decide(route.kind(), &self.store.snapshot());
        debug!(route = %route, ?verdict, "Route guard decision");
        verdict
    }

    /// Resolves `path` and returns the route together with its verdict.
    pub fn check_path(&self, path: &str) -> (Route, Verdict) {
        let route = Route::from_path(path);
        (route, self.check(route))
    }

    /// Re-evaluates `route` on every session change and reports the verdict.
    ///
    /// The callback fires for each change, not for the current state; pair it
    /// with [`check`](Self::check) for the initial render.
    pub fn watch<F>(&self, route: Route, on_verdict: F) -> Subscription
    where
        F: Fn(Verdict) + Send + Sync + 'static,
    {
        self.store.subscribe(move |state| {
            let verdict = decide(route.kind(), state);
            debug!(route = %route, ?verdict, "Route guard re-evaluated");
            on_verdict(verdict);
        })
    }
}
