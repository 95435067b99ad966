//! SignInController - one interactive sign-in (or sign-out) at a time.
//!
//! The controller never writes session state. A successful provider call is
//! reflected in the [`SessionStore`] through the provider's own push
//! notification; the controller only requests the follow-up navigation and
//! turns failures into visitor-facing messages.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use super::SessionStore;
use crate::domain::access::Route;
use crate::domain::session::{AuthError, AuthErrorKind, Identity, SessionState};
use crate::ports::{IdentityGateway, Navigator};

/// Where the visitor lands after a successful sign-in.
pub const SIGN_IN_LANDING: Route = Route::Dashboard;

/// Where the visitor lands after signing out.
pub const SIGN_OUT_LANDING: Route = Route::Home;

/// Result of a sign-in attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    SignedIn { identity: Identity, landing: Route },
    /// Another attempt was already in flight; nothing was done.
    AlreadySubmitting,
    Failed(SignInFailure),
}

/// A failed attempt, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInFailure {
    pub kind: AuthErrorKind,
    pub message: &'static str,
}

impl From<&AuthError> for SignInFailure {
    fn from(error: &AuthError) -> Self {
        Self {
            kind: error.kind,
            message: error.user_message(),
        }
    }
}

/// Result of a successful sign-out request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOutOutcome {
    SignedOut { landing: Route },
    /// Nobody was signed in; the provider was not called.
    AlreadySignedOut,
}

pub struct SignInController {
    gateway: Arc<dyn IdentityGateway>,
    store: SessionStore,
    navigator: Arc<dyn Navigator>,
    submitting: AtomicBool,
}

impl SignInController {
    pub fn new(
        gateway: Arc<dyn IdentityGateway>,
        store: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            gateway,
            store,
            navigator,
            submitting: AtomicBool::new(false),
        }
    }

    /// True while an interactive sign-in is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Runs one interactive sign-in attempt.
    pub async fn sign_in(&self) -> SignInOutcome {
        let Some(_submitting) = SubmittingGuard::acquire(&self.submitting) else {
            return SignInOutcome::AlreadySubmitting;
        };

        match self.gateway.sign_in_interactive().await {
            Ok(identity) => {
                info!(user_id = %identity.id, "Interactive sign-in succeeded");
                self.navigator.navigate(SIGN_IN_LANDING);
                SignInOutcome::SignedIn {
                    identity,
                    landing: SIGN_IN_LANDING,
                }
            }
            Err(error) => {
                warn!(
                    code = error.kind.code(),
                    detail = %error.detail,
                    "Interactive sign-in failed"
                );
                SignInOutcome::Failed(SignInFailure::from(&error))
            }
        }
    }

    /// Signs out. A visitor who is already anonymous succeeds without any
    /// provider call or navigation.
    pub async fn sign_out(&self) -> Result<SignOutOutcome, AuthError> {
        if self.store.snapshot() == SessionState::Anonymous {
            return Ok(SignOutOutcome::AlreadySignedOut);
        }

        self.gateway.sign_out().await.map_err(|error| {
            warn!(code = error.kind.code(), detail = %error.detail, "Sign-out failed");
            error
        })?;

        info!("Signed out");
        self.navigator.navigate(SIGN_OUT_LANDING);
        Ok(SignOutOutcome::SignedOut {
            landing: SIGN_OUT_LANDING,
        })
    }
}

/// Holds the submitting flag; clears it on drop, including on unwind and
/// when the sign-in future is dropped mid-flight.
struct SubmittingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> SubmittingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
