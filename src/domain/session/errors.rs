//! Sign-in and sign-out failure taxonomy.
//!
//! Provider-specific errors are collapsed into [`AuthErrorKind`] at the
//! gateway boundary. Every kind is recoverable: the user may always retry.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Fixed set of identity-provider failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthErrorKind {
    /// The browser refused to open the provider popup.
    PopupBlocked,
    /// The user dismissed the provider popup.
    PopupClosedByUser,
    /// The site's domain is not registered with the provider.
    UnauthorizedDomain,
    /// The sign-in method is disabled on the provider side.
    OperationNotAllowed,
    /// The provider could not be reached.
    NetworkFailure,
    /// Any provider error without a more specific kind.
    Unknown,
}

impl AuthErrorKind {
    /// Every kind, in declaration order.
    pub const ALL: [AuthErrorKind; 6] = [
        AuthErrorKind::PopupBlocked,
        AuthErrorKind::PopupClosedByUser,
        AuthErrorKind::UnauthorizedDomain,
        AuthErrorKind::OperationNotAllowed,
        AuthErrorKind::NetworkFailure,
        AuthErrorKind::Unknown,
    ];

    /// Message shown to the visitor for this kind of failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthErrorKind::PopupBlocked => "Popup was blocked. Please allow popups and try again.",
            AuthErrorKind::PopupClosedByUser => "Sign-in was cancelled. Please try again.",
            AuthErrorKind::UnauthorizedDomain => {
                "This domain is not authorized. Please contact support."
            }
            AuthErrorKind::OperationNotAllowed => {
                "Google sign-in is not enabled. Please contact support."
            }
            AuthErrorKind::NetworkFailure => {
                "Network error. Please check your connection and try again."
            }
            AuthErrorKind::Unknown => "Login failed. Please try again.",
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            AuthErrorKind::PopupBlocked => "POPUP_BLOCKED",
            AuthErrorKind::PopupClosedByUser => "POPUP_CLOSED_BY_USER",
            AuthErrorKind::UnauthorizedDomain => "UNAUTHORIZED_DOMAIN",
            AuthErrorKind::OperationNotAllowed => "OPERATION_NOT_ALLOWED",
            AuthErrorKind::NetworkFailure => "NETWORK_FAILURE",
            AuthErrorKind::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for AuthErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A failed identity-provider call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {detail}")]
pub struct AuthError {
    pub kind: AuthErrorKind,
    /// Provider-supplied description, kept for logs only.
    pub detail: String,
}

impl AuthError {
    pub fn new(kind: AuthErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn popup_blocked(detail: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::PopupBlocked, detail)
    }

    pub fn popup_closed_by_user(detail: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::PopupClosedByUser, detail)
    }

    pub fn unauthorized_domain(detail: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::UnauthorizedDomain, detail)
    }

    pub fn operation_not_allowed(detail: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::OperationNotAllowed, detail)
    }

    pub fn network_failure(detail: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::NetworkFailure, detail)
    }

    pub fn unknown(detail: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::Unknown, detail)
    }

    /// Message shown to the visitor.
    pub fn user_message(&self) -> &'static str {
        self.kind.user_message()
    }

    /// Returns true when the user backed out rather than the provider failing.
    pub fn is_user_cancellation(&self) -> bool {
        self.kind == AuthErrorKind::PopupClosedByUser
    }
}
