//! HTTP DTOs (Data Transfer Objects) for the development shell.
//!
//! These types define the JSON shape the browser-side router consumes.

use serde::{Deserialize, Serialize};

use crate::application::{SignInFailure, SignOutOutcome};
use crate::domain::access::{Route, RouteKind, Verdict};
use crate::domain::session::{AuthError, Identity, SessionState};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Query for a navigation decision.
#[derive(Debug, Clone, Deserialize)]
pub struct NavigateQuery {
    /// Requested path, e.g. `/dashboard`.
    pub path: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Signed-in person, with display helpers precomputed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdentityResponse {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub avatar_uri: Option<String>,
    /// Name to show in navigation.
    pub label: String,
    /// Avatar placeholder letter.
    pub initial: Option<String>,
}

impl From<&Identity> for IdentityResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.to_string(),
            display_name: identity.display_name.clone(),
            email: identity.email.clone(),
            avatar_uri: identity.avatar_uri.clone(),
            label: identity.label().to_string(),
            initial: identity.initial().map(String::from),
        }
    }
}

/// Current session status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionResponse {
    /// `initializing`, `anonymous` or `authenticated`.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<IdentityResponse>,
}

impl From<&SessionState> for SessionResponse {
    fn from(state: &SessionState) -> Self {
        Self {
            status: state.status_name().to_string(),
            identity: state.current_identity().map(IdentityResponse::from),
        }
    }
}

/// Guard decision for one navigation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavigationResponse {
    pub route: Route,
    pub kind: RouteKind,
    /// `render`, `show_loading` or `redirect`.
    pub verdict: String,
    /// Redirect path, present only for `redirect`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl NavigationResponse {
    pub fn new(route: Route, verdict: Verdict) -> Self {
        let name = match verdict {
            Verdict::Render => "render",
            Verdict::ShowLoading => "show_loading",
            Verdict::Redirect(_) => "redirect",
        };
        Self {
            route,
            kind: route.kind(),
            verdict: name.to_string(),
            target: verdict.redirect_target().map(|r| r.path().to_string()),
        }
    }
}

/// Successful sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignInResponse {
    pub outcome: String,
    pub navigate_to: String,
    pub identity: IdentityResponse,
}

impl SignInResponse {
    pub fn signed_in(identity: &Identity, landing: Route) -> Self {
        Self {
            outcome: "signed_in".to_string(),
            navigate_to: landing.path().to_string(),
            identity: IdentityResponse::from(identity),
        }
    }
}

/// Sign-out result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignOutResponse {
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigate_to: Option<String>,
}

impl From<SignOutOutcome> for SignOutResponse {
    fn from(outcome: SignOutOutcome) -> Self {
        match outcome {
            SignOutOutcome::SignedOut { landing } => Self {
                outcome: "signed_out".to_string(),
                navigate_to: Some(landing.path().to_string()),
            },
            SignOutOutcome::AlreadySignedOut => Self {
                outcome: "already_signed_out".to_string(),
                navigate_to: None,
            },
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&SignInFailure> for ErrorResponse {
    fn from(failure: &SignInFailure) -> Self {
        Self::new(failure.kind.code(), failure.message)
    }
}

impl From<&AuthError> for ErrorResponse {
    fn from(error: &AuthError) -> Self {
        Self::new(error.kind.code(), error.user_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::session::AuthErrorKind;
    use serde_json::json;

    fn identity() -> Identity {
        Identity::new(UserId::new("u1").unwrap()).with_email("ada@example.com")
    }

    #[test]
    fn session_response_omits_identity_when_anonymous() {
        let response = SessionResponse::from(&SessionState::Anonymous);
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({ "status": "anonymous" })
        );
    }

    #[test]
    fn session_response_includes_label_and_initial() {
        let response = SessionResponse::from(&SessionState::Authenticated(identity()));
        let identity = response.identity.unwrap();
        assert_eq!(identity.label, "ada@example.com");
        assert_eq!(identity.initial.as_deref(), Some("A"));
    }

    #[test]
    fn navigation_response_carries_target_path() {
        let response = NavigationResponse::new(Route::Jobs, Verdict::Redirect(Route::Login));
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({ "route": "jobs", "kind": "guarded", "verdict": "redirect", "target": "/login" })
        );
    }

    #[test]
    fn sign_out_response_for_trivial_sign_out() {
        let response = SignOutResponse::from(SignOutOutcome::AlreadySignedOut);
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({ "outcome": "already_signed_out" })
        );
    }

    #[test]
    fn error_response_uses_user_message() {
        let response = ErrorResponse::from(&AuthError::popup_closed_by_user("closed"));
        assert_eq!(response.code, "POPUP_CLOSED_BY_USER");
        assert_eq!(response.message, AuthErrorKind::PopupClosedByUser.user_message());
    }
}
