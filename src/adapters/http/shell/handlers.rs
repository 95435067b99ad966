//! HTTP handlers for the development shell.
//!
//! These handlers connect Axum routes to the session core.

use std::sync::Arc;

use axum::extract::{Json, Query, State};
use axum::response::{IntoResponse, Response};
use http::StatusCode;

use crate::application::{RouteGuard, SessionStore, SignInController, SignInOutcome};
use crate::ports::{IdentityGateway, Navigator};

use super::dto::{
    ErrorResponse, NavigateQuery, NavigationResponse, SessionResponse, SignInResponse,
    SignOutResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the shell: one store, and the guard and controller
/// built on it.
#[derive(Clone)]
pub struct ShellState {
    pub store: SessionStore,
    pub guard: RouteGuard,
    pub controller: Arc<SignInController>,
}

impl ShellState {
    pub fn new(
        store: SessionStore,
        gateway: Arc<dyn IdentityGateway>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            guard: RouteGuard::new(store.clone()),
            controller: Arc::new(SignInController::new(gateway, store.clone(), navigator)),
            store,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /session
pub async fn get_session(State(state): State<ShellState>) -> Json<SessionResponse> {
    Json(SessionResponse::from(&state.store.snapshot()))
}

/// GET /navigate?path=...
pub async fn navigate(
    State(state): State<ShellState>,
    Query(query): Query<NavigateQuery>,
) -> Json<NavigationResponse> {
    let (route, verdict) = state.guard.check_path(&query.path);
    Json(NavigationResponse::new(route, verdict))
}

/// POST /auth/sign-in
pub async fn sign_in(State(state): State<ShellState>) -> Response {
    match state.controller.sign_in().await {
        SignInOutcome::SignedIn { identity, landing } => (
            StatusCode::OK,
            Json(SignInResponse::signed_in(&identity, landing)),
        )
            .into_response(),
        SignInOutcome::AlreadySubmitting => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::new(
                "SIGN_IN_IN_PROGRESS",
                "A sign-in attempt is already in progress",
            )),
        )
            .into_response(),
        SignInOutcome::Failed(failure) => {
            (StatusCode::UNAUTHORIZED, Json(ErrorResponse::from(&failure))).into_response()
        }
    }
}

/// POST /auth/sign-out
pub async fn sign_out(State(state): State<ShellState>) -> Response {
    match state.controller.sign_out().await {
        Ok(outcome) => (StatusCode::OK, Json(SignOutResponse::from(outcome))).into_response(),
        Err(error) => (StatusCode::BAD_GATEWAY, Json(ErrorResponse::from(&error))).into_response(),
    }
}
