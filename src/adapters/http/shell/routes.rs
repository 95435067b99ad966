//! Axum router configuration for the development shell.

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{get_session, navigate, sign_in, sign_out, ShellState};

/// Shell API routes.
///
/// # Routes
/// - `GET /session` - Current session status
/// - `GET /navigate?path=` - Guard verdict for a path
/// - `POST /auth/sign-in` - Interactive sign-in
/// - `POST /auth/sign-out` - Sign-out
pub fn shell_routes() -> Router<ShellState> {
    Router::new()
        .route("/session", get(get_session))
        .route("/navigate", get(navigate))
        .route("/auth/sign-in", post(sign_in))
        .route("/auth/sign-out", post(sign_out))
}

/// Complete shell router mounted at `/api`, with tracing and a request timeout.
pub fn shell_router(state: ShellState, request_timeout: Duration) -> Router {
    Router::new()
        .nest("/api", shell_routes())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
