//! Integration tests for the development shell HTTP endpoints.
//!
//! Requests go through the full router (trace and timeout layers included)
//! via `tower::ServiceExt::oneshot`.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use student_spot::adapters::http::{shell_router, ShellState};
use student_spot::adapters::identity::{test_identity, translate_provider_error};
use student_spot::adapters::{MockIdentityGateway, RecordingNavigator};
use student_spot::application::SessionStore;
use student_spot::ports::IdentityGateway;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn shell(gateway: MockIdentityGateway) -> (Router, Arc<MockIdentityGateway>) {
    let gateway = Arc::new(gateway);
    let store = SessionStore::start(gateway.as_ref());
    let state = ShellState::new(
        store,
        gateway.clone() as Arc<dyn IdentityGateway>,
        Arc::new(RecordingNavigator::new()),
    );
    (shell_router(state, Duration::from_secs(5)), gateway)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

// =============================================================================
// Session and Navigation
// =============================================================================

#[tokio::test]
async fn session_reports_initializing_until_provider_confirms() {
    let (app, gateway) = shell(MockIdentityGateway::new().with_signed_in(test_identity("m1")));

    let (status, body) = send(&app, get("/api/session")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "initializing" }));

    gateway.announce();

    let (_, body) = send(&app, get("/api/session")).await;
    assert_eq!(body["status"], "authenticated");
    assert_eq!(body["identity"]["id"], "m1");
    assert_eq!(body["identity"]["label"], "Test User m1");
    assert_eq!(body["identity"]["initial"], "T");
}

#[tokio::test]
async fn navigate_reports_guard_verdicts() {
    let (app, gateway) = shell(MockIdentityGateway::new());

    let (_, body) = send(&app, get("/api/navigate?path=/jobs")).await;
    assert_eq!(
        body,
        json!({ "route": "jobs", "kind": "guarded", "verdict": "show_loading" })
    );

    gateway.announce();

    let (status, body) = send(&app, get("/api/navigate?path=/services/mentorship/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["route"], "mentorship");
    assert_eq!(body["verdict"], "redirect");
    assert_eq!(body["target"], "/login");

    let (_, body) = send(&app, get("/api/navigate?path=/no-such-page")).await;
    assert_eq!(
        body,
        json!({ "route": "not_found", "kind": "public", "verdict": "render" })
    );
}

#[tokio::test]
async fn navigate_without_path_is_rejected() {
    let (app, _gateway) = shell(MockIdentityGateway::new());

    let response = app.clone().oneshot(get("/api/navigate")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Sign-In / Sign-Out
// =============================================================================

#[tokio::test]
async fn sign_in_returns_identity_and_landing() {
    let (app, gateway) = shell(MockIdentityGateway::new().with_test_user("m1"));
    gateway.announce();

    let (status, body) = send(&app, post("/api/auth/sign-in")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "signed_in");
    assert_eq!(body["navigate_to"], "/dashboard");
    assert_eq!(body["identity"]["id"], "m1");

    let (_, body) = send(&app, get("/api/navigate?path=/login")).await;
    assert_eq!(body["target"], "/dashboard");
}

#[tokio::test]
async fn sign_in_failure_maps_to_unauthorized_with_message() {
    let gateway = MockIdentityGateway::new().queue_sign_in(Err(translate_provider_error(
        "auth/network-request-failed",
        "offline",
    )));
    let (app, gateway) = shell(gateway);
    gateway.announce();

    let (status, body) = send(&app, post("/api/auth/sign-in")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body,
        json!({
            "code": "NETWORK_FAILURE",
            "message": "Network error. Please check your connection and try again."
        })
    );

    let (_, body) = send(&app, get("/api/session")).await;
    assert_eq!(body["status"], "anonymous");
}

#[tokio::test(start_paused = true)]
async fn overlapping_sign_in_is_a_conflict() {
    let gateway = MockIdentityGateway::new()
        .with_test_user("m1")
        .with_latency(Duration::from_millis(200));
    let (app, gateway) = shell(gateway);
    gateway.announce();

    let first = tokio::spawn(app.clone().oneshot(post("/api/auth/sign-in")));
    tokio::time::sleep(Duration::from_millis(50)).await;

    let (status, body) = send(&app, post("/api/auth/sign-in")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "SIGN_IN_IN_PROGRESS");

    let first = first.await.unwrap().unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(gateway.sign_in_calls(), 1);
}

#[tokio::test]
async fn sign_out_reports_landing_or_trivial_success() {
    let (app, gateway) = shell(MockIdentityGateway::new().with_signed_in(test_identity("m1")));
    gateway.announce();

    let (status, body) = send(&app, post("/api/auth/sign-out")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "outcome": "signed_out", "navigate_to": "/" }));

    let (status, body) = send(&app, post("/api/auth/sign-out")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "outcome": "already_signed_out" }));
    assert_eq!(gateway.sign_out_calls(), 1);
}

#[tokio::test]
async fn failed_sign_out_is_a_bad_gateway() {
    let gateway = MockIdentityGateway::new()
        .with_signed_in(test_identity("m1"))
        .with_sign_out_error(translate_provider_error("auth/network-request-failed", ""));
    let (app, gateway) = shell(gateway);
    gateway.announce();

    let (status, body) = send(&app, post("/api/auth/sign-out")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "NETWORK_FAILURE");

    let (_, body) = send(&app, get("/api/session")).await;
    assert_eq!(body["status"], "authenticated");
}

#[tokio::test]
async fn unknown_endpoint_is_not_found() {
    let (app, _gateway) = shell(MockIdentityGateway::new());

    let response = app.clone().oneshot(get("/api/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
