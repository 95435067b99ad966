//! Integration tests for the session core.
//!
//! These tests wire the store, guard and controller to the in-memory
//! identity provider and drive them the way a browser session does.

use std::sync::{Arc, Mutex};

use proptest::prelude::*;

use student_spot::adapters::identity::{test_identity, translate_provider_error};
use student_spot::adapters::{MockIdentityGateway, RecordingNavigator};
use student_spot::application::{
    RouteGuard, SessionStore, SignInController, SignInOutcome, SignOutOutcome,
};
use student_spot::domain::access::{Route, Verdict};
use student_spot::domain::session::{AuthErrorKind, SessionState};
use student_spot::ports::IdentityGateway;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct App {
    gateway: Arc<MockIdentityGateway>,
    store: SessionStore,
    guard: RouteGuard,
    navigator: Arc<RecordingNavigator>,
    controller: SignInController,
}

impl App {
    fn start(gateway: MockIdentityGateway) -> Self {
        let gateway = Arc::new(gateway);
        let store = SessionStore::start(gateway.as_ref());
        let navigator = Arc::new(RecordingNavigator::new());
        let controller = SignInController::new(
            gateway.clone() as Arc<dyn IdentityGateway>,
            store.clone(),
            navigator.clone(),
        );
        Self {
            guard: RouteGuard::new(store.clone()),
            gateway,
            store,
            navigator,
            controller,
        }
    }

    /// Started and confirmed anonymous.
    fn anonymous() -> Self {
        let app = Self::start(MockIdentityGateway::new().with_test_user("member-1"));
        app.gateway.announce();
        app
    }
}

// =============================================================================
// Guard Scenarios
// =============================================================================

#[tokio::test]
async fn anonymous_visitor_is_sent_to_login_from_guarded_routes() {
    let app = App::anonymous();

    for route in Route::ALL.into_iter().filter(|r| r.is_guarded()) {
        assert_eq!(app.guard.check(route), Verdict::Redirect(Route::Login));
    }
    assert_eq!(app.guard.check(Route::Home), Verdict::Render);
    assert_eq!(app.guard.check(Route::Login), Verdict::Render);
}

#[tokio::test]
async fn signed_in_member_is_sent_from_login_to_dashboard() {
    let app = App::start(MockIdentityGateway::new().with_signed_in(test_identity("member-1")));
    app.gateway.announce();

    assert_eq!(app.guard.check(Route::Login), Verdict::Redirect(Route::Dashboard));
    assert_eq!(app.guard.check(Route::Jobs), Verdict::Render);
}

#[tokio::test]
async fn guarded_routes_wait_for_the_first_confirmation() {
    let app = App::start(MockIdentityGateway::new().with_signed_in(test_identity("member-1")));

    assert_eq!(app.store.snapshot(), SessionState::Initializing);
    assert_eq!(app.guard.check(Route::Dashboard), Verdict::ShowLoading);
    assert_eq!(app.guard.check(Route::About), Verdict::Render);

    app.gateway.announce();
    assert_eq!(app.guard.check(Route::Dashboard), Verdict::Render);
}

#[tokio::test]
async fn provider_that_never_initializes_keeps_guarded_routes_loading() {
    let gateway = MockIdentityGateway::new()
        .with_subscribe_error(translate_provider_error("auth/internal-error", "boom"));
    let app = App::start(gateway);

    app.gateway.announce();
    assert!(!app.store.is_connected());
    assert_eq!(app.guard.check(Route::Events), Verdict::ShowLoading);
}

#[tokio::test]
async fn mounted_guarded_view_redirects_when_session_expires() {
    let app = App::start(MockIdentityGateway::new().with_signed_in(test_identity("member-1")));
    app.gateway.announce();

    let verdicts = Arc::new(Mutex::new(Vec::new()));
    let sink = verdicts.clone();
    let _view = app
        .guard
        .watch(Route::Resources, move |v| sink.lock().unwrap().push(v));

    app.gateway.expire_session();

    assert_eq!(
        *verdicts.lock().unwrap(),
        vec![Verdict::Redirect(Route::Login)]
    );
}

#[tokio::test]
async fn removed_listener_is_not_called_on_later_pushes() {
    let app = App::anonymous();
    let calls = Arc::new(Mutex::new(0));
    let counter = calls.clone();

    let mut subscription = app.store.subscribe(move |_| *counter.lock().unwrap() += 1);
    app.gateway.push(Some(test_identity("member-1")));
    assert!(subscription.unsubscribe());
    assert!(!subscription.unsubscribe());

    app.gateway.push(None);
    app.gateway.push(Some(test_identity("member-2")));

    assert_eq!(*calls.lock().unwrap(), 1);
    assert_eq!(app.store.listener_count(), 0);
}

// =============================================================================
// Sign-In / Sign-Out Flows
// =============================================================================

#[tokio::test]
async fn popup_blocked_reports_message_and_allows_retry() {
    let gateway = MockIdentityGateway::new()
        .with_test_user("member-1")
        .queue_sign_in(Err(translate_provider_error(
            "auth/popup-blocked",
            "Popup blocked by browser",
        )));
    let app = App::start(gateway);
    app.gateway.announce();

    match app.controller.sign_in().await {
        SignInOutcome::Failed(failure) => {
            assert_eq!(failure.kind, AuthErrorKind::PopupBlocked);
            assert_eq!(
                failure.message,
                "Popup was blocked. Please allow popups and try again."
            );
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(!app.controller.is_submitting());
    assert!(app.store.snapshot().is_anonymous());
    assert!(app.navigator.history().is_empty());

    let retry = app.controller.sign_in().await;
    assert!(matches!(retry, SignInOutcome::SignedIn { .. }));
    assert!(app.store.is_authenticated());
}

#[tokio::test]
async fn unrecognized_provider_code_collapses_to_unknown() {
    let gateway = MockIdentityGateway::new().queue_sign_in(Err(translate_provider_error(
        "auth/too-many-requests",
        "slow down",
    )));
    let app = App::start(gateway);
    app.gateway.announce();

    match app.controller.sign_in().await {
        SignInOutcome::Failed(failure) => {
            assert_eq!(failure.kind, AuthErrorKind::Unknown);
            assert_eq!(failure.message, "Login failed. Please try again.");
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn sign_in_sign_out_sign_in_round_trip() {
    let gateway = MockIdentityGateway::new()
        .queue_sign_in(Ok(test_identity("member-1")))
        .queue_sign_in(Ok(test_identity("member-2")));
    let app = App::start(gateway);
    app.gateway.announce();

    let first = app.controller.sign_in().await;
    assert!(matches!(first, SignInOutcome::SignedIn { .. }));
    assert_eq!(
        app.store.current_identity().map(|i| i.id.to_string()),
        Some("member-1".to_string())
    );
    assert!(!app.controller.is_submitting());

    let out = app.controller.sign_out().await.unwrap();
    assert_eq!(out, SignOutOutcome::SignedOut { landing: Route::Home });
    assert_eq!(app.store.snapshot(), SessionState::Anonymous);
    assert_eq!(app.guard.check(Route::Dashboard), Verdict::Redirect(Route::Login));

    let second = app.controller.sign_in().await;
    assert!(matches!(second, SignInOutcome::SignedIn { .. }));
    assert_eq!(
        app.store.current_identity().map(|i| i.id.to_string()),
        Some("member-2".to_string())
    );
    assert!(!app.controller.is_submitting());

    assert_eq!(
        app.navigator.history(),
        vec![Route::Dashboard, Route::Home, Route::Dashboard]
    );
}

#[tokio::test]
async fn sign_out_while_anonymous_has_no_side_effects() {
    let app = App::anonymous();

    let first = app.controller.sign_out().await.unwrap();
    let second = app.controller.sign_out().await.unwrap();

    assert_eq!(first, SignOutOutcome::AlreadySignedOut);
    assert_eq!(second, SignOutOutcome::AlreadySignedOut);
    assert_eq!(app.gateway.sign_out_calls(), 0);
    assert!(app.navigator.history().is_empty());
    assert_eq!(app.store.snapshot(), SessionState::Anonymous);
}

#[tokio::test]
async fn teardown_releases_the_provider_subscription() {
    let app = App::anonymous();
    assert_eq!(app.gateway.listener_count(), 1);

    assert!(app.store.teardown());
    assert!(!app.store.teardown());
    assert_eq!(app.gateway.listener_count(), 0);

    app.gateway.push(Some(test_identity("member-1")));
    assert_eq!(app.store.snapshot(), SessionState::Anonymous);
}

// =============================================================================
// Invariants
// =============================================================================

fn push_sequence() -> impl Strategy<Value = Vec<Option<u8>>> {
    prop::collection::vec(prop::option::of(0u8..4), 0..24)
}

proptest! {
    #[test]
    fn identity_is_present_exactly_when_authenticated(pushes in push_sequence()) {
        let gateway = Arc::new(MockIdentityGateway::new());
        let store = SessionStore::start(gateway.as_ref());
        let observed = Arc::new(Mutex::new(Vec::new()));
        let sink = observed.clone();
        let _sub = store.subscribe(move |state| sink.lock().unwrap().push(state.clone()));

        for push in &pushes {
            gateway.push(push.map(|n| test_identity(format!("member-{}", n))));
            let state = store.snapshot();
            prop_assert_eq!(state.current_identity().is_some(), state.is_authenticated());
            prop_assert!(state.is_resolved());
        }

        for state in observed.lock().unwrap().iter() {
            prop_assert_eq!(state.current_identity().is_some(), state.is_authenticated());
            prop_assert_ne!(state, &SessionState::Initializing);
        }
    }
}
