//! End-to-end gate flows against a loopback decision backend.
//!
//! These drive the real `DecisionClient` over HTTP and the in-memory host
//! doubles, covering the full login → decision → action sequence.

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;

use dex50_backend::BackendConfig;
use dex50_core::{Account, Domain};
use dex50_gate::{GateConfig, GateOutcome, LoginGate, RemovalOutcome};
use dex50_host::{BufferedResponse, LoginEvent, MemoryUserStore, RecordingSession, ResponseChannel};

struct TestBackend {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestBackend {
    async fn spawn(router: Router) -> Self {
        dex50_observability::init();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/check", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn gate(&self) -> LoginGate {
        let config = GateConfig {
            backend: BackendConfig::default()
                .with_base_url(&self.base_url)
                .with_retries(0, Duration::from_millis(1)),
            hard_delete: true,
        };
        LoginGate::from_config(config).unwrap()
    }
}

impl Drop for TestBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn fixed_body(body: &'static str) -> Router {
    Router::new().route("/check", get(move || async move { (StatusCode::OK, body) }))
}

#[tokio::test]
async fn allowed_login_proceeds_silently() {
    let srv = TestBackend::spawn(fixed_body(r#"{"allow":true}"#)).await;
    let gate = srv.gate();

    let account = Account::new("u-alice").with_email("alice@x.com");
    let mut store = MemoryUserStore::new().with_account(account.clone());
    let mut session = RecordingSession::new();
    let mut response = BufferedResponse::new();
    let mut event = LoginEvent::new(
        account,
        Domain::new("acme"),
        Some(&mut session),
        &mut response,
    );

    let outcome = gate.handle_login(&mut store, &mut event).await;

    assert!(matches!(outcome, GateOutcome::Allowed { .. }));
    assert!(store.contains("u-alice"));
    assert!(!session.is_invalidated());
    assert!(!response.is_committed());
}

#[tokio::test]
async fn denied_login_is_purged_and_gets_403() {
    let srv = TestBackend::spawn(fixed_body(r#"{"allow":false,"reason":"suspended"}"#)).await;
    let gate = srv.gate();

    let account = Account::new("u-bob").with_email("bob@x.com");
    let mut store = MemoryUserStore::new().with_account(account.clone());
    let mut session = RecordingSession::new();
    let mut response = BufferedResponse::new();
    let mut event = LoginEvent::new(
        account,
        Domain::new("acme"),
        Some(&mut session),
        &mut response,
    );

    let outcome = gate.handle_login(&mut store, &mut event).await;

    let GateOutcome::Denied { reason, removal } = outcome else {
        panic!("expected denial");
    };
    assert_eq!(reason, "suspended");
    assert!(removal.unwrap().account_is_gone());
    assert!(!store.contains("u-bob"));
    assert!(session.is_invalidated());
    assert_eq!(response.status(), Some(403));
    assert_eq!(response.content_type(), Some("text/plain"));
    assert_eq!(response.body(), Some("Access denied by DEX50: suspended"));
}

#[tokio::test]
async fn backend_500_maps_to_validation_error() {
    let router = Router::new().route(
        "/check",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let srv = TestBackend::spawn(router).await;
    let gate = srv.gate();

    let account = Account::new("u-carol").with_email("carol@x.com");
    let mut store = MemoryUserStore::new().with_account(account.clone());
    let mut response = BufferedResponse::new();
    let mut event = LoginEvent::new(account, Domain::new("acme"), None, &mut response);

    let outcome = gate.handle_login(&mut store, &mut event).await;

    assert!(outcome.is_denied());
    assert!(store.contains("u-carol"), "no removal on backend errors");
    assert_eq!(
        response.body(),
        Some("Access denied by DEX50: Validation error")
    );
}

#[tokio::test]
async fn unreachable_backend_fails_closed() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    dex50_observability::init();
    let config = GateConfig {
        backend: BackendConfig::default()
            .with_base_url(format!("http://{}/check", addr))
            .with_retries(0, Duration::from_millis(1)),
        hard_delete: true,
    };
    let gate = LoginGate::from_config(config).unwrap();

    let account = Account::new("u-dave").with_email("dave@x.com");
    let mut store = MemoryUserStore::new().with_account(account.clone());
    let mut response = BufferedResponse::new();
    let mut event = LoginEvent::new(account, Domain::new("acme"), None, &mut response);

    let outcome = gate.handle_login(&mut store, &mut event).await;

    assert!(outcome.is_denied());
    assert!(store.contains("u-dave"), "no removal on backend errors");
    assert_eq!(
        response.body(),
        Some("Access denied by DEX50: Validation error")
    );
}

#[tokio::test]
async fn unparsable_body_fails_closed() {
    let srv = TestBackend::spawn(fixed_body("<html>maintenance</html>")).await;
    let gate = srv.gate();

    let account = Account::new("u-eve").with_email("eve@x.com");
    let mut store = MemoryUserStore::new().with_account(account.clone());
    let mut response = BufferedResponse::new();
    let mut event = LoginEvent::new(account, Domain::new("acme"), None, &mut response);

    let outcome = gate.handle_login(&mut store, &mut event).await;

    assert!(outcome.is_denied());
    assert!(store.contains("u-eve"));
    assert_eq!(
        response.body(),
        Some("Access denied by DEX50: Validation error")
    );
}

#[tokio::test]
async fn name_fallback_is_used_for_accounts_without_email() {
    // The handler denies only the identity "legacy-user" to show the query
    // carries the name fallback.
    let router = Router::new().route(
        "/check",
        get(
            |axum::extract::Query(params): axum::extract::Query<
                std::collections::HashMap<String, String>,
            >| async move {
                let body = if params.get("email").map(String::as_str) == Some("legacy-user") {
                    r#"{"allow":false,"reason":"legacy accounts retired"}"#
                } else {
                    r#"{"allow":true}"#
                };
                (StatusCode::OK, body)
            },
        ),
    );
    let srv = TestBackend::spawn(router).await;
    let gate = srv.gate();

    let account = Account::new("u-legacy").with_name("legacy-user");
    let mut store = MemoryUserStore::new().with_account(account.clone());
    let mut response = BufferedResponse::new();
    let mut event = LoginEvent::new(account, Domain::new("acme"), None, &mut response);

    let outcome = gate.handle_login(&mut store, &mut event).await;

    assert!(outcome.is_denied());
    assert_eq!(
        response.body(),
        Some("Access denied by DEX50: legacy accounts retired")
    );
}

#[tokio::test]
async fn repeated_denial_is_idempotent_end_to_end() {
    let srv = TestBackend::spawn(fixed_body(r#"{"allow":false,"reason":"suspended"}"#)).await;
    let gate = srv.gate();

    let account = Account::new("u-frank").with_email("frank@x.com");
    let mut store = MemoryUserStore::new().with_account(account.clone());

    let mut first_response = BufferedResponse::new();
    let mut first = LoginEvent::new(
        account.clone(),
        Domain::new("acme"),
        None,
        &mut first_response,
    );
    gate.handle_login(&mut store, &mut first).await;
    assert!(!store.contains("u-frank"));

    let mut second_response = BufferedResponse::new();
    let mut second = LoginEvent::new(account, Domain::new("acme"), None, &mut second_response);
    let outcome = gate.handle_login(&mut store, &mut second).await;

    let GateOutcome::Denied { removal, .. } = outcome else {
        panic!("expected denial");
    };
    assert_eq!(removal, Some(RemovalOutcome::AlreadyAbsent));
    assert_eq!(second_response.status(), Some(403));
}
