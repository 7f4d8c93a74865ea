// Integration tests for `DoorController` using wiremock.
//
// These exercise the discovery/cache contract: one discovery per empty
// cache no matter how many concurrent callers, explicit clears, the
// last-known-state retention rules, and the MissingLink taxonomy.
#![allow(clippy::unwrap_used)]

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gatehouse_api::DoorApiClient;
use gatehouse_core::{ControllerConfig, CoreError, DoorController};

// ── Helpers ─────────────────────────────────────────────────────────

fn controller_for(server: &MockServer) -> DoorController {
    let api = DoorApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    let config = ControllerConfig {
        url: server.uri().parse().unwrap(),
        ..ControllerConfig::default()
    };
    DoorController::from_parts(config, api)
}

fn link(rel: &str, server: &MockServer, path: &str) -> serde_json::Value {
    json!({ "rel": rel, "href": format!("{}{}", server.uri(), path) })
}

/// Mount the root resource with a `doors` link, expecting exactly
/// `expected_hits` fetches.
async fn mount_root(server: &MockServer, expected_hits: u64) {
    let body = json!({ "links": [link("doors", server, "/api/doors")] });
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(expected_hits)
        .mount(server)
        .await;
}

/// Mount the full entrypoint, expecting exactly `expected_hits` fetches.
async fn mount_entrypoint(server: &MockServer, expected_hits: u64) {
    let body = json!({
        "links": [
            link("state", server, "/api/doors/state"),
            link("operate", server, "/api/doors/operate"),
            link("open", server, "/api/doors/open"),
            link("close", server, "/api/doors/close"),
            link("stats", server, "/api/doors/stats"),
            link("logs", server, "/api/doors/logs"),
        ]
    });
    Mock::given(method("GET"))
        .and(path("/api/doors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(expected_hits)
        .mount(server)
        .await;
}

async fn mount_state(server: &MockServer, state: &str) {
    Mock::given(method("GET"))
        .and(path("/api/doors/state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "state": state })))
        .mount(server)
        .await;
}

/// Mount a one-shot state response; later mounts take over once this
/// one is exhausted.
async fn mount_state_once(server: &MockServer, state: &str) {
    Mock::given(method("GET"))
        .and(path("/api/doors/state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "state": state })))
        .up_to_n_times(1)
        .mount(server)
        .await;
}

// ── Discovery & cache ───────────────────────────────────────────────

#[tokio::test]
async fn discovery_happens_once_across_sequential_calls() {
    let server = MockServer::start().await;
    mount_root(&server, 1).await;
    mount_entrypoint(&server, 1).await;
    mount_state(&server, "opened").await;

    let controller = controller_for(&server);

    controller.state().await.unwrap();
    controller.state().await.unwrap();
    controller.state().await.unwrap();

    // expect(1) on root and entrypoint is verified on MockServer drop.
}

#[tokio::test]
async fn concurrent_calls_share_a_single_discovery() {
    let server = MockServer::start().await;
    mount_root(&server, 1).await;
    mount_entrypoint(&server, 1).await;
    mount_state(&server, "closed").await;

    Mock::given(method("GET"))
        .and(path("/api/doors/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "opening": { "min": 1.0, "max": 2.0, "avg": 1.5 },
            "closing": { "min": 1.0, "max": 2.0, "avg": 1.5 },
        })))
        .mount(&server)
        .await;

    let controller = controller_for(&server);

    let (a, b, c, d) = tokio::join!(
        controller.state(),
        controller.state(),
        controller.statistics(),
        controller.state(),
    );
    a.unwrap();
    b.unwrap();
    c.unwrap();
    d.unwrap();

    assert!(controller.cached_entrypoint().await.is_some());
}

#[tokio::test]
async fn clear_cache_triggers_exactly_one_fresh_discovery() {
    let server = MockServer::start().await;
    mount_root(&server, 2).await;
    mount_entrypoint(&server, 2).await;
    mount_state(&server, "opened").await;

    let controller = controller_for(&server);

    controller.state().await.unwrap();
    controller.clear_cache().await;
    assert!(controller.cached_entrypoint().await.is_none());

    controller.state().await.unwrap();
    controller.state().await.unwrap();
}

#[tokio::test]
async fn missing_doors_link_fails_and_leaves_cache_empty() {
    let server = MockServer::start().await;

    // Root without a "doors" relation; hit twice because nothing gets
    // cached on a failed discovery.
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "links": [link("other", &server, "/api/other")]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let controller = controller_for(&server);

    for _ in 0..2 {
        let err = controller.state().await.unwrap_err();
        match err {
            CoreError::MissingLink { ref rel } => assert_eq!(rel, "doors"),
            other => panic!("expected MissingLink, got: {other:?}"),
        }
        assert!(controller.cached_entrypoint().await.is_none());
    }
}

#[tokio::test]
async fn missing_operation_link_keeps_entrypoint_cached() {
    let server = MockServer::start().await;
    mount_root(&server, 1).await;

    // Entrypoint without a "stats" relation.
    Mock::given(method("GET"))
        .and(path("/api/doors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "links": [link("state", &server, "/api/doors/state")]
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_state(&server, "closed").await;

    let controller = controller_for(&server);

    let err = controller.statistics().await.unwrap_err();
    match err {
        CoreError::MissingLink { ref rel } => assert_eq!(rel, "stats"),
        other => panic!("expected MissingLink, got: {other:?}"),
    }

    // Discovery itself succeeded: the entrypoint stays cached and
    // further operations reuse it without a second discovery.
    assert!(controller.cached_entrypoint().await.is_some());
    controller.state().await.unwrap();
}

// ── Last-known state ────────────────────────────────────────────────

#[tokio::test]
async fn transitional_state_does_not_overwrite_last_settled() {
    let server = MockServer::start().await;
    mount_root(&server, 1).await;
    mount_entrypoint(&server, 1).await;

    mount_state_once(&server, "opened").await;
    mount_state_once(&server, "unknown").await;
    mount_state(&server, "closed").await;

    let controller = controller_for(&server);
    assert!(controller.last_state().is_none());

    let first = controller.state().await.unwrap();
    assert!(first.is_opened());
    assert!(controller.last_state().unwrap().is_opened());

    let second = controller.state().await.unwrap();
    assert_eq!(second.state, "unknown");
    // Unknown is transitional: the retained state is untouched.
    assert!(controller.last_state().unwrap().is_opened());

    let third = controller.state().await.unwrap();
    assert!(third.is_closed());
    assert!(controller.last_state().unwrap().is_closed());
}

#[tokio::test]
async fn state_watchers_observe_settled_updates() {
    let server = MockServer::start().await;
    mount_root(&server, 1).await;
    mount_entrypoint(&server, 1).await;
    mount_state(&server, "opened").await;

    let controller = controller_for(&server);
    let mut rx = controller.subscribe_state();

    controller.state().await.unwrap();

    rx.changed().await.unwrap();
    assert!(rx.borrow().as_ref().unwrap().is_opened());
}

// ── Operations & errors ─────────────────────────────────────────────

#[tokio::test]
async fn logs_default_to_a_fifty_entry_page() {
    let server = MockServer::start().await;
    mount_root(&server, 1).await;
    mount_entrypoint(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/api/doors/logs"))
        .and(wiremock::matchers::query_param("pageSize", "50"))
        .and(wiremock::matchers::query_param("startIndex", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "logs": [
                { "action": "open",  "timestamp": "2024-03-01T10:00:00Z" },
                { "action": "close", "timestamp": "2024-03-01T09:00:00Z" },
                { "action": "open",  "timestamp": "2024-03-01T08:00:00Z" },
            ]
        })))
        .mount(&server)
        .await;

    let controller = controller_for(&server);
    let logs = controller.logs(None, None).await.unwrap();

    assert_eq!(logs.entries.len(), 3);
    assert_eq!(logs.entries[0].action, "open");
    assert_eq!(logs.entries[2].timestamp, "2024-03-01T08:00:00Z");
}

#[tokio::test]
async fn open_resolves_the_open_relation() {
    let server = MockServer::start().await;
    mount_root(&server, 1).await;
    mount_entrypoint(&server, 1).await;

    Mock::given(method("PUT"))
        .and(path("/api/doors/open"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "action": "opening" })))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller_for(&server);
    let action = controller.open().await.unwrap();
    assert_eq!(action.action.as_deref(), Some("opening"));
}

#[tokio::test]
async fn server_error_payload_surfaces_as_remote() {
    let server = MockServer::start().await;
    mount_root(&server, 1).await;
    mount_entrypoint(&server, 1).await;

    Mock::given(method("PUT"))
        .and(path("/api/doors/operate"))
        .respond_with(ResponseTemplate::new(409).set_body_string("door is in motion"))
        .mount(&server)
        .await;

    let controller = controller_for(&server);
    let err = controller.operate().await.unwrap_err();

    match err {
        CoreError::Remote { status, ref message } => {
            assert_eq!(status, 409);
            assert_eq!(message, "door is in motion");
        }
        other => panic!("expected Remote, got: {other:?}"),
    }
}

#[tokio::test]
async fn transport_failure_surfaces_as_transport() {
    // Nothing is listening on port 1.
    let api = DoorApiClient::from_reqwest("http://127.0.0.1:1", reqwest::Client::new()).unwrap();
    let config = ControllerConfig {
        url: "http://127.0.0.1:1".parse().unwrap(),
        ..ControllerConfig::default()
    };
    let controller = DoorController::from_parts(config, api);

    let err = controller.state().await.unwrap_err();
    assert!(matches!(err, CoreError::Transport(_)));
    // Failed discovery never leaves a partial cache behind.
    assert!(controller.cached_entrypoint().await.is_none());
}
