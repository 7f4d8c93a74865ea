// Lifecycle tests for `StatePoller` against a wiremock fixture.
//
// Timing bounds are deliberately loose: the assertions distinguish
// "one polling chain" from "two" and "stopped" from "still polling",
// not exact cycle counts.
#![allow(clippy::unwrap_used)]

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gatehouse_api::DoorApiClient;
use gatehouse_core::{ControllerConfig, DoorController, StatePoller};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

async fn poller_fixture(server: &MockServer) -> StatePoller {
    let body = json!({
        "links": [{ "rel": "doors", "href": format!("{}/api/doors", server.uri()) }]
    });
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(server)
        .await;

    let body = json!({
        "links": [{ "rel": "state", "href": format!("{}/api/doors/state", server.uri()) }]
    });
    Mock::given(method("GET"))
        .and(path("/api/doors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/doors/state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "state": "closed" })))
        .mount(server)
        .await;

    let api = DoorApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    let config = ControllerConfig {
        url: server.uri().parse().unwrap(),
        poll_interval: POLL_INTERVAL,
        ..ControllerConfig::default()
    };
    StatePoller::new(DoorController::from_parts(config, api))
}

async fn state_hits(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/api/doors/state")
        .count()
}

#[tokio::test]
async fn polling_updates_last_state_until_stopped() {
    let server = MockServer::start().await;
    let poller = poller_fixture(&server).await;

    poller.start().await;
    assert!(poller.is_running().await);

    tokio::time::sleep(POLL_INTERVAL * 4).await;
    poller.stop().await;
    assert!(!poller.is_running().await);

    assert!(state_hits(&server).await >= 1);
}

#[tokio::test]
async fn redundant_start_does_not_spawn_a_second_chain() {
    let server = MockServer::start().await;
    let poller = poller_fixture(&server).await;

    poller.start().await;
    poller.start().await;
    poller.start().await;

    tokio::time::sleep(POLL_INTERVAL * 6).await;
    poller.stop().await;

    // A single chain fetches roughly once per interval. Two chains
    // would double that; leave generous slack for scheduling jitter.
    let hits = state_hits(&server).await;
    assert!(hits >= 2, "expected at least 2 polls, got {hits}");
    assert!(hits <= 8, "expected a single polling chain, got {hits} polls");
}

#[tokio::test]
async fn stop_prevents_the_next_cycle() {
    let server = MockServer::start().await;
    let poller = poller_fixture(&server).await;

    poller.start().await;
    tokio::time::sleep(POLL_INTERVAL * 3).await;
    poller.stop().await;

    // An in-flight fetch may still complete; nothing new is scheduled.
    let just_after = state_hits(&server).await;
    tokio::time::sleep(POLL_INTERVAL * 6).await;
    let later = state_hits(&server).await;

    assert!(
        later <= just_after + 1,
        "polling continued after stop: {just_after} -> {later}"
    );
}

#[tokio::test]
async fn start_and_stop_are_idempotent() {
    let server = MockServer::start().await;
    let poller = poller_fixture(&server).await;

    poller.stop().await; // stop while Stopped is a no-op
    assert!(!poller.is_running().await);

    poller.start().await;
    poller.start().await;
    assert!(poller.is_running().await);

    poller.stop().await;
    poller.stop().await;
    assert!(!poller.is_running().await);

    // Restart after stop spawns a fresh chain.
    poller.start().await;
    assert!(poller.is_running().await);
    poller.stop().await;
}
