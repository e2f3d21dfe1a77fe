//! Shared test utilities: canned list-service responses served by a
//! `wiremock` mock server.
//!
//! Every mock server records the requests it sees, so tests can check what
//! was fetched and how often.

#![allow(dead_code)]

use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const HOME_JSON: &str = r#"{
    "lists": [
        {"name": "Old", "template_id": 1, "creation_time": 100},
        {"name": "Groceries", "template_id": "7", "creation_time": 1700000000.5}
    ],
    "user": {"uid": "u1", "username": "sam"}
}"#;

pub const SAM_GROCERIES_JSON: &str = r#"{
    "items": [{"name": "milk", "checked": true}, {"name": "eggs", "checked": false}],
    "users": [{"uid": "u2", "username": "kim"}]
}"#;

pub const KIM_GROCERIES_JSON: &str = r#"{
    "items": [{"name": "bread", "checked": false}],
    "users": [{"uid": "u1", "username": "sam"}]
}"#;

/// `200 OK` with `body` sent verbatim as JSON, malformed or not.
pub fn json(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "application/json")
}

pub fn status(code: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(code).set_body_string(body)
}

/// `GET route` answered with `response`.
pub fn get(route: &str, response: ResponseTemplate) -> Mock {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
}

/// Start a server with `mocks` mounted. Unmatched paths get a 404.
pub async fn serve(mocks: Vec<Mock>) -> MockServer {
    let server = MockServer::start().await;
    for mock in mocks {
        mock.mount(&server).await;
    }
    server
}

/// Paths requested so far, in arrival order.
pub async fn request_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| request.url.path().to_string())
        .collect()
}

/// Poll `check` until it holds, failing the test after a few seconds.
pub fn wait_until(mut check: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if check() {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("condition not met within 5s");
}
