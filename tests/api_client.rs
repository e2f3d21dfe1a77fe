mod common;

use common::{get, json, request_paths, serve, status, HOME_JSON, SAM_GROCERIES_JSON};
use listview::api::{FetchError, ListClient};
use listview::model::Id;
use std::time::Duration;

#[tokio::test]
async fn test_fetch_home_normalizes_ids_and_timestamps() {
    let server = serve(vec![get("/", json(HOME_JSON)).expect(1)]).await;
    let client = ListClient::new(&server.uri(), None).unwrap();

    let home = client.fetch_home().await.unwrap();
    assert_eq!(home.user.username, "sam");
    assert_eq!(home.lists.len(), 2);
    assert_eq!(home.lists[0].template_id, Id::new("1"));
    assert_eq!(home.lists[1].template_id, Id::new("7"));
    assert_eq!(home.lists[1].creation_time, 1_700_000_000);
    assert_eq!(request_paths(&server).await, ["/"]);
}

#[tokio::test]
async fn test_fetch_list_addresses_view_by_uid() {
    let server = serve(vec![get("/list/7/u1", json(SAM_GROCERIES_JSON)).expect(1)]).await;
    let client = ListClient::new(&format!("{}/", server.uri()), None).unwrap();

    let list = client
        .fetch_list(&Id::new("7"), &Id::new("u1"))
        .await
        .unwrap();
    assert_eq!(list.items.len(), 2);
    assert!(list.items[0].checked);
    assert_eq!(list.users[0].username, "kim");
    assert_eq!(request_paths(&server).await, ["/list/7/u1"]);
}

#[tokio::test]
async fn test_ids_are_sent_as_single_path_segments() {
    let server = serve(vec![get("/list/a%2Fb/u%3F1", json(SAM_GROCERIES_JSON)).expect(1)]).await;
    let client = ListClient::new(&server.uri(), None).unwrap();

    let list = client
        .fetch_list(&Id::new("a/b"), &Id::new("u?1"))
        .await
        .unwrap();
    assert_eq!(list.items.len(), 2);
}

#[tokio::test]
async fn test_missing_arrays_are_empty() {
    let server = serve(vec![get("/list/7/u9", json("{}"))]).await;
    let client = ListClient::new(&server.uri(), None).unwrap();

    let list = client
        .fetch_list(&Id::new("7"), &Id::new("u9"))
        .await
        .unwrap();
    assert!(list.items.is_empty());
    assert!(list.users.is_empty());
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = serve(vec![get("/", status(500, "boom"))]).await;
    let client = ListClient::new(&server.uri(), None).unwrap();

    match client.fetch_home().await {
        Err(FetchError::Status { status, body, url }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "boom");
            assert!(url.ends_with('/'));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_json_is_a_parse_error() {
    let server = serve(vec![get("/", json("{\"lists\": ["))]).await;
    let client = ListClient::new(&server.uri(), None).unwrap();

    let err = client.fetch_home().await.unwrap_err();
    assert!(matches!(err, FetchError::Parse { .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_out_of_range_timestamp_is_a_parse_error() {
    let body = r#"{"lists": [{"name": "x", "template_id": 1, "creation_time": -1e300}],
                   "user": {"uid": 1, "username": "sam"}}"#;
    let server = serve(vec![get("/", json(body))]).await;
    let client = ListClient::new(&server.uri(), None).unwrap();

    let err = client.fetch_home().await.unwrap_err();
    assert!(matches!(err, FetchError::Parse { .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_connection_refused_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ListClient::new(&format!("http://{}", addr), None).unwrap();
    let err = client.fetch_home().await.unwrap_err();
    assert!(matches!(err, FetchError::Network { .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_configured_timeout_applies() {
    let server = serve(vec![get(
        "/",
        json(HOME_JSON).set_delay(Duration::from_secs(3)),
    )])
    .await;
    let client = ListClient::new(&server.uri(), Some(Duration::from_millis(200))).unwrap();

    let err = client.fetch_home().await.unwrap_err();
    assert!(matches!(err, FetchError::Network { .. }), "got {:?}", err);
}
