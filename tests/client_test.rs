use bil24_client::{ApiClient, Bil24Config, Bil24Error};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(uri: &str, max_retries: u32) -> Bil24Config {
    Bil24Config {
        fid: "7".into(),
        token: "secret".into(),
        base_url: Some(uri.to_string()),
        max_retries,
        ..Bil24Config::default()
    }
}

#[tokio::test]
async fn get_decodes_body_and_serves_repeat_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "Test"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(config(&server.uri(), 0));
    let params = [("limit", "1".to_string())];

    let first = client.get("events", &params).await.unwrap();
    assert_eq!(first, json!({"id": 1, "name": "Test"}));

    // Second call within the TTL must not reach the network; the mock's
    // expect(1) verifies that on drop.
    let second = client.get("events", &params).await.unwrap();
    assert_eq!(second, first);
}

#[tokio::test]
async fn different_query_params_are_cached_separately() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let client = ApiClient::new(config(&server.uri(), 0));
    client
        .get("events", &[("limit", "1".to_string())])
        .await
        .unwrap();
    client
        .get("events", &[("limit", "2".to_string())])
        .await
        .unwrap();
}

#[tokio::test]
async fn clear_cache_forces_a_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(2)
        .mount(&server)
        .await;

    let client = ApiClient::new(config(&server.uri(), 0));
    client.get("status", &[]).await.unwrap();
    client.clear_cache().await;
    client.get("status", &[]).await.unwrap();
}

#[tokio::test]
async fn post_is_never_cached() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"order_id": 5})))
        .expect(2)
        .mount(&server)
        .await;

    let client = ApiClient::new(config(&server.uri(), 0));
    let body = json!({"customer_email": "buyer@example.com"});
    client.post("orders", &body).await.unwrap();
    client.post("orders", &body).await.unwrap();
}

#[tokio::test]
async fn auth_headers_are_sent_on_every_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .and(header("Authorization", "Bearer secret"))
        .and(header("X-FID", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(config(&server.uri(), 0));
    client.get("status", &[]).await.unwrap();
}

#[tokio::test]
async fn server_error_is_retried_to_the_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .expect(2)
        .mount(&server)
        .await;

    // One retry: two requests total, with a single 1s backoff in between.
    let client = ApiClient::new(config(&server.uri(), 1));
    let err = client.get("events", &[]).await.unwrap_err();
    match err {
        Bil24Error::Server { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("boom"));
        }
        other => panic!("expected Server error, got {:?}", other),
    }
}

#[tokio::test]
async fn not_found_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "no such event"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(config(&server.uri(), 3));
    let err = client.get("events/999", &[]).await.unwrap_err();
    match err {
        Bil24Error::NotFound { status, message } => {
            assert_eq!(status, 404);
            assert!(message.contains("no such event"));
        }
        other => panic!("expected NotFound error, got {:?}", other),
    }
}

#[tokio::test]
async fn status_codes_map_to_error_variants() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "bad token"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "no access"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/c"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"error": "unprocessable"})))
        .mount(&server)
        .await;

    let client = ApiClient::new(config(&server.uri(), 0));

    assert!(matches!(
        client.get("a", &[]).await.unwrap_err(),
        Bil24Error::Authentication { status: 401, .. }
    ));
    assert!(matches!(
        client.get("b", &[]).await.unwrap_err(),
        Bil24Error::Authorization { status: 403, .. }
    ));
    assert!(matches!(
        client.get("c", &[]).await.unwrap_err(),
        Bil24Error::Api { status: 422, .. }
    ));
}

#[tokio::test]
async fn empty_body_errors_regardless_of_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ok-empty"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing-empty"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = ApiClient::new(config(&server.uri(), 0));

    assert!(matches!(
        client.get("ok-empty", &[]).await.unwrap_err(),
        Bil24Error::EmptyResponse { status: 200 }
    ));
    assert!(matches!(
        client.get("missing-empty", &[]).await.unwrap_err(),
        Bil24Error::EmptyResponse { status: 404 }
    ));
}

#[tokio::test]
async fn malformed_json_is_reported_with_parser_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = ApiClient::new(config(&server.uri(), 0));
    let err = client.get("events", &[]).await.unwrap_err();
    match err {
        Bil24Error::InvalidJson { message } => assert!(!message.is_empty()),
        other => panic!("expected InvalidJson error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_falls_through_probes_until_one_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "nope"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/version"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "nope"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = ApiClient::new(config(&server.uri(), 0));
    assert!(client.test_connection().await);
}

#[tokio::test]
async fn test_connection_is_false_when_every_probe_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "nope"})))
        .mount(&server)
        .await;

    let client = ApiClient::new(config(&server.uri(), 0));
    assert!(!client.test_connection().await);
}

#[tokio::test]
async fn unconfigured_client_never_touches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = ApiClient::new(Bil24Config {
        base_url: Some(server.uri()),
        ..Bil24Config::default()
    });

    assert!(matches!(
        client.get("events", &[]).await.unwrap_err(),
        Bil24Error::Config(_)
    ));
    assert!(!client.test_connection().await);
}
