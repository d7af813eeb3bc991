use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, ServiceConfig};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn config() -> ServiceConfig {
    ServiceConfig {
        api_key: "test-key".to_string(),
        site_url: "https://s.io".to_string(),
    }
}

fn new_link_request(api_key: Option<&str>, body: &str) -> Request<String> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/new")
        .header(http::header::CONTENT_TYPE, "application/json");
    if let Some(key) = api_key {
        builder = builder.header("X-API-Key", key);
    }
    builder.body(body.to_string()).unwrap()
}

// --- create ---

#[tokio::test]
async fn new_link_assigns_short_id() {
    let resp = app(config())
        .oneshot(new_link_request(
            Some("test-key"),
            r#"{"longlink":"https://example.com/long","shortlink":""}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["error"], false);
    let shorturl = body["shorturl"].as_str().unwrap();
    let id = shorturl.strip_prefix("https://s.io/").unwrap();
    assert_eq!(id.len(), 8);
}

#[tokio::test]
async fn new_link_honors_requested_id() {
    let resp = app(config())
        .oneshot(new_link_request(
            Some("test-key"),
            r#"{"longlink":"https://example.com/long","shortlink":"mine"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["shorturl"], "https://s.io/mine");
}

#[tokio::test]
async fn new_link_without_key_returns_401() {
    let resp = app(config())
        .oneshot(new_link_request(None, r#"{"longlink":"https://example.com"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Not logged in!");
}

#[tokio::test]
async fn new_link_wrong_key_returns_401() {
    let resp = app(config())
        .oneshot(new_link_request(Some("nope"), r#"{"longlink":"https://example.com"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn new_link_empty_longlink_returns_400() {
    let resp = app(config())
        .oneshot(new_link_request(Some("test-key"), r#"{"longlink":"","shortlink":""}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn new_link_malformed_json_returns_4xx() {
    let resp = app(config())
        .oneshot(new_link_request(Some("test-key"), r#"{"not_longlink":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- redirect ---

#[tokio::test]
async fn unknown_id_returns_404() {
    let resp = app(config())
        .oneshot(Request::builder().uri("/missing").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- lifecycle ---

#[tokio::test]
async fn create_then_follow_then_conflict() {
    use tower::Service;

    let mut app = app(config()).into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(new_link_request(
            Some("test-key"),
            r#"{"longlink":"https://example.com/target","shortlink":"dup"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // follow
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(Request::builder().uri("/dup").body(String::new()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(
        resp.headers().get(http::header::LOCATION).unwrap(),
        "https://example.com/target"
    );

    // same id again
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(new_link_request(
            Some("test-key"),
            r#"{"longlink":"https://example.com/other","shortlink":"dup"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "Short URL is already in use!");
}
