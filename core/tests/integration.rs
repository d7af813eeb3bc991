//! End-to-end shorten calls over real HTTP.
//!
//! # Design
//! Each test starts a server on a random port in a background thread with
//! its own tokio runtime, then drives `ShortenerProxy` through the default
//! ureq transport. The mock service covers the happy path and service
//! errors; small inline routers cover replies the real service never sends.

use axum::{routing::post, Router};
use shortener_core::{ShortenerConfig, ShortenerProxy, PROTOCOL_ERROR_MESSAGE, TRANSPORT_ERROR_MESSAGE};

const API_KEY: &str = "integration-key";

/// Serve `router` on a random local port and return its base URL.
fn serve(router: Router) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            axum::serve(listener, router).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn mock_service() -> String {
    serve(mock_server::app(mock_server::ServiceConfig {
        api_key: API_KEY.to_string(),
        site_url: "https://s.io".to_string(),
    }))
}

/// A server whose `/api/new` always replies with `body`.
fn fixed_reply(body: &'static str) -> String {
    serve(Router::new().route("/api/new", post(move || async move { body })))
}

#[test]
fn shortens_against_mock_service() {
    let base = mock_service();
    let proxy = ShortenerProxy::new(&ShortenerConfig::new(&base, API_KEY), "https://example.com/a/long/path");

    assert!(!proxy.is_error(), "unexpected error: {}", proxy.error());
    assert!(proxy.url().starts_with("https://s.io/"));
    assert_eq!(proxy.error(), "");
}

#[test]
fn base_url_trailing_slash_is_accepted() {
    let base = mock_service();
    let proxy = ShortenerProxy::new(&ShortenerConfig::new(format!("{base}/"), API_KEY), "https://example.com");

    assert!(!proxy.is_error(), "unexpected error: {}", proxy.error());
}

#[test]
fn wrong_key_surfaces_service_message() {
    let base = mock_service();
    let proxy = ShortenerProxy::new(&ShortenerConfig::new(&base, "wrong"), "https://example.com");

    assert!(proxy.is_error());
    assert_eq!(proxy.error(), "Not logged in!");
    assert_eq!(proxy.url(), "");
}

#[test]
fn empty_link_is_left_to_the_service() {
    let base = mock_service();
    let proxy = ShortenerProxy::new(&ShortenerConfig::new(&base, API_KEY), "");

    assert!(proxy.is_error());
    assert_eq!(proxy.error(), "Long link cannot be empty.");
}

#[test]
fn connection_refused_uses_fixed_message() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let proxy = ShortenerProxy::new(&ShortenerConfig::new(format!("http://{addr}"), API_KEY), "https://example.com");

    assert!(proxy.is_error());
    assert_eq!(proxy.error(), TRANSPORT_ERROR_MESSAGE);
    assert_eq!(proxy.url(), "");
}

#[test]
fn malformed_base_url_uses_fixed_message() {
    let proxy = ShortenerProxy::new(&ShortenerConfig::new("", API_KEY), "https://example.com");

    assert!(proxy.is_error());
    assert_eq!(proxy.error(), TRANSPORT_ERROR_MESSAGE);
}

#[test]
fn non_json_reply_uses_parse_message() {
    let base = fixed_reply("<html>502 Bad Gateway</html>");
    let proxy = ShortenerProxy::new(&ShortenerConfig::new(&base, API_KEY), "https://example.com");

    assert!(proxy.is_error());
    assert_eq!(proxy.error(), PROTOCOL_ERROR_MESSAGE);
}

#[test]
fn non_utf8_reply_uses_parse_message() {
    let base = serve(Router::new().route("/api/new", post(|| async { vec![0xffu8, 0xfe, b'x'] })));
    let proxy = ShortenerProxy::new(&ShortenerConfig::new(&base, API_KEY), "https://example.com");

    assert!(proxy.is_error());
    assert_eq!(proxy.error(), PROTOCOL_ERROR_MESSAGE);
}

#[test]
fn success_without_shorturl_uses_parse_message() {
    let base = fixed_reply(r#"{"success":true}"#);
    let proxy = ShortenerProxy::new(&ShortenerConfig::new(&base, API_KEY), "https://example.com");

    assert!(proxy.is_error());
    assert_eq!(proxy.error(), PROTOCOL_ERROR_MESSAGE);
}

#[test]
fn explicit_service_error_is_surfaced() {
    let base = fixed_reply(r#"{"success":false,"error":"quota exceeded"}"#);
    let proxy = ShortenerProxy::new(&ShortenerConfig::new(&base, API_KEY), "https://example.com");

    assert!(proxy.is_error());
    assert_eq!(proxy.error(), "quota exceeded");
}
