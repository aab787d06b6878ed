//! HttpFetcher against a live mock server

use crate::support::{article, mount_article, mount_redirect};
use std::time::Duration;
use sumi_degrees::config::UserAgentConfig;
use sumi_degrees::crawler::{HttpFetcher, PageFetcher};
use sumi_degrees::FetchError;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher(timeout: Duration) -> HttpFetcher {
    let config = UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
        contact_email: "test@example.com".to_string(),
    };
    HttpFetcher::from_config(&config, timeout).expect("Failed to build client")
}

fn url(server: &MockServer, page: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), page)).expect("Failed to parse URL")
}

#[tokio::test]
async fn test_fetches_html_page() {
    let mock_server = MockServer::start().await;
    mount_article(&mock_server, "Kevin_Bacon", &["Footloose"]).await;

    let page = fetcher(Duration::from_secs(5))
        .fetch(&url(&mock_server, "/wiki/Kevin_Bacon"))
        .await
        .expect("Fetch should succeed");

    assert_eq!(page.status_code, 200);
    assert_eq!(page.final_url.path(), "/wiki/Kevin_Bacon");
    assert!(page.body.contains(r#"<a href="/wiki/Footloose">"#));
}

#[tokio::test]
async fn test_sends_user_agent() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wiki/A"))
        .and(header(
            "user-agent",
            "TestBot/1.0.0 (+https://example.com/contact; test@example.com)",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_raw(article("A", &[]), "text/html"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = fetcher(Duration::from_secs(5))
        .fetch(&url(&mock_server, "/wiki/A"))
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_not_found_is_http_error() {
    let mock_server = MockServer::start().await;

    let result = fetcher(Duration::from_secs(5))
        .fetch(&url(&mock_server, "/wiki/Missing"))
        .await;

    assert_eq!(result, Err(FetchError::Http { status: 404 }));
}

#[tokio::test]
async fn test_server_error_is_http_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let result = fetcher(Duration::from_secs(5))
        .fetch(&url(&mock_server, "/wiki/A"))
        .await;

    assert_eq!(result, Err(FetchError::Http { status: 503 }));
}

#[tokio::test]
async fn test_non_html_is_content_mismatch() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wiki/File.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0x89u8, 0x50, 0x4e, 0x47], "image/png"))
        .mount(&mock_server)
        .await;

    let result = fetcher(Duration::from_secs(5))
        .fetch(&url(&mock_server, "/wiki/File.png"))
        .await;

    assert!(matches!(result, Err(FetchError::ContentMismatch { .. })));
}

#[tokio::test]
async fn test_follows_redirects() {
    let mock_server = MockServer::start().await;
    mount_redirect(&mock_server, "Bacon", "Kevin_Bacon").await;
    mount_article(&mock_server, "Kevin_Bacon", &[]).await;

    let page = fetcher(Duration::from_secs(5))
        .fetch(&url(&mock_server, "/wiki/Bacon"))
        .await
        .expect("Fetch should succeed");

    assert_eq!(page.final_url.path(), "/wiki/Kevin_Bacon");
}

#[tokio::test]
async fn test_slow_response_is_timeout() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(article("Slow", &[]), "text/html")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let result = fetcher(Duration::from_millis(200))
        .fetch(&url(&mock_server, "/wiki/Slow"))
        .await;

    assert_eq!(result, Err(FetchError::Timeout));
}

#[tokio::test]
async fn test_connection_refused() {
    // Bind and release a port so nothing is listening on it
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .expect("Failed to bind")
        .port();

    let result = fetcher(Duration::from_secs(5))
        .fetch(&Url::parse(&format!("http://127.0.0.1:{}/wiki/A", port)).unwrap())
        .await;

    assert!(matches!(
        result,
        Err(FetchError::Connect) | Err(FetchError::Network(_))
    ));
}
