//! End-to-end tests for the scan API over a real listener

use pageprobe_server::{router, AppState, ErrorBody, HealthResponse};
use pageprobe_webapp::{ScanConfig, WebScanner};
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn spawn_api() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let scanner = WebScanner::new(ScanConfig::default().with_fetch_timeout_seconds(2)).unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router(AppState::new(scanner)))
            .await
            .unwrap();
    });

    addr
}

async fn post_scan(addr: SocketAddr, body: Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("http://{}/scan", addr))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_missing_url_is_bad_request() {
    let addr = spawn_api().await;

    let resp = post_scan(addr, json!({ "scanType": "full" })).await;
    assert_eq!(resp.status(), 400);
    let body: ErrorBody = resp.json().await.unwrap();
    assert_eq!(body.error, "URL is required.");

    let resp = post_scan(addr, json!({ "url": "", "scanType": "quick" })).await;
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_unreachable_target_is_server_error() {
    let addr = spawn_api().await;

    let closed = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = closed.local_addr().unwrap().port();
    drop(closed);

    let resp = post_scan(
        addr,
        json!({ "url": format!("http://127.0.0.1:{}/", port), "scanType": "quick" }),
    )
    .await;

    assert_eq!(resp.status(), 500);
    let body: ErrorBody = resp.json().await.unwrap();
    assert!(body.error.starts_with("Failed to scan the URL. "));
}

#[tokio::test]
async fn test_quick_scan_returns_report() {
    let target = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>hello</p>"))
        .mount(&target)
        .await;

    let addr = spawn_api().await;
    let resp = post_scan(addr, json!({ "url": target.uri(), "scanType": "quick" })).await;

    assert_eq!(resp.status(), 200);
    let report: Value = resp.json().await.unwrap();
    assert_eq!(report["url"], json!(target.uri()));
    assert_eq!(report["status"], json!("Vulnerable"));
    assert_eq!(report["scanType"], json!("quick"));

    assert_eq!(
        report["issues"],
        json!([
            { "message": "Using insecure HTTP protocol.", "risk": "high" },
            { "message": "Missing security header: content-security-policy", "risk": "high" },
            { "message": "Missing security header: strict-transport-security", "risk": "high" },
            { "message": "Missing security header: x-frame-options", "risk": "medium" },
            { "message": "Missing security header: x-content-type-options", "risk": "medium" },
            { "message": "Missing security header: referrer-policy", "risk": "low" },
            { "message": "Missing security header: permissions-policy", "risk": "low" },
        ])
    );
}

#[tokio::test]
async fn test_unknown_scan_type_runs_quick_scan() {
    let target = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>hello</p>"))
        .expect(1)
        .mount(&target)
        .await;

    let addr = spawn_api().await;
    let resp = post_scan(addr, json!({ "url": target.uri(), "scanType": "deep" })).await;

    assert_eq!(resp.status(), 200);
    let report: Value = resp.json().await.unwrap();
    assert_eq!(report["scanType"], json!("quick"));
}

#[tokio::test]
async fn test_cors_preflight_allowed() {
    let addr = spawn_api().await;

    let resp = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("http://{}/scan", addr))
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .unwrap();

    assert!(resp.status().is_success());
    assert!(resp.headers().contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn test_health() {
    let addr = spawn_api().await;

    let resp = reqwest::get(format!("http://{}/health", addr)).await.unwrap();
    assert_eq!(resp.status(), 200);

    let health: HealthResponse = resp.json().await.unwrap();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}
