//! Integration tests for `HttpReachabilityProbe`.

use newslens_search::{HttpReachabilityProbe, ReachabilityProbe};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn probe() -> HttpReachabilityProbe {
    HttpReachabilityProbe::new("newslens-test/0.1").expect("probe construction")
}

#[tokio::test]
async fn ok_head_response_is_reachable() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/article"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    assert!(probe().is_reachable(&format!("{}/article", server.uri())).await);
}

#[tokio::test]
async fn non_200_success_is_not_reachable() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/article"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    assert!(!probe().is_reachable(&format!("{}/article", server.uri())).await);
}

#[tokio::test]
async fn not_found_is_not_reachable() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(!probe().is_reachable(&format!("{}/gone", server.uri())).await);
}

#[tokio::test]
async fn redirect_to_ok_is_reachable() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("Location", format!("{}/new", server.uri())),
        )
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    assert!(probe().is_reachable(&format!("{}/old", server.uri())).await);
}

#[tokio::test]
async fn repeated_checks_reprobe() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/article"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let probe = probe();
    let url = format!("{}/article", server.uri());
    assert!(probe.is_reachable(&url).await);
    assert!(probe.is_reachable(&url).await);
}

#[tokio::test]
async fn transport_failure_is_not_reachable() {
    assert!(!probe().is_reachable("http://127.0.0.1:1/unreachable").await);
}

#[tokio::test]
async fn malformed_url_is_not_reachable() {
    assert!(!probe().is_reachable("not a url").await);
}
