//! Integration tests for `HuggingFaceSummarizer` and its cache wrapper.

use newslens_analysis::{
    AnalysisError, CachedSummarizer, HuggingFaceSummarizer, SummarizationRequest, Summarizer,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn summarizer(server: &MockServer) -> HuggingFaceSummarizer {
    HuggingFaceSummarizer::new(
        &format!("{}/models/facebook/bart-large-cnn", server.uri()),
        "hf-test-token",
        "newslens-test/0.1",
    )
    .expect("summarizer construction")
}

#[tokio::test]
async fn posts_inputs_with_bearer_token_and_returns_first_candidate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/facebook/bart-large-cnn"))
        .and(header("authorization", "Bearer hf-test-token"))
        .and(body_json(json!({ "inputs": "a b c" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "summary_text": "first" },
            { "summary_text": "second" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let summary = summarizer(&server)
        .summarize(&SummarizationRequest::new("a b c"))
        .await
        .expect("summarization should succeed");

    assert_eq!(summary, "first");
}

#[tokio::test]
async fn non_success_status_carries_error_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": "Model facebook/bart-large-cnn is currently loading",
            "estimated_time": 20.0
        })))
        .mount(&server)
        .await;

    let err = summarizer(&server)
        .summarize(&SummarizationRequest::new("text"))
        .await
        .unwrap_err();

    match err {
        AnalysisError::InferenceStatus { status, detail } => {
            assert_eq!(status, 503);
            assert_eq!(detail, "Model facebook/bart-large-cnn is currently loading");
        }
        other => panic!("expected InferenceStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_is_passed_through_raw() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let err = summarizer(&server)
        .summarize(&SummarizationRequest::new("text"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AnalysisError::InferenceStatus { status: 401, ref detail } if detail == "unauthorized"
    ));
}

#[tokio::test]
async fn empty_candidate_list_is_response_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = summarizer(&server)
        .summarize(&SummarizationRequest::new("text"))
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::InferenceResponse(_)));
}

#[tokio::test]
async fn malformed_success_body_is_response_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let err = summarizer(&server)
        .summarize(&SummarizationRequest::new("text"))
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::InferenceResponse(_)));
}

#[tokio::test]
async fn connection_refused_is_unavailable() {
    let hf = HuggingFaceSummarizer::new("http://127.0.0.1:1/model", "token", "newslens-test/0.1")
        .expect("summarizer construction");

    let err = hf
        .summarize(&SummarizationRequest::new("text"))
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::InferenceUnavailable(_)));
}

#[tokio::test]
async fn cached_summarizer_calls_upstream_once_per_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({ "inputs": "repeat me" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "summary_text": "cached" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cached = CachedSummarizer::new(summarizer(&server), 100);
    let request = SummarizationRequest::new("repeat me");

    assert_eq!(cached.summarize(&request).await.unwrap(), "cached");
    assert_eq!(cached.summarize(&request).await.unwrap(), "cached");
}
