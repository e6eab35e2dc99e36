//! Hugging Face inference client for abstractive summarization.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::AnalysisError;

/// Payload sent to the inference endpoint.
///
/// Also the memoization key source: see [`SummarizationRequest::cache_key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummarizationRequest {
    pub inputs: String,
}

impl SummarizationRequest {
    #[must_use]
    pub fn new(inputs: impl Into<String>) -> Self {
        Self {
            inputs: inputs.into(),
        }
    }

    /// Hex SHA-256 of the canonical JSON encoding of this request.
    #[must_use]
    pub fn cache_key(&self) -> String {
        // Serializing a struct of one String field cannot fail.
        let canonical = serde_json::to_vec(self).unwrap_or_default();
        format!("{:x}", Sha256::digest(&canonical))
    }
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    /// # Errors
    ///
    /// Returns an inference-flavoured [`AnalysisError`] variant on failure.
    async fn summarize(&self, request: &SummarizationRequest) -> Result<String, AnalysisError>;
}

#[derive(Debug, Deserialize)]
struct SummaryCandidate {
    summary_text: String,
}

#[derive(Debug, Deserialize)]
struct InferenceErrorBody {
    error: String,
}

pub struct HuggingFaceSummarizer {
    client: Client,
    api_url: String,
    token: String,
}

impl std::fmt::Debug for HuggingFaceSummarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuggingFaceSummarizer")
            .field("api_url", &self.api_url)
            .field("token", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl HuggingFaceSummarizer {
    /// # Errors
    ///
    /// Returns [`AnalysisError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_url: &str, token: &str, user_agent: &str) -> Result<Self, AnalysisError> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            client,
            api_url: api_url.to_owned(),
            token: token.to_owned(),
        })
    }
}

#[async_trait]
impl Summarizer for HuggingFaceSummarizer {
    async fn summarize(&self, request: &SummarizationRequest) -> Result<String, AnalysisError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await
            .map_err(|e| AnalysisError::InferenceUnavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::InferenceUnavailable(e.to_string()))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<InferenceErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            tracing::warn!(
                status = status.as_u16(),
                detail = %detail,
                "summarization request rejected"
            );
            return Err(AnalysisError::InferenceStatus {
                status: status.as_u16(),
                detail,
            });
        }

        let candidates: Vec<SummaryCandidate> = serde_json::from_str(&body)
            .map_err(|e| AnalysisError::InferenceResponse(e.to_string()))?;

        candidates
            .into_iter()
            .next()
            .map(|c| c.summary_text)
            .ok_or_else(|| AnalysisError::InferenceResponse("no summary candidates".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_is_stable_and_input_sensitive() {
        let a = SummarizationRequest::new("some text");
        let b = SummarizationRequest::new("some text");
        let c = SummarizationRequest::new("other text");
        assert_eq!(a.cache_key(), b.cache_key());
        assert_ne!(a.cache_key(), c.cache_key());
        assert_eq!(a.cache_key().len(), 64);
    }

    #[test]
    fn request_serializes_as_inputs_object() {
        let json = serde_json::to_string(&SummarizationRequest::new("x")).unwrap();
        assert_eq!(json, r#"{"inputs":"x"}"#);
    }

    #[test]
    fn debug_redacts_token() {
        let s = HuggingFaceSummarizer::new("https://hf.example/model", "hf_secret", "ua").unwrap();
        assert!(!format!("{s:?}").contains("hf_secret"));
    }
}
