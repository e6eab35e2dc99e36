use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The article page could not be downloaded or yielded no text.
    #[error("failed to fetch article {url}: {reason}")]
    Extraction { url: String, reason: String },

    /// The inference service could not be reached.
    #[error("summarization service unavailable: {0}")]
    InferenceUnavailable(String),

    /// The inference service answered with a non-2xx status.
    #[error("summarization service returned status {status}: {detail}")]
    InferenceStatus { status: u16, detail: String },

    /// A 2xx inference response had no usable summary.
    #[error("unexpected summarization response: {0}")]
    InferenceResponse(String),

    /// Client construction failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
