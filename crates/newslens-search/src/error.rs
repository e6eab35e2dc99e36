use thiserror::Error;

/// Errors returned by the news search client and aggregator.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Network or TLS failure talking to the provider.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("news provider returned status {status}: {detail}")]
    Upstream { status: u16, detail: String },

    /// A 2xx body did not match the provider's documented shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid provider base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// Rejected before any upstream call was made.
    #[error("invalid search query: {0}")]
    InvalidQuery(String),
}
