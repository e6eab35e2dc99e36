//! Lightweight URL existence probe.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::error::SearchError;

/// Decides whether a candidate article URL is worth returning.
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    /// Never fails: any transport problem means "unreachable".
    async fn is_reachable(&self, url: &str) -> bool;
}

/// HEAD-request probe; reachable iff the final status after redirects is 200.
///
/// No caching: every call issues a fresh request.
#[derive(Debug, Clone)]
pub struct HttpReachabilityProbe {
    client: Client,
}

impl HttpReachabilityProbe {
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(user_agent: &str) -> Result<Self, SearchError> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    /// Reuse an existing client (redirect policy is the client's).
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReachabilityProbe for HttpReachabilityProbe {
    async fn is_reachable(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(resp) if resp.status() == StatusCode::OK => true,
            Ok(resp) => {
                tracing::debug!(
                    url = %url,
                    status = resp.status().as_u16(),
                    "article URL not reachable"
                );
                false
            }
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "article URL probe failed");
                false
            }
        }
    }
}
