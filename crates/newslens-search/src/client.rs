//! HTTP client for the configured news-search provider.
//!
//! Wraps `reqwest` with provider-agnostic status handling. Request shape and
//! response parsing are delegated to a [`NewsProvider`] adapter.

use async_trait::async_trait;
use newslens_core::AppConfig;
use reqwest::{Client, Url};

use crate::aggregator::ArticleSearch;
use crate::error::SearchError;
use crate::providers::{provider_for, NewsProvider};
use crate::types::{SearchPage, SearchQuery};

pub struct NewsSearchClient {
    client: Client,
    provider: Box<dyn NewsProvider>,
    endpoint: Url,
}

impl NewsSearchClient {
    /// Creates a client for `provider` rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`SearchError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(
        provider: Box<dyn NewsProvider>,
        base_url: &str,
        user_agent: &str,
    ) -> Result<Self, SearchError> {
        let client = Client::builder().user_agent(user_agent).build()?;

        // Exactly one trailing slash so `join` appends rather than replaces
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(provider.endpoint_path()))
            .map_err(|e| SearchError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            provider,
            endpoint,
        })
    }

    /// Creates a client using the provider, base URL and key from `config`.
    ///
    /// # Errors
    ///
    /// See [`NewsSearchClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, SearchError> {
        Self::new(
            provider_for(config.news_provider, &config.news_api_key),
            &config.news_api_url,
            &config.user_agent,
        )
    }

    fn build_url(&self, query: &SearchQuery, page: usize) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in self.provider.query_params(query, page) {
                pairs.append_pair(k, &v);
            }
        }
        url
    }

    /// Fetches one page of results (`page` is 1-based).
    ///
    /// # Errors
    ///
    /// - [`SearchError::Http`] on network failure.
    /// - [`SearchError::Upstream`] on a non-2xx status, carrying the
    ///   provider's error message or the raw body.
    /// - [`SearchError::Deserialize`] if a 2xx body has the wrong shape.
    pub async fn search(
        &self,
        query: &SearchQuery,
        page: usize,
    ) -> Result<SearchPage, SearchError> {
        let url = self.build_url(query, page);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let detail = self.provider.parse_error(&body).unwrap_or(body);
            tracing::warn!(
                provider = self.provider.name(),
                status = status.as_u16(),
                detail = %detail,
                "news provider returned an error"
            );
            return Err(SearchError::Upstream {
                status: status.as_u16(),
                detail,
            });
        }

        let result = self
            .provider
            .parse_page(&body)
            .map_err(|e| SearchError::Deserialize {
                context: format!("{} search(page={page})", self.provider.name()),
                source: e,
            })?;

        tracing::debug!(
            provider = self.provider.name(),
            page,
            count = result.articles.len(),
            total = ?result.total_results,
            "news search page fetched"
        );

        Ok(result)
    }
}

#[async_trait]
impl ArticleSearch for NewsSearchClient {
    async fn search(&self, query: &SearchQuery, page: usize) -> Result<SearchPage, SearchError> {
        NewsSearchClient::search(self, query, page).await
    }
}
