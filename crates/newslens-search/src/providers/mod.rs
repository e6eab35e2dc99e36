//! Provider adapters normalizing each news-search backend into [`SearchPage`].

mod gnews;
mod newsapi;

pub use gnews::GNewsProvider;
pub use newsapi::NewsApiProvider;

use newslens_core::{ArticleStub, ProviderKind};
use serde::Deserialize;

use crate::types::{SearchPage, SearchQuery};

/// A news-search backend: how to ask it, and how to read its answers.
///
/// Adapters are pure. All I/O lives in [`crate::NewsSearchClient`].
pub trait NewsProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Endpoint path relative to the configured base URL.
    fn endpoint_path(&self) -> &'static str;

    /// Query parameters for one page of results (1-based `page`).
    fn query_params(&self, query: &SearchQuery, page: usize) -> Vec<(&'static str, String)>;

    /// Parse a 2xx response body.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the body does not match the
    /// provider's envelope.
    fn parse_page(&self, body: &str) -> Result<SearchPage, serde_json::Error>;

    /// Extract a human-readable message from a non-2xx body, if it has one.
    fn parse_error(&self, body: &str) -> Option<String>;
}

/// Build the adapter selected by configuration.
#[must_use]
pub fn provider_for(kind: ProviderKind, api_key: &str) -> Box<dyn NewsProvider> {
    match kind {
        ProviderKind::NewsApi => Box::new(NewsApiProvider::new(api_key)),
        ProviderKind::GNews => Box::new(GNewsProvider::new(api_key)),
    }
}

/// `{ "name": ... }` object both providers nest under `articles[].source`.
#[derive(Debug, Deserialize)]
pub(crate) struct SourceRef {
    #[serde(default)]
    pub name: Option<String>,
}

/// Normalize one upstream article; drops entries with no title or URL.
pub(crate) fn to_stub(
    title: Option<String>,
    url: Option<String>,
    source: Option<SourceRef>,
) -> Option<ArticleStub> {
    let title = title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())?;
    let url = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty())?;
    let source = source.and_then(|s| s.name).unwrap_or_default();
    Some(ArticleStub { title, url, source })
}
