//! GNews.io v4 `search` endpoint.

use serde::Deserialize;
use serde_json::Value;

use super::{to_stub, NewsProvider, SourceRef};
use crate::types::{SearchPage, SearchQuery};
use newslens_core::SortMode;

pub struct GNewsProvider {
    api_key: String,
}

impl GNewsProvider {
    #[must_use]
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_owned(),
        }
    }
}

impl std::fmt::Debug for GNewsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GNewsProvider")
            .field("api_key", &"[redacted]")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "totalArticles")]
    total_articles: Option<u64>,
    #[serde(default)]
    articles: Vec<GNewsArticle>,
}

#[derive(Debug, Deserialize)]
struct GNewsArticle {
    title: Option<String>,
    url: Option<String>,
    source: Option<SourceRef>,
}

/// GNews has no popularity ordering; it falls back to relevance.
fn sort_param(mode: SortMode) -> &'static str {
    match mode {
        SortMode::Relevancy | SortMode::Popularity => "relevance",
        SortMode::PublishedAt => "publishedAt",
    }
}

impl NewsProvider for GNewsProvider {
    fn name(&self) -> &'static str {
        "gnews"
    }

    fn endpoint_path(&self) -> &'static str {
        "api/v4/search"
    }

    fn query_params(&self, query: &SearchQuery, page: usize) -> Vec<(&'static str, String)> {
        vec![
            ("q", query.keywords.clone()),
            ("sortby", sort_param(query.sort_mode).to_string()),
            ("max", query.overfetch_size.to_string()),
            ("page", page.to_string()),
            ("apikey", self.api_key.clone()),
        ]
    }

    fn parse_page(&self, body: &str) -> Result<SearchPage, serde_json::Error> {
        let response: SearchResponse = serde_json::from_str(body)?;
        let raw_count = response.articles.len();
        let articles = response
            .articles
            .into_iter()
            .filter_map(|a| to_stub(a.title, a.url, a.source))
            .collect();
        Ok(SearchPage {
            articles,
            raw_count,
            total_results: response.total_articles,
        })
    }

    /// GNews reports errors as either `{"errors": ["..."]}` or
    /// `{"errors": {"field": "..."}}`.
    fn parse_error(&self, body: &str) -> Option<String> {
        let parsed: Value = serde_json::from_str(body).ok()?;
        let messages: Vec<String> = match parsed.get("errors")? {
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .map(ToOwned::to_owned)
                .collect(),
            Value::Object(map) => map
                .iter()
                .filter_map(|(k, v)| v.as_str().map(|msg| format!("{k}: {msg}")))
                .collect(),
            Value::String(msg) => vec![msg.clone()],
            _ => Vec::new(),
        };
        if messages.is_empty() {
            None
        } else {
            Some(messages.join("; "))
        }
    }
}
