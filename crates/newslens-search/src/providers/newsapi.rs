//! NewsAPI.org `everything` endpoint.

use serde::Deserialize;

use super::{to_stub, NewsProvider, SourceRef};
use crate::types::{SearchPage, SearchQuery};

pub struct NewsApiProvider {
    api_key: String,
}

impl NewsApiProvider {
    #[must_use]
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_owned(),
        }
    }
}

impl std::fmt::Debug for NewsApiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsApiProvider")
            .field("api_key", &"[redacted]")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(rename = "totalResults")]
    total_results: Option<u64>,
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
struct NewsApiArticle {
    title: Option<String>,
    url: Option<String>,
    source: Option<SourceRef>,
}

#[derive(Debug, Deserialize)]
struct NewsApiError {
    code: Option<String>,
    message: Option<String>,
}

impl NewsProvider for NewsApiProvider {
    fn name(&self) -> &'static str {
        "newsapi"
    }

    fn endpoint_path(&self) -> &'static str {
        "v2/everything"
    }

    fn query_params(&self, query: &SearchQuery, page: usize) -> Vec<(&'static str, String)> {
        vec![
            ("q", query.keywords.clone()),
            ("sortBy", query.sort_mode.as_str().to_string()),
            ("pageSize", query.overfetch_size.to_string()),
            ("page", page.to_string()),
            ("apiKey", self.api_key.clone()),
        ]
    }

    fn parse_page(&self, body: &str) -> Result<SearchPage, serde_json::Error> {
        let response: EverythingResponse = serde_json::from_str(body)?;
        let raw_count = response.articles.len();
        let articles = response
            .articles
            .into_iter()
            .filter_map(|a| to_stub(a.title, a.url, a.source))
            .collect();
        Ok(SearchPage {
            articles,
            raw_count,
            total_results: response.total_results,
        })
    }

    fn parse_error(&self, body: &str) -> Option<String> {
        let err: NewsApiError = serde_json::from_str(body).ok()?;
        match (err.code, err.message) {
            (Some(code), Some(message)) => Some(format!("{code}: {message}")),
            (None, Some(message)) => Some(message),
            (Some(code), None) => Some(code),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use newslens_core::SortMode;

    use super::*;

    fn query() -> SearchQuery {
        SearchQuery::new("electric cars", SortMode::PublishedAt, 10, 50).unwrap()
    }

    #[test]
    fn query_params_request_overfetch_size_not_page_size() {
        let params = NewsApiProvider::new("key").query_params(&query(), 1);
        assert!(params.contains(&("pageSize", "50".to_string())));
        assert!(params.contains(&("sortBy", "publishedAt".to_string())));
        assert!(params.contains(&("q", "electric cars".to_string())));
        assert!(params.contains(&("apiKey", "key".to_string())));
        assert!(params.contains(&("page", "1".to_string())));
    }

    #[test]
    fn parse_page_reads_source_name_and_total() {
        let body = serde_json::json!({
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {
                    "source": { "id": "bbc-news", "name": "BBC News" },
                    "title": "EV sales climb",
                    "url": "https://bbc.example/ev",
                    "publishedAt": "2025-01-01T00:00:00Z"
                },
                {
                    "source": { "id": null, "name": "Wired" },
                    "title": null,
                    "url": "https://wired.example/untitled"
                }
            ]
        })
        .to_string();

        let page = NewsApiProvider::new("key").parse_page(&body).unwrap();
        assert_eq!(page.total_results, Some(2));
        assert_eq!(page.articles.len(), 1);
        assert_eq!(page.raw_count, 2);
        assert_eq!(page.articles[0].source, "BBC News");
        assert_eq!(page.articles[0].url, "https://bbc.example/ev");
    }

    #[test]
    fn parse_error_combines_code_and_message() {
        let body = r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#;
        assert_eq!(
            NewsApiProvider::new("key").parse_error(body).as_deref(),
            Some("apiKeyInvalid: Your API key is invalid.")
        );
    }

    #[test]
    fn parse_error_returns_none_for_non_json() {
        assert!(NewsApiProvider::new("key").parse_error("<html>").is_none());
    }

    #[test]
    fn debug_redacts_key() {
        let rendered = format!("{:?}", NewsApiProvider::new("secret"));
        assert!(!rendered.contains("secret"));
    }
}
