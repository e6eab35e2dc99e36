use newslens_core::{ArticleStub, SortMode};

use crate::error::SearchError;

/// Batch size requested from the provider regardless of the caller's page size.
pub const DEFAULT_OVERFETCH_SIZE: usize = 50;

/// A validated keyword search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keywords: String,
    pub sort_mode: SortMode,
    pub page_size: usize,
    pub overfetch_size: usize,
}

impl SearchQuery {
    /// Builds a query, enforcing `1 <= page_size <= overfetch_size` and
    /// non-blank keywords.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidQuery`] when either constraint fails.
    pub fn new(
        keywords: &str,
        sort_mode: SortMode,
        page_size: usize,
        overfetch_size: usize,
    ) -> Result<Self, SearchError> {
        let keywords = keywords.trim();
        if keywords.is_empty() {
            return Err(SearchError::InvalidQuery(
                "query must not be empty".to_string(),
            ));
        }
        if overfetch_size == 0 {
            return Err(SearchError::InvalidQuery(
                "overfetch size must be at least 1".to_string(),
            ));
        }
        if page_size == 0 || page_size > overfetch_size {
            return Err(SearchError::InvalidQuery(format!(
                "page_size must be between 1 and {overfetch_size}, got {page_size}"
            )));
        }

        Ok(Self {
            keywords: keywords.to_string(),
            sort_mode,
            page_size,
            overfetch_size,
        })
    }
}

/// One page of provider results, normalized to [`ArticleStub`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    pub articles: Vec<ArticleStub>,
    /// Entries in the upstream batch before malformed ones were dropped.
    pub raw_count: usize,
    /// Total matches reported by the provider, when it reports one.
    pub total_results: Option<u64>,
}

impl SearchPage {
    /// Whether requesting the next page could plausibly return more stubs.
    ///
    /// Judged on `raw_count`, not on the normalized stubs. A short raw batch
    /// means the provider ran out. A full one still counts as exhausted when
    /// the reported total is already covered by `seen` raw entries.
    #[must_use]
    pub fn has_more(&self, requested: usize, seen: usize) -> bool {
        if self.raw_count < requested {
            return false;
        }
        match self.total_results {
            Some(total) => total > u64::try_from(seen).unwrap_or(u64::MAX),
            None => true,
        }
    }
}
