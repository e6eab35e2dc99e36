//! Overfetch, filter, backfill, truncate.

use std::sync::Arc;

use async_trait::async_trait;
use newslens_core::{AppConfig, ArticleStub};

use crate::client::NewsSearchClient;
use crate::error::SearchError;
use crate::reachability::{HttpReachabilityProbe, ReachabilityProbe};
use crate::types::{SearchPage, SearchQuery};

/// Source of raw search pages. Implemented by [`crate::NewsSearchClient`].
#[async_trait]
pub trait ArticleSearch: Send + Sync {
    /// Fetch one page (1-based) of up to `query.overfetch_size` stubs.
    async fn search(&self, query: &SearchQuery, page: usize) -> Result<SearchPage, SearchError>;
}

pub struct Aggregator {
    search: Arc<dyn ArticleSearch>,
    probe: Arc<dyn ReachabilityProbe>,
    max_backfill_pages: usize,
}

impl Aggregator {
    #[must_use]
    pub fn new(
        search: Arc<dyn ArticleSearch>,
        probe: Arc<dyn ReachabilityProbe>,
        max_backfill_pages: usize,
    ) -> Self {
        Self {
            search,
            probe,
            max_backfill_pages,
        }
    }

    /// Wire the configured provider client and an HTTP HEAD probe.
    ///
    /// # Errors
    ///
    /// Propagates client construction failures from
    /// [`NewsSearchClient::from_config`] and [`HttpReachabilityProbe::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, SearchError> {
        let search = NewsSearchClient::from_config(config)?;
        let probe = HttpReachabilityProbe::new(&config.user_agent)?;
        Ok(Self::new(
            Arc::new(search),
            Arc::new(probe),
            config.news_max_backfill_pages,
        ))
    }

    /// Return up to `query.page_size` reachable stubs in provider order.
    ///
    /// 1. Fetch page 1 (`overfetch_size` stubs).
    /// 2. Keep stubs whose URL passes the reachability probe.
    /// 3. While short of `page_size` and the provider may have more, fetch
    ///    the next page, at most `max_backfill_pages` times.
    /// 4. Truncate to `page_size`.
    ///
    /// # Errors
    ///
    /// Only a failure of the first fetch is returned. Backfill failures are
    /// logged and end the loop with what was accumulated.
    pub async fn aggregate(&self, query: &SearchQuery) -> Result<Vec<ArticleStub>, SearchError> {
        let first = self.search.search(query, 1).await?;
        let mut seen = first.raw_count;
        let mut has_more = first.has_more(query.overfetch_size, seen);
        let mut valid = self.filter_reachable(first.articles, query.page_size).await;

        let mut page = 1;
        while valid.len() < query.page_size && has_more && page <= self.max_backfill_pages {
            page += 1;
            let next = match self.search.search(query, page).await {
                Ok(next) => next,
                Err(e) => {
                    tracing::warn!(
                        page,
                        error = %e,
                        accumulated = valid.len(),
                        "backfill fetch failed; returning accumulated articles"
                    );
                    break;
                }
            };
            if next.raw_count == 0 {
                break;
            }

            seen += next.raw_count;
            has_more = next.has_more(query.overfetch_size, seen);
            let remaining = query.page_size - valid.len();
            valid.extend(self.filter_reachable(next.articles, remaining).await);
        }

        if valid.len() < query.page_size {
            tracing::debug!(
                query = %query.keywords,
                requested = query.page_size,
                found = valid.len(),
                pages = page,
                "fewer reachable articles than requested"
            );
        }

        valid.truncate(query.page_size);
        Ok(valid)
    }

    /// Sequentially probe `stubs`, keeping at most `limit` reachable ones.
    async fn filter_reachable(&self, stubs: Vec<ArticleStub>, limit: usize) -> Vec<ArticleStub> {
        let mut kept = Vec::with_capacity(limit.min(stubs.len()));
        for stub in stubs {
            if kept.len() >= limit {
                break;
            }
            if self.probe.is_reachable(&stub.url).await {
                kept.push(stub);
            }
        }
        kept
    }
}
