//! Request de-duplication cache in front of a [`Summarizer`].

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::AnalysisError;
use crate::summarizer::{SummarizationRequest, Summarizer};

/// Fixed-capacity least-recently-used map from cache key to summary.
///
/// Recency lives in a `VecDeque` scanned linearly, so a hit or a re-insert
/// of an existing key costs O(capacity). Inserting a new key and evicting
/// are O(1).
#[derive(Debug)]
struct LruMap {
    capacity: usize,
    entries: HashMap<String, String>,
    /// Front is least recently used.
    order: VecDeque<String>,
}

impl LruMap {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }

    fn get(&mut self, key: &str) -> Option<String> {
        let value = self.entries.get(key).cloned()?;
        self.touch(key);
        Some(value)
    }

    fn insert(&mut self, key: String, value: String) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.insert(key.clone(), value).is_some() {
            self.touch(&key);
            return;
        }
        self.order.push_back(key);
        while self.order.len() > self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.entries.remove(&evicted);
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Memoizes successful summaries keyed on [`SummarizationRequest::cache_key`].
///
/// Failures are never cached. Concurrent identical requests may both reach
/// the inner summarizer; the later result overwrites the earlier one.
pub struct CachedSummarizer<S> {
    inner: S,
    cache: Mutex<LruMap>,
}

impl<S: Summarizer> CachedSummarizer<S> {
    #[must_use]
    pub fn new(inner: S, capacity: usize) -> Self {
        Self {
            inner,
            cache: Mutex::new(LruMap::new(capacity)),
        }
    }

    /// Number of cached summaries.
    pub async fn len(&self) -> usize {
        self.cache.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl<S: Summarizer> Summarizer for CachedSummarizer<S> {
    async fn summarize(&self, request: &SummarizationRequest) -> Result<String, AnalysisError> {
        let key = request.cache_key();

        if let Some(hit) = self.cache.lock().await.get(&key) {
            tracing::debug!(key = %key, "summary cache hit");
            return Ok(hit);
        }

        let summary = self.inner.summarize(request).await?;
        self.cache.lock().await.insert(key, summary.clone());
        Ok(summary)
    }
}
