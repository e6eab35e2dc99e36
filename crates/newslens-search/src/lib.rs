//! News search and article aggregation.
//!
//! Queries a configurable news-search provider (NewsAPI or GNews), probes each
//! candidate URL for reachability, and returns a page of reachable article
//! stubs. See [`Aggregator::aggregate`] for the overfetch/backfill policy.

pub mod aggregator;
pub mod client;
pub mod error;
pub mod providers;
pub mod reachability;
pub mod types;

pub use aggregator::{Aggregator, ArticleSearch};
pub use client::NewsSearchClient;
pub use error::SearchError;
pub use providers::{provider_for, GNewsProvider, NewsApiProvider, NewsProvider};
pub use reachability::{HttpReachabilityProbe, ReachabilityProbe};
pub use types::{SearchPage, SearchQuery, DEFAULT_OVERFETCH_SIZE};
