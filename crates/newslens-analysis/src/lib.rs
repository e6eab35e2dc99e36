//! Single-article analysis: extract, truncate, summarize, classify.
//!
//! The extractor, summarizer and sentiment classifier are trait seams so the
//! orchestrator in [`analyzer`] can run against stubs in tests and against
//! the HTTP-backed defaults in production.

pub mod analyzer;
pub mod cache;
pub mod error;
pub mod extractor;
pub mod sentiment;
pub mod summarizer;

pub use analyzer::{truncate_words, Analyzer};
pub use cache::CachedSummarizer;
pub use error::AnalysisError;
pub use extractor::{ArticleExtractor, ExtractedArticle, HtmlArticleExtractor};
pub use sentiment::{LexiconClassifier, SentimentClassifier};
pub use summarizer::{HuggingFaceSummarizer, SummarizationRequest, Summarizer};
