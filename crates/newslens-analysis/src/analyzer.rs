//! Analysis orchestrator: extract, truncate, summarize, classify.

use std::sync::Arc;

use newslens_core::{AnalysisResult, AppConfig, SentimentLabel};

use crate::cache::CachedSummarizer;
use crate::error::AnalysisError;
use crate::extractor::{ArticleExtractor, HtmlArticleExtractor};
use crate::sentiment::{LexiconClassifier, SentimentClassifier};
use crate::summarizer::{HuggingFaceSummarizer, SummarizationRequest, Summarizer};

/// Keep the first `max_words` whitespace-delimited tokens, joined by single spaces.
#[must_use]
pub fn truncate_words(text: &str, max_words: usize) -> String {
    text.split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct Analyzer {
    extractor: Arc<dyn ArticleExtractor>,
    summarizer: Arc<dyn Summarizer>,
    classifier: Arc<dyn SentimentClassifier>,
    max_words: usize,
    sentiment_threshold: f64,
}

impl Analyzer {
    #[must_use]
    pub fn new(
        extractor: Arc<dyn ArticleExtractor>,
        summarizer: Arc<dyn Summarizer>,
        classifier: Arc<dyn SentimentClassifier>,
        max_words: usize,
        sentiment_threshold: f64,
    ) -> Self {
        Self {
            extractor,
            summarizer,
            classifier,
            max_words,
            sentiment_threshold,
        }
    }

    /// Wire the HTTP-backed extractor and summarizer plus the lexicon
    /// classifier. The summarizer is memoized unless
    /// `summary_cache_capacity` is 0.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Http`] if an HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AnalysisError> {
        let extractor = HtmlArticleExtractor::new(&config.user_agent)?;
        let hf = HuggingFaceSummarizer::new(&config.hf_api_url, &config.hf_token, &config.user_agent)?;
        let summarizer: Arc<dyn Summarizer> = if config.summary_cache_capacity > 0 {
            Arc::new(CachedSummarizer::new(hf, config.summary_cache_capacity))
        } else {
            Arc::new(hf)
        };

        Ok(Self::new(
            Arc::new(extractor),
            summarizer,
            Arc::new(LexiconClassifier::new()),
            config.max_words,
            config.sentiment_threshold,
        ))
    }

    /// Produce a title, summary and sentiment label for the article at `url`.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::Extraction`] when the page cannot be fetched or parsed;
    ///   nothing downstream is called in that case.
    /// - Inference variants when the summarizer fails.
    pub async fn analyze(&self, url: &str) -> Result<AnalysisResult, AnalysisError> {
        let article = self.extractor.extract(url).await?;
        let text = truncate_words(&article.text, self.max_words);

        let summary = self
            .summarizer
            .summarize(&SummarizationRequest::new(text.clone()))
            .await?;

        let score = self.classifier.polarity(&text);
        let sentiment = SentimentLabel::from_score(score, self.sentiment_threshold);

        tracing::info!(
            url = %url,
            words = text.split_whitespace().count(),
            score,
            sentiment = ?sentiment,
            "article analyzed"
        );

        Ok(AnalysisResult {
            title: article.title,
            summary,
            sentiment,
        })
    }
}
