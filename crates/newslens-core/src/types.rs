use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A candidate article returned by a news search provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleStub {
    pub title: String,
    pub url: String,
    /// Publisher display name (`articles[].source.name` upstream).
    pub source: String,
}

/// Ordering requested from the news provider.
///
/// Wire values follow the `sort_by` query parameter accepted by `/fetch_news/`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortMode {
    #[default]
    #[serde(rename = "relevancy")]
    Relevancy,
    #[serde(rename = "popularity")]
    Popularity,
    #[serde(rename = "publishedAt")]
    PublishedAt,
}

impl SortMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Relevancy => "relevancy",
            SortMode::Popularity => "popularity",
            SortMode::PublishedAt => "publishedAt",
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort mode \"{0}\"; expected relevancy, popularity, or publishedAt")]
pub struct UnknownSortMode(pub String);

impl FromStr for SortMode {
    type Err = UnknownSortMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "relevancy" | "relevance" => Ok(SortMode::Relevancy),
            "popularity" => Ok(SortMode::Popularity),
            "publishedAt" | "published_at" => Ok(SortMode::PublishedAt),
            other => Err(UnknownSortMode(other.to_string())),
        }
    }
}

/// Three-way sentiment label derived from a compound polarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Map a compound score in `[-1.0, 1.0]` to a label.
    ///
    /// Both comparisons are strict: a score exactly at `±threshold` is
    /// `Neutral`.
    #[must_use]
    pub fn from_score(score: f64, threshold: f64) -> Self {
        if score > threshold {
            SentimentLabel::Positive
        } else if score < -threshold {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "Positive"),
            SentimentLabel::Negative => write!(f, "Negative"),
            SentimentLabel::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Output of the analysis pipeline for a single article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub title: String,
    pub summary: String,
    pub sentiment: SentimentLabel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_above_threshold_is_positive() {
        assert_eq!(SentimentLabel::from_score(0.10, 0.05), SentimentLabel::Positive);
    }

    #[test]
    fn sentiment_below_negative_threshold_is_negative() {
        assert_eq!(SentimentLabel::from_score(-0.10, 0.05), SentimentLabel::Negative);
    }

    #[test]
    fn sentiment_zero_is_neutral() {
        assert_eq!(SentimentLabel::from_score(0.0, 0.05), SentimentLabel::Neutral);
    }

    #[test]
    fn sentiment_boundary_is_neutral() {
        assert_eq!(SentimentLabel::from_score(0.05, 0.05), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(-0.05, 0.05), SentimentLabel::Neutral);
    }

    #[test]
    fn sort_mode_parses_wire_values() {
        assert_eq!("relevancy".parse::<SortMode>(), Ok(SortMode::Relevancy));
        assert_eq!("popularity".parse::<SortMode>(), Ok(SortMode::Popularity));
        assert_eq!("publishedAt".parse::<SortMode>(), Ok(SortMode::PublishedAt));
    }

    #[test]
    fn sort_mode_rejects_unknown_value() {
        let err = "newest".parse::<SortMode>().unwrap_err();
        assert_eq!(err, UnknownSortMode("newest".to_string()));
    }

    #[test]
    fn analysis_result_serializes_label_as_word() {
        let result = AnalysisResult {
            title: "Markets rally".to_string(),
            summary: "Stocks rose.".to_string(),
            sentiment: SentimentLabel::Positive,
        };
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["sentiment"], "Positive");
        assert_eq!(json["title"], "Markets rally");
    }

    #[test]
    fn article_stub_serializes_flat_shape() {
        let stub = ArticleStub {
            title: "t".to_string(),
            url: "https://example.com/a".to_string(),
            source: "Example".to_string(),
        };
        let json = serde_json::to_string(&stub).expect("serialize");
        assert_eq!(
            json,
            r#"{"title":"t","url":"https://example.com/a","source":"Example"}"#
        );
    }
}
