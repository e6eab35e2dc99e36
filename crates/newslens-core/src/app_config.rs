use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which news search backend the search client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    NewsApi,
    GNews,
}

impl ProviderKind {
    /// Base URL used when `NEWS_API_URL` is not set.
    #[must_use]
    pub fn default_base_url(self) -> &'static str {
        match self {
            ProviderKind::NewsApi => "https://newsapi.org",
            ProviderKind::GNews => "https://gnews.io",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::NewsApi => write!(f, "newsapi"),
            ProviderKind::GNews => write!(f, "gnews"),
        }
    }
}

/// Cross-origin callers permitted by the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub user_agent: String,
    pub allowed_origins: AllowedOrigins,
    pub news_provider: ProviderKind,
    pub news_api_url: String,
    pub news_api_key: String,
    pub news_overfetch_size: usize,
    pub news_default_page_size: usize,
    pub news_max_backfill_pages: usize,
    pub hf_api_url: String,
    pub hf_token: String,
    pub max_words: usize,
    pub sentiment_threshold: f64,
    pub summary_cache_capacity: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("user_agent", &self.user_agent)
            .field("allowed_origins", &self.allowed_origins)
            .field("news_provider", &self.news_provider)
            .field("news_api_url", &self.news_api_url)
            .field("news_api_key", &"[redacted]")
            .field("news_overfetch_size", &self.news_overfetch_size)
            .field("news_default_page_size", &self.news_default_page_size)
            .field("news_max_backfill_pages", &self.news_max_backfill_pages)
            .field("hf_api_url", &self.hf_api_url)
            .field("hf_token", &"[redacted]")
            .field("max_words", &self.max_words)
            .field("sentiment_threshold", &self.sentiment_threshold)
            .field("summary_cache_capacity", &self.summary_cache_capacity)
            .finish()
    }
}
