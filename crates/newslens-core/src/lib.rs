//! Shared types and configuration for the newslens workspace.

pub mod app_config;
pub mod config;
pub mod types;

use thiserror::Error;

pub use app_config::{AllowedOrigins, AppConfig, Environment, ProviderKind};
pub use config::{load_app_config, load_app_config_from_env};
pub use types::{AnalysisResult, ArticleStub, SentimentLabel, SortMode, UnknownSortMode};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
