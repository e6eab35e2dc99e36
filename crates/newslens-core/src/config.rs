use std::net::SocketAddr;

use crate::app_config::{AllowedOrigins, AppConfig, Environment, ProviderKind};
use crate::ConfigError;

const DEFAULT_HF_API_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-cnn";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .trim()
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let news_api_key = require("NEWS_API_KEY")?;
    let hf_token = require("HF_TOKEN")?;

    let env = parse_environment(&or_default("NEWSLENS_ENV", "development"))?;
    let bind_addr = or_default("NEWSLENS_BIND_ADDR", "0.0.0.0:8000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("NEWSLENS_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("NEWSLENS_LOG_LEVEL", "info");
    let user_agent = or_default("NEWSLENS_USER_AGENT", "newslens/0.1 (news-analysis)");
    let allowed_origins = parse_allowed_origins(&or_default("ALLOWED_ORIGINS", "*"));

    let news_provider = parse_provider(&or_default("NEWS_PROVIDER", "newsapi"))?;
    let news_api_url = or_default("NEWS_API_URL", news_provider.default_base_url());

    let news_overfetch_size = parse_usize("NEWS_OVERFETCH_SIZE", "50")?;
    if news_overfetch_size == 0 {
        return Err(invalid("NEWS_OVERFETCH_SIZE", "must be at least 1".to_string()));
    }
    let news_default_page_size = parse_usize("NEWS_DEFAULT_PAGE_SIZE", "10")?;
    if news_default_page_size == 0 || news_default_page_size > news_overfetch_size {
        return Err(invalid(
            "NEWS_DEFAULT_PAGE_SIZE",
            format!("must be between 1 and NEWS_OVERFETCH_SIZE ({news_overfetch_size})"),
        ));
    }
    let news_max_backfill_pages = parse_usize("NEWS_MAX_BACKFILL_PAGES", "2")?;

    let hf_api_url = or_default("HF_API_URL", DEFAULT_HF_API_URL);

    let max_words = parse_usize("MAX_WORDS", "130")?;
    if max_words == 0 {
        return Err(invalid("MAX_WORDS", "must be at least 1".to_string()));
    }

    let sentiment_threshold = or_default("SENTIMENT_THRESHOLD", "0.05")
        .trim()
        .parse::<f64>()
        .map_err(|e| invalid("SENTIMENT_THRESHOLD", e.to_string()))?;
    if !sentiment_threshold.is_finite() || !(0.0..1.0).contains(&sentiment_threshold) {
        return Err(invalid(
            "SENTIMENT_THRESHOLD",
            "must be a finite value in [0, 1)".to_string(),
        ));
    }

    let summary_cache_capacity = parse_usize("SUMMARY_CACHE_CAPACITY", "100")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        user_agent,
        allowed_origins,
        news_provider,
        news_api_url,
        news_api_key,
        news_overfetch_size,
        news_default_page_size,
        news_max_backfill_pages,
        hf_api_url,
        hf_token,
        max_words,
        sentiment_threshold,
        summary_cache_capacity,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s.trim() {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "NEWSLENS_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

fn parse_provider(s: &str) -> Result<ProviderKind, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "newsapi" => Ok(ProviderKind::NewsApi),
        "gnews" => Ok(ProviderKind::GNews),
        other => Err(ConfigError::InvalidEnvVar {
            var: "NEWS_PROVIDER".to_string(),
            reason: format!("unknown provider \"{other}\"; expected newsapi or gnews"),
        }),
    }
}

/// `*` (or an empty value) allows any origin; otherwise a comma-separated list.
fn parse_allowed_origins(raw: &str) -> AllowedOrigins {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        AllowedOrigins::Any
    } else {
        AllowedOrigins::List(origins)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
