mod analyze;
mod news;

use std::sync::Arc;

use axum::{
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use newslens_analysis::{AnalysisError, Analyzer};
use newslens_core::{AllowedOrigins, AppConfig};
use newslens_search::{Aggregator, SearchError};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
    pub analyzer: Arc<Analyzer>,
    pub default_page_size: usize,
    pub overfetch_size: usize,
}

impl AppState {
    /// Build the HTTP-backed pipeline components from configuration.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        Ok(Self {
            aggregator: Arc::new(Aggregator::from_config(config)?),
            analyzer: Arc::new(Analyzer::from_config(config)?),
            default_page_size: config.news_default_page_size,
            overfetch_size: config.news_overfetch_size,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

/// Error envelope returned by every route.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    status: StatusCode,
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    /// Status is derived from `code`.
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let code = code.into();
        let status = match code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "bad_gateway" => StatusCode::BAD_GATEWAY,
            "service_unavailable" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            error: ErrorBody {
                code,
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }

    /// An `upstream_error` mirroring a dependency's HTTP status.
    ///
    /// Statuses that are not client or server errors become 502.
    pub fn upstream(request_id: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        let mut err = Self::new(request_id, "upstream_error", message);
        err.status = StatusCode::from_u16(status)
            .ok()
            .filter(|s| s.is_client_error() || s.is_server_error())
            .unwrap_or(StatusCode::BAD_GATEWAY);
        err
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

pub(super) fn map_search_error(request_id: String, error: &SearchError) -> ApiError {
    match error {
        SearchError::InvalidQuery(reason) => {
            ApiError::new(request_id, "validation_error", reason.clone())
        }
        SearchError::Upstream { status, .. } => {
            tracing::warn!(error = %error, "news search failed upstream");
            ApiError::upstream(request_id, *status, error.to_string())
        }
        SearchError::Http(_) => {
            tracing::warn!(error = %error, "news provider unreachable");
            ApiError::new(request_id, "service_unavailable", error.to_string())
        }
        SearchError::Deserialize { .. } | SearchError::InvalidBaseUrl { .. } => {
            tracing::error!(error = %error, "news search failed");
            ApiError::new(request_id, "internal_error", "news search failed")
        }
    }
}

pub(super) fn map_analysis_error(request_id: String, error: &AnalysisError) -> ApiError {
    match error {
        AnalysisError::Extraction { .. } => {
            tracing::info!(error = %error, "article extraction failed");
            ApiError::new(request_id, "not_found", error.to_string())
        }
        AnalysisError::InferenceUnavailable(_) => {
            tracing::warn!(error = %error, "summarization service unreachable");
            ApiError::new(request_id, "service_unavailable", error.to_string())
        }
        AnalysisError::InferenceStatus { status, .. } => {
            tracing::warn!(error = %error, "summarization service returned an error");
            ApiError::upstream(request_id, *status, error.to_string())
        }
        AnalysisError::InferenceResponse(_) => {
            tracing::warn!(error = %error, "summarization response unusable");
            ApiError::new(request_id, "bad_gateway", error.to_string())
        }
        AnalysisError::Http(_) => {
            tracing::error!(error = %error, "analysis failed");
            ApiError::new(request_id, "internal_error", "analysis failed")
        }
    }
}

fn build_cors(origins: &AllowedOrigins) -> CorsLayer {
    let allow_origin = match origins {
        AllowedOrigins::Any => AllowOrigin::from(Any),
        AllowedOrigins::List(list) => AllowOrigin::list(list.iter().filter_map(|origin| {
            HeaderValue::from_str(origin)
                .inspect_err(|_| tracing::warn!(origin = %origin, "ignoring invalid CORS origin"))
                .ok()
        })),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn build_app(state: AppState, origins: &AllowedOrigins) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/fetch_news/", get(news::fetch_news))
        .route("/fetch_news", get(news::fetch_news))
        .route("/analyze/", get(analyze::analyze))
        .route("/analyze", get(analyze::analyze))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors(origins))
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}
