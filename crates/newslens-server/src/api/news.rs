use axum::{
    extract::{Query, State},
    Extension, Json,
};
use newslens_core::{ArticleStub, SortMode};
use newslens_search::SearchQuery;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_search_error, ApiError, AppState};

/// Raw query string; parsed by hand so bad values get the JSON error envelope.
#[derive(Debug, Deserialize)]
pub(super) struct FetchNewsQuery {
    pub query: Option<String>,
    pub sort_by: Option<String>,
    pub page_size: Option<String>,
}

pub(super) async fn fetch_news(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<FetchNewsQuery>,
) -> Result<Json<Vec<ArticleStub>>, ApiError> {
    let keywords = params.query.unwrap_or_default();

    let sort_mode = match params.sort_by.as_deref() {
        None | Some("") => SortMode::default(),
        Some(raw) => raw
            .parse::<SortMode>()
            .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?,
    };

    let page_size = match params.page_size.as_deref() {
        None | Some("") => state.default_page_size,
        Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
            ApiError::new(
                req_id.0.clone(),
                "validation_error",
                format!("page_size must be a positive integer, got \"{raw}\""),
            )
        })?,
    };

    let query = SearchQuery::new(&keywords, sort_mode, page_size, state.overfetch_size)
        .map_err(|e| map_search_error(req_id.0.clone(), &e))?;

    let articles = state
        .aggregator
        .aggregate(&query)
        .await
        .map_err(|e| map_search_error(req_id.0.clone(), &e))?;

    tracing::info!(
        query = %query.keywords,
        sort_by = %query.sort_mode,
        page_size = query.page_size,
        count = articles.len(),
        "fetch_news served"
    );

    Ok(Json(articles))
}
