use axum::{
    extract::{Query, State},
    Extension, Json,
};
use newslens_core::AnalysisResult;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_analysis_error, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeQuery {
    pub url: Option<String>,
}

pub(super) async fn analyze(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<AnalyzeQuery>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let url = params
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "validation_error", "url is required"))?;

    let result = state
        .analyzer
        .analyze(url)
        .await
        .map_err(|e| map_analysis_error(req_id.0.clone(), &e))?;

    Ok(Json(result))
}
