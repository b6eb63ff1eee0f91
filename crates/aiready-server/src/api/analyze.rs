use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use aiready_core::Report;

use crate::middleware::RequestId;

use super::{map_analyzer_error, persist_best_effort, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeRequest {
    pub url: String,
}

/// `POST /api/v1/analyze`: run the full pipeline for one URL.
///
/// Fetch failures come back as a degraded Report (HTTP 200); only a
/// malformed URL is rejected outright.
pub(super) async fn analyze(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<AnalyzeRequest>,
) -> Result<Json<ApiResponse<Report>>, ApiError> {
    let report = state
        .analyzer
        .analyze(&body.url)
        .await
        .map_err(|e| map_analyzer_error(req_id.0.clone(), &e))?;

    persist_best_effort(&state, &report).await;

    Ok(Json(ApiResponse {
        data: report,
        meta: ResponseMeta::new(req_id.0),
    }))
}
