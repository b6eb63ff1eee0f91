use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use aiready_core::{Comparison, Report};

use crate::middleware::RequestId;

use super::{map_analyzer_error, persist_best_effort, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct CompareRequest {
    pub url_a: String,
    pub url_b: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ComparePayload {
    pub report_a: Report,
    pub report_b: Report,
    pub comparison: Comparison,
}

/// `POST /api/v1/compare`: analyze two URLs concurrently and diff them.
///
/// One side's fetch failure degrades that side's Report; the Comparison is
/// still produced. Both Reports are persisted when a store is configured, so
/// each side's history stays complete.
pub(super) async fn compare(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<CompareRequest>,
) -> Result<Json<ApiResponse<ComparePayload>>, ApiError> {
    let (report_a, report_b, comparison) = state
        .analyzer
        .analyze_pair(&body.url_a, &body.url_b)
        .await
        .map_err(|e| map_analyzer_error(req_id.0.clone(), &e))?;

    persist_best_effort(&state, &report_a).await;
    persist_best_effort(&state, &report_b).await;

    Ok(Json(ApiResponse {
        data: ComparePayload {
            report_a,
            report_b,
            comparison,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
