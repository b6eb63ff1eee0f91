use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use aiready_core::Report;

use crate::middleware::RequestId;

use super::{map_analyzer_error, map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct HistoryQuery {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub(super) struct HistoryData {
    pub latest: Option<Report>,
    pub previous: Option<Report>,
}

/// `GET /api/v1/history?url=`: latest and previous scans for a URL.
///
/// An unconfigured store degrades to a structured `history_not_configured`
/// error; it never affects the analysis and comparison paths.
pub(super) async fn history(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<HistoryData>>, ApiError> {
    let canonical = aiready_analyzer::canonicalize(&query.url)
        .map_err(|e| map_analyzer_error(req_id.0.clone(), &e))?;

    let Some(pool) = &state.pool else {
        return Err(ApiError::new(
            req_id.0,
            "history_not_configured",
            "History not configured",
        ));
    };

    let (latest, previous) = aiready_db::get_history(pool, &canonical)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let latest = latest
        .map(aiready_db::ReportRow::into_report)
        .transpose()
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;
    let previous = previous
        .map(aiready_db::ReportRow::into_report)
        .transpose()
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: HistoryData { latest, previous },
        meta: ResponseMeta::new(req_id.0),
    }))
}
