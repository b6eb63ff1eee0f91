use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use aiready_analyzer::{comparison_markdown, report_markdown};
use aiready_core::{Comparison, Report};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, ResponseMeta};

/// Exactly one of the two fields must be set; validated at the boundary.
#[derive(Debug, Deserialize)]
pub(super) struct ExportRequest {
    #[serde(default)]
    pub report: Option<Report>,
    #[serde(default)]
    pub comparison: Option<Comparison>,
}

#[derive(Debug, Serialize)]
pub(super) struct ExportData {
    pub markdown: String,
}

/// `POST /api/v1/export`: render an already-computed Report or Comparison
/// to Markdown. Pure; no fetching or store access.
pub(super) async fn export(
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ExportRequest>,
) -> Result<Json<ApiResponse<ExportData>>, ApiError> {
    let markdown = match (body.report, body.comparison) {
        (Some(report), None) => report_markdown(&report),
        (None, Some(comparison)) => comparison_markdown(&comparison),
        _ => {
            return Err(ApiError::new(
                req_id.0,
                "validation_error",
                "provide exactly one of \"report\" or \"comparison\"",
            ))
        }
    };

    Ok(Json(ApiResponse {
        data: ExportData { markdown },
        meta: ResponseMeta::new(req_id.0),
    }))
}
