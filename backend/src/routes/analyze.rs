//! Analysis API route

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use metabolic_ai_shared::types::{AnalyzeRequest, AnalyzeResponse};

/// Create analysis routes
pub fn analyze_routes() -> Router<AppState> {
    Router::new().route("/analyze", post(analyze))
}

/// POST /api/analyze - Generate an AI analysis of the submitted metrics
///
/// The client-computed BMI/BMR/TDEE are trusted as sent. Any failure of the
/// completion service becomes a 500 with a fixed message.
async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> ApiResult<Json<AnalyzeResponse>> {
    let Json(req) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let analysis = state.analysis().analyze(&req).await?;

    Ok(Json(AnalyzeResponse { analysis }))
}
