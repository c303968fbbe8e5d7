use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::history::ReportHistory;
use super::pipeline::AnalysisError;
use super::profile::{BusinessInput, QuickInput};
use super::service::{AnalysisService, AnalysisServiceError};

const DEFAULT_HISTORY_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    #[serde(flatten)]
    pub input: BusinessInput,
    #[serde(default)]
    pub augment: bool,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

/// Router builder exposing the analysis endpoints.
pub fn analysis_router<H>(service: Arc<AnalysisService<H>>) -> Router
where
    H: ReportHistory + 'static,
{
    Router::new()
        .route("/api/v1/analysis", post(analyze_handler::<H>))
        .route("/api/v1/analysis/quick", post(quick_handler::<H>))
        .route("/api/v1/analysis/history", get(history_handler::<H>))
        .with_state(service)
}

pub(crate) async fn analyze_handler<H>(
    State(service): State<Arc<AnalysisService<H>>>,
    axum::Json(request): axum::Json<AnalysisRequest>,
) -> Response
where
    H: ReportHistory + 'static,
{
    match service.analyze(request.input, request.augment).await {
        Ok(report) => (StatusCode::OK, axum::Json(report.export())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn quick_handler<H>(
    State(service): State<Arc<AnalysisService<H>>>,
    axum::Json(input): axum::Json<QuickInput>,
) -> Response
where
    H: ReportHistory + 'static,
{
    match service.quick(input) {
        Ok(assessment) => (StatusCode::OK, axum::Json(assessment)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn history_handler<H>(
    State(service): State<Arc<AnalysisService<H>>>,
    Query(query): Query<HistoryQuery>,
) -> Response
where
    H: ReportHistory + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    match service.history(limit) {
        Ok(entries) => (StatusCode::OK, axum::Json(entries)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: AnalysisServiceError) -> Response {
    match error {
        AnalysisServiceError::Analysis(AnalysisError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        AnalysisServiceError::Analysis(AnalysisError::Configuration { scorecard, source }) => {
            let payload = json!({
                "error": source.to_string(),
                "scorecard": scorecard,
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
