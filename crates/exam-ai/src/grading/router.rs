use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::ExamSubmission;
use super::repository::{ReportId, ReportRepository, RepositoryError};
use super::service::{GradingService, GradingServiceError};

const DEFAULT_RECENT_LIMIT: usize = 20;

/// Router builder exposing HTTP endpoints for grading and report lookup.
pub fn grading_router<R>(service: Arc<GradingService<R>>) -> Router
where
    R: ReportRepository + 'static,
{
    Router::new()
        .route("/api/v1/exams/grade", post(grade_handler::<R>))
        .route("/api/v1/exams/reports", get(recent_reports_handler::<R>))
        .route(
            "/api/v1/exams/reports/:report_id",
            get(report_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn grade_handler<R>(
    State(service): State<Arc<GradingService<R>>>,
    axum::Json(submission): axum::Json<ExamSubmission>,
) -> Response
where
    R: ReportRepository + 'static,
{
    // The gateway call blocks on its own runtime, so the grading pass runs
    // on the blocking pool rather than a worker thread.
    let outcome = tokio::task::spawn_blocking(move || service.grade(submission)).await;

    match outcome {
        Ok(Ok(record)) => (StatusCode::OK, axum::Json(record)).into_response(),
        Ok(Err(GradingServiceError::Validation(error))) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Ok(Err(other)) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
        Err(join_error) => {
            let payload = json!({ "error": format!("grading task failed: {join_error}") });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn report_handler<R>(
    State(service): State<Arc<GradingService<R>>>,
    Path(report_id): Path<String>,
) -> Response
where
    R: ReportRepository + 'static,
{
    let id = ReportId(report_id);
    match service.report(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(GradingServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "report_id": id.0,
                "error": "report not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecentReportsQuery {
    #[serde(default)]
    limit: Option<usize>,
}

pub(crate) async fn recent_reports_handler<R>(
    State(service): State<Arc<GradingService<R>>>,
    Query(query): Query<RecentReportsQuery>,
) -> Response
where
    R: ReportRepository + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    match service.recent_reports(limit) {
        Ok(records) => {
            let views: Vec<_> = records
                .iter()
                .map(|record| record.summary_view())
                .collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
