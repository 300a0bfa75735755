use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{CompanyProfile, RiskCategory, SessionId};
use super::repository::AssessmentRepository;
use super::service::{AssessmentService, QuoteServiceError};

/// Router builder exposing the assessment intake and quoting endpoints.
pub fn assessment_router<R>(service: Arc<AssessmentService<R>>) -> Router
where
    R: AssessmentRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/assessments/:session_id/scores",
            post(score_handler::<R>),
        )
        .route(
            "/api/v1/assessments/:session_id/company",
            post(company_handler::<R>),
        )
        .route(
            "/api/v1/assessments/:session_id/quote",
            post(quote_handler::<R>),
        )
        .route("/api/v1/assessments/:session_id", get(status_handler::<R>))
        .with_state(service)
}

/// One category answer. Unknown category names are rejected during
/// deserialization; the score range is validated by the service.
#[derive(Debug, Deserialize)]
pub struct ScoreSubmission {
    pub category: RiskCategory,
    pub score: u8,
}

pub(crate) async fn score_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(session_id): Path<String>,
    axum::Json(submission): axum::Json<ScoreSubmission>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let session = SessionId(session_id);
    match service.record_score(&session, submission.category, submission.score) {
        Ok(view) => (StatusCode::ACCEPTED, axum::Json(view)).into_response(),
        Err(QuoteServiceError::Score(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn company_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(session_id): Path<String>,
    axum::Json(patch): axum::Json<CompanyProfile>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let session = SessionId(session_id);
    match service.update_company(&session, patch) {
        Ok(view) => (StatusCode::ACCEPTED, axum::Json(view)).into_response(),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn quote_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let session = SessionId(session_id);
    match service.quote(&session) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let session = SessionId(session_id);
    match service.get(&session) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(other) => internal_error(other),
    }
}

fn internal_error(error: QuoteServiceError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
