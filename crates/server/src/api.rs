use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::error;

use glint_core::domain::request::{
    AirbnbRequest, CommercialRequest, QuoteRequest, ResidentialRequest,
};
use glint_core::domain::submission::FailedQueueEntry;
use glint_pipeline::{RetryController, SubmissionOutcome, SubmissionService};
use glint_store::FailureQueue;

#[derive(Clone)]
pub struct ApiState {
    pub submissions: Arc<SubmissionService>,
    pub retries: Arc<RetryController>,
    pub queue: FailureQueue,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/quotes/residential", post(submit_residential))
        .route("/api/quotes/commercial", post(submit_commercial))
        .route("/api/quotes/airbnb", post(submit_airbnb))
        .route("/api/failed-submissions", get(list_failed).delete(clear_failed))
        .route("/api/failed-submissions/retry", post(retry_failed))
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub delivered: bool,
    pub reference_id: String,
    pub quoted_total: Option<u32>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct FailedListing {
    pub count: usize,
    pub entries: Vec<FailedQueueEntry>,
}

#[derive(Debug, Serialize)]
pub struct RetryResponse {
    pub succeeded: usize,
    pub total: usize,
    pub remaining: usize,
}

async fn submit_residential(
    State(state): State<ApiState>,
    Json(request): Json<ResidentialRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    submit(&state, QuoteRequest::Residential(request)).await
}

async fn submit_commercial(
    State(state): State<ApiState>,
    Json(request): Json<CommercialRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    submit(&state, QuoteRequest::Commercial(request)).await
}

async fn submit_airbnb(
    State(state): State<ApiState>,
    Json(request): Json<AirbnbRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    submit(&state, QuoteRequest::Airbnb(request)).await
}

async fn submit(
    state: &ApiState,
    request: QuoteRequest,
) -> (StatusCode, Json<serde_json::Value>) {
    match state.submissions.submit(request).await {
        Ok(outcome) => {
            let response = submission_response(&outcome);
            (StatusCode::OK, Json(to_value(response)))
        }
        Err(validation_error) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(to_value(ApiError { error: validation_error.to_string() })),
        ),
    }
}

fn submission_response(outcome: &SubmissionOutcome) -> SubmissionResponse {
    match outcome {
        SubmissionOutcome::Delivered { submission, total, .. } => SubmissionResponse {
            delivered: true,
            reference_id: submission.reference_id.clone(),
            quoted_total: *total,
            error: None,
        },
        SubmissionOutcome::Queued { submission, total, error } => SubmissionResponse {
            delivered: false,
            reference_id: submission.reference_id.clone(),
            quoted_total: *total,
            error: Some(error.clone()),
        },
    }
}

async fn list_failed(State(state): State<ApiState>) -> Json<serde_json::Value> {
    let entries = state.queue.list().await;
    Json(to_value(FailedListing { count: entries.len(), entries }))
}

async fn retry_failed(State(state): State<ApiState>) -> Json<serde_json::Value> {
    let report = state.retries.retry_all().await;
    Json(to_value(RetryResponse {
        succeeded: report.succeeded,
        total: report.total,
        remaining: report.remaining.len(),
    }))
}

async fn clear_failed(State(state): State<ApiState>) -> StatusCode {
    match state.queue.clear().await {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(clear_error) => {
            error!(
                event_name = "api.queue_clear_failed",
                error = %clear_error,
                "failed-submission queue could not be cleared"
            );
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn to_value<T: Serialize>(payload: T) -> serde_json::Value {
    serde_json::to_value(payload).unwrap_or_else(|serialize_error| {
        error!(
            event_name = "api.serialize_failed",
            error = %serialize_error,
            "response payload could not be serialized"
        );
        serde_json::json!({"error": "internal serialization failure"})
    })
}
