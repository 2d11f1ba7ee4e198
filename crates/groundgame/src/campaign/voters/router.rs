use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{VoterId, VoterSubmission};
use super::repository::VoterRepository;
use super::roster::RosterError;
use super::service::{VoterService, VoterServiceError};
use crate::campaign::notifications::NotificationPublisher;
use crate::campaign::RepositoryError;

/// Router builder exposing the roster CRUD and CSV endpoints.
pub fn voter_router<R, P>(service: Arc<VoterService<R, P>>) -> Router
where
    R: VoterRepository + 'static,
    P: NotificationPublisher + 'static,
{
    Router::new()
        .route(
            "/api/v1/voters",
            post(register_handler::<R, P>).get(list_handler::<R, P>),
        )
        .route("/api/v1/voters/import", post(import_handler::<R, P>))
        .route("/api/v1/voters/export", get(export_handler::<R, P>))
        .route(
            "/api/v1/voters/:voter_id",
            get(get_handler::<R, P>).put(update_handler::<R, P>),
        )
        .with_state(service)
}

fn error_response(error: VoterServiceError) -> Response {
    let status = match &error {
        VoterServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        VoterServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        VoterServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        VoterServiceError::Roster(RosterError::Csv(_)) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn register_handler<R, P>(
    State(service): State<Arc<VoterService<R, P>>>,
    axum::Json(submission): axum::Json<VoterSubmission>,
) -> Response
where
    R: VoterRepository + 'static,
    P: NotificationPublisher + 'static,
{
    match service.register(submission) {
        Ok(voter) => (StatusCode::CREATED, axum::Json(voter)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R, P>(
    State(service): State<Arc<VoterService<R, P>>>,
) -> Response
where
    R: VoterRepository + 'static,
    P: NotificationPublisher + 'static,
{
    match service.list() {
        Ok(voters) => (StatusCode::OK, axum::Json(voters)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_handler<R, P>(
    State(service): State<Arc<VoterService<R, P>>>,
    Path(voter_id): Path<String>,
) -> Response
where
    R: VoterRepository + 'static,
    P: NotificationPublisher + 'static,
{
    match service.get(&VoterId(voter_id)) {
        Ok(voter) => (StatusCode::OK, axum::Json(voter)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_handler<R, P>(
    State(service): State<Arc<VoterService<R, P>>>,
    Path(voter_id): Path<String>,
    axum::Json(submission): axum::Json<VoterSubmission>,
) -> Response
where
    R: VoterRepository + 'static,
    P: NotificationPublisher + 'static,
{
    match service.update(&VoterId(voter_id), submission) {
        Ok(voter) => (StatusCode::OK, axum::Json(voter)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn import_handler<R, P>(
    State(service): State<Arc<VoterService<R, P>>>,
    body: String,
) -> Response
where
    R: VoterRepository + 'static,
    P: NotificationPublisher + 'static,
{
    match service.import_roster(body.as_bytes()) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn export_handler<R, P>(
    State(service): State<Arc<VoterService<R, P>>>,
) -> Response
where
    R: VoterRepository + 'static,
    P: NotificationPublisher + 'static,
{
    match service.export_roster() {
        Ok(csv_text) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"roster.csv\"",
                ),
            ],
            csv_text,
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}
