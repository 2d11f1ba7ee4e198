use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::repository::VisitRepository;
use super::service::{CanvassService, CanvassServiceError};
use crate::campaign::canvassing::domain::VisitSubmission;
use crate::campaign::notifications::NotificationPublisher;
use crate::campaign::voters::{VoterId, VoterRepository};

/// Router builder exposing visit logging and lookup.
pub fn canvass_router<R, V, P>(service: Arc<CanvassService<R, V, P>>) -> Router
where
    R: VisitRepository + 'static,
    V: VoterRepository + 'static,
    P: NotificationPublisher + 'static,
{
    Router::new()
        .route(
            "/api/v1/canvassing/visits",
            post(log_visit_handler::<R, V, P>).get(visits_handler::<R, V, P>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct VisitQuery {
    #[serde(default)]
    voter_id: Option<String>,
}

fn error_response(error: CanvassServiceError) -> Response {
    let status = match &error {
        CanvassServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CanvassServiceError::UnknownVoter(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn log_visit_handler<R, V, P>(
    State(service): State<Arc<CanvassService<R, V, P>>>,
    axum::Json(submission): axum::Json<VisitSubmission>,
) -> Response
where
    R: VisitRepository + 'static,
    V: VoterRepository + 'static,
    P: NotificationPublisher + 'static,
{
    match service.log_visit(submission) {
        Ok(visit) => (StatusCode::CREATED, axum::Json(visit)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn visits_handler<R, V, P>(
    State(service): State<Arc<CanvassService<R, V, P>>>,
    Query(query): Query<VisitQuery>,
) -> Response
where
    R: VisitRepository + 'static,
    V: VoterRepository + 'static,
    P: NotificationPublisher + 'static,
{
    let voter_id = query.voter_id.map(VoterId);
    match service.visits(voter_id.as_ref()) {
        Ok(visits) => (StatusCode::OK, axum::Json(visits)).into_response(),
        Err(error) => error_response(error),
    }
}
