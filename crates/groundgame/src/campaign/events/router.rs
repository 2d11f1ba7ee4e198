use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{EventId, EventSubmission};
use super::repository::EventRepository;
use super::service::{EventService, EventServiceError};
use crate::campaign::notifications::NotificationPublisher;
use crate::campaign::RepositoryError;

/// Router builder exposing the calendar endpoints.
pub fn event_router<R, P>(service: Arc<EventService<R, P>>) -> Router
where
    R: EventRepository + 'static,
    P: NotificationPublisher + 'static,
{
    Router::new()
        .route(
            "/api/v1/events",
            post(schedule_handler::<R, P>).get(list_handler::<R, P>),
        )
        .route(
            "/api/v1/events/:event_id",
            get(get_handler::<R, P>).delete(cancel_handler::<R, P>),
        )
        .with_state(service)
}

fn error_response(error: EventServiceError) -> Response {
    let status = match &error {
        EventServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EventServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        EventServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn schedule_handler<R, P>(
    State(service): State<Arc<EventService<R, P>>>,
    axum::Json(submission): axum::Json<EventSubmission>,
) -> Response
where
    R: EventRepository + 'static,
    P: NotificationPublisher + 'static,
{
    match service.schedule(submission) {
        Ok(event) => (StatusCode::CREATED, axum::Json(event)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R, P>(State(service): State<Arc<EventService<R, P>>>) -> Response
where
    R: EventRepository + 'static,
    P: NotificationPublisher + 'static,
{
    match service.list() {
        Ok(events) => (StatusCode::OK, axum::Json(events)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_handler<R, P>(
    State(service): State<Arc<EventService<R, P>>>,
    Path(event_id): Path<String>,
) -> Response
where
    R: EventRepository + 'static,
    P: NotificationPublisher + 'static,
{
    match service.get(&EventId(event_id)) {
        Ok(event) => (StatusCode::OK, axum::Json(event)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn cancel_handler<R, P>(
    State(service): State<Arc<EventService<R, P>>>,
    Path(event_id): Path<String>,
) -> Response
where
    R: EventRepository + 'static,
    P: NotificationPublisher + 'static,
{
    match service.cancel(&EventId(event_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}
