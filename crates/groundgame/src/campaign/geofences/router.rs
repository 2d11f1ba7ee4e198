use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{GeofenceId, GeofenceSubmission, MembershipProbe};
use super::repository::GeofenceRepository;
use super::service::{GeofenceService, GeofenceServiceError};
use crate::campaign::notifications::NotificationPublisher;
use crate::campaign::RepositoryError;

/// Router builder exposing geofence CRUD and the membership check endpoint.
pub fn geofence_router<R, P>(service: Arc<GeofenceService<R, P>>) -> Router
where
    R: GeofenceRepository + 'static,
    P: NotificationPublisher + 'static,
{
    Router::new()
        .route(
            "/api/v1/geofences",
            post(create_handler::<R, P>).get(list_handler::<R, P>),
        )
        .route("/api/v1/geofences/check", post(check_handler::<R, P>))
        .route(
            "/api/v1/geofences/:geofence_id",
            get(get_handler::<R, P>)
                .put(update_handler::<R, P>)
                .delete(remove_handler::<R, P>),
        )
        .with_state(service)
}

fn error_response(error: GeofenceServiceError) -> Response {
    let status = match &error {
        GeofenceServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        GeofenceServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        GeofenceServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn create_handler<R, P>(
    State(service): State<Arc<GeofenceService<R, P>>>,
    axum::Json(submission): axum::Json<GeofenceSubmission>,
) -> Response
where
    R: GeofenceRepository + 'static,
    P: NotificationPublisher + 'static,
{
    match service.create(submission) {
        Ok(geofence) => (StatusCode::CREATED, axum::Json(geofence)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R, P>(
    State(service): State<Arc<GeofenceService<R, P>>>,
) -> Response
where
    R: GeofenceRepository + 'static,
    P: NotificationPublisher + 'static,
{
    match service.list() {
        Ok(geofences) => (StatusCode::OK, axum::Json(geofences)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_handler<R, P>(
    State(service): State<Arc<GeofenceService<R, P>>>,
    Path(geofence_id): Path<String>,
) -> Response
where
    R: GeofenceRepository + 'static,
    P: NotificationPublisher + 'static,
{
    match service.get(&GeofenceId(geofence_id)) {
        Ok(geofence) => (StatusCode::OK, axum::Json(geofence)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_handler<R, P>(
    State(service): State<Arc<GeofenceService<R, P>>>,
    Path(geofence_id): Path<String>,
    axum::Json(submission): axum::Json<GeofenceSubmission>,
) -> Response
where
    R: GeofenceRepository + 'static,
    P: NotificationPublisher + 'static,
{
    match service.update(&GeofenceId(geofence_id), submission) {
        Ok(geofence) => (StatusCode::OK, axum::Json(geofence)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn remove_handler<R, P>(
    State(service): State<Arc<GeofenceService<R, P>>>,
    Path(geofence_id): Path<String>,
) -> Response
where
    R: GeofenceRepository + 'static,
    P: NotificationPublisher + 'static,
{
    match service.remove(&GeofenceId(geofence_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn check_handler<R, P>(
    State(service): State<Arc<GeofenceService<R, P>>>,
    axum::Json(probe): axum::Json<MembershipProbe>,
) -> Response
where
    R: GeofenceRepository + 'static,
    P: NotificationPublisher + 'static,
{
    match service.probe(probe) {
        Ok(inside) => (StatusCode::OK, axum::Json(json!({ "inside": inside }))).into_response(),
        Err(error) => error_response(error),
    }
}
