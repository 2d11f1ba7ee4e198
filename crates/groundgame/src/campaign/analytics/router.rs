use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::summary::AnalyticsService;
use super::AnalyticsError;
use crate::campaign::canvassing::VisitRepository;
use crate::campaign::geofences::{GeofenceId, GeofenceRepository};
use crate::campaign::voters::VoterRepository;

/// Router builder exposing the summary endpoint and per-region rosters.
pub fn analytics_router<V, C, G>(service: Arc<AnalyticsService<V, C, G>>) -> Router
where
    V: VoterRepository + 'static,
    C: VisitRepository + 'static,
    G: GeofenceRepository + 'static,
{
    Router::new()
        .route("/api/v1/analytics/summary", get(summary_handler::<V, C, G>))
        .route(
            "/api/v1/geofences/:geofence_id/voters",
            get(region_roster_handler::<V, C, G>),
        )
        .with_state(service)
}

fn error_response(error: AnalyticsError) -> Response {
    let status = match &error {
        AnalyticsError::UnknownGeofence(_) => StatusCode::NOT_FOUND,
        AnalyticsError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn summary_handler<V, C, G>(
    State(service): State<Arc<AnalyticsService<V, C, G>>>,
) -> Response
where
    V: VoterRepository + 'static,
    C: VisitRepository + 'static,
    G: GeofenceRepository + 'static,
{
    match service.summary() {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn region_roster_handler<V, C, G>(
    State(service): State<Arc<AnalyticsService<V, C, G>>>,
    Path(geofence_id): Path<String>,
) -> Response
where
    V: VoterRepository + 'static,
    C: VisitRepository + 'static,
    G: GeofenceRepository + 'static,
{
    match service.region_roster(&GeofenceId(geofence_id)) {
        Ok(roster) => (StatusCode::OK, axum::Json(roster)).into_response(),
        Err(error) => error_response(error),
    }
}
