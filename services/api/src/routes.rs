use crate::infra::{
    AppState, BroadcastNotificationPublisher, InMemoryEventRepository, InMemoryGeofenceRepository,
    InMemoryVisitRepository, InMemoryVoterRepository,
};
use crate::relay;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

use groundgame::campaign::analytics::{analytics_router, AnalyticsService};
use groundgame::campaign::canvassing::{canvass_router, CanvassService};
use groundgame::campaign::events::{event_router, EventService};
use groundgame::campaign::geofences::{geofence_router, GeofenceService};
use groundgame::campaign::voters::{voter_router, VoterService};

pub(crate) type Voters = VoterService<InMemoryVoterRepository, BroadcastNotificationPublisher>;
pub(crate) type Canvassing = CanvassService<
    InMemoryVisitRepository,
    InMemoryVoterRepository,
    BroadcastNotificationPublisher,
>;
pub(crate) type Events = EventService<InMemoryEventRepository, BroadcastNotificationPublisher>;
pub(crate) type Geofences =
    GeofenceService<InMemoryGeofenceRepository, BroadcastNotificationPublisher>;
pub(crate) type Analytics =
    AnalyticsService<InMemoryVoterRepository, InMemoryVisitRepository, InMemoryGeofenceRepository>;

/// Bundle of the composed services the HTTP surface exposes.
pub(crate) struct CampaignServices {
    pub(crate) voters: Arc<Voters>,
    pub(crate) canvassing: Arc<Canvassing>,
    pub(crate) events: Arc<Events>,
    pub(crate) geofences: Arc<Geofences>,
    pub(crate) analytics: Arc<Analytics>,
}

pub(crate) fn with_campaign_routes(services: CampaignServices) -> axum::Router {
    voter_router(services.voters)
        .merge(canvass_router(services.canvassing))
        .merge(event_router(services.events))
        .merge(geofence_router(services.geofences))
        .merge(analytics_router(services.analytics))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/notifications/ws",
            axum::routing::get(relay::ws_handler),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
