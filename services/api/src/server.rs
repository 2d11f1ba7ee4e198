use crate::cli::ServeArgs;
use crate::infra::{
    AppState, BroadcastNotificationPublisher, InMemoryEventRepository, InMemoryGeofenceRepository,
    InMemoryVisitRepository, InMemoryVoterRepository,
};
use crate::routes::{with_campaign_routes, CampaignServices};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::info;

use groundgame::campaign::analytics::AnalyticsService;
use groundgame::campaign::canvassing::CanvassService;
use groundgame::campaign::events::EventService;
use groundgame::campaign::geofences::GeofenceService;
use groundgame::campaign::voters::VoterService;
use groundgame::config::AppConfig;
use groundgame::error::AppError;
use groundgame::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let (notify_tx, _) = broadcast::channel(config.notifications.channel_capacity);
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        notifications: notify_tx.clone(),
    };

    let publisher = Arc::new(BroadcastNotificationPublisher::new(notify_tx));
    let voter_repository = Arc::new(InMemoryVoterRepository::default());
    let visit_repository = Arc::new(InMemoryVisitRepository::default());
    let event_repository = Arc::new(InMemoryEventRepository::default());
    let geofence_repository = Arc::new(InMemoryGeofenceRepository::default());

    let services = CampaignServices {
        voters: Arc::new(VoterService::new(
            voter_repository.clone(),
            publisher.clone(),
        )),
        canvassing: Arc::new(CanvassService::new(
            visit_repository.clone(),
            voter_repository.clone(),
            publisher.clone(),
        )),
        events: Arc::new(EventService::new(event_repository, publisher.clone())),
        geofences: Arc::new(GeofenceService::new(
            geofence_repository.clone(),
            publisher,
        )),
        analytics: Arc::new(AnalyticsService::new(
            voter_repository,
            visit_repository,
            geofence_repository,
        )),
    };

    let app = with_campaign_routes(services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "campaign field-operations backend ready");

    axum::serve(listener, app).await?;
    Ok(())
}
