//! Integration scenarios for the campaign calendar: scheduling,
//! chronological listing, cancellation, and the HTTP endpoints.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::{Duration, TimeZone, Utc};
use tower::util::ServiceExt;

use groundgame::campaign::events::{
    event_router, EventId, EventService, EventServiceError, EventSubmission,
};
use groundgame::campaign::notifications::NotificationTopic;
use groundgame::campaign::RepositoryError;
use groundgame::geo::Point;

use common::{MemoryEventRepository, RecordingPublisher};

fn service() -> (
    EventService<MemoryEventRepository, RecordingPublisher>,
    Arc<RecordingPublisher>,
) {
    let publisher = Arc::new(RecordingPublisher::default());
    let service = EventService::new(
        Arc::new(MemoryEventRepository::default()),
        publisher.clone(),
    );
    (service, publisher)
}

fn submission(title: &str, day: u32) -> EventSubmission {
    let starts_at = Utc
        .with_ymd_and_hms(2026, 9, day, 18, 0, 0)
        .single()
        .expect("valid timestamp");
    EventSubmission {
        title: title.to_string(),
        starts_at,
        ends_at: Some(starts_at + Duration::hours(2)),
        location_name: Some("Praça da Sé".to_string()),
        location: Some(Point::new(-46.6339, -23.5503)),
        description: None,
    }
}

#[test]
fn listing_is_chronological_regardless_of_insertion_order() {
    let (service, _) = service();
    service.schedule(submission("Phone bank", 20)).expect("schedules");
    service.schedule(submission("Praça rally", 12)).expect("schedules");
    service.schedule(submission("Door knock", 16)).expect("schedules");

    let titles: Vec<String> = service
        .list()
        .expect("lists")
        .into_iter()
        .map(|event| event.title)
        .collect();
    assert_eq!(titles, ["Praça rally", "Door knock", "Phone bank"]);
}

#[test]
fn cancelling_removes_the_event_and_notifies() {
    let (service, publisher) = service();
    let rally = service.schedule(submission("Praça rally", 12)).expect("schedules");

    service.cancel(&rally.id).expect("cancels");
    assert!(matches!(
        service.get(&rally.id),
        Err(EventServiceError::Repository(RepositoryError::NotFound))
    ));

    let topics: Vec<NotificationTopic> = publisher
        .events()
        .into_iter()
        .map(|notification| notification.topic)
        .collect();
    assert_eq!(
        topics,
        [
            NotificationTopic::EventScheduled,
            NotificationTopic::EventCancelled
        ]
    );
}

#[test]
fn cancelling_a_missing_event_is_not_found() {
    let (service, publisher) = service();
    let result = service.cancel(&EventId("evt-999999".to_string()));
    assert!(matches!(
        result,
        Err(EventServiceError::Repository(RepositoryError::NotFound))
    ));
    assert!(publisher.events().is_empty());
}

#[tokio::test]
async fn event_endpoints_cover_schedule_cancel_and_validation() {
    let (service, _) = service();
    let app = event_router(Arc::new(service));

    let created = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/events")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::to_string(&submission("Praça rally", 12)).expect("serializes"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("router answers");
    assert_eq!(created.status(), StatusCode::CREATED);

    let bytes = axum::body::to_bytes(created.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let event: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
    let event_id = event["id"].as_str().expect("id present");

    let cancelled = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/events/{event_id}"))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router answers");
    assert_eq!(cancelled.status(), StatusCode::NO_CONTENT);

    let missing = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/events/{event_id}"))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router answers");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let mut backwards = submission("Backwards", 12);
    backwards.ends_at = Some(backwards.starts_at - Duration::minutes(5));
    let rejected = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/events")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::to_string(&backwards).expect("serializes"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("router answers");
    assert_eq!(rejected.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
