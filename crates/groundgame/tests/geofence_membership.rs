//! End-to-end checks of the membership math through the public geofence
//! surface: the pure functions, stored shapes, and the probe path used by the
//! check endpoint.

mod common;

use std::sync::Arc;

use groundgame::campaign::geofences::{
    GeofenceService, GeofenceServiceError, GeofenceSubmission, MembershipProbe, ShapeSubmission,
};
use groundgame::geo::{haversine_distance_m, point_in_circle, point_in_polygon, Point};

use common::{MemoryGeofenceRepository, RecordingPublisher};

const SAO_PAULO: Point = Point::new(-46.6333, -23.5505);

fn service() -> GeofenceService<MemoryGeofenceRepository, RecordingPublisher> {
    GeofenceService::new(
        Arc::new(MemoryGeofenceRepository::default()),
        Arc::new(RecordingPublisher::default()),
    )
}

#[test]
fn stored_circle_reports_membership_in_meters() {
    let service = service();
    let stored = service
        .create(GeofenceSubmission {
            name: "Centro 1.5km".to_string(),
            color: None,
            active: true,
            shape: ShapeSubmission::Circle {
                center: SAO_PAULO,
                radius_km: 1.5,
            },
        })
        .expect("geofence creates");

    // Roughly 0.4 km away: inside. Roughly 20 km away: outside.
    assert!(stored.shape.contains(Point::new(-46.6300, -23.5500)));
    assert!(!stored.shape.contains(Point::new(-46.5000, -23.4000)));
}

#[test]
fn stored_polygon_reports_membership() {
    let service = service();
    let stored = service
        .create(GeofenceSubmission {
            name: "República quad".to_string(),
            color: None,
            active: true,
            shape: ShapeSubmission::Polygon {
                rings: vec![vec![
                    Point::new(-46.65, -23.56),
                    Point::new(-46.60, -23.56),
                    Point::new(-46.60, -23.53),
                    Point::new(-46.65, -23.53),
                ]],
            },
        })
        .expect("geofence creates");

    assert!(stored.shape.contains(Point::new(-46.62, -23.545)));
    assert!(!stored.shape.contains(Point::new(-46.70, -23.545)));
}

#[test]
fn probe_converts_kilometers_at_the_boundary() {
    let service = service();
    let inside = service
        .probe(MembershipProbe {
            point: Point::new(-46.6300, -23.5500),
            target: ShapeSubmission::Circle {
                center: SAO_PAULO,
                radius_km: 1.5,
            },
        })
        .expect("probe evaluates");
    assert!(inside);

    let outside = service
        .probe(MembershipProbe {
            point: Point::new(-46.5000, -23.4000),
            target: ShapeSubmission::Circle {
                center: SAO_PAULO,
                radius_km: 1.5,
            },
        })
        .expect("probe evaluates");
    assert!(!outside);
}

#[test]
fn probe_rejects_degenerate_polygon() {
    let service = service();
    let result = service.probe(MembershipProbe {
        point: Point::new(0.0, 0.0),
        target: ShapeSubmission::Polygon {
            rings: vec![vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]],
        },
    });
    assert!(matches!(result, Err(GeofenceServiceError::Validation(_))));
}

#[test]
fn circle_boundary_inclusive_along_any_bearing() {
    // Probe points roughly north, east, and diagonal of the center.
    let probes = [
        Point::new(-46.6333, -23.5400),
        Point::new(-46.6200, -23.5505),
        Point::new(-46.6250, -23.5450),
    ];
    for probe in probes {
        let distance = haversine_distance_m(probe, SAO_PAULO);
        assert!(point_in_circle(probe, SAO_PAULO, distance));
        assert!(!point_in_circle(probe, SAO_PAULO, distance - 0.01));
    }
}

#[test]
fn degenerate_rings_are_false_not_fatal() {
    let empty: Vec<Point> = Vec::new();
    assert!(!point_in_polygon(SAO_PAULO, &empty));
    assert!(!point_in_polygon(SAO_PAULO, &[SAO_PAULO]));
    assert!(!point_in_polygon(
        SAO_PAULO,
        &[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]
    ));
}
