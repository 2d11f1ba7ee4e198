//! Pure geofence-membership math.
//!
//! Everything here is a total function over plain numeric input: no I/O, no
//! shared state, no error paths. Callers validate coordinate ranges before
//! reaching this module; out-of-range values still produce an answer, just
//! not a meaningful one. Distances are always meters; kilometer-denominated
//! radii are converted by the HTTP boundary before they get here.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters, matching the haversine constant used by the
/// membership contract.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS84 coordinate pair in decimal degrees. Value type, no identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lng: f64,
    pub lat: f64,
}

impl Point {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

/// Great-circle distance between two points in meters, via the haversine
/// formula. Symmetric: `haversine_distance_m(a, b) == haversine_distance_m(b, a)`.
pub fn haversine_distance_m(a: Point, b: Point) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Whether `point` lies within `radius_m` meters of `center`. The boundary is
/// inclusive: a point exactly on the circle counts as inside.
pub fn point_in_circle(point: Point, center: Point, radius_m: f64) -> bool {
    haversine_distance_m(point, center) <= radius_m
}

/// Even-odd ray-casting membership test against a single ring, implicitly
/// closed (the last vertex connects back to the first).
///
/// A ring with fewer than three vertices is degenerate and always answers
/// `false`; the loop structure guarantees that without a special case. Points
/// exactly on an edge or vertex get an implementation-dependent answer, per
/// the usual even-odd convention.
pub fn point_in_polygon(point: Point, outer_ring: &[Point]) -> bool {
    let mut inside = false;
    let mut j = outer_ring.len().saturating_sub(1);

    for (i, vertex) in outer_ring.iter().enumerate() {
        let prev = outer_ring[j];
        let straddles = (vertex.lat > point.lat) != (prev.lat > point.lat);
        if straddles {
            let x_cross =
                (prev.lng - vertex.lng) * (point.lat - vertex.lat) / (prev.lat - vertex.lat)
                    + vertex.lng;
            if point.lng < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAO_PAULO: Point = Point::new(-46.6333, -23.5505);

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    #[test]
    fn circle_always_contains_its_center() {
        assert!(point_in_circle(SAO_PAULO, SAO_PAULO, 1.0));
        assert!(point_in_circle(
            Point::new(151.2093, -33.8688),
            Point::new(151.2093, -33.8688),
            0.001
        ));
    }

    #[test]
    fn circle_boundary_is_inclusive() {
        let probe = Point::new(-46.6300, -23.5500);
        let distance = haversine_distance_m(probe, SAO_PAULO);
        assert!(point_in_circle(probe, SAO_PAULO, distance));
        assert!(!point_in_circle(probe, SAO_PAULO, distance - 0.001));
    }

    #[test]
    fn distance_is_exactly_symmetric() {
        let a = Point::new(-46.6333, -23.5505);
        let b = Point::new(-46.5000, -23.4000);
        assert_eq!(haversine_distance_m(a, b), haversine_distance_m(b, a));
    }

    #[test]
    fn sao_paulo_circle_scenario() {
        let near = Point::new(-46.6300, -23.5500);
        let far = Point::new(-46.5000, -23.4000);
        assert!(point_in_circle(near, SAO_PAULO, 1_500.0));
        assert!(!point_in_circle(far, SAO_PAULO, 1_500.0));
    }

    #[test]
    fn square_polygon_membership() {
        let ring = square();
        assert!(point_in_polygon(Point::new(5.0, 5.0), &ring));
        assert!(!point_in_polygon(Point::new(15.0, 5.0), &ring));
        assert!(!point_in_polygon(Point::new(-5.0, 5.0), &ring));
    }

    #[test]
    fn sao_paulo_polygon_scenario() {
        let ring = vec![
            Point::new(-46.65, -23.56),
            Point::new(-46.60, -23.56),
            Point::new(-46.60, -23.53),
            Point::new(-46.65, -23.53),
        ];
        assert!(point_in_polygon(Point::new(-46.62, -23.545), &ring));
        assert!(!point_in_polygon(Point::new(-46.70, -23.545), &ring));
    }

    #[test]
    fn degenerate_rings_never_match_and_never_panic() {
        let probes = [
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(-46.62, -23.545),
        ];
        let empty: Vec<Point> = Vec::new();
        let single = vec![Point::new(1.0, 1.0)];
        let pair = vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)];

        for probe in probes {
            assert!(!point_in_polygon(probe, &empty));
            assert!(!point_in_polygon(probe, &single));
            assert!(!point_in_polygon(probe, &pair));
        }
    }

    #[test]
    fn membership_is_idempotent() {
        let probe = Point::new(-46.6300, -23.5500);
        let ring = square();
        let first_circle = point_in_circle(probe, SAO_PAULO, 1_500.0);
        let first_polygon = point_in_polygon(Point::new(5.0, 5.0), &ring);
        for _ in 0..100 {
            assert_eq!(point_in_circle(probe, SAO_PAULO, 1_500.0), first_circle);
            assert_eq!(point_in_polygon(Point::new(5.0, 5.0), &ring), first_polygon);
        }
    }

    #[test]
    fn haversine_matches_known_distance() {
        // São Paulo to Rio de Janeiro is roughly 360 km.
        let rio = Point::new(-43.1729, -22.9068);
        let distance = haversine_distance_m(SAO_PAULO, rio);
        assert!(distance > 350_000.0 && distance < 370_000.0);
    }
}
