use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::campaign::validate::{check_label, check_point, CoordinateError, LabelError};
use crate::geo::{point_in_circle, point_in_polygon, Point};

/// Identifier wrapper for geofences.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeofenceId(pub String);

/// Stored geofence shape. Radii are meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeofenceShape {
    Circle { center: Point, radius_m: f64 },
    Polygon { rings: Vec<Vec<Point>> },
}

impl GeofenceShape {
    /// Membership test for a query point. Polygons consult only the first
    /// (outer) ring; any further rings in stored data are ignored, a known
    /// limitation carried over from the original dashboard.
    pub fn contains(&self, point: Point) -> bool {
        match self {
            Self::Circle { center, radius_m } => point_in_circle(point, *center, *radius_m),
            Self::Polygon { rings } => rings
                .first()
                .map(|ring| point_in_polygon(point, ring))
                .unwrap_or(false),
        }
    }
}

/// Shape as submitted by the dashboard; circle radii arrive in kilometers
/// and are converted to meters here, at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeSubmission {
    Circle { center: Point, radius_km: f64 },
    Polygon { rings: Vec<Vec<Point>> },
}

impl ShapeSubmission {
    pub fn validate(&self) -> Result<(), GeofenceValidationError> {
        match self {
            Self::Circle { center, radius_km } => {
                check_point(*center)?;
                // NaN radii fail this check too.
                if !(radius_km.is_finite() && *radius_km > 0.0) {
                    return Err(GeofenceValidationError::NonPositiveRadius(*radius_km));
                }
            }
            Self::Polygon { rings } => {
                let outer = rings
                    .first()
                    .ok_or(GeofenceValidationError::EmptyPolygon)?;
                if outer.len() < 3 {
                    return Err(GeofenceValidationError::OuterRingTooSmall(outer.len()));
                }
                for ring in rings {
                    for vertex in ring {
                        check_point(*vertex)?;
                    }
                }
            }
        }
        Ok(())
    }

    pub fn into_shape(self) -> GeofenceShape {
        match self {
            Self::Circle { center, radius_km } => GeofenceShape::Circle {
                center,
                radius_m: radius_km * 1_000.0,
            },
            Self::Polygon { rings } => GeofenceShape::Polygon { rings },
        }
    }
}

/// Intake payload for creating or replacing a geofence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeofenceSubmission {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    pub shape: ShapeSubmission,
}

fn default_active() -> bool {
    true
}

impl GeofenceSubmission {
    pub fn validate(&self) -> Result<(), GeofenceValidationError> {
        check_label(&self.name).map_err(GeofenceValidationError::Name)?;
        self.shape.validate()
    }
}

/// A persisted geofence. `deleted_at` is a soft-delete tombstone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geofence {
    pub id: GeofenceId,
    pub name: String,
    pub color: Option<String>,
    pub shape: GeofenceShape,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Geofence {
    /// Live geofences participate in membership queries and analytics.
    pub fn is_live(&self) -> bool {
        self.active && self.deleted_at.is_none()
    }
}

/// Ad hoc membership probe for the check endpoint; no stored geofence is
/// involved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipProbe {
    pub point: Point,
    #[serde(flatten)]
    pub target: ShapeSubmission,
}

#[derive(Debug, thiserror::Error)]
pub enum GeofenceValidationError {
    #[error("name {0}")]
    Name(LabelError),
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),
    #[error("radius must be positive, got {0} km")]
    NonPositiveRadius(f64),
    #[error("polygon must have at least one ring")]
    EmptyPolygon,
    #[error("outer ring needs at least 3 vertices, got {0}")]
    OuterRingTooSmall(usize),
}
