//! Geofence definitions and membership checks.
//!
//! Shapes store distances in meters; kilometer-denominated radii from the
//! dashboard are converted once, at intake. Soft delete keeps a tombstone
//! timestamp so regions can be recovered from the database by hand.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    Geofence, GeofenceId, GeofenceShape, GeofenceSubmission, GeofenceValidationError,
    MembershipProbe, ShapeSubmission,
};
pub use repository::GeofenceRepository;
pub use router::geofence_router;
pub use service::{GeofenceService, GeofenceServiceError};
