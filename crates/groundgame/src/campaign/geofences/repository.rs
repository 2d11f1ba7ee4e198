use super::domain::{Geofence, GeofenceId};
use crate::campaign::RepositoryError;

/// Storage abstraction for geofence definitions. Soft-deleted rows stay in
/// the store; filtering is the service's job.
pub trait GeofenceRepository: Send + Sync {
    fn insert(&self, geofence: Geofence) -> Result<Geofence, RepositoryError>;
    fn update(&self, geofence: Geofence) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &GeofenceId) -> Result<Option<Geofence>, RepositoryError>;
    fn list(&self) -> Result<Vec<Geofence>, RepositoryError>;
}
