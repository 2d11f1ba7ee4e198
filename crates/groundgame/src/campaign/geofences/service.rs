use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{
    Geofence, GeofenceId, GeofenceSubmission, GeofenceValidationError, MembershipProbe,
};
use super::repository::GeofenceRepository;
use crate::campaign::notifications::{
    CampaignNotification, NotificationError, NotificationPublisher, NotificationTopic,
};
use crate::campaign::validate::check_point;
use crate::campaign::RepositoryError;

/// Service for geofence definitions and ad hoc membership probes.
pub struct GeofenceService<R, P> {
    repository: Arc<R>,
    notifications: Arc<P>,
}

static GEOFENCE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_geofence_id() -> GeofenceId {
    let id = GEOFENCE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    GeofenceId(format!("gf-{id:06}"))
}

impl<R, P> GeofenceService<R, P>
where
    R: GeofenceRepository + 'static,
    P: NotificationPublisher + 'static,
{
    pub fn new(repository: Arc<R>, notifications: Arc<P>) -> Self {
        Self {
            repository,
            notifications,
        }
    }

    pub fn create(&self, submission: GeofenceSubmission) -> Result<Geofence, GeofenceServiceError> {
        submission.validate()?;

        let geofence = Geofence {
            id: next_geofence_id(),
            name: submission.name,
            color: submission.color,
            shape: submission.shape.into_shape(),
            active: submission.active,
            created_at: Utc::now(),
            deleted_at: None,
        };
        let stored = self.repository.insert(geofence)?;

        self.notifications.publish(CampaignNotification {
            topic: NotificationTopic::GeofenceCreated,
            subject_id: stored.id.0.clone(),
            detail: format!("{} created", stored.name),
        })?;

        Ok(stored)
    }

    /// Replace a geofence's definition wholesale. A shape-kind change simply
    /// swaps the stored coordinates for the new ones. Tombstoned geofences
    /// cannot be edited.
    pub fn update(
        &self,
        id: &GeofenceId,
        submission: GeofenceSubmission,
    ) -> Result<Geofence, GeofenceServiceError> {
        submission.validate()?;
        let existing = self.live(id)?;

        let updated = Geofence {
            id: existing.id.clone(),
            name: submission.name,
            color: submission.color,
            shape: submission.shape.into_shape(),
            active: submission.active,
            created_at: existing.created_at,
            deleted_at: None,
        };
        self.repository.update(updated.clone())?;

        self.notifications.publish(CampaignNotification {
            topic: NotificationTopic::GeofenceUpdated,
            subject_id: updated.id.0.clone(),
            detail: format!("{} updated", updated.name),
        })?;

        Ok(updated)
    }

    pub fn get(&self, id: &GeofenceId) -> Result<Geofence, GeofenceServiceError> {
        self.live(id)
    }

    /// All non-deleted geofences, inactive ones included so the dashboard can
    /// re-enable them.
    pub fn list(&self) -> Result<Vec<Geofence>, GeofenceServiceError> {
        let geofences = self
            .repository
            .list()?
            .into_iter()
            .filter(|geofence| geofence.deleted_at.is_none())
            .collect();
        Ok(geofences)
    }

    /// Soft delete: stamp the tombstone, keep the row.
    pub fn remove(&self, id: &GeofenceId) -> Result<(), GeofenceServiceError> {
        let mut geofence = self.live(id)?;
        geofence.deleted_at = Some(Utc::now());
        self.repository.update(geofence.clone())?;
        info!(geofence_id = %geofence.id.0, "geofence tombstoned");

        self.notifications.publish(CampaignNotification {
            topic: NotificationTopic::GeofenceDeleted,
            subject_id: geofence.id.0.clone(),
            detail: format!("{} deleted", geofence.name),
        })?;

        Ok(())
    }

    /// Ad hoc membership check against a submitted shape.
    pub fn probe(&self, probe: MembershipProbe) -> Result<bool, GeofenceServiceError> {
        check_point(probe.point).map_err(GeofenceValidationError::from)?;
        probe.target.validate()?;
        Ok(probe.target.into_shape().contains(probe.point))
    }

    fn live(&self, id: &GeofenceId) -> Result<Geofence, GeofenceServiceError> {
        let geofence = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        if geofence.deleted_at.is_some() {
            return Err(RepositoryError::NotFound.into());
        }
        Ok(geofence)
    }
}

/// Error raised by the geofence service.
#[derive(Debug, thiserror::Error)]
pub enum GeofenceServiceError {
    #[error(transparent)]
    Validation(#[from] GeofenceValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
}
