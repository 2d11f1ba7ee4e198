use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use super::domain::{CampaignEvent, EventId, EventSubmission, EventValidationError};
use super::repository::EventRepository;
use crate::campaign::notifications::{
    CampaignNotification, NotificationError, NotificationPublisher, NotificationTopic,
};
use crate::campaign::RepositoryError;

/// Service for the campaign calendar.
pub struct EventService<R, P> {
    repository: Arc<R>,
    notifications: Arc<P>,
}

static EVENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_event_id() -> EventId {
    let id = EVENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EventId(format!("evt-{id:06}"))
}

impl<R, P> EventService<R, P>
where
    R: EventRepository + 'static,
    P: NotificationPublisher + 'static,
{
    pub fn new(repository: Arc<R>, notifications: Arc<P>) -> Self {
        Self {
            repository,
            notifications,
        }
    }

    pub fn schedule(
        &self,
        submission: EventSubmission,
    ) -> Result<CampaignEvent, EventServiceError> {
        submission.validate()?;

        let event = CampaignEvent {
            id: next_event_id(),
            title: submission.title,
            starts_at: submission.starts_at,
            ends_at: submission.ends_at,
            location_name: submission.location_name,
            location: submission.location,
            description: submission.description,
            created_at: Utc::now(),
        };
        let stored = self.repository.insert(event)?;

        self.notifications.publish(CampaignNotification {
            topic: NotificationTopic::EventScheduled,
            subject_id: stored.id.0.clone(),
            detail: format!("{} scheduled for {}", stored.title, stored.starts_at),
        })?;

        Ok(stored)
    }

    pub fn get(&self, id: &EventId) -> Result<CampaignEvent, EventServiceError> {
        let event = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(event)
    }

    /// Calendar listing in chronological order.
    pub fn list(&self) -> Result<Vec<CampaignEvent>, EventServiceError> {
        let mut events = self.repository.list()?;
        events.sort_by_key(|event| event.starts_at);
        Ok(events)
    }

    pub fn cancel(&self, id: &EventId) -> Result<(), EventServiceError> {
        let event = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        self.repository.remove(id)?;

        self.notifications.publish(CampaignNotification {
            topic: NotificationTopic::EventCancelled,
            subject_id: event.id.0.clone(),
            detail: format!("{} cancelled", event.title),
        })?;

        Ok(())
    }
}

/// Error raised by the event service.
#[derive(Debug, thiserror::Error)]
pub enum EventServiceError {
    #[error(transparent)]
    Validation(#[from] EventValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
}
