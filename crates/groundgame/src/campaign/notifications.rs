use serde::{Deserialize, Serialize};

/// Topics relayed to dashboard subscribers when campaign data changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationTopic {
    VoterAdded,
    VoterUpdated,
    VisitLogged,
    EventScheduled,
    EventCancelled,
    GeofenceCreated,
    GeofenceUpdated,
    GeofenceDeleted,
}

impl NotificationTopic {
    pub const fn label(self) -> &'static str {
        match self {
            Self::VoterAdded => "voter_added",
            Self::VoterUpdated => "voter_updated",
            Self::VisitLogged => "visit_logged",
            Self::EventScheduled => "event_scheduled",
            Self::EventCancelled => "event_cancelled",
            Self::GeofenceCreated => "geofence_created",
            Self::GeofenceUpdated => "geofence_updated",
            Self::GeofenceDeleted => "geofence_deleted",
        }
    }
}

/// Payload pushed over the notification channel on every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignNotification {
    pub topic: NotificationTopic,
    pub subject_id: String,
    pub detail: String,
}

/// Trait describing outbound fan-out hooks (WebSocket relay, test recorders).
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notification: CampaignNotification) -> Result<(), NotificationError>;
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification channel unavailable: {0}")]
    Channel(String),
}
