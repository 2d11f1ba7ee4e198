use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::campaign::validate::{check_label, check_point, CoordinateError, LabelError};
use crate::geo::Point;

/// Identifier wrapper for scheduled events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub String);

/// Intake payload for scheduling an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSubmission {
    pub title: String,
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub location: Option<Point>,
    #[serde(default)]
    pub description: Option<String>,
}

impl EventSubmission {
    pub fn validate(&self) -> Result<(), EventValidationError> {
        check_label(&self.title).map_err(EventValidationError::Title)?;
        if let Some(ends_at) = self.ends_at {
            if ends_at < self.starts_at {
                return Err(EventValidationError::EndsBeforeStart);
            }
        }
        if let Some(location) = self.location {
            check_point(location)?;
        }
        Ok(())
    }
}

/// A scheduled calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignEvent {
    pub id: EventId,
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub location_name: Option<String>,
    pub location: Option<Point>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum EventValidationError {
    #[error("title {0}")]
    Title(LabelError),
    #[error("event must not end before it starts")]
    EndsBeforeStart,
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),
}
