use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::campaign::validate::{check_label, LabelError};
use crate::campaign::voters::VoterId;

/// Identifier wrapper for logged visits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisitId(pub String);

/// What happened at the door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitOutcome {
    Contacted,
    NotHome,
    Refused,
    Moved,
    BadAddress,
}

impl VisitOutcome {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Contacted => "contacted",
            Self::NotHome => "not_home",
            Self::Refused => "refused",
            Self::Moved => "moved",
            Self::BadAddress => "bad_address",
        }
    }

    pub const fn ordered() -> [Self; 5] {
        [
            Self::Contacted,
            Self::NotHome,
            Self::Refused,
            Self::Moved,
            Self::BadAddress,
        ]
    }
}

/// Intake payload for logging a visit. `visited_at` defaults to now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitSubmission {
    pub voter_id: VoterId,
    pub canvasser: String,
    pub outcome: VisitOutcome,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub visited_at: Option<DateTime<Utc>>,
}

impl VisitSubmission {
    pub fn validate(&self) -> Result<(), CanvassValidationError> {
        check_label(&self.canvasser).map_err(CanvassValidationError::Canvasser)
    }
}

/// A persisted canvassing visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvassVisit {
    pub id: VisitId,
    pub voter_id: VoterId,
    pub canvasser: String,
    pub outcome: VisitOutcome,
    pub note: Option<String>,
    pub visited_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum CanvassValidationError {
    #[error("canvasser name {0}")]
    Canvasser(LabelError),
}
