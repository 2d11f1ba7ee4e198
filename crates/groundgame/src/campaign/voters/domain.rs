use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::campaign::validate::{check_label, check_point, CoordinateError, LabelError};
use crate::geo::Point;

/// Identifier wrapper for roster entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoterId(pub String);

/// Canvass-derived support classification tracked per voter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportLevel {
    Strong,
    Lean,
    Undecided,
    Opposed,
    Unknown,
}

impl SupportLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Lean => "lean",
            Self::Undecided => "undecided",
            Self::Opposed => "opposed",
            Self::Unknown => "unknown",
        }
    }

    pub const fn ordered() -> [Self; 5] {
        [
            Self::Strong,
            Self::Lean,
            Self::Undecided,
            Self::Opposed,
            Self::Unknown,
        ]
    }

    /// Lenient mapping for roster CSV imports; anything unrecognized lands in
    /// `Unknown` rather than failing the row.
    pub fn from_loose_label(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "strong" | "strong support" | "supporter" => Self::Strong,
            "lean" | "leaning" | "lean support" => Self::Lean,
            "undecided" | "neutral" => Self::Undecided,
            "opposed" | "against" | "opponent" => Self::Opposed,
            _ => Self::Unknown,
        }
    }
}

/// Intake payload for registering or replacing a roster entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoterSubmission {
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub location: Option<Point>,
    #[serde(default = "default_support")]
    pub support: SupportLevel,
    #[serde(default)]
    pub referral_source: Option<String>,
}

fn default_support() -> SupportLevel {
    SupportLevel::Unknown
}

impl VoterSubmission {
    pub fn validate(&self) -> Result<(), VoterValidationError> {
        check_label(&self.full_name).map_err(VoterValidationError::Name)?;
        if let Some(location) = self.location {
            check_point(location)?;
        }
        Ok(())
    }
}

/// A persisted roster entry. Voters without a location never match any
/// geofence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voter {
    pub id: VoterId,
    pub full_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub location: Option<Point>,
    pub support: SupportLevel,
    pub referral_source: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Voter {
    pub fn from_submission(
        id: VoterId,
        submission: VoterSubmission,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            full_name: submission.full_name,
            phone: submission.phone,
            email: submission.email,
            address: submission.address,
            location: submission.location,
            support: submission.support,
            referral_source: submission.referral_source,
            created_at,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VoterValidationError {
    #[error("full name {0}")]
    Name(LabelError),
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),
}
