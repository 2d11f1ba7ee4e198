//! Dashboard analytics: support breakdowns, canvass tallies, per-region
//! counts, and referral shares.

pub mod router;
pub mod summary;
pub mod views;

pub use router::analytics_router;
pub use summary::AnalyticsService;
pub use views::{CampaignSummary, OutcomeTally, ReferralTally, RegionCount, SupportSlice};

use crate::campaign::geofences::GeofenceId;
use crate::campaign::RepositoryError;

/// Error raised by the analytics service.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("geofence '{}' not found", .0 .0)]
    UnknownGeofence(GeofenceId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
