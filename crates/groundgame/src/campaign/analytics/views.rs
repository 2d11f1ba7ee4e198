use serde::Serialize;

use crate::campaign::canvassing::VisitOutcome;
use crate::campaign::geofences::GeofenceId;
use crate::campaign::voters::SupportLevel;

#[derive(Debug, Clone, Serialize)]
pub struct SupportSlice {
    pub support: SupportLevel,
    pub support_label: &'static str,
    pub count: usize,
    pub pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutcomeTally {
    pub outcome: VisitOutcome,
    pub outcome_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionCount {
    pub geofence_id: GeofenceId,
    pub name: String,
    pub voters_inside: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReferralTally {
    pub source: String,
    pub count: usize,
    pub share_pct: f64,
}

/// Aggregate snapshot rendered on the campaign dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignSummary {
    pub total_voters: usize,
    pub support_breakdown: Vec<SupportSlice>,
    pub visit_outcomes: Vec<OutcomeTally>,
    pub region_counts: Vec<RegionCount>,
    pub referrals: Vec<ReferralTally>,
}
