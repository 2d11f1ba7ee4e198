use std::collections::BTreeMap;
use std::sync::Arc;

use super::views::{CampaignSummary, OutcomeTally, ReferralTally, RegionCount, SupportSlice};
use super::AnalyticsError;
use crate::campaign::canvassing::{CanvassVisit, VisitOutcome, VisitRepository};
use crate::campaign::geofences::{Geofence, GeofenceId, GeofenceRepository};
use crate::campaign::voters::{SupportLevel, Voter, VoterRepository};

/// Read-only service tallying the roster, visit log, and geofences into a
/// dashboard summary. Each evaluation of the membership predicate is
/// independent, so the per-region counting is a plain iteration.
pub struct AnalyticsService<V, C, G> {
    voters: Arc<V>,
    visits: Arc<C>,
    geofences: Arc<G>,
}

impl<V, C, G> AnalyticsService<V, C, G>
where
    V: VoterRepository + 'static,
    C: VisitRepository + 'static,
    G: GeofenceRepository + 'static,
{
    pub fn new(voters: Arc<V>, visits: Arc<C>, geofences: Arc<G>) -> Self {
        Self {
            voters,
            visits,
            geofences,
        }
    }

    pub fn summary(&self) -> Result<CampaignSummary, AnalyticsError> {
        let voters = self.voters.list()?;
        let visits = self.visits.list()?;
        let geofences = self.geofences.list()?;
        Ok(build_summary(&voters, &visits, &geofences))
    }

    /// The roster filtered to voters inside one live geofence. Voters without
    /// a location never match.
    pub fn region_roster(&self, geofence_id: &GeofenceId) -> Result<Vec<Voter>, AnalyticsError> {
        let geofence = self
            .geofences
            .fetch(geofence_id)?
            .filter(Geofence::is_live)
            .ok_or_else(|| AnalyticsError::UnknownGeofence(geofence_id.clone()))?;

        let roster = self
            .voters
            .list()?
            .into_iter()
            .filter(|voter| {
                voter
                    .location
                    .map(|point| geofence.shape.contains(point))
                    .unwrap_or(false)
            })
            .collect();
        Ok(roster)
    }
}

pub(crate) fn build_summary(
    voters: &[Voter],
    visits: &[CanvassVisit],
    geofences: &[Geofence],
) -> CampaignSummary {
    let total_voters = voters.len();

    let support_breakdown = SupportLevel::ordered()
        .into_iter()
        .map(|level| {
            let count = voters.iter().filter(|voter| voter.support == level).count();
            SupportSlice {
                support: level,
                support_label: level.label(),
                count,
                pct: percentage(count, total_voters),
            }
        })
        .collect();

    let visit_outcomes = VisitOutcome::ordered()
        .into_iter()
        .map(|outcome| OutcomeTally {
            outcome,
            outcome_label: outcome.label(),
            count: visits.iter().filter(|visit| visit.outcome == outcome).count(),
        })
        .collect();

    let region_counts = geofences
        .iter()
        .filter(|geofence| geofence.is_live())
        .map(|geofence| RegionCount {
            geofence_id: geofence.id.clone(),
            name: geofence.name.clone(),
            voters_inside: voters
                .iter()
                .filter(|voter| {
                    voter
                        .location
                        .map(|point| geofence.shape.contains(point))
                        .unwrap_or(false)
                })
                .count(),
        })
        .collect();

    let mut referred: BTreeMap<&str, usize> = BTreeMap::new();
    for voter in voters {
        if let Some(source) = voter.referral_source.as_deref() {
            let source = source.trim();
            if !source.is_empty() {
                *referred.entry(source).or_insert(0) += 1;
            }
        }
    }
    let referred_total: usize = referred.values().sum();
    let mut referrals: Vec<ReferralTally> = referred
        .into_iter()
        .map(|(source, count)| ReferralTally {
            source: source.to_string(),
            count,
            share_pct: percentage(count, referred_total),
        })
        .collect();
    // BTreeMap iteration is name-ascending, so the stable sort keeps that as
    // the tie-break.
    referrals.sort_by(|a, b| b.count.cmp(&a.count));

    CampaignSummary {
        total_voters,
        support_breakdown,
        visit_outcomes,
        region_counts,
        referrals,
    }
}

/// Percentage with one decimal of precision; 0.0 when the denominator is
/// zero.
fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 * 1_000.0 / total as f64).round() / 10.0
}
