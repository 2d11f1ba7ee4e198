use crate::infra::{
    InMemoryGeofenceRepository, InMemoryNotificationPublisher, InMemoryVisitRepository,
    InMemoryVoterRepository,
};
use chrono::{Duration, Utc};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use groundgame::campaign::analytics::AnalyticsService;
use groundgame::campaign::canvassing::{CanvassService, VisitOutcome, VisitSubmission};
use groundgame::campaign::geofences::{GeofenceService, GeofenceSubmission, ShapeSubmission};
use groundgame::campaign::voters::{SupportLevel, VoterService, VoterSubmission};
use groundgame::error::AppError;
use groundgame::geo::Point;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Write the seeded voter roster as CSV to this path
    #[arg(long)]
    pub(crate) roster_out: Option<PathBuf>,
    /// Skip seeding canvassing visits
    #[arg(long)]
    pub(crate) skip_canvassing: bool,
}

fn voter(
    name: &str,
    location: Option<Point>,
    support: SupportLevel,
    referral: Option<&str>,
) -> VoterSubmission {
    VoterSubmission {
        full_name: name.to_string(),
        phone: None,
        email: None,
        address: None,
        location,
        support,
        referral_source: referral.map(str::to_string),
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let publisher = Arc::new(InMemoryNotificationPublisher::default());
    let voter_repository = Arc::new(InMemoryVoterRepository::default());
    let visit_repository = Arc::new(InMemoryVisitRepository::default());
    let geofence_repository = Arc::new(InMemoryGeofenceRepository::default());

    let voters = VoterService::new(voter_repository.clone(), publisher.clone());
    let canvassing = CanvassService::new(
        visit_repository.clone(),
        voter_repository.clone(),
        publisher.clone(),
    );
    let geofences = GeofenceService::new(geofence_repository.clone(), publisher.clone());
    let analytics = AnalyticsService::new(voter_repository, visit_repository, geofence_repository);

    // Two live regions around central São Paulo, plus one that gets
    // tombstoned to show the soft delete flowing through analytics.
    geofences.create(GeofenceSubmission {
        name: "Centro 1.5km".to_string(),
        color: Some("#2563eb".to_string()),
        active: true,
        shape: ShapeSubmission::Circle {
            center: Point::new(-46.6333, -23.5505),
            radius_km: 1.5,
        },
    })?;
    geofences.create(GeofenceSubmission {
        name: "República quad".to_string(),
        color: Some("#16a34a".to_string()),
        active: true,
        shape: ShapeSubmission::Polygon {
            rings: vec![vec![
                Point::new(-46.65, -23.56),
                Point::new(-46.60, -23.56),
                Point::new(-46.60, -23.53),
                Point::new(-46.65, -23.53),
            ]],
        },
    })?;
    let retired = geofences.create(GeofenceSubmission {
        name: "Old HQ walk radius".to_string(),
        color: None,
        active: true,
        shape: ShapeSubmission::Circle {
            center: Point::new(-46.7000, -23.6000),
            radius_km: 0.5,
        },
    })?;
    geofences.remove(&retired.id)?;

    let ana = voters.register(voter(
        "Ana Souza",
        Some(Point::new(-46.6300, -23.5500)),
        SupportLevel::Strong,
        Some("door-hanger"),
    ))?;
    let bruno = voters.register(voter(
        "Bruno Lima",
        Some(Point::new(-46.6200, -23.5450)),
        SupportLevel::Lean,
        Some("friend"),
    ))?;
    voters.register(voter(
        "Carla Dias",
        None,
        SupportLevel::Opposed,
        Some("friend"),
    ))?;
    voters.register(voter(
        "Diego Alves",
        Some(Point::new(-46.5000, -23.4000)),
        SupportLevel::Undecided,
        None,
    ))?;

    if !args.skip_canvassing {
        canvassing.log_visit(VisitSubmission {
            voter_id: ana.id.clone(),
            canvasser: "Marina".to_string(),
            outcome: VisitOutcome::Contacted,
            note: Some("wants a yard sign".to_string()),
            visited_at: Some(Utc::now() - Duration::days(1)),
        })?;
        canvassing.log_visit(VisitSubmission {
            voter_id: bruno.id.clone(),
            canvasser: "Marina".to_string(),
            outcome: VisitOutcome::NotHome,
            note: None,
            visited_at: None,
        })?;
    }

    let summary = analytics.summary()?;

    println!("Campaign summary");
    println!("  voters: {}", summary.total_voters);
    for slice in &summary.support_breakdown {
        println!(
            "  support {:<10} {:>3} ({:.1}%)",
            slice.support_label, slice.count, slice.pct
        );
    }
    for tally in &summary.visit_outcomes {
        println!("  visits {:<12} {:>3}", tally.outcome_label, tally.count);
    }
    for region in &summary.region_counts {
        println!(
            "  region {:<20} {:>3} voters inside",
            region.name, region.voters_inside
        );
    }
    for referral in &summary.referrals {
        println!(
            "  referral {:<12} {:>3} ({:.1}%)",
            referral.source, referral.count, referral.share_pct
        );
    }

    println!("Notifications published:");
    for notification in publisher.events() {
        println!("  [{}] {}", notification.topic.label(), notification.detail);
    }

    if let Some(path) = args.roster_out {
        let csv_text = voters.export_roster()?;
        std::fs::write(&path, csv_text)?;
        println!("roster written to {}", path.display());
    }

    Ok(())
}
