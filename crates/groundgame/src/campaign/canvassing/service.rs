use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use super::domain::{CanvassValidationError, CanvassVisit, VisitId, VisitSubmission};
use super::repository::VisitRepository;
use crate::campaign::notifications::{
    CampaignNotification, NotificationError, NotificationPublisher, NotificationTopic,
};
use crate::campaign::voters::{VoterId, VoterRepository};
use crate::campaign::RepositoryError;

/// Service logging visits against the roster. A visit can only be recorded
/// for a voter that exists.
pub struct CanvassService<R, V, P> {
    visits: Arc<R>,
    voters: Arc<V>,
    notifications: Arc<P>,
}

static VISIT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_visit_id() -> VisitId {
    let id = VISIT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    VisitId(format!("vis-{id:06}"))
}

impl<R, V, P> CanvassService<R, V, P>
where
    R: VisitRepository + 'static,
    V: VoterRepository + 'static,
    P: NotificationPublisher + 'static,
{
    pub fn new(visits: Arc<R>, voters: Arc<V>, notifications: Arc<P>) -> Self {
        Self {
            visits,
            voters,
            notifications,
        }
    }

    pub fn log_visit(
        &self,
        submission: VisitSubmission,
    ) -> Result<CanvassVisit, CanvassServiceError> {
        submission.validate()?;

        let voter = self
            .voters
            .fetch(&submission.voter_id)?
            .ok_or_else(|| CanvassServiceError::UnknownVoter(submission.voter_id.clone()))?;

        let visit = CanvassVisit {
            id: next_visit_id(),
            voter_id: submission.voter_id,
            canvasser: submission.canvasser,
            outcome: submission.outcome,
            note: submission.note,
            visited_at: submission.visited_at.unwrap_or_else(Utc::now),
        };
        let stored = self.visits.insert(visit)?;

        self.notifications.publish(CampaignNotification {
            topic: NotificationTopic::VisitLogged,
            subject_id: stored.id.0.clone(),
            detail: format!(
                "{} visited by {} ({})",
                voter.full_name,
                stored.canvasser,
                stored.outcome.label()
            ),
        })?;

        Ok(stored)
    }

    /// Visits, optionally narrowed to one voter.
    pub fn visits(
        &self,
        voter_id: Option<&VoterId>,
    ) -> Result<Vec<CanvassVisit>, CanvassServiceError> {
        let visits = match voter_id {
            Some(id) => self.visits.for_voter(id)?,
            None => self.visits.list()?,
        };
        Ok(visits)
    }
}

/// Error raised by the canvassing service.
#[derive(Debug, thiserror::Error)]
pub enum CanvassServiceError {
    #[error(transparent)]
    Validation(#[from] CanvassValidationError),
    #[error("voter '{}' not found", .0 .0)]
    UnknownVoter(VoterId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
}
