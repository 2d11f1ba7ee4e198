use std::io::Read;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use super::domain::{Voter, VoterId, VoterSubmission, VoterValidationError};
use super::repository::VoterRepository;
use super::roster::{self, RosterError};
use crate::campaign::notifications::{
    CampaignNotification, NotificationError, NotificationPublisher, NotificationTopic,
};
use crate::campaign::RepositoryError;

/// Service composing roster validation, persistence, and change notifications.
pub struct VoterService<R, P> {
    repository: Arc<R>,
    notifications: Arc<P>,
}

static VOTER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_voter_id() -> VoterId {
    let id = VOTER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    VoterId(format!("vtr-{id:06}"))
}

impl<R, P> VoterService<R, P>
where
    R: VoterRepository + 'static,
    P: NotificationPublisher + 'static,
{
    pub fn new(repository: Arc<R>, notifications: Arc<P>) -> Self {
        Self {
            repository,
            notifications,
        }
    }

    /// Register a new voter, returning the repository-backed record.
    pub fn register(&self, submission: VoterSubmission) -> Result<Voter, VoterServiceError> {
        submission.validate()?;
        let voter = Voter::from_submission(next_voter_id(), submission, Utc::now());
        let stored = self.repository.insert(voter)?;

        self.notifications.publish(CampaignNotification {
            topic: NotificationTopic::VoterAdded,
            subject_id: stored.id.0.clone(),
            detail: format!("{} added to roster", stored.full_name),
        })?;

        Ok(stored)
    }

    /// Replace a voter's details; id and registration timestamp are kept.
    pub fn update(
        &self,
        id: &VoterId,
        submission: VoterSubmission,
    ) -> Result<Voter, VoterServiceError> {
        submission.validate()?;
        let existing = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;

        let updated = Voter::from_submission(existing.id.clone(), submission, existing.created_at);
        self.repository.update(updated.clone())?;

        self.notifications.publish(CampaignNotification {
            topic: NotificationTopic::VoterUpdated,
            subject_id: updated.id.0.clone(),
            detail: format!("{} updated", updated.full_name),
        })?;

        Ok(updated)
    }

    pub fn get(&self, id: &VoterId) -> Result<Voter, VoterServiceError> {
        let voter = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(voter)
    }

    pub fn list(&self) -> Result<Vec<Voter>, VoterServiceError> {
        Ok(self.repository.list()?)
    }

    /// Import a CSV roster export. Malformed rows are skipped, not fatal;
    /// repository and channel failures still abort the import.
    pub fn import_roster<S: Read>(
        &self,
        reader: S,
    ) -> Result<RosterImportSummary, VoterServiceError> {
        let lines = roster::parse_roster(reader).map_err(RosterError::from)?;

        let mut imported = Vec::new();
        let mut skipped = Vec::new();
        for entry in lines {
            match entry.outcome {
                Ok(submission) => match self.register(submission) {
                    Ok(voter) => imported.push(voter.id),
                    Err(VoterServiceError::Validation(err)) => {
                        let reason = err.to_string();
                        debug!(line = entry.line, %reason, "roster row failed validation");
                        skipped.push(RosterSkip {
                            line: entry.line,
                            reason,
                        });
                    }
                    Err(other) => return Err(other),
                },
                Err(reason) => {
                    debug!(line = entry.line, %reason, "roster row skipped");
                    skipped.push(RosterSkip {
                        line: entry.line,
                        reason,
                    });
                }
            }
        }

        Ok(RosterImportSummary { imported, skipped })
    }

    pub fn export_roster(&self) -> Result<String, VoterServiceError> {
        let voters = self.repository.list()?;
        Ok(roster::write_roster(&voters)?)
    }
}

/// Outcome of a bulk roster import.
#[derive(Debug, Clone, Serialize)]
pub struct RosterImportSummary {
    pub imported: Vec<VoterId>,
    pub skipped: Vec<RosterSkip>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterSkip {
    pub line: u64,
    pub reason: String,
}

/// Error raised by the voter service.
#[derive(Debug, thiserror::Error)]
pub enum VoterServiceError {
    #[error(transparent)]
    Validation(#[from] VoterValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
    #[error(transparent)]
    Roster(#[from] RosterError),
}
