use super::domain::CanvassVisit;
use crate::campaign::voters::VoterId;
use crate::campaign::RepositoryError;

/// Storage abstraction for logged visits.
pub trait VisitRepository: Send + Sync {
    fn insert(&self, visit: CanvassVisit) -> Result<CanvassVisit, RepositoryError>;
    fn list(&self) -> Result<Vec<CanvassVisit>, RepositoryError>;
    fn for_voter(&self, voter_id: &VoterId) -> Result<Vec<CanvassVisit>, RepositoryError>;
}
