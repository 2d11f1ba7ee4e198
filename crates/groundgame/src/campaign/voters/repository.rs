use super::domain::{Voter, VoterId};
use crate::campaign::RepositoryError;

/// Storage abstraction so the service module can be exercised in isolation.
pub trait VoterRepository: Send + Sync {
    fn insert(&self, voter: Voter) -> Result<Voter, RepositoryError>;
    fn update(&self, voter: Voter) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &VoterId) -> Result<Option<Voter>, RepositoryError>;
    fn list(&self) -> Result<Vec<Voter>, RepositoryError>;
}
