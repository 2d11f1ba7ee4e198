use super::domain::{CampaignEvent, EventId};
use crate::campaign::RepositoryError;

/// Storage abstraction for the campaign calendar.
pub trait EventRepository: Send + Sync {
    fn insert(&self, event: CampaignEvent) -> Result<CampaignEvent, RepositoryError>;
    fn fetch(&self, id: &EventId) -> Result<Option<CampaignEvent>, RepositoryError>;
    fn list(&self) -> Result<Vec<CampaignEvent>, RepositoryError>;
    fn remove(&self, id: &EventId) -> Result<(), RepositoryError>;
}
