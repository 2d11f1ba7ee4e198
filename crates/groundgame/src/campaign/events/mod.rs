//! Calendar events: rallies, phone banks, volunteer shifts.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{CampaignEvent, EventId, EventSubmission, EventValidationError};
pub use repository::EventRepository;
pub use router::event_router;
pub use service::{EventService, EventServiceError};
