//! Canvassing visit logging against the voter roster.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{CanvassValidationError, CanvassVisit, VisitId, VisitOutcome, VisitSubmission};
pub use repository::VisitRepository;
pub use router::canvass_router;
pub use service::{CanvassService, CanvassServiceError};
