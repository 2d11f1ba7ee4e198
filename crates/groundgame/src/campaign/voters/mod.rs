//! Voter roster intake, CSV import/export, and lookup.

pub mod domain;
pub mod repository;
pub mod roster;
pub mod router;
pub mod service;

pub use domain::{SupportLevel, Voter, VoterId, VoterSubmission, VoterValidationError};
pub use repository::VoterRepository;
pub use roster::RosterError;
pub use router::voter_router;
pub use service::{RosterImportSummary, RosterSkip, VoterService, VoterServiceError};
